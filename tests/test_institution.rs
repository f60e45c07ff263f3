use std::collections::{HashMap, HashSet};

use chrono::Weekday;
use timetable_ga::{
    chromosome::ChromosomeEncoding,
    constraints::ViolationKind,
    error::TimetableError,
    evolution::{EvolutionOptions, NoopObserver},
    rng::RandomNumberGenerator,
    scheduling::{
        institution::{InstitutionEncoding, InstitutionProblem, InstitutionScheduler},
        model::{Course, TeacherAvailabilityWindow, TeacherCourse, Timeslot},
    },
};

fn seeded_options(generations: usize, parents: usize, population: usize, seed: u64) -> EvolutionOptions {
    EvolutionOptions::builder()
        .num_generations(generations)
        .num_parents_mating(parents)
        .sol_per_pop(population)
        .mutation_percent_genes(10.0)
        .seed(seed)
        .build()
        .unwrap()
}

fn whole_week(teacher: &str) -> Vec<TeacherAvailabilityWindow> {
    [Weekday::Sun, Weekday::Mon, Weekday::Tue, Weekday::Wed, Weekday::Thu]
        .iter()
        .map(|&day| TeacherAvailabilityWindow::parse(teacher, day, "08:00", "17:00").unwrap())
        .collect()
}

#[test]
fn test_single_teacher_reaches_feasible_schedule() {
    let problem = InstitutionProblem::new(
        &[Course::new("CS101", 2)],
        vec!["R1".to_string()],
        &[TeacherCourse::new("T1", "CS101")],
        whole_week("T1"),
    )
    .unwrap();

    let outcome = InstitutionScheduler::new(problem, seeded_options(200, 4, 20, 42))
        .unwrap()
        .run_with_observer(&mut NoopObserver)
        .unwrap();

    assert_eq!(outcome.penalty, 0);
    assert!(outcome.is_feasible());
    assert!(outcome.violations.is_empty());
    assert_eq!(outcome.schedule.len(), 2);
    assert_ne!(outcome.schedule[0].timeslot, outcome.schedule[1].timeslot);
    assert!(outcome.schedule.iter().all(|l| l.course_id == "CS101" && l.room_id == "R1"));
}

#[test]
fn test_unavoidable_room_clash_is_penalized_once() {
    let slot = Timeslot::at_hour(Weekday::Mon, 9).unwrap();
    let mut windows = whole_week("T1");
    windows.extend(whole_week("T2"));

    let problem = InstitutionProblem::new(
        &[Course::new("CS101", 1), Course::new("MA201", 1)],
        vec!["R1".to_string()],
        &[TeacherCourse::new("T1", "CS101"), TeacherCourse::new("T2", "MA201")],
        windows,
    )
    .unwrap()
    .with_timeslots(vec![slot])
    .unwrap();

    let outcome = InstitutionScheduler::new(problem, seeded_options(20, 2, 6, 3))
        .unwrap()
        .run_with_observer(&mut NoopObserver)
        .unwrap();

    assert_eq!(outcome.penalty, 1000);
    assert_eq!(outcome.violations.len(), 1);
    assert_eq!(outcome.violations[0].kind(), ViolationKind::RoomDoubleBooked);
}

#[test]
fn test_every_requirement_scheduled_exactly_once() {
    let courses = [Course::new("CS101", 3), Course::new("MA201", 2), Course::new("PH301", 1)];
    let teacher_courses = [
        TeacherCourse::new("T1", "CS101"),
        TeacherCourse::new("T2", "MA201"),
        TeacherCourse::new("T1", "PH301"),
        TeacherCourse::new("T3", "MA201"),
    ];
    let problem = InstitutionProblem::new(
        &courses,
        vec!["R1".to_string(), "R2".to_string()],
        &teacher_courses,
        whole_week("T1"),
    )
    .unwrap();

    let outcome = InstitutionScheduler::new(problem, seeded_options(10, 3, 10, 9))
        .unwrap()
        .run_with_observer(&mut NoopObserver)
        .unwrap();

    let mut counts: HashMap<(String, String), usize> = HashMap::new();
    for lecture in &outcome.schedule {
        *counts
            .entry((lecture.teacher_id.clone(), lecture.course_id.clone()))
            .or_default() += 1;
    }

    assert_eq!(outcome.schedule.len(), 8);
    assert_eq!(counts[&("T1".to_string(), "CS101".to_string())], 3);
    assert_eq!(counts[&("T2".to_string(), "MA201".to_string())], 2);
    assert_eq!(counts[&("T1".to_string(), "PH301".to_string())], 1);
    assert_eq!(counts[&("T3".to_string(), "MA201".to_string())], 2);
}

#[test]
fn test_random_chromosomes_decode_into_known_rooms_and_slots() {
    let problem = InstitutionProblem::new(
        &[Course::new("CS101", 4)],
        vec!["R1".to_string(), "R2".to_string(), "R3".to_string()],
        &[TeacherCourse::new("T1", "CS101")],
        Vec::new(),
    )
    .unwrap();
    let encoding = InstitutionEncoding::new(&problem).unwrap();
    let rooms: HashSet<&String> = problem.classrooms().iter().collect();
    let slots: HashSet<&Timeslot> = problem.timeslots().iter().collect();
    let mut rng = RandomNumberGenerator::from_seed(5);

    for _ in 0..100 {
        let chromosome = encoding.gene_space().random_chromosome(&mut rng);
        let lectures = encoding.decode(&chromosome).unwrap().to_lectures(&problem).unwrap();
        assert_eq!(lectures.len(), 4);
        for lecture in &lectures {
            assert!(rooms.contains(&lecture.room_id));
            assert!(slots.contains(&lecture.timeslot));
        }
    }
}

#[test]
fn test_unknown_course_fails_before_running() {
    let result = InstitutionProblem::new(
        &[Course::new("CS101", 1)],
        vec!["R1".to_string()],
        &[TeacherCourse::new("T1", "CS102")],
        whole_week("T1"),
    );

    assert!(matches!(
        result,
        Err(TimetableError::UnknownReference { kind: "course", .. })
    ));
}

#[test]
fn test_parents_exceeding_population_is_rejected() {
    let problem = InstitutionProblem::new(
        &[Course::new("CS101", 1)],
        vec!["R1".to_string()],
        &[TeacherCourse::new("T1", "CS101")],
        whole_week("T1"),
    )
    .unwrap();

    let result = InstitutionScheduler::new(problem, EvolutionOptions::new(10, 8, 4, 5.0));
    match result {
        Err(TimetableError::Configuration(msg)) => assert!(msg.contains("exceeds population size")),
        other => panic!("Expected Configuration error, got {:?}", other),
    }
}

#[test]
fn test_progress_events_match_history() {
    let problem = InstitutionProblem::new(
        &[Course::new("CS101", 3)],
        vec!["R1".to_string()],
        &[TeacherCourse::new("T1", "CS101")],
        whole_week("T1"),
    )
    .unwrap();

    let mut events = Vec::new();
    let outcome = InstitutionScheduler::new(problem, seeded_options(25, 4, 10, 1))
        .unwrap()
        .run_with_observer(&mut |generation: usize, fitness: f64| events.push((generation, fitness)))
        .unwrap();

    assert_eq!(outcome.generations_completed, 25);
    assert_eq!(events.len(), 25);
    assert_eq!(events.first().map(|e| e.0), Some(1));
    assert_eq!(events.last().map(|e| e.0), Some(25));
    let history: Vec<f64> = events.iter().map(|e| e.1).collect();
    assert_eq!(history, outcome.best_fitness_history);
}
