//! Domain records shared by both scheduler variants.
//!
//! Ids are plain strings; the schedulers intern them into indices so the
//! search itself never touches strings.

use std::fmt::{self, Display};

use chrono::{NaiveTime, Weekday};

use crate::error::{OptionExt, Result, TimetableError};

pub type CourseId = String;
pub type TeacherId = String;
pub type RoomId = String;
pub type StudentId = String;

/// The teaching week, in timeslot construction order.
pub const TEACHING_DAYS: [Weekday; 5] = [
    Weekday::Sun,
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
];

/// First lecture start hour of a teaching day.
pub const FIRST_HOUR: u32 = 8;
/// Last lecture start hour of a teaching day.
pub const LAST_HOUR: u32 = 16;

/// A day of the week plus a start time.
///
/// Timeslots are only compared for equality; the position in the slot list is
/// the only order they have.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Timeslot {
    day: Weekday,
    start: NaiveTime,
}

impl Timeslot {
    pub fn new(day: Weekday, start: NaiveTime) -> Self {
        Self { day, start }
    }

    /// A slot starting on the full hour.
    pub fn at_hour(day: Weekday, hour: u32) -> Result<Self> {
        let start = NaiveTime::from_hms_opt(hour, 0, 0).ok_or_else_timetable(|| {
            TimetableError::InputValidation(format!("Invalid lecture start hour {}", hour))
        })?;
        Ok(Self::new(day, start))
    }

    /// The 45 slots of the teaching week, day-major and hour-minor.
    pub fn teaching_week() -> Vec<Timeslot> {
        TEACHING_DAYS
            .iter()
            .flat_map(|&day| {
                (FIRST_HOUR..=LAST_HOUR)
                    .filter_map(move |hour| NaiveTime::from_hms_opt(hour, 0, 0))
                    .map(move |start| Timeslot::new(day, start))
            })
            .collect()
    }

    pub fn day(&self) -> Weekday {
        self.day
    }

    pub fn start(&self) -> NaiveTime {
        self.start
    }
}

impl Display for Timeslot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.day, self.start.format("%H:%M"))
    }
}

/// A course and how many lecture-hours per week it needs.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Course {
    pub course_id: CourseId,
    pub lectures_per_week: u32,
}

impl Course {
    pub fn new(course_id: impl Into<CourseId>, lectures_per_week: u32) -> Self {
        Self {
            course_id: course_id.into(),
            lectures_per_week,
        }
    }
}

/// A teacher assigned to teach a course.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeacherCourse {
    pub teacher_id: TeacherId,
    pub course_id: CourseId,
}

impl TeacherCourse {
    pub fn new(teacher_id: impl Into<TeacherId>, course_id: impl Into<CourseId>) -> Self {
        Self {
            teacher_id: teacher_id.into(),
            course_id: course_id.into(),
        }
    }
}

/// One lecture-hour that has to be placed.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LectureRequirement {
    pub course_id: CourseId,
    pub teacher_id: TeacherId,
}

/// A half-open window `[preferred_start, preferred_end)` in which a teacher
/// prefers to start lectures on a given day.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeacherAvailabilityWindow {
    pub teacher_id: TeacherId,
    pub day: Weekday,
    pub preferred_start: NaiveTime,
    pub preferred_end: NaiveTime,
}

impl TeacherAvailabilityWindow {
    /// Creates a window; the start must come before the end.
    pub fn new(
        teacher_id: impl Into<TeacherId>,
        day: Weekday,
        preferred_start: NaiveTime,
        preferred_end: NaiveTime,
    ) -> Result<Self> {
        let window = Self {
            teacher_id: teacher_id.into(),
            day,
            preferred_start,
            preferred_end,
        };
        window.validate()?;
        Ok(window)
    }

    /// Creates a window from `"HH:MM"` clock times.
    pub fn parse(
        teacher_id: impl Into<TeacherId>,
        day: Weekday,
        preferred_start: &str,
        preferred_end: &str,
    ) -> Result<Self> {
        Self::new(
            teacher_id,
            day,
            parse_clock_time(preferred_start)?,
            parse_clock_time(preferred_end)?,
        )
    }

    pub fn validate(&self) -> Result<()> {
        if self.preferred_start >= self.preferred_end {
            return Err(TimetableError::InputValidation(format!(
                "Availability window of teacher '{}' on {} is empty: {} is not before {}",
                self.teacher_id, self.day, self.preferred_start, self.preferred_end
            )));
        }
        Ok(())
    }

    pub fn contains(&self, time: NaiveTime) -> bool {
        self.preferred_start <= time && time < self.preferred_end
    }
}

/// Parses an `"HH:MM"` clock time.
pub fn parse_clock_time(raw: &str) -> Result<NaiveTime> {
    NaiveTime::parse_from_str(raw.trim(), "%H:%M").map_err(|e| {
        TimetableError::InputValidation(format!("Invalid clock time '{}': {}", raw, e))
    })
}

/// A lecture placed in a room and timeslot.
///
/// This is both an entry of an institution schedule and a row of the master
/// schedule that student schedules choose from.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ScheduledLecture {
    pub course_id: CourseId,
    pub teacher_id: TeacherId,
    pub room_id: RoomId,
    pub timeslot: Timeslot,
}

impl ScheduledLecture {
    pub fn new(
        course_id: impl Into<CourseId>,
        teacher_id: impl Into<TeacherId>,
        room_id: impl Into<RoomId>,
        timeslot: Timeslot,
    ) -> Self {
        Self {
            course_id: course_id.into(),
            teacher_id: teacher_id.into(),
            room_id: room_id.into(),
            timeslot,
        }
    }

    pub fn day(&self) -> Weekday {
        self.timeslot.day()
    }
}

impl Display for ScheduledLecture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} by {} in {} at {}",
            self.course_id, self.teacher_id, self.room_id, self.timeslot
        )
    }
}

/// A student registered for a course.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    pub student_id: StudentId,
    pub course_id: CourseId,
}

impl Registration {
    pub fn new(student_id: impl Into<StudentId>, course_id: impl Into<CourseId>) -> Self {
        Self {
            student_id: student_id.into(),
            course_id: course_id.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn time(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn test_teaching_week_is_day_major() {
        let week = Timeslot::teaching_week();
        assert_eq!(week.len(), 45);
        assert_eq!(week[0], Timeslot::at_hour(Weekday::Sun, 8).unwrap());
        assert_eq!(week[8], Timeslot::at_hour(Weekday::Sun, 16).unwrap());
        assert_eq!(week[9], Timeslot::at_hour(Weekday::Mon, 8).unwrap());
        assert_eq!(week[44], Timeslot::at_hour(Weekday::Thu, 16).unwrap());

        let distinct: std::collections::HashSet<_> = week.iter().collect();
        assert_eq!(distinct.len(), 45);
    }

    #[test]
    fn test_invalid_hour() {
        assert!(matches!(
            Timeslot::at_hour(Weekday::Mon, 24),
            Err(TimetableError::InputValidation(_))
        ));
    }

    #[test]
    fn test_window_is_half_open() {
        let window = TeacherAvailabilityWindow::parse("T1", Weekday::Mon, "09:00", "12:00").unwrap();
        assert!(!window.contains(time(8, 59)));
        assert!(window.contains(time(9, 0)));
        assert!(window.contains(time(11, 0)));
        assert!(!window.contains(time(12, 0)));
    }

    #[test]
    fn test_empty_window_is_rejected() {
        assert!(TeacherAvailabilityWindow::parse("T1", Weekday::Mon, "12:00", "12:00").is_err());
        assert!(TeacherAvailabilityWindow::parse("T1", Weekday::Mon, "13:00", "12:00").is_err());
    }

    #[test]
    fn test_unparsable_time() {
        let result = TeacherAvailabilityWindow::parse("T1", Weekday::Mon, "nine", "12:00");
        match result {
            Err(TimetableError::InputValidation(msg)) => assert!(msg.contains("'nine'")),
            other => panic!("Expected InputValidation error, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_clock_time() {
        assert_eq!(parse_clock_time("08:30").unwrap(), time(8, 30));
        assert_eq!(parse_clock_time(" 16:00 ").unwrap(), time(16, 0));
        assert!(parse_clock_time("25:00").is_err());
    }

    #[test]
    fn test_display() {
        let lecture = ScheduledLecture::new(
            "CS101",
            "T1",
            "R1",
            Timeslot::at_hour(Weekday::Tue, 9).unwrap(),
        );
        assert_eq!(lecture.to_string(), "CS101 by T1 in R1 at Tue 09:00");
        assert_eq!(lecture.day(), Weekday::Tue);
    }
}
