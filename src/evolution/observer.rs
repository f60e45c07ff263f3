//! # Generation Observers
//!
//! The engine does not log or print progress itself. After each completed
//! generation it notifies a [`GenerationObserver`] with the generation index
//! (1-based) and the best fitness observed so far. Any `FnMut(usize, f64)`
//! closure is an observer.
//!
//! ```rust
//! use timetable_ga::evolution::observer::GenerationObserver;
//!
//! let mut history = Vec::new();
//! let mut record = |generation: usize, best: f64| history.push((generation, best));
//! record.on_generation(1, 0.5);
//! assert_eq!(history, vec![(1, 0.5)]);
//! ```

use tracing::info;

/// Receives one progress event per completed generation.
pub trait GenerationObserver {
    fn on_generation(&mut self, generation: usize, best_fitness: f64);
}

impl<F> GenerationObserver for F
where
    F: FnMut(usize, f64),
{
    fn on_generation(&mut self, generation: usize, best_fitness: f64) {
        self(generation, best_fitness)
    }
}

/// Ignores every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl GenerationObserver for NoopObserver {
    fn on_generation(&mut self, _generation: usize, _best_fitness: f64) {}
}

/// Emits every event as a `tracing` info event.
#[derive(Debug, Clone, Default)]
pub struct TracingObserver {
    label: Option<String>,
}

impl TracingObserver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tags every event with a run label, e.g. a student id.
    pub fn with_label(label: impl Into<String>) -> Self {
        Self {
            label: Some(label.into()),
        }
    }
}

impl GenerationObserver for TracingObserver {
    fn on_generation(&mut self, generation: usize, best_fitness: f64) {
        match &self.label {
            Some(label) => info!(run = %label, generation, best_fitness, "generation completed"),
            None => info!(generation, best_fitness, "generation completed"),
        }
    }
}
