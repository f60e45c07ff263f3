pub mod challenge;
pub mod engine;
pub mod observer;
pub mod options;
pub mod population;

pub use challenge::{fitness_from_penalty, Challenge, FnChallenge, PenaltyChallenge, FITNESS_EPSILON};
pub use engine::{EngineState, EvolutionEngine, EvolutionResult};
pub use observer::{GenerationObserver, NoopObserver, TracingObserver};
pub use options::{EvolutionOptions, EvolutionOptionsBuilder};
pub use population::{Individual, Population};
