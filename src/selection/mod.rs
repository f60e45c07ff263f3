pub mod selection_strategy;
pub mod steady_state;

pub use selection_strategy::SelectionStrategy;
pub use steady_state::SteadyStateSelection;
