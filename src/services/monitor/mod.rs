pub mod engine;
pub mod state;

pub use engine::{Iteration, MonitorEngine};
pub use state::PollState;
