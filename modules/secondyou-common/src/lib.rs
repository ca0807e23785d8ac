pub mod config;
pub mod error;
pub mod safety;
pub mod types;

pub use config::{AiProvider, Config, Environment};
pub use error::SimulationError;
pub use safety::*;
pub use types::*;
