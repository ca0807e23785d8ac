pub mod history;
pub mod orchestrator;
pub mod parser;
pub mod prompts;
pub mod store;
pub mod validation;

#[cfg(any(test, feature = "test-support"))]
pub mod testing;

pub use orchestrator::{classify_ai_error, SimulationOrchestrator};
pub use parser::{parse_narrative, ParseError};
pub use prompts::{build_alternate_prompt, build_current_path_prompt};
pub use store::{InMemorySimulationStore, SimulationStore, StoreError};
pub use validation::{sanitize_text, validate_profile};
