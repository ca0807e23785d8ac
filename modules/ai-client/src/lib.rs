pub mod claude;
pub mod error;
pub mod gemini;
pub mod traits;
pub mod util;

pub use claude::{Claude, DEFAULT_CLAUDE_MODEL};
pub use error::AiError;
pub use gemini::{Gemini, DEFAULT_GEMINI_MODEL};
pub use traits::{SamplingConfig, TextGenerator};
pub use util::truncate_to_char_boundary;
