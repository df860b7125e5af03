//! Letterdesk engine: webhook submission, response validation and effect execution.
mod engine;
mod generate;
mod response;
mod text;
mod types;

pub use engine::EngineHandle;
pub use generate::{Generator, GeneratorSettings, ReqwestGenerator};
pub use response::parse_generation_body;
pub use text::document_text;
pub use types::{EngineEvent, GeneratedDocument, GenerationError, JobId};
