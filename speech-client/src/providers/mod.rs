//! Speech provider implementations

pub mod mock;
mod openai;

pub use mock::MockSpeech;
pub use openai::OpenAiSpeech;
