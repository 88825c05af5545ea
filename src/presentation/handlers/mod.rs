mod error;
mod health;
mod transcribe;
mod transcript;

pub use error::{ApiError, ErrorResponse};
pub use health::{HealthResponse, health_handler};
pub use transcribe::{TranscribeResponse, transcribe_handler};
pub use transcript::{TranscriptResponse, transcript_handler};
