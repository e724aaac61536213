//! Client-side orchestration core for the CareerCompass resume flow:
//! validate a selected file, upload it for extraction, chain the career
//! analysis, and expose the resulting session state to a presentation
//! layer. The three backend services are consumed over HTTP; nothing
//! here parses files or analyzes careers itself.

pub mod config;
pub mod errors;
pub mod models;
pub mod notify;
pub mod services;
pub mod session;
pub mod validate;

pub use errors::{ClientError, ValidationError};
pub use models::{AnalysisResult, AnalysisSource, ExtractedProfile, ResumeFile};
pub use notify::{Notice, NotificationSink, Severity, TracingSink};
pub use session::{Phase, SessionOrchestrator, SessionSnapshot, SubmitOutcome};
