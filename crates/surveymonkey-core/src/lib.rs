// Public fallible APIs in this crate share one concrete error contract (`SurveyError`).
// Repeating per-function `# Errors` boilerplate obscures behavior more than it clarifies.
#![allow(
    clippy::missing_errors_doc,
    reason = "crate-wide fallible API uses one explicit error type; per-item boilerplate would duplicate contract"
)]

pub mod access;
pub mod answers;
pub(crate) mod code;
pub mod config;
pub mod credential;
pub mod error;
pub mod models;
pub mod results;
pub mod service;
pub mod store;

pub use config::ServiceConfig;
pub use error::{Result, SurveyError};
pub use models::{Question, QuestionAnswers, QuestionKind, Survey};
pub use service::SurveyService;
pub use store::{MemorySurveyStore, SqliteSurveyStore, SurveyStore};
