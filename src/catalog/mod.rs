//! Interview catalog
//!
//! Static interview records and the fixture question bank. Looking up an
//! unknown interview is the "not found" state that sits in front of a
//! session; no session is created for it.

mod fixtures;
mod interview;

pub use fixtures::{default_questions, fixture_interviews};
pub use interview::{CatalogError, Interview, InterviewCatalog, InterviewKind, InterviewStatus};
