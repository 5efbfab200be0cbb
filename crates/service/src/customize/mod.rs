//! The site customize form: motto, about us and custom terms.

pub mod fields;
pub mod handler;

pub use fields::CustomizeFields;
pub use handler::{CustomizeHandler, SectionOutcome, SectionReport, SubmissionReport};
