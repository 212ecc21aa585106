//! The sequential form engine: answer storage, visibility resolution, field
//! validation, and the step state machine that ties them together.

pub mod answers;
pub mod session;
pub mod validate;
pub mod visibility;

pub use answers::{AnswerStore, AnswerValue};
pub use session::{FormSession, SubmissionOutcome, SubmissionTicket};
