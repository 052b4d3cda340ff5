//! Data carried through the registration and publishing pipeline.

mod event;

pub use event::{Receipt, Submission, SubmissionEvent};
