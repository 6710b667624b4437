//! Application layer managing form state and the submission workflow.
//!
//! This module coordinates between the domain layer and presentation layer,
//! owning the live form, its derived UI flags and the submit timer.

pub mod state;
pub mod submission;

pub use state::*;
pub use submission::*;
