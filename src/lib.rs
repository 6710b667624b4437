//! jobform - Terminal Job Application Form
//!
//! A job application form for the terminal with inline validation,
//! position-dependent fields and a post-submission summary, built in Rust.

pub mod domain;
pub mod application;
pub mod infrastructure;
pub mod presentation;
pub mod error;

pub use domain::*;
pub use application::*;
