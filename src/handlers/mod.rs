//! The two pipeline stages.
//!
//! Each handler takes its service clients as trait objects, so the same code
//! runs under the Lambda runtime, from a local event file, or against fakes
//! in tests.

pub mod get_text;
pub mod start_text;
