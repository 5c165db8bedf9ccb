//! Quiz server module.
//!
//! Serves the quiz form and grades submissions over plain HTTP.

mod grading;
mod server;

pub use grading::grade;
pub use server::{routes, run};
