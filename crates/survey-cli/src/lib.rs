//! Library components of the survey loader CLI.

pub mod commands;
pub mod logging;
pub mod schema_file;
