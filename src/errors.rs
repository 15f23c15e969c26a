//! Error and Result types for the profile demo.
//!
//! # Examples
//!
//! Telling a failing server-side function apart from other errors.
//!
//! ```rust
//! use aerospike_profile_demo::errors::Error;
//!
//! let err = Error::UdfFailure {
//!     function: "profile.check_password".to_owned(),
//!     message: "bad argument".to_owned(),
//! };
//!
//! match err {
//!     Error::UdfFailure { function, .. } => println!("{function} failed"),
//!     other => println!("unexpected error: {other}"),
//! }
//! ```

use std::{error::Error as _, fmt::Write};

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The Aerospike client reported an error, either locally or as a server result code.
    #[error("Aerospike client error")]
    Client(#[from] aerospike::Error),
    #[error("Error writing demo output")]
    Io(#[from] std::io::Error),
    #[error("Invalid command line")]
    Cli(#[from] clap::Error),
    /// A server-side function returned a `FAILURE` result.
    #[error("UDF {function} failed: {message}")]
    UdfFailure { function: String, message: String },
    /// The client received a result that it was not able to interpret.
    #[error("Bad server response: {0}")]
    BadResponse(String),
    /// A long running server task finished in a state other than complete.
    #[error("Task {task} did not complete: {status}")]
    TaskIncomplete { task: String, status: String },
}

/// Renders an error with its chain of causes, one cause per line.
#[must_use]
pub fn report(err: &Error) -> String {
    let mut text = format!("error: {err}\n");
    let mut source = err.source();
    while let Some(cause) = source {
        writeln!(text, "  caused by: {cause}").ok();
        source = cause.source();
    }
    text
}
