//! Runner module for nps.
//!
//! Turns a chosen script into a package-manager invocation.

mod executor;
mod request;

pub use executor::{DryRunRunner, Launch, ProcessRunner, ScriptRunner};
pub use request::{parse_args, RunRequest};
