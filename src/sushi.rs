//! Stage job files and hand them over to sushi_fabric

/// A filled-in sidebar ready to be submitted, defined here
pub mod job_request;

/// Write dataset and parameter files, render the sushi_fabric command
pub mod job;

/// Run rendered commands with bash
pub mod dispatch;

/// Outermost submission handler
pub mod submit;
