use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobState {
    Staged,
    Submitted,
    Failed,
}

/// A simple way to keep track of job state.
///
/// Jobs are staged (files written to the job directory), then submitted (bash exits 0) or
/// failed (bash exits non-zero or can't be started). Sushi tracks the job after that.
impl JobState {
    /// value of the state column
    pub fn as_str(&self) -> &'static str {
        match self {
            JobState::Staged => "staged",
            JobState::Submitted => "submitted",
            JobState::Failed => "failed",
        }
    }
}

impl fmt::Display for JobState {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
