//! Job recording and state updates
//!
//! Every submission is recorded as staged once its files are written to the scratch directory,
//! then updated to submitted or failed depending on the sushi_fabric exit status.

pub mod load;
pub mod stage;
pub mod update;
pub mod state;
