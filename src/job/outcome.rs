//! Verified / fail-on-warning policy.

use log::warn;

use crate::error::{JobError, Result};
use crate::translator::JobResult;

/// How a finished engine run is treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Verified,
    /// Unresolved references were reported but fail-on-warning is off.
    AcceptedUnverified,
}

/// Decide whether the run is a success.
pub fn evaluate(result: JobResult, fail_on_warning: bool) -> Result<Outcome> {
    match (result.verified, fail_on_warning) {
        (true, _) => Ok(Outcome::Verified),
        (false, true) => Err(JobError::VerificationFailed),
        (false, false) => {
            warn!("Verification reported problems; continuing because fail-on-warning is disabled");
            Ok(Outcome::AcceptedUnverified)
        }
    }
}
