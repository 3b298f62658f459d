//! Commonizer errors.
//!
//! Only contract violations are errors. A legitimate cross-target mismatch is
//! never an error: it is `Ok(None)` ("stays platform-specific").

/// A bug in the commonizer or its driver.
///
/// Aborts the enclosing commonization run; callers must not translate it into
/// an absent result.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum CommonizerError {
    /// A stateful commonizer was used outside its contract, e.g. its result
    /// was read before any value was folded in or after it failed.
    #[error("illegal commonizer state in {commonizer}: {reason}")]
    IllegalState {
        commonizer: &'static str,
        reason: &'static str,
    },

    /// A value-parameter-name patch was applied to a node twice.
    #[error("value parameter names of node {node} were already patched")]
    PatchAlreadyApplied { node: u32 },

    /// The driver supplied no targets.
    #[error("nothing to commonize: no targets supplied")]
    NoTargets,

    /// A per-target input list does not line up with the target list.
    #[error("expected {expected} per-target {what}, found {found}")]
    TargetCountMismatch {
        what: &'static str,
        expected: usize,
        found: usize,
    },
}

/// Outcome of one commonization: `Ok(None)` means "no common projection".
pub type CommonizeResult<T> = Result<Option<T>, CommonizerError>;
