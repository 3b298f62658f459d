//! The incremental fold with an explicit lifecycle.

use super::Commonizer;
use crate::CommonizerError;

/// Lifecycle of a [`StandardCommonizer`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum CommonizerState {
    /// No value seen yet.
    Empty,
    /// At least one value seen, all mutually commonizable.
    Accumulating,
    /// A mismatch was seen. Terminal.
    Failed,
}

/// Per-kind merge logic driven by [`StandardCommonizer`].
pub trait Accumulator<T: ?Sized> {
    type Output;

    /// Name used in contract-violation errors.
    const NAME: &'static str;

    /// Seed from the first value. `false` fails the fold immediately.
    fn initialize(&mut self, first: &T) -> bool;

    /// Merge a subsequent value. `false` fails the fold.
    fn combine(&mut self, next: &T) -> bool;

    /// Current merged value; `None` only if never initialized.
    fn output(&self) -> Option<Self::Output>;
}

/// Incremental commonizer over an [`Accumulator`].
#[derive(Clone, Debug)]
pub struct StandardCommonizer<A> {
    state: CommonizerState,
    accumulator: A,
}

impl<A> StandardCommonizer<A> {
    pub fn new(accumulator: A) -> Self {
        Self {
            state: CommonizerState::Empty,
            accumulator,
        }
    }

    #[inline]
    pub fn state(&self) -> CommonizerState {
        self.state
    }
}

impl<A: Default> Default for StandardCommonizer<A> {
    fn default() -> Self {
        Self::new(A::default())
    }
}

impl<T: ?Sized, A: Accumulator<T>> Commonizer<T, A::Output> for StandardCommonizer<A> {
    fn commonize_with(&mut self, next: &T) -> bool {
        let merged = match self.state {
            CommonizerState::Failed => return false,
            CommonizerState::Empty => self.accumulator.initialize(next),
            CommonizerState::Accumulating => self.accumulator.combine(next),
        };
        self.state = if merged {
            CommonizerState::Accumulating
        } else {
            CommonizerState::Failed
        };
        merged
    }

    fn result(&self) -> Result<A::Output, CommonizerError> {
        let reason = match self.state {
            CommonizerState::Accumulating => {
                return self
                    .accumulator
                    .output()
                    .ok_or(CommonizerError::IllegalState {
                        commonizer: A::NAME,
                        reason: "accumulator holds no value",
                    });
            }
            CommonizerState::Empty => "result read before any value",
            CommonizerState::Failed => "result read after failure",
        };
        Err(CommonizerError::IllegalState {
            commonizer: A::NAME,
            reason,
        })
    }
}
