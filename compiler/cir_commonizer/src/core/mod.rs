//! Commonizer building blocks.
//!
//! Every merge in the crate is one of four shapes:
//!
//! - [`StandardCommonizer`]: incremental fold over a per-kind [`Accumulator`],
//!   with an explicit `Empty -> Accumulating -> Failed` lifecycle.
//! - [`AssociativeCommonizer`]: pairwise merge, folded left to right.
//! - [`NullableAssociativeCommonizer`]: pairwise merge over optional values
//!   that never fails (absence is a value).
//! - [`BatchCommonizer`]: all N values at once, adaptable to the incremental
//!   shape with [`Prefix`].
//!
//! [`ListCommonizer`] and [`commonize_positionally`] lift any element
//! commonizer to position-aligned lists.

mod associative;
mod batch;
mod list;
mod standard;

pub use associative::{
    Associative, AssociativeCommonizer, Equality, NullableAssociativeCommonizer,
};
pub use batch::{BatchCommonizer, Prefix};
pub use list::{commonize_positionally, ListCommonizer};
pub use standard::{Accumulator, CommonizerState, StandardCommonizer};

use crate::CommonizeResult;

/// Incremental commonizer: values arrive one target at a time.
pub trait Commonizer<T: ?Sized, R> {
    /// Fold in the next target's value.
    ///
    /// Returns `false` once the values seen so far have no common projection;
    /// every later call returns `false` too.
    fn commonize_with(&mut self, next: &T) -> bool;

    /// The common projection of every value folded in so far.
    ///
    /// Reading before the first value or after a failure is a contract
    /// violation and returns `Err`.
    fn result(&self) -> Result<R, crate::CommonizerError>;
}

/// Feed all `values` to `commonizer` and read the result.
///
/// An empty `values` or a failed fold yields `Ok(None)`.
pub fn commonize_all<'v, T, R, C>(
    commonizer: &mut C,
    values: impl IntoIterator<Item = &'v T>,
) -> CommonizeResult<R>
where
    T: ?Sized + 'v,
    C: Commonizer<T, R>,
{
    let mut any = false;
    for value in values {
        any = true;
        if !commonizer.commonize_with(value) {
            return Ok(None);
        }
    }
    if !any {
        return Ok(None);
    }
    commonizer.result().map(Some)
}

#[cfg(test)]
mod tests;
