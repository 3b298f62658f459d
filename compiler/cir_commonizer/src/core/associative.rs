//! Pairwise commonizers.

use std::marker::PhantomData;

use super::Accumulator;

/// Pairwise merge; must be associative so a left fold is order-insensitive.
pub trait AssociativeCommonizer<T> {
    fn commonize(&self, first: &T, second: &T) -> Option<T>;

    /// Left fold. One value is its own projection; no values have none.
    fn commonize_all<'v>(&self, values: impl IntoIterator<Item = &'v T>) -> Option<T>
    where
        T: Clone + 'v,
    {
        let mut values = values.into_iter();
        let mut merged = values.next()?.clone();
        for value in values {
            merged = self.commonize(&merged, value)?;
        }
        Some(merged)
    }
}

/// Pairwise merge over optional values. Never fails: `None` is a result.
pub trait NullableAssociativeCommonizer<T> {
    fn commonize(&self, first: Option<&T>, second: Option<&T>) -> Option<T>;

    /// Left fold. No values yield `None`.
    fn commonize_all<'v>(&self, values: impl IntoIterator<Item = Option<&'v T>>) -> Option<T>
    where
        T: Clone + 'v,
    {
        let mut values = values.into_iter();
        let mut merged = values.next()?.cloned();
        for value in values {
            merged = self.commonize(merged.as_ref(), value);
        }
        merged
    }
}

/// Values commonize only when identical.
#[derive(Copy, Clone, Debug, Default)]
pub struct Equality;

impl<T: PartialEq + Clone> AssociativeCommonizer<T> for Equality {
    fn commonize(&self, first: &T, second: &T) -> Option<T> {
        (first == second).then(|| first.clone())
    }
}

/// Adapts an [`AssociativeCommonizer`] to the incremental shape.
#[derive(Clone, Debug)]
pub struct Associative<C, T> {
    commonizer: C,
    merged: Option<T>,
    _values: PhantomData<fn(&T)>,
}

impl<C, T> Associative<C, T> {
    pub fn new(commonizer: C) -> Self {
        Self {
            commonizer,
            merged: None,
            _values: PhantomData,
        }
    }
}

impl<C: AssociativeCommonizer<T>, T: Clone> Accumulator<T> for Associative<C, T> {
    type Output = T;

    const NAME: &'static str = "associative";

    fn initialize(&mut self, first: &T) -> bool {
        self.merged = Some(first.clone());
        true
    }

    fn combine(&mut self, next: &T) -> bool {
        self.merged = self
            .merged
            .as_ref()
            .and_then(|merged| self.commonizer.commonize(merged, next));
        self.merged.is_some()
    }

    fn output(&self) -> Option<T> {
        self.merged.clone()
    }
}
