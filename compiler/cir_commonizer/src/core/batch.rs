//! All-at-once commonizers.

use super::Accumulator;

/// Commonizes all N values in one call.
pub trait BatchCommonizer<T, R> {
    fn commonize(&self, values: &[&T]) -> Option<R>;
}

/// Adapts a [`BatchCommonizer`] to the incremental shape by re-running the
/// batch over every value seen so far.
#[derive(Clone, Debug)]
pub struct Prefix<B, T, R> {
    batch: B,
    seen: Vec<T>,
    merged: Option<R>,
}

impl<B, T, R> Prefix<B, T, R> {
    pub fn new(batch: B) -> Self {
        Self {
            batch,
            seen: Vec::new(),
            merged: None,
        }
    }

    fn rerun(&mut self, next: &T) -> bool
    where
        B: BatchCommonizer<T, R>,
        T: Clone,
    {
        self.seen.push(next.clone());
        let values: Vec<&T> = self.seen.iter().collect();
        self.merged = self.batch.commonize(&values);
        self.merged.is_some()
    }
}

impl<B, T, R> Accumulator<T> for Prefix<B, T, R>
where
    B: BatchCommonizer<T, R>,
    T: Clone,
    R: Clone,
{
    type Output = R;

    const NAME: &'static str = "batch";

    fn initialize(&mut self, first: &T) -> bool {
        self.rerun(first)
    }

    fn combine(&mut self, next: &T) -> bool {
        self.rerun(next)
    }

    fn output(&self) -> Option<R> {
        self.merged.clone()
    }
}
