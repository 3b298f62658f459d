//! Position-aligned list commonization.

use super::Commonizer;
use crate::CommonizerError;

/// Commonizes lists element by element with one element commonizer per
/// position. Lists of different lengths fail.
pub struct ListCommonizer<C, F> {
    factory: F,
    elements: Option<Vec<C>>,
    failed: bool,
}

impl<C, F: Fn() -> C> ListCommonizer<C, F> {
    pub fn new(factory: F) -> Self {
        Self {
            factory,
            elements: None,
            failed: false,
        }
    }
}

impl<T, R, C, F> Commonizer<[T], Vec<R>> for ListCommonizer<C, F>
where
    C: Commonizer<T, R>,
    F: Fn() -> C,
{
    fn commonize_with(&mut self, next: &[T]) -> bool {
        if self.failed {
            return false;
        }
        let factory = &self.factory;
        let elements = self
            .elements
            .get_or_insert_with(|| next.iter().map(|_| factory()).collect());

        self.failed = elements.len() != next.len()
            || !elements
                .iter_mut()
                .zip(next)
                .all(|(element, value)| element.commonize_with(value));
        !self.failed
    }

    fn result(&self) -> Result<Vec<R>, CommonizerError> {
        if self.failed {
            return Err(CommonizerError::IllegalState {
                commonizer: "list",
                reason: "result read after failure",
            });
        }
        let Some(elements) = &self.elements else {
            return Err(CommonizerError::IllegalState {
                commonizer: "list",
                reason: "result read before any value",
            });
        };
        elements.iter().map(|element| element.result()).collect()
    }
}

/// Batch form: commonize the `i`-th elements of every list with `element`.
///
/// Fails if the lists differ in length or any position fails.
pub fn commonize_positionally<T, R>(
    lists: &[&[T]],
    mut element: impl FnMut(&[&T]) -> Option<R>,
) -> Option<Vec<R>> {
    let len = lists.first()?.len();
    if lists.iter().any(|list| list.len() != len) {
        return None;
    }
    let mut column = Vec::with_capacity(lists.len());
    (0..len)
        .map(|index| {
            column.clear();
            column.extend(lists.iter().map(|list| &list[index]));
            element(&column)
        })
        .collect()
}
