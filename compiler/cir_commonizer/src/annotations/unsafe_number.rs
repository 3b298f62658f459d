//! Unsafe-number tags.
//!
//! When optimistic widening picks one numeric type for differing per-target
//! numerics, the declaration is tagged with what each target really had, so
//! users can see where the common signature lies.

use std::collections::BTreeSet;

use cir_ir::{well_known, Annotation, ConstantValue, EntityId, Name};

use crate::CommonizerContext;

/// Per-target numeric classifiers a declaration was widened from.
///
/// Merging is set union per target, so the order types are visited in does
/// not matter.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct UnsafeNumberTag {
    per_target: Vec<BTreeSet<EntityId>>,
}

impl UnsafeNumberTag {
    pub fn is_empty(&self) -> bool {
        self.per_target.iter().all(BTreeSet::is_empty)
    }

    /// Record one widening; `actual` holds one classifier per target.
    pub fn record<'a>(&mut self, actual: impl IntoIterator<Item = &'a EntityId>) {
        for (target, id) in actual.into_iter().enumerate() {
            if self.per_target.len() <= target {
                self.per_target.resize_with(target + 1, BTreeSet::new);
            }
            self.per_target[target].insert(id.clone());
        }
    }

    pub fn merge(&mut self, other: &UnsafeNumberTag) {
        for (target, ids) in other.per_target.iter().enumerate() {
            self.record_all(target, ids);
        }
    }

    fn record_all(&mut self, target: usize, ids: &BTreeSet<EntityId>) {
        if self.per_target.len() <= target {
            self.per_target.resize_with(target + 1, BTreeSet::new);
        }
        self.per_target[target].extend(ids.iter().cloned());
    }

    /// Classifiers recorded for `target`.
    pub fn actual_types(&self, target: usize) -> impl Iterator<Item = &EntityId> {
        self.per_target.get(target).into_iter().flatten()
    }

    /// The marker annotation, or `None` if nothing was widened.
    ///
    /// Arguments read `"<target>: <qualified id>"`, grouped by target in
    /// target order.
    pub fn to_annotation(&self, ctx: &CommonizerContext<'_>) -> Option<Annotation> {
        if self.is_empty() {
            return None;
        }
        let actual = ctx
            .targets()
            .iter()
            .enumerate()
            .flat_map(|(index, target)| {
                self.actual_types(index)
                    .map(move |id| ConstantValue::String(format!("{target}: {}", ctx.display(id))))
            })
            .collect();
        Some(
            Annotation::new(well_known().unsafe_number.clone())
                .with_constant(Name::ACTUAL_PLATFORM_TYPES, ConstantValue::Array(actual)),
        )
    }
}
