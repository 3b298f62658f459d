//! Annotation commonization.
//!
//! Only annotations with cross-target meaning survive: the deprecation
//! marker (merged over a severity lattice) and the native-callable marker
//! (kept when every target carries it). Everything else is platform-specific.
//! The unsafe-number marker is never merged; it is synthesized from
//! [`UnsafeNumberTag`]s collected during type commonization.

mod deprecation;
mod native;
mod unsafe_number;

pub use deprecation::{
    Deprecation, DeprecationCommonizer, DeprecationLevel, ReplaceWith, FALLBACK_MESSAGE,
};
pub use native::{has_native_callable, NativeCallableCommonizer};
pub use unsafe_number::UnsafeNumberTag;

use cir_ir::{well_known, Annotation, EntityId};

use crate::core::NullableAssociativeCommonizer;

/// Commonize one declaration's annotation lists, one list per target.
pub fn commonize_annotations(lists: &[&[Annotation]]) -> Vec<Annotation> {
    let ids = well_known();

    let deprecations: Vec<Option<Deprecation>> = lists
        .iter()
        .map(|list| find(list, &ids.deprecated).map(Deprecation::from_annotation))
        .collect();
    let deprecation = DeprecationCommonizer.commonize_all(deprecations.iter().map(Option::as_ref));

    let native = NativeCallableCommonizer
        .commonize_all(lists.iter().map(|list| find(list, &ids.native_callable)));

    deprecation
        .map(|deprecation| deprecation.to_annotation())
        .into_iter()
        .chain(native)
        .collect()
}

fn find<'a>(annotations: &'a [Annotation], id: &EntityId) -> Option<&'a Annotation> {
    annotations.iter().find(|annotation| &annotation.class_id == id)
}
