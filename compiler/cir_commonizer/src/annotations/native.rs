//! The native-callable marker: present in the result only when present on
//! every target.

use cir_ir::{well_known, Annotation};

use crate::core::NullableAssociativeCommonizer;

#[derive(Copy, Clone, Debug, Default)]
pub struct NativeCallableCommonizer;

impl NullableAssociativeCommonizer<Annotation> for NativeCallableCommonizer {
    fn commonize(&self, first: Option<&Annotation>, second: Option<&Annotation>) -> Option<Annotation> {
        first.zip(second).map(|(first, _)| first.clone())
    }
}

/// Whether a declaration carries the native-callable marker.
pub fn has_native_callable(annotations: &[Annotation]) -> bool {
    let id = &well_known().native_callable;
    annotations.iter().any(|annotation| &annotation.class_id == id)
}
