//! Modality commonization: all targets must agree.

use cir_ir::Modality;

use crate::core::{AssociativeCommonizer, Equality};

pub fn commonize_modality(modalities: &[Modality]) -> Option<Modality> {
    Equality.commonize_all(modalities)
}
