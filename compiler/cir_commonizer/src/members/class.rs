//! Class commonization.

use cir_ir::{Annotation, Class, Modality, TypeParameter, Visibility};

use super::type_params::commonize_type_parameters;
use crate::annotations::{commonize_annotations, UnsafeNumberTag};
use crate::lattice::{commonize_modality, equalize_visibility};
use crate::supertypes::commonize_supertypes;
use crate::{CommonizeResult, CommonizerContext};

/// Commonize one class per target.
///
/// Name, kind, modality and the inner/value/companion flags must agree.
/// A companion is kept only if every target names the same one.
pub fn commonize_class(ctx: &CommonizerContext<'_>, classes: &[&Class]) -> CommonizeResult<Class> {
    let Some(first) = classes.first() else {
        return Ok(None);
    };
    let mismatched = classes.iter().any(|class| {
        class.name != first.name
            || class.kind != first.kind
            || class.is_inner != first.is_inner
            || class.is_value != first.is_value
            || class.is_companion != first.is_companion
    });
    if mismatched {
        return Ok(None);
    }

    let modalities: Vec<Modality> = classes.iter().map(|class| class.modality).collect();
    let Some(modality) = commonize_modality(&modalities) else {
        return Ok(None);
    };
    let visibilities: Vec<Visibility> = classes.iter().map(|class| class.visibility).collect();
    let Some(visibility) = equalize_visibility(&visibilities)? else {
        return Ok(None);
    };

    // Bounds that needed numeric widening are not worth a marker on a class.
    let mut unsafe_numbers = UnsafeNumberTag::default();
    let type_parameter_lists: Vec<&[TypeParameter]> = classes
        .iter()
        .map(|class| class.type_parameters.as_slice())
        .collect();
    let Some(type_parameters) =
        commonize_type_parameters(ctx, &type_parameter_lists, &mut unsafe_numbers)?
    else {
        return Ok(None);
    };

    let companion = if classes.iter().all(|class| class.companion == first.companion) {
        first.companion
    } else {
        None
    };

    let annotation_lists: Vec<&[Annotation]> = classes
        .iter()
        .map(|class| class.annotations.as_slice())
        .collect();

    Ok(Some(Class {
        annotations: commonize_annotations(&annotation_lists),
        name: first.name,
        type_parameters,
        supertypes: commonize_supertypes(ctx, classes),
        visibility,
        modality,
        kind: first.kind,
        companion,
        is_companion: first.is_companion,
        is_data: classes.iter().all(|class| class.is_data),
        is_value: first.is_value,
        is_inner: first.is_inner,
        has_enum_entries: classes.iter().all(|class| class.has_enum_entries),
    }))
}
