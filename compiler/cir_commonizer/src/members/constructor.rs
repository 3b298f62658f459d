//! Constructor commonization.

use cir_ir::{Annotation, Constructor, Modality, TypeParameter, Visibility};

use super::type_params::commonize_type_parameters;
use super::value_params::commonize_value_parameters;
use super::Patched;
use crate::annotations::{commonize_annotations, UnsafeNumberTag};
use crate::lattice::equalize_visibility;
use crate::{CommonizeResult, CommonizerContext};

/// Commonize one constructor per target.
///
/// Objects, enum entries and sealed classes never get a common constructor.
pub fn commonize_constructor(
    ctx: &CommonizerContext<'_>,
    constructors: &[&Constructor],
) -> CommonizeResult<Patched<Constructor>> {
    let Some(first) = constructors.first() else {
        return Ok(None);
    };
    let no_constructors = constructors.iter().any(|constructor| {
        let owner = constructor.containing_class;
        owner.kind.is_singleton() || owner.modality == Modality::Sealed
    });
    if no_constructors
        || constructors
            .iter()
            .any(|constructor| constructor.is_primary != first.is_primary)
    {
        return Ok(None);
    }

    let visibilities: Vec<Visibility> = constructors
        .iter()
        .map(|constructor| constructor.visibility)
        .collect();
    let Some(visibility) = equalize_visibility(&visibilities)? else {
        return Ok(None);
    };

    let mut unsafe_numbers = UnsafeNumberTag::default();
    let type_parameter_lists: Vec<&[TypeParameter]> = constructors
        .iter()
        .map(|constructor| constructor.type_parameters.as_slice())
        .collect();
    let Some(type_parameters) =
        commonize_type_parameters(ctx, &type_parameter_lists, &mut unsafe_numbers)?
    else {
        return Ok(None);
    };
    let Some(parameters) = commonize_value_parameters(ctx, constructors, &mut unsafe_numbers)?
    else {
        return Ok(None);
    };

    let annotation_lists: Vec<&[Annotation]> = constructors
        .iter()
        .map(|constructor| constructor.annotations.as_slice())
        .collect();
    let mut annotations = commonize_annotations(&annotation_lists);
    annotations.extend(unsafe_numbers.to_annotation(ctx));

    let constructor = Constructor {
        annotations,
        type_parameters,
        visibility,
        containing_class: first.containing_class,
        value_parameters: parameters.parameters,
        has_stable_parameter_names: parameters.has_stable_names,
        is_primary: first.is_primary,
    };
    Ok(Some(Patched {
        declaration: constructor,
        names_patch: parameters.names_patch,
    }))
}
