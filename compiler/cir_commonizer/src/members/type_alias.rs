//! Type alias commonization.

use cir_ir::{Annotation, Type, TypeAlias, TypeParameter, Visibility};

use super::type_params::commonize_type_parameters;
use crate::annotations::{commonize_annotations, UnsafeNumberTag};
use crate::lattice::equalize_visibility;
use crate::types::TypeCommonizer;
use crate::{CommonizeResult, CommonizerContext};

/// Commonize one type alias per target.
pub fn commonize_type_alias(
    ctx: &CommonizerContext<'_>,
    aliases: &[&TypeAlias],
) -> CommonizeResult<TypeAlias> {
    let Some(first) = aliases.first() else {
        return Ok(None);
    };
    if aliases.iter().any(|alias| alias.name != first.name) {
        return Ok(None);
    }
    let visibilities: Vec<Visibility> = aliases.iter().map(|alias| alias.visibility).collect();
    let Some(visibility) = equalize_visibility(&visibilities)? else {
        return Ok(None);
    };

    let mut unsafe_numbers = UnsafeNumberTag::default();
    let type_parameter_lists: Vec<&[TypeParameter]> = aliases
        .iter()
        .map(|alias| alias.type_parameters.as_slice())
        .collect();
    let Some(type_parameters) =
        commonize_type_parameters(ctx, &type_parameter_lists, &mut unsafe_numbers)?
    else {
        return Ok(None);
    };

    let types = TypeCommonizer::new(ctx);
    let underlying: Vec<Type> = aliases
        .iter()
        .map(|alias| Type::from(alias.underlying_type.clone()))
        .collect();
    let underlying: Vec<&Type> = underlying.iter().collect();
    let Some(Type::Classifier(underlying_type)) =
        types.commonize_into(&underlying, &mut unsafe_numbers)
    else {
        return Ok(None);
    };

    let expanded: Vec<Type> = aliases
        .iter()
        .map(|alias| Type::from(alias.expanded_type.clone()))
        .collect();
    let expanded: Vec<&Type> = expanded.iter().collect();
    let Some(Type::Classifier(expanded_type)) = types.commonize_into(&expanded, &mut unsafe_numbers)
    else {
        return Ok(None);
    };
    // Substitution may have picked an alias; keep the class it stands for.
    let expanded_type = expanded_type.expanded();

    let annotation_lists: Vec<&[Annotation]> = aliases
        .iter()
        .map(|alias| alias.annotations.as_slice())
        .collect();
    let mut annotations = commonize_annotations(&annotation_lists);
    annotations.extend(unsafe_numbers.to_annotation(ctx));

    Ok(Some(TypeAlias {
        annotations,
        name: first.name,
        type_parameters,
        visibility,
        underlying_type,
        expanded_type,
    }))
}
