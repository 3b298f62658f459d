//! Property commonization.
//!
//! Mutability only survives if every target agrees and the setters'
//! visibilities lower; otherwise the property is commonized read-only. A
//! compile-time constant survives only with an identical initializer.

use cir_ir::{CallableMember, ConstantValue, Property, PropertyGetter, PropertySetter};

use super::callable::commonize_callable;
use crate::lattice::{lower_visibility, VisibilityFact};
use crate::{CommonizeResult, CommonizerContext};

/// Commonize one property per target.
pub fn commonize_property(
    ctx: &CommonizerContext<'_>,
    properties: &[&Property],
) -> CommonizeResult<Property> {
    // Top-level read-only properties may widen their nullability.
    let relax = properties
        .iter()
        .all(|property| property.containing_class.is_none() && !property.is_var);
    let Some(mut base) = commonize_callable(ctx, properties, relax)? else {
        return Ok(None);
    };

    let setter = if properties.iter().all(|property| property.is_var) {
        commonize_setter(properties)?
    } else {
        None
    };
    let is_const = properties.iter().all(|property| property.is_const)
        && properties
            .windows(2)
            .all(|pair| pair[0].compile_time_initializer == pair[1].compile_time_initializer);
    let compile_time_initializer = match properties.first() {
        Some(first) if is_const => first.compile_time_initializer.clone(),
        _ => ConstantValue::Null,
    };

    Ok(Some(Property {
        annotations: base.finish_annotations(ctx),
        name: base.name,
        type_parameters: base.type_parameters,
        visibility: base.visibility,
        modality: base.modality,
        containing_class: base.containing_class,
        extension_receiver: base.extension_receiver,
        return_type: base.return_type,
        kind: base.kind,
        is_var: setter.is_some(),
        is_late_init: properties.iter().all(|property| property.is_late_init),
        is_const,
        is_delegate: properties.iter().all(|property| property.is_delegate),
        getter: commonize_getter(properties),
        setter,
        compile_time_initializer,
    }))
}

fn commonize_getter(properties: &[&Property]) -> Option<PropertyGetter> {
    let getters = properties
        .iter()
        .map(|property| property.getter.as_ref())
        .collect::<Option<Vec<_>>>()?;
    Some(PropertyGetter {
        annotations: Vec::new(),
        is_default: getters.iter().all(|getter| getter.is_default),
        is_inline: getters.iter().all(|getter| getter.is_inline),
    })
}

/// `Ok(None)` demotes the property to read-only.
fn commonize_setter(properties: &[&Property]) -> CommonizeResult<PropertySetter> {
    let Some(setters) = properties
        .iter()
        .map(|property| property.setter.as_ref().map(|setter| (*property, setter)))
        .collect::<Option<Vec<_>>>()
    else {
        return Ok(None);
    };

    let facts: Vec<VisibilityFact> = setters
        .iter()
        .map(|(property, setter)| VisibilityFact {
            visibility: setter.visibility,
            is_virtual: property.is_virtual(),
        })
        .collect();
    let Some(visibility) = lower_visibility(&facts)? else {
        return Ok(None);
    };

    Ok(Some(PropertySetter {
        annotations: Vec::new(),
        parameter_annotations: Vec::new(),
        visibility,
        is_default: setters.iter().all(|(_, setter)| setter.is_default),
        is_inline: setters.iter().all(|(_, setter)| setter.is_inline),
    }))
}
