//! The part of function and property commonization they share.

use cir_ir::{
    Annotation, CallableKind, CallableMember, ContainingClass, ExtensionReceiver, Modality, Name,
    Type, TypeParameter, Visibility,
};

use super::type_params::commonize_type_parameters;
use crate::annotations::{commonize_annotations, UnsafeNumberTag};
use crate::lattice::{commonize_modality, lower_visibility, VisibilityFact};
use crate::types::TypeCommonizer;
use crate::{CommonizeResult, CommonizerContext};

/// Merged facts common to functions and properties.
pub(super) struct CallableBase {
    pub annotations: Vec<Annotation>,
    pub name: Name,
    pub type_parameters: Vec<TypeParameter>,
    pub visibility: Visibility,
    pub modality: Modality,
    pub containing_class: Option<ContainingClass>,
    pub extension_receiver: Option<ExtensionReceiver>,
    pub return_type: Type,
    pub kind: CallableKind,
    /// Widenings so far; callers add their own before synthesizing the
    /// marker with [`CallableBase::finish_annotations`].
    pub unsafe_numbers: UnsafeNumberTag,
}

impl CallableBase {
    /// Commonized annotations plus the unsafe-number marker, if any.
    pub fn finish_annotations(&mut self, ctx: &CommonizerContext<'_>) -> Vec<Annotation> {
        let mut annotations = std::mem::take(&mut self.annotations);
        annotations.extend(self.unsafe_numbers.to_annotation(ctx));
        annotations
    }
}

/// Commonize the shared facts of one member per target.
///
/// `relax_return_nullability` lets differing top-level return nullability
/// merge into a nullable return type.
pub(super) fn commonize_callable<M: CallableMember>(
    ctx: &CommonizerContext<'_>,
    members: &[&M],
    relax_return_nullability: bool,
) -> CommonizeResult<CallableBase> {
    let Some(first) = members.first() else {
        return Ok(None);
    };
    let name = first.name();
    if members.iter().any(|member| member.name() != name) {
        return Ok(None);
    }
    let Some(kind) = commonize_kind(members) else {
        return Ok(None);
    };

    let modalities: Vec<Modality> = members.iter().map(|member| member.modality()).collect();
    let Some(modality) = commonize_modality(&modalities) else {
        return Ok(None);
    };

    let facts: Vec<VisibilityFact> = members
        .iter()
        .map(|member| VisibilityFact {
            visibility: member.visibility(),
            is_virtual: member.is_virtual(),
        })
        .collect();
    let Some(visibility) = lower_visibility(&facts)? else {
        return Ok(None);
    };

    let mut unsafe_numbers = UnsafeNumberTag::default();
    let type_parameter_lists: Vec<&[TypeParameter]> =
        members.iter().map(|member| member.type_parameters()).collect();
    let Some(type_parameters) =
        commonize_type_parameters(ctx, &type_parameter_lists, &mut unsafe_numbers)?
    else {
        return Ok(None);
    };

    let receivers: Vec<Option<&ExtensionReceiver>> = members
        .iter()
        .map(|member| member.extension_receiver())
        .collect();
    let Some(extension_receiver) = commonize_receivers(ctx, &receivers, &mut unsafe_numbers)
    else {
        return Ok(None);
    };

    let return_types: Vec<&Type> = members.iter().map(|member| member.return_type()).collect();
    let Some(return_type) = TypeCommonizer::new(ctx)
        .with_covariant_nullability(relax_return_nullability)
        .commonize_into(&return_types, &mut unsafe_numbers)
    else {
        return Ok(None);
    };

    let annotation_lists: Vec<&[Annotation]> =
        members.iter().map(|member| member.annotations()).collect();

    Ok(Some(CallableBase {
        annotations: commonize_annotations(&annotation_lists),
        name,
        type_parameters,
        visibility,
        modality,
        containing_class: commonize_containing_class(members),
        extension_receiver,
        return_type,
        kind,
        unsafe_numbers,
    }))
}

/// Delegated members, and members synthesized for data classes, are never
/// commonized. Otherwise a member that is a real declaration on some target
/// is a declaration in the result.
fn commonize_kind<M: CallableMember>(members: &[&M]) -> Option<CallableKind> {
    let excluded = members.iter().any(|member| {
        member.kind() == CallableKind::Delegation
            || (member.kind() == CallableKind::Synthesized
                && member.containing_class().is_some_and(|owner| owner.is_data))
    });
    if excluded {
        return None;
    }
    let first = members.first()?.kind();
    if members.iter().all(|member| member.kind() == first) {
        Some(first)
    } else {
        Some(CallableKind::Declaration)
    }
}

/// Owner facts of the common member: the owner is itself commonized, so
/// kind and modality agree; the data flag is AND-ed like the owner's.
fn commonize_containing_class<M: CallableMember>(members: &[&M]) -> Option<ContainingClass> {
    let first = *members.first()?.containing_class()?;
    let mut owners = members.iter().map(|member| member.containing_class());
    owners.try_fold(first, |merged, owner| {
        let owner = owner?;
        Some(ContainingClass {
            is_data: merged.is_data && owner.is_data,
            ..merged
        })
    })
}

/// Outer `None`: no common receiver. `Some(None)`: no receiver on any target.
fn commonize_receivers(
    ctx: &CommonizerContext<'_>,
    receivers: &[Option<&ExtensionReceiver>],
    tag: &mut UnsafeNumberTag,
) -> Option<Option<ExtensionReceiver>> {
    if receivers.iter().all(Option::is_none) {
        return Some(None);
    }
    let types = receivers
        .iter()
        .map(|receiver| receiver.map(|receiver| &receiver.ty))
        .collect::<Option<Vec<_>>>()?;
    let ty = TypeCommonizer::new(ctx).commonize_into(&types, tag)?;
    Some(Some(ExtensionReceiver {
        annotations: Vec::new(),
        ty,
    }))
}
