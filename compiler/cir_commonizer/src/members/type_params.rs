//! Type parameter lists: same length, and per position the same name,
//! variance and reification with commonizable upper bounds.

use cir_ir::{Type, TypeParameter};

use crate::annotations::UnsafeNumberTag;
use crate::core::{commonize_all, Accumulator, Commonizer, ListCommonizer, Prefix, StandardCommonizer};
use crate::types::{CommonType, TypeCommonizer};
use crate::{CommonizeResult, CommonizerContext};

type BoundCommonizer<'c> = StandardCommonizer<Prefix<TypeCommonizer<'c>, Type, CommonType>>;

/// One type parameter position.
struct TypeParameterAccumulator<'c> {
    types: TypeCommonizer<'c>,
    first: Option<TypeParameter>,
    bounds: Vec<BoundCommonizer<'c>>,
}

impl<'c> TypeParameterAccumulator<'c> {
    fn new(types: TypeCommonizer<'c>) -> Self {
        Self {
            types,
            first: None,
            bounds: Vec::new(),
        }
    }

    fn combine_bounds(&mut self, bounds: &[Type]) -> bool {
        self.bounds.len() == bounds.len()
            && self
                .bounds
                .iter_mut()
                .zip(bounds)
                .all(|(commonizer, bound)| commonizer.commonize_with(bound))
    }
}

impl Accumulator<TypeParameter> for TypeParameterAccumulator<'_> {
    type Output = (TypeParameter, UnsafeNumberTag);

    const NAME: &'static str = "type parameter";

    fn initialize(&mut self, first: &TypeParameter) -> bool {
        let types = self.types;
        self.bounds = first
            .upper_bounds
            .iter()
            .map(|_| StandardCommonizer::new(Prefix::new(types)))
            .collect();
        self.first = Some(first.clone());
        self.combine_bounds(&first.upper_bounds)
    }

    fn combine(&mut self, next: &TypeParameter) -> bool {
        let Some(first) = &self.first else {
            return false;
        };
        if first.name != next.name
            || first.variance != next.variance
            || first.is_reified != next.is_reified
        {
            return false;
        }
        self.combine_bounds(&next.upper_bounds)
    }

    fn output(&self) -> Option<Self::Output> {
        let first = self.first.as_ref()?;
        let mut tag = UnsafeNumberTag::default();
        let mut upper_bounds = Vec::with_capacity(self.bounds.len());
        for bound in &self.bounds {
            let common = bound.result().ok()?;
            tag.merge(&common.unsafe_numbers);
            upper_bounds.push(common.ty);
        }
        let parameter = TypeParameter {
            annotations: Vec::new(),
            name: first.name,
            is_reified: first.is_reified,
            variance: first.variance,
            upper_bounds,
        };
        Some((parameter, tag))
    }
}

/// Commonize one type parameter list per target.
pub fn commonize_type_parameters(
    ctx: &CommonizerContext<'_>,
    lists: &[&[TypeParameter]],
    tag: &mut UnsafeNumberTag,
) -> CommonizeResult<Vec<TypeParameter>> {
    let types = TypeCommonizer::new(ctx);
    let mut list =
        ListCommonizer::new(|| StandardCommonizer::new(TypeParameterAccumulator::new(types)));
    let merged: Option<Vec<(TypeParameter, UnsafeNumberTag)>> =
        commonize_all(&mut list, lists.iter().copied())?;

    Ok(merged.map(|merged| {
        merged
            .into_iter()
            .map(|(parameter, parameter_tag)| {
                tag.merge(&parameter_tag);
                parameter
            })
            .collect()
    }))
}
