//! Platform-width integer unification.
//!
//! A width-specific family member (`Int` on 32-bit targets, `Long` on 64-bit
//! ones, and likewise for arrays, ranges, progressions and variable holders)
//! unifies into the width-agnostic family type, provided every target's
//! pointer width is known and each input is the member for that width.

use cir_ir::{well_known, ClassType, EntityId, PointerWidth, TypeProjection};

use super::TypeCommonizer;
use crate::annotations::UnsafeNumberTag;

struct Family {
    bits32: &'static EntityId,
    bits64: &'static EntityId,
    platform: &'static EntityId,
    /// Variable holders carry their value type as a single argument.
    has_argument: bool,
}

impl Family {
    fn member(&self, width: PointerWidth) -> &'static EntityId {
        match width {
            PointerWidth::Bits32 => self.bits32,
            PointerWidth::Bits64 => self.bits64,
        }
    }
}

fn families() -> [Family; 10] {
    let ids = well_known();
    let family = |bits32, bits64, platform| Family {
        bits32,
        bits64,
        platform,
        has_argument: false,
    };
    [
        family(&ids.int, &ids.long, &ids.platform_int),
        family(&ids.uint, &ids.ulong, &ids.platform_uint),
        family(&ids.int_array, &ids.long_array, &ids.platform_int_array),
        family(&ids.uint_array, &ids.ulong_array, &ids.platform_uint_array),
        family(&ids.int_range, &ids.long_range, &ids.platform_int_range),
        family(&ids.uint_range, &ids.ulong_range, &ids.platform_uint_range),
        family(
            &ids.int_progression,
            &ids.long_progression,
            &ids.platform_int_progression,
        ),
        family(
            &ids.uint_progression,
            &ids.ulong_progression,
            &ids.platform_uint_progression,
        ),
        Family {
            has_argument: true,
            ..family(&ids.int_var_of, &ids.long_var_of, &ids.platform_int_var_of)
        },
        Family {
            has_argument: true,
            ..family(&ids.uint_var_of, &ids.ulong_var_of, &ids.platform_uint_var_of)
        },
    ]
}

/// `expansions[i]` is target `i`'s expanded type.
pub(super) fn commonize(
    commonizer: &TypeCommonizer<'_>,
    expansions: &[ClassType],
    tag: &mut UnsafeNumberTag,
) -> Option<ClassType> {
    let widths = commonizer
        .ctx
        .targets()
        .iter()
        .take(expansions.len())
        .map(|target| target.pointer_width)
        .collect::<Option<Vec<_>>>()?;
    if widths.len() != expansions.len() {
        return None;
    }

    let family = families().into_iter().find(|family| {
        expansions
            .iter()
            .zip(&widths)
            .all(|(ty, width)| ty.outer.is_none() && &ty.class_id == family.member(*width))
    })?;

    let arguments = if family.has_argument {
        let lists: Vec<&[TypeProjection]> =
            expansions.iter().map(|ty| ty.arguments.as_slice()).collect();
        if lists.iter().any(|list| list.len() != 1) {
            return None;
        }
        commonizer.commonize_arguments(&lists, tag)?
    } else if expansions.iter().any(|ty| !ty.arguments.is_empty()) {
        return None;
    } else {
        Vec::new()
    };

    Some(ClassType::new(family.platform.clone()).with_arguments(arguments))
}
