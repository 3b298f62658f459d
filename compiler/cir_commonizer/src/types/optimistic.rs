//! Optimistic numeric widening.

use cir_ir::{well_known, ClassType, EntityId};

use crate::annotations::UnsafeNumberTag;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum NumericFamily {
    Signed,
    Unsigned,
    Floating,
}

/// Family and width rank of a numeric primitive.
fn numeric_rank(id: &EntityId) -> Option<(NumericFamily, u8)> {
    let ids = well_known();
    let ranked = [
        (&ids.byte, NumericFamily::Signed, 0),
        (&ids.short, NumericFamily::Signed, 1),
        (&ids.int, NumericFamily::Signed, 2),
        (&ids.long, NumericFamily::Signed, 3),
        (&ids.ubyte, NumericFamily::Unsigned, 0),
        (&ids.ushort, NumericFamily::Unsigned, 1),
        (&ids.uint, NumericFamily::Unsigned, 2),
        (&ids.ulong, NumericFamily::Unsigned, 3),
        (&ids.float, NumericFamily::Floating, 0),
        (&ids.double, NumericFamily::Floating, 1),
    ];
    ranked
        .into_iter()
        .find(|(known, _, _)| *known == id)
        .map(|(_, family, rank)| (family, rank))
}

/// Widen differing numerics of one family to the widest of them and record
/// each target's actual type in `tag`.
pub(super) fn commonize(expansions: &[ClassType], tag: &mut UnsafeNumberTag) -> Option<ClassType> {
    let mut widest: Option<(NumericFamily, u8, &EntityId)> = None;
    for ty in expansions {
        if ty.outer.is_some() || !ty.arguments.is_empty() {
            return None;
        }
        let (family, rank) = numeric_rank(&ty.class_id)?;
        match widest {
            Some((widest_family, _, _)) if widest_family != family => return None,
            Some((_, widest_rank, _)) if widest_rank >= rank => {}
            _ => widest = Some((family, rank, &ty.class_id)),
        }
    }

    let (_, _, id) = widest?;
    if expansions.iter().all(|ty| &ty.class_id == id) {
        return None;
    }
    tag.record(expansions.iter().map(|ty| &ty.class_id));
    Some(ClassType::new(id.clone()))
}
