//! Alias substitution.
//!
//! When per-target types name different classifiers, each one may still be
//! rewritten into a classifier all targets share:
//!
//! - *forward*: an alias type is replaced by its underlying type, repeatedly;
//! - *backward*: a type is replaced by a parameterless alias whose underlying
//!   type is exactly that type (ignoring nullability), looked up in the
//!   shared dependencies and the target's own classifiers.
//!
//! Each rewrite step costs 1. The shared classifier with the lowest total
//! cost over all targets wins; ties go to the one reached first from the
//! first target.

use std::collections::VecDeque;

use cir_ir::{ClassifierType, EntityId, TypeAliasType};
use rustc_hash::FxHashSet;

use crate::CommonizerContext;

/// A classifier reachable from one target's type.
struct Candidate {
    id: EntityId,
    distance: u32,
    ty: ClassifierType,
}

/// Rewrite every type so that all name one classifier, or fail.
///
/// `types[i]` belongs to target `i`.
pub(super) fn align(
    ctx: &CommonizerContext<'_>,
    types: &[&ClassifierType],
) -> Option<Vec<ClassifierType>> {
    if !ctx.settings().substitution_enabled() {
        return None;
    }

    let reachable: Vec<Vec<Candidate>> = types
        .iter()
        .enumerate()
        .map(|(target, ty)| reachable_classifiers(ctx, target, ty))
        .collect();
    let (first, rest) = reachable.split_first()?;

    let (_, id) = first
        .iter()
        .filter_map(|candidate| {
            let others: Option<u32> = rest
                .iter()
                .map(|candidates| distance_to(candidates, &candidate.id))
                .sum();
            Some((candidate.distance + others?, &candidate.id))
        })
        .min_by_key(|(penalty, _)| *penalty)?;

    reachable
        .iter()
        .map(|candidates| {
            candidates
                .iter()
                .find(|candidate| &candidate.id == id)
                .map(|candidate| candidate.ty.clone())
        })
        .collect()
}

fn distance_to(candidates: &[Candidate], id: &EntityId) -> Option<u32> {
    candidates
        .iter()
        .find(|candidate| &candidate.id == id)
        .map(|candidate| candidate.distance)
}

/// Every classifier `start` can be rewritten into for `target`, nearest
/// first. Each classifier appears once, at its shortest distance.
fn reachable_classifiers(
    ctx: &CommonizerContext<'_>,
    target: usize,
    start: &ClassifierType,
) -> Vec<Candidate> {
    let settings = ctx.settings();
    let mut seen = FxHashSet::default();
    let mut out = Vec::new();
    let mut queue = VecDeque::from([(start.clone(), 0u32)]);

    while let Some((ty, distance)) = queue.pop_front() {
        if !seen.insert(ty.classifier_id().clone()) {
            continue;
        }

        if settings.forward_substitution {
            if let ClassifierType::TypeAlias(alias) = &ty {
                queue.push_back(((*alias.underlying).clone(), distance + 1));
            }
        }

        if settings.backward_substitution {
            for alias_id in ctx.type_aliases_of(target, ty.classifier_id()) {
                if seen.contains(alias_id) {
                    continue;
                }
                let Some(alias) = ctx.type_alias(target, alias_id) else {
                    continue;
                };
                if alias.type_parameters.is_empty()
                    && same_ignoring_nullability(&alias.underlying, &ty)
                {
                    let substituted =
                        TypeAliasType::new(alias_id.clone(), alias.underlying.clone());
                    queue.push_back((ClassifierType::TypeAlias(substituted), distance + 1));
                }
            }
        }

        out.push(Candidate {
            id: ty.classifier_id().clone(),
            distance,
            ty,
        });
    }
    out
}

fn same_ignoring_nullability(a: &ClassifierType, b: &ClassifierType) -> bool {
    a.classifier_id() == b.classifier_id() && a.with_nullable(false) == b.with_nullable(false)
}
