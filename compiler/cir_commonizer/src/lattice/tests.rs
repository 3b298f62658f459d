use cir_ir::{Modality, Visibility};

use super::*;

fn fact(visibility: Visibility) -> VisibilityFact {
    VisibilityFact {
        visibility,
        is_virtual: false,
    }
}

fn virtual_fact(visibility: Visibility) -> VisibilityFact {
    VisibilityFact {
        visibility,
        is_virtual: true,
    }
}

// === Lowering ===

#[test]
fn lowering_picks_least_permissive() {
    let facts = [
        fact(Visibility::Public),
        fact(Visibility::Internal),
        fact(Visibility::Public),
    ];
    assert_eq!(lower_visibility(&facts), Ok(Some(Visibility::Internal)));
}

#[test]
fn lowering_is_order_independent() {
    let orders = [
        [Visibility::Public, Visibility::Protected],
        [Visibility::Protected, Visibility::Public],
    ];
    for order in orders {
        let facts: Vec<_> = order.into_iter().map(fact).collect();
        assert_eq!(lower_visibility(&facts), Ok(Some(Visibility::Protected)));
    }
}

#[test]
fn lowering_rejects_private() {
    assert_eq!(lower_visibility(&[fact(Visibility::Private)]), Ok(None));
    assert_eq!(
        lower_visibility(&[fact(Visibility::Public), fact(Visibility::Private)]),
        Ok(None)
    );
}

#[test]
fn lowering_rejects_incomparable() {
    assert_eq!(
        lower_visibility(&[fact(Visibility::Protected), fact(Visibility::Internal)]),
        Ok(None)
    );
}

#[test]
fn lowering_rejects_differing_virtual_members() {
    assert_eq!(
        lower_visibility(&[virtual_fact(Visibility::Public), fact(Visibility::Internal)]),
        Ok(None)
    );
    assert_eq!(
        lower_visibility(&[fact(Visibility::Internal), virtual_fact(Visibility::Public)]),
        Ok(None)
    );
    // Identical visibilities are fine for virtual members.
    assert_eq!(
        lower_visibility(&[virtual_fact(Visibility::Public), virtual_fact(Visibility::Public)]),
        Ok(Some(Visibility::Public))
    );
}

// === Equalizing ===

#[test]
fn equalizing_requires_identical() {
    assert_eq!(
        equalize_visibility(&[Visibility::Internal, Visibility::Internal]),
        Ok(Some(Visibility::Internal))
    );
    assert_eq!(
        equalize_visibility(&[Visibility::Public, Visibility::Internal]),
        Ok(None)
    );
}

#[test]
fn equalizing_rejects_private() {
    assert_eq!(
        equalize_visibility(&[Visibility::Private, Visibility::Private]),
        Ok(None)
    );
}

// === Modality ===

#[test]
fn modality_requires_equality() {
    assert_eq!(
        commonize_modality(&[Modality::Open, Modality::Open]),
        Some(Modality::Open)
    );
    assert_eq!(commonize_modality(&[Modality::Open, Modality::Final]), None);
    assert_eq!(commonize_modality(&[]), None);
}
