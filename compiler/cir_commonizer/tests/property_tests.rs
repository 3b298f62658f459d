//! Property-based tests for the commonizer laws.
//!
//! 1. Identity: one input commonizes to itself
//! 2. Equal inputs: N identical inputs commonize to that input
//! 3. Lowering visibility does not depend on target order

#![allow(clippy::unwrap_used, clippy::expect_used, reason = "Tests can panic")]
#![allow(
    clippy::redundant_closure_for_method_calls,
    reason = "Proptest macros generate code with these patterns"
)]

use cir_commonizer::lattice::{lower_visibility, VisibilityFact};
use cir_commonizer::{CommonizerContext, CommonizerSettings, TypeCommonizer};
use cir_ir::{
    ClassType, ClassifierIndex, ClassifierResolver, EntityId, StringInterner, Target, TargetTree,
    Type, TypeProjection, Visibility,
};
use proptest::prelude::*;

// -- Strategies --

/// Interner-free description of a type.
#[derive(Clone, Debug)]
enum Shape {
    Class {
        class: usize,
        nullable: bool,
        arguments: Vec<Option<Shape>>,
    },
    Parameter {
        index: u32,
        nullable: bool,
    },
    Flexible(Box<Shape>, Box<Shape>),
}

const CLASSES: [&str; 4] = ["Alpha", "Beta", "Gamma", "Delta"];

fn shape_strategy() -> impl Strategy<Value = Shape> {
    let leaf = prop_oneof![
        (0..CLASSES.len(), any::<bool>()).prop_map(|(class, nullable)| Shape::Class {
            class,
            nullable,
            arguments: Vec::new(),
        }),
        (0..3u32, any::<bool>()).prop_map(|(index, nullable)| Shape::Parameter { index, nullable }),
    ];
    leaf.prop_recursive(4, 24, 3, |inner| {
        prop_oneof![
            3 => (
                0..CLASSES.len(),
                any::<bool>(),
                prop::collection::vec(prop::option::of(inner.clone()), 1..3),
            )
                .prop_map(|(class, nullable, arguments)| Shape::Class {
                    class,
                    nullable,
                    arguments,
                }),
            1 => (inner.clone(), inner)
                .prop_map(|(lower, upper)| Shape::Flexible(Box::new(lower), Box::new(upper))),
        ]
    })
}

fn visibility_strategy() -> impl Strategy<Value = Visibility> {
    prop_oneof![
        Just(Visibility::Public),
        Just(Visibility::Protected),
        Just(Visibility::Internal),
        Just(Visibility::Private),
    ]
}

fn build(shape: &Shape, interner: &StringInterner) -> Type {
    match shape {
        Shape::Class {
            class,
            nullable,
            arguments,
        } => {
            let arguments = arguments
                .iter()
                .map(|argument| match argument {
                    Some(argument) => TypeProjection::invariant(build(argument, interner)),
                    None => TypeProjection::Star,
                })
                .collect();
            let ty = ClassType::new(EntityId::parse("demo", CLASSES[*class], interner))
                .with_arguments(arguments);
            Type::from(if *nullable { ty.nullable() } else { ty })
        }
        Shape::Parameter { index, nullable } => Type::type_parameter(*index, *nullable),
        Shape::Flexible(lower, upper) => {
            Type::flexible(build(lower, interner), build(upper, interner))
        }
    }
}

fn commonize_types(types: &[Type], interner: &StringInterner) -> Option<Type> {
    let targets: Vec<Target> = (0..types.len())
        .map(|i| Target::new(format!("t{i}"), None))
        .collect();
    let tree = TargetTree::default();
    let trees = vec![&tree; types.len()];
    let empty = ClassifierIndex::new();
    let ctx = CommonizerContext::new(
        targets,
        &trees,
        vec![&empty as &dyn ClassifierResolver; types.len()],
        &empty,
        CommonizerSettings::default(),
        interner,
    )
    .expect("inputs line up");
    let refs: Vec<&Type> = types.iter().collect();
    TypeCommonizer::new(&ctx).commonize(&refs).map(|common| common.ty)
}

fn lower(visibilities: &[Visibility]) -> Option<Visibility> {
    let facts: Vec<VisibilityFact> = visibilities
        .iter()
        .map(|&visibility| VisibilityFact {
            visibility,
            is_virtual: false,
        })
        .collect();
    lower_visibility(&facts).expect("lowering never violates its contract")
}

// -- Properties --

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn single_type_commonizes_to_itself(shape in shape_strategy()) {
        let interner = StringInterner::new();
        let ty = build(&shape, &interner);
        prop_assert_eq!(commonize_types(&[ty.clone()], &interner), Some(ty));
    }

    #[test]
    fn identical_types_commonize_to_themselves(shape in shape_strategy(), copies in 2..6usize) {
        let interner = StringInterner::new();
        let ty = build(&shape, &interner);
        prop_assert_eq!(commonize_types(&vec![ty.clone(); copies], &interner), Some(ty));
    }

    #[test]
    fn single_visibility_lowers_to_itself(visibility in visibility_strategy()) {
        let expected = (!visibility.is_private()).then_some(visibility);
        prop_assert_eq!(lower(&[visibility]), expected);
    }

    #[test]
    fn visibility_lowering_is_order_independent(
        (visibilities, shuffled) in prop::collection::vec(visibility_strategy(), 1..6)
            .prop_flat_map(|v| (Just(v.clone()), Just(v).prop_shuffle()))
    ) {
        prop_assert_eq!(lower(&visibilities), lower(&shuffled));
    }
}

#[test]
fn documented_visibility_orders_agree() {
    use Visibility::{Internal, Public};
    assert_eq!(lower(&[Public, Internal, Public]), Some(Internal));
    assert_eq!(lower(&[Internal, Public, Public]), Some(Internal));
}
