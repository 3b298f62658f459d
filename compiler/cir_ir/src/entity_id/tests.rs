use pretty_assertions::assert_eq;

use super::*;

#[test]
fn parse_and_display_round_trip() {
    let interner = StringInterner::new();
    let id = EntityId::parse("core.ranges", "IntRange", &interner);

    assert_eq!(id.package().segments(), &[Name::CORE, Name::RANGES]);
    assert_eq!(id.name(), Name::INT_RANGE);
    assert_eq!(id.display(&interner), "core.ranges.IntRange");
}

#[test]
fn root_package_displays_bare_name() {
    let interner = StringInterner::new();
    let id = EntityId::parse("", "Foo", &interner);

    assert!(id.package().is_root());
    assert_eq!(id.display(&interner), "Foo");
}

#[test]
fn nested_and_outer_are_inverse() {
    let interner = StringInterner::new();
    let outer = EntityId::parse("app", "Outer", &interner);
    let inner = outer.nested(interner.intern("Inner"));

    assert!(inner.is_nested());
    assert_eq!(inner.display(&interner), "app.Outer.Inner");
    assert_eq!(inner.outer(), Some(outer.clone()));
    assert_eq!(outer.outer(), None);
}

#[test]
fn ids_compare_by_value() {
    let interner = StringInterner::new();
    let a = EntityId::parse("core", "Int", &interner);
    let b = EntityId::top_level(PackageName::new(&[Name::CORE]), Name::INT);
    assert_eq!(a, b);
    assert_ne!(a, EntityId::parse("core", "Long", &interner));
}

#[test]
fn empty_relative_chain_is_named_empty() {
    let id = EntityId::new(PackageName::root(), &[]);
    assert_eq!(id.name(), Name::EMPTY);
    assert!(!id.is_nested());
}
