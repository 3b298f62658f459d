use super::*;

#[test]
fn well_known_names_resolve_to_their_text() {
    let interner = StringInterner::new();
    assert_eq!(interner.lookup(Name::EMPTY), "");
    assert_eq!(interner.lookup(Name::INT), "Int");
    assert_eq!(interner.lookup(Name::DEPRECATED), "Deprecated");
    assert_eq!(interner.lookup(Name::VARIADIC_ARGUMENTS), "variadicArguments");
}

#[test]
fn interning_well_known_text_returns_constant() {
    let interner = StringInterner::new();
    assert_eq!(interner.intern("Long"), Name::LONG);
    assert_eq!(interner.intern("core"), Name::CORE);
}

#[test]
fn well_known_range_fits_reserved_slots() {
    assert!(WELL_KNOWN.len() <= Name::FIRST_DYNAMIC as usize);
    assert!(Name::VARIADIC_ARGUMENTS.is_well_known());
}

#[test]
fn dynamic_names_start_after_reserved_range() {
    let interner = StringInterner::new();
    assert!(interner.is_empty());

    let count = interner.intern("count");
    assert_eq!(count.raw(), Name::FIRST_DYNAMIC);
    assert!(!count.is_well_known());
    assert!(!interner.is_empty());
}

#[test]
fn interning_is_idempotent() {
    let interner = StringInterner::new();
    let first = interner.intern("size");
    let second = interner.intern("size");
    assert_eq!(first, second);
    assert_eq!(interner.lookup(first), "size");
}

#[test]
fn distinct_strings_get_distinct_names() {
    let interner = StringInterner::new();
    let a = interner.intern("a");
    let b = interner.intern("b");
    assert_ne!(a, b);
}

#[test]
fn unknown_name_looks_up_empty() {
    let interner = StringInterner::new();
    assert_eq!(interner.lookup(Name::from_raw(u32::MAX)), "");
}
