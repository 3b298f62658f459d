use pretty_assertions::assert_eq;

use super::*;
use crate::{
    Class, Module, ModuleTree, Name, Package, PackageTree, StringInterner, TypeAlias,
};

fn sample_tree(interner: &StringInterner) -> TargetTree {
    let package_name = PackageName::parse("app", interner);
    let base = EntityId::parse("app", "Base", interner);

    let mut derived = Class::new(interner.intern("Derived"), ClassKind::Class);
    derived.supertypes.push(ClassType::new(base));

    let mut outer = ClassTree::new(Class::new(interner.intern("Outer"), ClassKind::Class));
    outer
        .classes
        .push(ClassTree::new(Class::new(interner.intern("Inner"), ClassKind::Interface)));

    let mut package = PackageTree::new(Package { name: package_name });
    package.classes.push(ClassTree::new(derived));
    package.classes.push(outer);
    package.type_aliases.push(TypeAlias::new(
        interner.intern("Size"),
        ClassifierType::Class(ClassType::new(EntityId::parse("core", "Long", interner))),
    ));

    TargetTree {
        modules: vec![ModuleTree {
            module: Module {
                name: interner.intern("app-module"),
            },
            packages: vec![package],
        }],
    }
}

#[test]
fn index_tree_registers_classes_and_aliases() {
    let interner = StringInterner::new();
    let mut index = ClassifierIndex::new();
    index.index_tree(&sample_tree(&interner));

    assert_eq!(index.len(), 4);

    let derived = index
        .class(&EntityId::parse("app", "Derived", &interner))
        .map(|class| class.supertypes.len());
    assert_eq!(derived, Some(1));

    let inner = index
        .class(&EntityId::parse("app", "Outer.Inner", &interner))
        .map(|class| class.kind);
    assert_eq!(inner, Some(ClassKind::Interface));
}

#[test]
fn aliases_are_reverse_indexed_by_underlying_classifier() {
    let interner = StringInterner::new();
    let mut index = ClassifierIndex::new();
    index.index_tree(&sample_tree(&interner));

    let long = EntityId::parse("core", "Long", &interner);
    assert_eq!(
        index.type_aliases_of(&long),
        &[EntityId::parse("app", "Size", &interner)]
    );
    assert!(index
        .type_aliases_of(&EntityId::parse("core", "Int", &interner))
        .is_empty());
}

#[test]
fn class_and_alias_lookups_do_not_cross() {
    let interner = StringInterner::new();
    let mut index = ClassifierIndex::new();
    index.index_tree(&sample_tree(&interner));

    let size = EntityId::parse("app", "Size", &interner);
    assert!(index.class(&size).is_none());
    assert!(index.type_alias(&size).is_some());
    assert_eq!(
        index.classifier(&size).map(ProvidedClassifier::type_parameters),
        Some(&[][..])
    );
}

#[test]
fn reinserting_alias_does_not_duplicate_reverse_entry() {
    let interner = StringInterner::new();
    let mut index = ClassifierIndex::new();
    let alias = ProvidedTypeAlias {
        type_parameters: Vec::new(),
        underlying: ClassifierType::Class(ClassType::new(EntityId::top_level(
            PackageName::new(&[Name::CORE]),
            Name::INT,
        ))),
    };
    let id = EntityId::parse("app", "Count", &interner);
    index.insert_type_alias(id.clone(), alias.clone());
    index.insert_type_alias(id.clone(), alias);

    let int = EntityId::parse("core", "Int", &interner);
    assert_eq!(index.type_aliases_of(&int), &[id]);
}
