use cir_ir::{
    Class, ClassKind, ClassTree, ClassifierType, Module, ModuleTree, Package, PackageName,
    PackageTree,
};
use pretty_assertions::assert_eq;

use super::*;
use crate::test_support::Fixture;

fn tree_declaring(fixture: &Fixture, package: &str, class: &str, kind: ClassKind) -> TargetTree {
    let mut package_tree = PackageTree::new(Package {
        name: PackageName::parse(package, &fixture.interner),
    });
    package_tree
        .classes
        .push(ClassTree::new(Class::new(fixture.name(class), kind)));
    TargetTree {
        modules: vec![ModuleTree {
            module: Module {
                name: fixture.name("main"),
            },
            packages: vec![package_tree],
        }],
    }
}

#[test]
fn no_targets_is_an_error() {
    let fixture = Fixture::new(0);
    let result = CommonizerContext::new(
        Vec::new(),
        &[],
        Vec::new(),
        &fixture.common,
        CommonizerSettings::default(),
        &fixture.interner,
    );
    assert!(matches!(result, Err(CommonizerError::NoTargets)));
}

#[test]
fn per_target_inputs_must_line_up() {
    let fixture = Fixture::new(2);
    let tree = TargetTree::default();
    let result = CommonizerContext::new(
        fixture.targets.clone(),
        &[&tree],
        vec![&fixture.common as &dyn ClassifierResolver; 2],
        &fixture.common,
        CommonizerSettings::default(),
        &fixture.interner,
    );
    assert!(matches!(
        result,
        Err(CommonizerError::TargetCountMismatch {
            what: "target trees",
            expected: 2,
            found: 1,
        })
    ));
}

#[test]
fn own_declarations_shadow_dependencies() {
    let mut fixture = Fixture::new(2);
    fixture.add_class(Some(0), "demo.Foo", ClassKind::Interface, Vec::new());
    fixture.add_class(None, "demo.Foo", ClassKind::Object, Vec::new());
    fixture.trees[1] = tree_declaring(&fixture, "demo", "Foo", ClassKind::EnumClass);
    let ctx = fixture.context();
    let foo = fixture.id("demo.Foo");

    assert_eq!(ctx.class(0, &foo).map(|c| c.kind), Some(ClassKind::Interface));
    assert_eq!(ctx.class(1, &foo).map(|c| c.kind), Some(ClassKind::EnumClass));
    assert_eq!(ctx.class(2, &foo), None);
}

#[test]
fn shared_dependencies_are_the_last_layer() {
    let mut fixture = Fixture::new(2);
    fixture.add_class(None, "demo.Shared", ClassKind::Class, Vec::new());
    let ctx = fixture.context();
    let shared = fixture.id("demo.Shared");

    assert!(ctx.class(0, &shared).is_some());
    assert!(ctx.class(1, &shared).is_some());
    assert_eq!(ctx.type_alias(0, &shared), None);
    assert_eq!(ctx.class_kind(&shared), Some(ClassKind::Class));
}

#[test]
fn class_kind_falls_back_to_targets() {
    let mut fixture = Fixture::new(2);
    fixture.add_class(Some(1), "demo.Late", ClassKind::Interface, Vec::new());
    let ctx = fixture.context();
    assert_eq!(ctx.class_kind(&fixture.id("demo.Late")), Some(ClassKind::Interface));
    assert_eq!(ctx.class_kind(&fixture.id("demo.Missing")), None);
}

#[test]
fn aliases_of_list_shared_layer_first() {
    let mut fixture = Fixture::new(1);
    let target = ClassifierType::Class(fixture.class_type("demo.Target"));
    fixture.add_alias(Some(0), "demo.Local", target.clone());
    fixture.add_alias(None, "demo.Shared", target);
    let ctx = fixture.context();

    let id = fixture.id("demo.Target");
    let aliases: Vec<&EntityId> = ctx.type_aliases_of(0, &id).collect();
    assert_eq!(aliases, vec![&fixture.id("demo.Shared"), &fixture.id("demo.Local")]);
}

#[test]
fn display_renders_qualified_name() {
    let fixture = Fixture::new(1);
    let ctx = fixture.context();
    assert_eq!(ctx.display(&fixture.id("demo.sub.Foo")), "demo.sub.Foo");
}
