//! End-to-end commonization scenarios through [`cir_commonizer::commonize`].

#![allow(clippy::unwrap_used, clippy::expect_used, reason = "Tests can panic")]

use cir_commonizer::annotations::{Deprecation, DeprecationLevel, FALLBACK_MESSAGE};
use cir_commonizer::{
    commonize, CommonizedTree, CommonizerError, CommonizerInput, CommonizerSettings, NodeKey,
    TargetInput,
};
use cir_ir::{
    well_known, Class, ClassKind, ClassTree, ClassType, ClassifierIndex, ClassifierType,
    Declaration, EntityId, Function, Module, ModuleTree, Name, Package, PackageName, PackageTree,
    PointerWidth, StringInterner, Target, TargetTree, Type, TypeAliasType, ValueParameter,
    Visibility,
};
use pretty_assertions::assert_eq;

// -- Helpers --

fn targets(count: usize) -> Vec<Target> {
    (0..count)
        .map(|i| Target::new(format!("t{i}"), None))
        .collect()
}

fn demo_package(interner: &StringInterner) -> PackageTree {
    PackageTree::new(Package {
        name: PackageName::parse("demo", interner),
    })
}

fn target_tree(interner: &StringInterner, package: PackageTree) -> TargetTree {
    TargetTree {
        modules: vec![ModuleTree {
            module: Module {
                name: interner.intern("main"),
            },
            packages: vec![package],
        }],
    }
}

fn run(
    interner: &StringInterner,
    targets: Vec<Target>,
    trees: &[TargetTree],
    settings: CommonizerSettings,
) -> Result<CommonizedTree, CommonizerError> {
    let dependencies = ClassifierIndex::new();
    let common = ClassifierIndex::new();
    let input = CommonizerInput {
        targets: targets
            .into_iter()
            .zip(trees)
            .map(|(target, tree)| TargetInput {
                target,
                tree,
                dependencies: &dependencies,
            })
            .collect(),
        common_dependencies: &common,
        settings,
    };
    commonize(input, interner)
}

/// Common declaration of the package member with `key`.
fn member<'t>(
    tree: &'t CommonizedTree,
    interner: &StringInterner,
    key: NodeKey,
) -> Option<&'t Declaration> {
    let path = [
        NodeKey::Module(interner.intern("main")),
        NodeKey::Package(PackageName::parse("demo", interner)),
        key,
    ];
    tree.common(tree.find_path(&path).expect("node exists"))
}

fn common_function<'t>(
    tree: &'t CommonizedTree,
    interner: &StringInterner,
    function: &Function,
) -> Option<&'t Function> {
    match member(tree, interner, NodeKey::of(&Declaration::Function(function.clone())))? {
        Declaration::Function(function) => Some(function),
        _ => None,
    }
}

fn function_tree(interner: &StringInterner, function: Function) -> TargetTree {
    let mut package = demo_package(interner);
    package.functions.push(function);
    target_tree(interner, package)
}

// -- Scenarios --

#[test]
fn forward_substitution_resolves_alias() {
    let interner = StringInterner::new();
    let name = interner.intern("size");
    let ulong = ClassType::new(well_known().ulong.clone());
    let alias = TypeAliasType::new(
        EntityId::parse("demo", "Size", &interner),
        ClassifierType::Class(ulong.clone()),
    );
    let trees = [
        function_tree(&interner, Function::new(name, Type::from(alias))),
        function_tree(&interner, Function::new(name, Type::from(ulong.clone()))),
    ];

    let tree = run(&interner, targets(2), &trees, CommonizerSettings::default()).unwrap();
    let function = Function::new(name, Type::from(ulong.clone()));
    assert_eq!(
        common_function(&tree, &interner, &function).map(|f| &f.return_type),
        Some(&Type::from(ulong))
    );
}

#[test]
fn substitution_disabled_keeps_function_platform_specific() {
    let interner = StringInterner::new();
    let name = interner.intern("size");
    let ulong = ClassType::new(well_known().ulong.clone());
    let alias = TypeAliasType::new(
        EntityId::parse("demo", "Size", &interner),
        ClassifierType::Class(ulong.clone()),
    );
    let trees = [
        function_tree(&interner, Function::new(name, Type::from(alias))),
        function_tree(&interner, Function::new(name, Type::from(ulong.clone()))),
    ];

    let tree = run(&interner, targets(2), &trees, CommonizerSettings::strict()).unwrap();
    let function = Function::new(name, Type::from(ulong));
    assert_eq!(common_function(&tree, &interner, &function), None);
}

#[test]
fn deprecation_takes_strongest_level() {
    let interner = StringInterner::new();
    let name = interner.intern("old");
    let deprecated = |level, message| {
        let mut function = Function::new(name, Type::class(well_known().int.clone()));
        function
            .annotations
            .push(Deprecation::new(level, message).to_annotation());
        function
    };
    let first = deprecated(DeprecationLevel::Warning, "m1");
    let trees = [
        function_tree(&interner, first.clone()),
        function_tree(&interner, deprecated(DeprecationLevel::Error, "m2")),
    ];

    let tree = run(&interner, targets(2), &trees, CommonizerSettings::default()).unwrap();
    let common = common_function(&tree, &interner, &first).expect("deprecated functions merge");
    let deprecation = common
        .annotations
        .iter()
        .find(|annotation| annotation.class_id == well_known().deprecated)
        .map(Deprecation::from_annotation);
    assert_eq!(
        deprecation,
        Some(Deprecation::new(DeprecationLevel::Error, FALLBACK_MESSAGE))
    );
}

#[test]
fn conflicting_parameter_names_are_synthesized_and_patched() {
    let interner = StringInterner::new();
    let int = Type::class(well_known().int.clone());
    let with_parameter = |parameter: &str| {
        let mut function = Function::new(interner.intern("get"), int.clone());
        function.value_parameters = vec![ValueParameter::new(interner.intern(parameter), int.clone())];
        function
    };
    let trees = [
        function_tree(&interner, with_parameter("count")),
        function_tree(&interner, with_parameter("size")),
    ];

    let tree = run(&interner, targets(2), &trees, CommonizerSettings::default()).unwrap();
    let common = common_function(&tree, &interner, &with_parameter("x")).expect("merges");
    let arg0 = interner.intern("arg0");
    assert_eq!(common.value_parameters[0].name, arg0);
    assert!(!common.has_stable_parameter_names);
    assert_eq!(tree.patched_count(), 1);

    let path = [
        NodeKey::Module(interner.intern("main")),
        NodeKey::Package(PackageName::parse("demo", &interner)),
        NodeKey::of(&Declaration::Function(with_parameter("x"))),
    ];
    let id = tree.find_path(&path).expect("node exists");
    let patched_names: Vec<Name> = tree
        .target_declarations(id)
        .iter()
        .filter_map(|declaration| match declaration {
            Some(Declaration::Function(function)) => Some(function.value_parameters[0].name),
            _ => None,
        })
        .collect();
    assert_eq!(patched_names, vec![arg0, arg0]);
}

#[test]
fn transitively_inherited_interface_is_consumed() {
    let interner = StringInterner::new();
    let interface_a = ClassType::new(EntityId::parse("demo", "InterfaceA", &interner));
    let interface_b = ClassType::new(EntityId::parse("demo", "InterfaceB", &interner));
    let impl_name = interner.intern("Impl");

    let tree_for_target = || {
        let mut package = demo_package(&interner);
        package.classes.push(ClassTree::new(Class::new(
            interner.intern("InterfaceA"),
            ClassKind::Interface,
        )));
        let mut b = Class::new(interner.intern("InterfaceB"), ClassKind::Interface);
        b.supertypes = vec![interface_a.clone()];
        package.classes.push(ClassTree::new(b));
        let mut class = Class::new(impl_name, ClassKind::Class);
        class.supertypes = vec![interface_a.clone(), interface_b.clone()];
        package.classes.push(ClassTree::new(class));
        target_tree(&interner, package)
    };
    let trees = [tree_for_target(), tree_for_target(), tree_for_target()];

    let tree = run(&interner, targets(3), &trees, CommonizerSettings::default()).unwrap();
    let Some(Declaration::Class(class)) = member(&tree, &interner, NodeKey::Class(impl_name)) else {
        panic!("Impl should commonize");
    };
    assert_eq!(class.supertypes, vec![interface_b]);
}

#[test]
fn unmergeable_class_prunes_its_members() {
    let interner = StringInterner::new();
    let shape = interner.intern("Shape");
    let class_tree = |visibility| {
        let mut class = Class::new(shape, ClassKind::Class);
        class.visibility = visibility;
        let mut tree = ClassTree::new(class);
        tree.functions
            .push(Function::new(interner.intern("area"), Type::class(well_known().double.clone())));
        let mut package = demo_package(&interner);
        package.classes.push(tree);
        target_tree(&interner, package)
    };
    let trees = [class_tree(Visibility::Public), class_tree(Visibility::Internal)];

    let tree = run(&interner, targets(2), &trees, CommonizerSettings::default()).unwrap();
    assert_eq!(member(&tree, &interner, NodeKey::Class(shape)), None);
    let path = [
        NodeKey::Module(interner.intern("main")),
        NodeKey::Package(PackageName::parse("demo", &interner)),
        NodeKey::Class(shape),
    ];
    let class = tree.find_path(&path).expect("class node exists");
    let members = tree.children(class);
    assert_eq!(members.len(), 1);
    assert!(!tree.node(members[0]).is_computed());
}

#[test]
fn function_visibility_lowers_across_targets() {
    let interner = StringInterner::new();
    let function = |visibility| {
        let mut function = Function::new(interner.intern("f"), Type::class(well_known().int.clone()));
        function.visibility = visibility;
        function
    };
    let trees = [
        function_tree(&interner, function(Visibility::Public)),
        function_tree(&interner, function(Visibility::Internal)),
        function_tree(&interner, function(Visibility::Public)),
    ];

    let tree = run(&interner, targets(3), &trees, CommonizerSettings::default()).unwrap();
    let common = common_function(&tree, &interner, &function(Visibility::Public));
    assert_eq!(common.map(|f| f.visibility), Some(Visibility::Internal));
}

#[test]
fn platform_width_arrays_unify() {
    let interner = StringInterner::new();
    let ids = well_known();
    let name = interner.intern("buffer");
    let trees = [
        function_tree(&interner, Function::new(name, Type::class(ids.int_array.clone()))),
        function_tree(&interner, Function::new(name, Type::class(ids.long_array.clone()))),
    ];
    let targets = vec![
        Target::new("arm32", Some(PointerWidth::Bits32)),
        Target::new("arm64", Some(PointerWidth::Bits64)),
    ];

    let tree = run(&interner, targets, &trees, CommonizerSettings::default()).unwrap();
    let function = Function::new(name, Type::class(ids.int_array.clone()));
    assert_eq!(
        common_function(&tree, &interner, &function).map(|f| &f.return_type),
        Some(&Type::class(ids.platform_int_array.clone()))
    );
}

#[test]
fn declaration_missing_on_one_target_stays_platform_specific() {
    let interner = StringInterner::new();
    let int = Type::class(well_known().int.clone());
    let only = Function::new(interner.intern("only"), int);
    let trees = [
        function_tree(&interner, only.clone()),
        target_tree(&interner, demo_package(&interner)),
    ];

    let tree = run(&interner, targets(2), &trees, CommonizerSettings::default()).unwrap();
    assert_eq!(common_function(&tree, &interner, &only), None);
}

#[test]
fn no_targets_is_rejected() {
    let interner = StringInterner::new();
    let result = run(&interner, Vec::new(), &[], CommonizerSettings::default());
    assert!(matches!(result, Err(CommonizerError::NoTargets)));
}
