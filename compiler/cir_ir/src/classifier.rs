//! Classifier resolution.
//!
//! The commonizer never looks declarations up by itself; it asks a
//! [`ClassifierResolver`] whether an id names a class or a type alias and what
//! it looks like. One resolver exists per target plus one for the shared,
//! already-commonized dependencies.
//!
//! # Design
//!
//! - Read-only after construction: resolvers are shared by every commonizer
//!   invocation of a run.
//! - Reverse alias index: backward substitution needs "which aliases stand for
//!   this classifier", answered in O(1) by [`ClassifierResolver::type_aliases_of`].

use rustc_hash::FxHashMap;

use crate::{
    ClassKind, ClassTree, ClassType, ClassifierType, EntityId, Name, PackageName, TargetTree,
    Variance,
};

/// What a resolver knows about a classifier.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ProvidedClassifier {
    Class(ProvidedClass),
    TypeAlias(ProvidedTypeAlias),
}

impl ProvidedClassifier {
    pub fn type_parameters(&self) -> &[Variance] {
        match self {
            ProvidedClassifier::Class(class) => &class.type_parameters,
            ProvidedClassifier::TypeAlias(alias) => &alias.type_parameters,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProvidedClass {
    pub kind: ClassKind,
    /// Declared variance of each type parameter, by position.
    pub type_parameters: Vec<Variance>,
    pub supertypes: Vec<ClassType>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProvidedTypeAlias {
    /// Declared variance of each type parameter, by position.
    pub type_parameters: Vec<Variance>,
    pub underlying: ClassifierType,
}

/// Read-only classifier lookup service.
pub trait ClassifierResolver {
    /// Resolve a class or type alias by id.
    fn classifier(&self, id: &EntityId) -> Option<&ProvidedClassifier>;

    /// Ids of the aliases whose underlying type references `id` directly.
    fn type_aliases_of(&self, id: &EntityId) -> &[EntityId];

    /// Resolve a class, ignoring aliases.
    fn class(&self, id: &EntityId) -> Option<&ProvidedClass> {
        match self.classifier(id)? {
            ProvidedClassifier::Class(class) => Some(class),
            ProvidedClassifier::TypeAlias(_) => None,
        }
    }

    /// Resolve a type alias, ignoring classes.
    fn type_alias(&self, id: &EntityId) -> Option<&ProvidedTypeAlias> {
        match self.classifier(id)? {
            ProvidedClassifier::TypeAlias(alias) => Some(alias),
            ProvidedClassifier::Class(_) => None,
        }
    }
}

/// Map-backed [`ClassifierResolver`].
#[derive(Clone, Debug, Default)]
pub struct ClassifierIndex {
    classifiers: FxHashMap<EntityId, ProvidedClassifier>,
    /// Underlying classifier id -> aliases of it, in insertion order.
    aliases_by_underlying: FxHashMap<EntityId, Vec<EntityId>>,
}

impl ClassifierIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_class(&mut self, id: EntityId, class: ProvidedClass) {
        self.classifiers.insert(id, ProvidedClassifier::Class(class));
    }

    pub fn insert_type_alias(&mut self, id: EntityId, alias: ProvidedTypeAlias) {
        let underlying_id = alias.underlying.classifier_id().clone();
        let aliases = self.aliases_by_underlying.entry(underlying_id).or_default();
        if !aliases.contains(&id) {
            aliases.push(id.clone());
        }
        self.classifiers.insert(id, ProvidedClassifier::TypeAlias(alias));
    }

    /// Index every class and type alias declared in a target's tree.
    pub fn index_tree(&mut self, tree: &TargetTree) {
        for module in &tree.modules {
            for package in &module.packages {
                let package_name = &package.package.name;
                for class in &package.classes {
                    self.index_class(package_name, &[], class);
                }
                for alias in &package.type_aliases {
                    self.insert_type_alias(
                        EntityId::top_level(package_name.clone(), alias.name),
                        ProvidedTypeAlias {
                            type_parameters: alias
                                .type_parameters
                                .iter()
                                .map(|param| param.variance)
                                .collect(),
                            underlying: alias.underlying_type.clone(),
                        },
                    );
                }
            }
        }
    }

    fn index_class(&mut self, package: &PackageName, outer: &[Name], tree: &ClassTree) {
        let mut relative = outer.to_vec();
        relative.push(tree.class.name);

        self.insert_class(
            EntityId::new(package.clone(), &relative),
            ProvidedClass {
                kind: tree.class.kind,
                type_parameters: tree
                    .class
                    .type_parameters
                    .iter()
                    .map(|param| param.variance)
                    .collect(),
                supertypes: tree.class.supertypes.clone(),
            },
        );

        for nested in &tree.classes {
            self.index_class(package, &relative, nested);
        }
    }

    pub fn len(&self) -> usize {
        self.classifiers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classifiers.is_empty()
    }
}

impl ClassifierResolver for ClassifierIndex {
    fn classifier(&self, id: &EntityId) -> Option<&ProvidedClassifier> {
        self.classifiers.get(id)
    }

    fn type_aliases_of(&self, id: &EntityId) -> &[EntityId] {
        self.aliases_by_underlying
            .get(id)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests;
