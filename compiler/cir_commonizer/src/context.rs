//! Shared, read-only state of a commonization run.
//!
//! Every commonizer invocation of a run sees the same targets, settings and
//! classifier resolvers. Per target, classifiers are looked up in three
//! layers: the target's own declarations, then its dependencies, then the
//! shared (already-commonized) dependencies.

use cir_ir::{
    ClassKind, ClassifierIndex, ClassifierResolver, EntityId, ProvidedClass, ProvidedClassifier,
    ProvidedTypeAlias, StringInterner, Target, TargetTree,
};

use crate::{CommonizerError, CommonizerSettings};

/// Classifier lookup for one target.
struct TargetClassifiers<'a> {
    own: ClassifierIndex,
    dependencies: &'a dyn ClassifierResolver,
}

/// Read-only state shared by all commonizers of a run.
pub struct CommonizerContext<'a> {
    targets: Vec<Target>,
    classifiers: Vec<TargetClassifiers<'a>>,
    common: &'a dyn ClassifierResolver,
    settings: CommonizerSettings,
    interner: &'a StringInterner,
}

impl<'a> CommonizerContext<'a> {
    /// Build a context, indexing every classifier the target trees declare.
    ///
    /// `trees` and `dependencies` must line up with `targets`.
    pub fn new(
        targets: Vec<Target>,
        trees: &[&TargetTree],
        dependencies: Vec<&'a dyn ClassifierResolver>,
        common: &'a dyn ClassifierResolver,
        settings: CommonizerSettings,
        interner: &'a StringInterner,
    ) -> Result<Self, CommonizerError> {
        if targets.is_empty() {
            return Err(CommonizerError::NoTargets);
        }
        check_count("target trees", targets.len(), trees.len())?;
        check_count("dependency resolvers", targets.len(), dependencies.len())?;

        let classifiers = trees
            .iter()
            .zip(dependencies)
            .map(|(tree, dependencies)| {
                let mut own = ClassifierIndex::new();
                own.index_tree(tree);
                TargetClassifiers { own, dependencies }
            })
            .collect();

        Ok(Self {
            targets,
            classifiers,
            common,
            settings,
            interner,
        })
    }

    #[inline]
    pub fn targets(&self) -> &[Target] {
        &self.targets
    }

    #[inline]
    pub fn target_count(&self) -> usize {
        self.targets.len()
    }

    #[inline]
    pub fn settings(&self) -> &CommonizerSettings {
        &self.settings
    }

    #[inline]
    pub fn interner(&self) -> &'a StringInterner {
        self.interner
    }

    /// Resolve `id` as seen by `target`.
    pub fn classifier(&self, target: usize, id: &EntityId) -> Option<&ProvidedClassifier> {
        let layers = self.classifiers.get(target)?;
        layers
            .own
            .classifier(id)
            .or_else(|| layers.dependencies.classifier(id))
            .or_else(|| self.common.classifier(id))
    }

    pub fn class(&self, target: usize, id: &EntityId) -> Option<&ProvidedClass> {
        match self.classifier(target, id)? {
            ProvidedClassifier::Class(class) => Some(class),
            ProvidedClassifier::TypeAlias(_) => None,
        }
    }

    pub fn type_alias(&self, target: usize, id: &EntityId) -> Option<&ProvidedTypeAlias> {
        match self.classifier(target, id)? {
            ProvidedClassifier::TypeAlias(alias) => Some(alias),
            ProvidedClassifier::Class(_) => None,
        }
    }

    /// Aliases whose underlying type references `id`, as seen by `target`.
    ///
    /// Shared dependencies come first. May yield duplicates across layers.
    pub fn type_aliases_of<'s>(
        &'s self,
        target: usize,
        id: &'s EntityId,
    ) -> impl Iterator<Item = &'s EntityId> + 's {
        let layers = self.classifiers.get(target);
        self.common
            .type_aliases_of(id)
            .iter()
            .chain(layers.map_or(&[][..], |l| l.own.type_aliases_of(id)))
            .chain(layers.map_or(&[][..], |l| l.dependencies.type_aliases_of(id)))
    }

    /// Kind of the class `id`, from the shared dependencies or the first
    /// target that knows it.
    pub fn class_kind(&self, id: &EntityId) -> Option<ClassKind> {
        if let Some(class) = self.common.class(id) {
            return Some(class.kind);
        }
        (0..self.target_count()).find_map(|target| self.class(target, id).map(|class| class.kind))
    }

    /// Render a classifier id for diagnostics and synthesized annotations.
    pub fn display(&self, id: &EntityId) -> String {
        id.display(self.interner)
    }
}

fn check_count(what: &'static str, expected: usize, found: usize) -> Result<(), CommonizerError> {
    if expected == found {
        Ok(())
    } else {
        Err(CommonizerError::TargetCountMismatch {
            what,
            expected,
            found,
        })
    }
}

#[cfg(test)]
mod tests;
