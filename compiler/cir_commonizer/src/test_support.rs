//! Fixtures shared by unit tests.

use cir_ir::{
    ClassKind, ClassType, ClassifierIndex, ClassifierResolver, ClassifierType, EntityId, Name,
    PackageName, PointerWidth, ProvidedClass, ProvidedTypeAlias, StringInterner, Target,
    TargetTree, Type, Variance,
};

use crate::{CommonizerContext, CommonizerSettings};

/// Targets, resolvers and an interner for building a [`CommonizerContext`].
pub(crate) struct Fixture {
    pub interner: StringInterner,
    pub targets: Vec<Target>,
    pub trees: Vec<TargetTree>,
    pub dependencies: Vec<ClassifierIndex>,
    pub common: ClassifierIndex,
    pub settings: CommonizerSettings,
}

impl Fixture {
    /// `count` targets named `t0`, `t1`, ... with unknown pointer width.
    pub fn new(count: usize) -> Self {
        Self::from_targets((0..count).map(|i| Target::new(format!("t{i}"), None)).collect())
    }

    /// One target per width, named `t0`, `t1`, ...
    pub fn with_widths(widths: &[PointerWidth]) -> Self {
        Self::from_targets(
            widths
                .iter()
                .enumerate()
                .map(|(i, width)| Target::new(format!("t{i}"), Some(*width)))
                .collect(),
        )
    }

    fn from_targets(targets: Vec<Target>) -> Self {
        let count = targets.len();
        Self {
            interner: StringInterner::new(),
            targets,
            trees: vec![TargetTree::default(); count],
            dependencies: vec![ClassifierIndex::new(); count],
            common: ClassifierIndex::new(),
            settings: CommonizerSettings::default(),
        }
    }

    #[must_use]
    pub fn settings(mut self, settings: CommonizerSettings) -> Self {
        self.settings = settings;
        self
    }

    #[allow(clippy::expect_used, reason = "fixtures are consistent by construction")]
    pub fn context(&self) -> CommonizerContext<'_> {
        CommonizerContext::new(
            self.targets.clone(),
            &self.trees.iter().collect::<Vec<_>>(),
            self.dependencies
                .iter()
                .map(|index| index as &dyn ClassifierResolver)
                .collect(),
            &self.common,
            self.settings,
            &self.interner,
        )
        .expect("fixture lines up")
    }

    pub fn name(&self, text: &str) -> Name {
        self.interner.intern(text)
    }

    /// `"pkg.sub.Name"` -> id of top-level `Name` in `pkg.sub`.
    pub fn id(&self, qualified: &str) -> EntityId {
        let (package, name) = qualified.rsplit_once('.').unwrap_or(("", qualified));
        EntityId::top_level(PackageName::parse(package, &self.interner), self.name(name))
    }

    pub fn class_type(&self, qualified: &str) -> ClassType {
        ClassType::new(self.id(qualified))
    }

    pub fn ty(&self, qualified: &str) -> Type {
        Type::class(self.id(qualified))
    }

    fn index_mut(&mut self, target: Option<usize>) -> &mut ClassifierIndex {
        match target {
            Some(target) => &mut self.dependencies[target],
            None => &mut self.common,
        }
    }

    /// Declare a class; `target: None` puts it into the shared dependencies.
    pub fn add_class(
        &mut self,
        target: Option<usize>,
        qualified: &str,
        kind: ClassKind,
        supertypes: Vec<ClassType>,
    ) -> EntityId {
        let id = self.id(qualified);
        self.index_mut(target).insert_class(
            id.clone(),
            ProvidedClass {
                kind,
                type_parameters: Vec::new(),
                supertypes,
            },
        );
        id
    }

    /// Declare a parameterless alias; `target: None` puts it into the shared
    /// dependencies.
    pub fn add_alias(
        &mut self,
        target: Option<usize>,
        qualified: &str,
        underlying: ClassifierType,
    ) -> EntityId {
        self.add_generic_alias(target, qualified, underlying, Vec::new())
    }

    /// Declare an alias with one type parameter per entry of `variances`.
    pub fn add_generic_alias(
        &mut self,
        target: Option<usize>,
        qualified: &str,
        underlying: ClassifierType,
        variances: Vec<Variance>,
    ) -> EntityId {
        let id = self.id(qualified);
        self.index_mut(target).insert_type_alias(
            id.clone(),
            ProvidedTypeAlias {
                type_parameters: variances,
                underlying,
            },
        );
        id
    }
}
