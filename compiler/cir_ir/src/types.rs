//! Type representation.
//!
//! Types are small immutable trees. Every classifier type is either a class
//! type or a type alias type; alias types keep their underlying type so the
//! fully expanded class type is always reachable without a resolver.

use crate::{EntityId, Variance};

/// A type as it appears in a declaration.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Type {
    /// Reference to a class or type alias.
    Classifier(ClassifierType),
    /// Reference to a type parameter of an enclosing declaration.
    TypeParameter(TypeParameterType),
    /// Platform type with independent lower and upper bounds.
    Flexible(FlexibleType),
}

impl Type {
    /// Non-null class type without arguments.
    pub fn class(class_id: EntityId) -> Self {
        Type::Classifier(ClassifierType::Class(ClassType::new(class_id)))
    }

    pub fn type_parameter(index: u32, nullable: bool) -> Self {
        Type::TypeParameter(TypeParameterType { index, nullable })
    }

    pub fn flexible(lower: Type, upper: Type) -> Self {
        Type::Flexible(FlexibleType {
            lower: Box::new(lower),
            upper: Box::new(upper),
        })
    }

    /// Whether values of this type may be null.
    ///
    /// A flexible type is nullable when its upper bound is.
    pub fn is_nullable(&self) -> bool {
        match self {
            Type::Classifier(ty) => ty.is_nullable(),
            Type::TypeParameter(ty) => ty.nullable,
            Type::Flexible(ty) => ty.upper.is_nullable(),
        }
    }

    #[inline]
    pub fn as_classifier(&self) -> Option<&ClassifierType> {
        match self {
            Type::Classifier(ty) => Some(ty),
            _ => None,
        }
    }
}

impl From<ClassType> for Type {
    fn from(ty: ClassType) -> Self {
        Type::Classifier(ClassifierType::Class(ty))
    }
}

impl From<TypeAliasType> for Type {
    fn from(ty: TypeAliasType) -> Self {
        Type::Classifier(ClassifierType::TypeAlias(ty))
    }
}

impl From<ClassifierType> for Type {
    fn from(ty: ClassifierType) -> Self {
        Type::Classifier(ty)
    }
}

/// Class-or-alias type.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum ClassifierType {
    Class(ClassType),
    TypeAlias(TypeAliasType),
}

impl ClassifierType {
    /// Id of the referenced class or alias (not of the expansion).
    pub fn classifier_id(&self) -> &EntityId {
        match self {
            ClassifierType::Class(ty) => &ty.class_id,
            ClassifierType::TypeAlias(ty) => &ty.alias_id,
        }
    }

    pub fn arguments(&self) -> &[TypeProjection] {
        match self {
            ClassifierType::Class(ty) => &ty.arguments,
            ClassifierType::TypeAlias(ty) => &ty.arguments,
        }
    }

    /// Nullability as written at the use site.
    pub fn is_marked_nullable(&self) -> bool {
        match self {
            ClassifierType::Class(ty) => ty.nullable,
            ClassifierType::TypeAlias(ty) => ty.nullable,
        }
    }

    /// Nullability after expansion: an alias of a nullable type is nullable.
    pub fn is_nullable(&self) -> bool {
        match self {
            ClassifierType::Class(ty) => ty.nullable,
            ClassifierType::TypeAlias(ty) => ty.nullable || ty.underlying.is_nullable(),
        }
    }

    /// Follow alias underlying types down to the class type.
    ///
    /// Nullability is OR-ed along the chain.
    pub fn expanded(&self) -> ClassType {
        let mut nullable = false;
        let mut current = self;
        loop {
            match current {
                ClassifierType::Class(ty) => {
                    let mut expanded = ty.clone();
                    expanded.nullable |= nullable;
                    return expanded;
                }
                ClassifierType::TypeAlias(ty) => {
                    nullable |= ty.nullable;
                    current = &ty.underlying;
                }
            }
        }
    }

    /// Copy with use-site nullability replaced.
    #[must_use]
    pub fn with_nullable(&self, nullable: bool) -> Self {
        let mut ty = self.clone();
        match &mut ty {
            ClassifierType::Class(class) => class.nullable = nullable,
            ClassifierType::TypeAlias(alias) => alias.nullable = nullable,
        }
        ty
    }
}

/// Reference to a class, possibly inner (with an outer type).
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ClassType {
    pub class_id: EntityId,
    /// Outer class type for inner classes.
    pub outer: Option<Box<ClassType>>,
    pub arguments: Vec<TypeProjection>,
    pub nullable: bool,
}

impl ClassType {
    pub fn new(class_id: EntityId) -> Self {
        Self {
            class_id,
            outer: None,
            arguments: Vec::new(),
            nullable: false,
        }
    }

    #[must_use]
    pub fn with_arguments(mut self, arguments: Vec<TypeProjection>) -> Self {
        self.arguments = arguments;
        self
    }

    #[must_use]
    pub fn with_outer(mut self, outer: ClassType) -> Self {
        self.outer = Some(Box::new(outer));
        self
    }

    #[must_use]
    pub fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }
}

/// Reference to a type alias.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct TypeAliasType {
    pub alias_id: EntityId,
    /// The aliased type with this use site's arguments substituted.
    pub underlying: Box<ClassifierType>,
    pub arguments: Vec<TypeProjection>,
    pub nullable: bool,
}

impl TypeAliasType {
    pub fn new(alias_id: EntityId, underlying: ClassifierType) -> Self {
        Self {
            alias_id,
            underlying: Box::new(underlying),
            arguments: Vec::new(),
            nullable: false,
        }
    }

    #[must_use]
    pub fn with_arguments(mut self, arguments: Vec<TypeProjection>) -> Self {
        self.arguments = arguments;
        self
    }

    #[must_use]
    pub fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }
}

/// Reference to a type parameter by position.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct TypeParameterType {
    pub index: u32,
    pub nullable: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct FlexibleType {
    pub lower: Box<Type>,
    pub upper: Box<Type>,
}

/// A type argument.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum TypeProjection {
    /// `*`
    Star,
    Regular { variance: Variance, ty: Type },
}

impl TypeProjection {
    pub fn invariant(ty: impl Into<Type>) -> Self {
        TypeProjection::Regular {
            variance: Variance::Invariant,
            ty: ty.into(),
        }
    }
}
