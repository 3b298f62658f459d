//! Type commonization.
//!
//! Computes one type that stands for N per-target types, or nothing. The
//! strategies are tried in order:
//!
//! 1. **Structural**: the inputs already name one classifier (or, with
//!    substitution enabled, can be rewritten to name one; see
//!    [`substitution`]). Arguments, outer types and alias underlying types
//!    are then commonized recursively.
//! 2. **Platform width**: width-specific integer families unify into their
//!    width-agnostic counterpart when every target's pointer width is known.
//! 3. **Optimistic numbers**: differing numeric primitives of one family
//!    widen to the widest, recording an [`UnsafeNumberTag`].
//!
//! Nullability must agree unless covariant nullability is requested, in
//! which case any nullable input makes the result nullable. The relaxation
//! applies to the top level only; nested types always require agreement.

mod optimistic;
mod platform_width;
mod substitution;

use cir_ir::{ClassType, ClassifierType, Type, TypeAliasType, TypeProjection};
use tracing::trace;

use crate::annotations::UnsafeNumberTag;
use crate::core::{commonize_positionally, AssociativeCommonizer, BatchCommonizer};
use crate::stack::ensure_sufficient_stack;
use crate::CommonizerContext;

/// A commonized type with the unsafe-number widenings it relied on.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CommonType {
    pub ty: Type,
    pub unsafe_numbers: UnsafeNumberTag,
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct TypeCommonizerOptions {
    /// Accept differing top-level nullability, producing a nullable type.
    pub covariant_nullability: bool,
}

/// Batch type commonizer. One input type per target, in target order.
#[derive(Copy, Clone)]
pub struct TypeCommonizer<'c> {
    ctx: &'c CommonizerContext<'c>,
    options: TypeCommonizerOptions,
}

impl<'c> TypeCommonizer<'c> {
    pub fn new(ctx: &'c CommonizerContext<'c>) -> Self {
        Self {
            ctx,
            options: TypeCommonizerOptions::default(),
        }
    }

    #[must_use]
    pub fn with_covariant_nullability(mut self, enabled: bool) -> Self {
        self.options.covariant_nullability = enabled;
        self
    }

    pub fn commonize(&self, types: &[&Type]) -> Option<CommonType> {
        let mut unsafe_numbers = UnsafeNumberTag::default();
        let ty = self.commonize_into(types, &mut unsafe_numbers)?;
        Some(CommonType { ty, unsafe_numbers })
    }

    /// Like [`Self::commonize`], accumulating widenings into `tag`.
    pub(crate) fn commonize_into(&self, types: &[&Type], tag: &mut UnsafeNumberTag) -> Option<Type> {
        self.commonize_types(types, self.options, tag)
    }

    // ========================================================================
    // Dispatch
    // ========================================================================

    fn commonize_types(
        &self,
        types: &[&Type],
        options: TypeCommonizerOptions,
        tag: &mut UnsafeNumberTag,
    ) -> Option<Type> {
        ensure_sufficient_stack(|| self.commonize_types_inner(types, options, tag))
    }

    fn commonize_types_inner(
        &self,
        types: &[&Type],
        options: TypeCommonizerOptions,
        tag: &mut UnsafeNumberTag,
    ) -> Option<Type> {
        match *types.first()? {
            Type::TypeParameter(first) => {
                let same_parameter = types
                    .iter()
                    .all(|ty| matches!(ty, Type::TypeParameter(p) if p.index == first.index));
                if !same_parameter {
                    return None;
                }
                let nullable = commonize_nullability(types.iter().map(|ty| ty.is_nullable()), options)?;
                Some(Type::type_parameter(first.index, nullable))
            }
            Type::Flexible(_) => {
                let mut lowers = Vec::with_capacity(types.len());
                let mut uppers = Vec::with_capacity(types.len());
                for ty in types {
                    let Type::Flexible(flexible) = ty else {
                        return None;
                    };
                    lowers.push(&*flexible.lower);
                    uppers.push(&*flexible.upper);
                }
                let nested = TypeCommonizerOptions::default();
                let lower = self.commonize_types(&lowers, nested, tag)?;
                let upper = self.commonize_types(&uppers, nested, tag)?;
                Some(Type::flexible(lower, upper))
            }
            Type::Classifier(_) => {
                let classifiers = types
                    .iter()
                    .map(|ty| ty.as_classifier())
                    .collect::<Option<Vec<_>>>()?;
                self.commonize_classifiers(&classifiers, options, tag)
                    .map(Type::Classifier)
            }
        }
    }

    // ========================================================================
    // Classifier types
    // ========================================================================

    fn commonize_classifiers(
        &self,
        types: &[&ClassifierType],
        options: TypeCommonizerOptions,
        tag: &mut UnsafeNumberTag,
    ) -> Option<ClassifierType> {
        let nullable = commonize_nullability(types.iter().map(|ty| ty.is_nullable()), options)?;

        let first_id = types.first()?.classifier_id();
        let aligned = if types.iter().all(|ty| ty.classifier_id() == first_id) {
            self.commonize_aligned(types, tag)
        } else {
            substitution::align(self.ctx, types).and_then(|aligned| {
                let aligned: Vec<&ClassifierType> = aligned.iter().collect();
                self.commonize_aligned(&aligned, tag)
            })
        };
        if let Some(common) = aligned {
            return Some(mark_nullable(common, nullable));
        }

        let settings = self.ctx.settings();
        if !settings.platform_integers && !settings.optimistic_numbers {
            return None;
        }
        let expansions: Vec<ClassType> = types.iter().map(|ty| ty.expanded()).collect();
        if settings.platform_integers {
            if let Some(common) = platform_width::commonize(self, &expansions, tag) {
                return Some(ClassifierType::Class(ClassType { nullable, ..common }));
            }
        }
        if settings.optimistic_numbers {
            if let Some(common) = optimistic::commonize(&expansions, tag) {
                return Some(ClassifierType::Class(ClassType { nullable, ..common }));
            }
        }
        trace!(count = types.len(), "classifier types have no common projection");
        None
    }

    /// Commonize types that all name one classifier.
    fn commonize_aligned(
        &self,
        types: &[&ClassifierType],
        tag: &mut UnsafeNumberTag,
    ) -> Option<ClassifierType> {
        match *types.first()? {
            ClassifierType::Class(_) => {
                let classes = types
                    .iter()
                    .map(|ty| match ty {
                        ClassifierType::Class(class) => Some(class),
                        ClassifierType::TypeAlias(_) => None,
                    })
                    .collect::<Option<Vec<_>>>()?;
                self.commonize_class_types(&classes, tag)
                    .map(ClassifierType::Class)
            }
            ClassifierType::TypeAlias(first) => {
                let aliases = types
                    .iter()
                    .map(|ty| match ty {
                        ClassifierType::TypeAlias(alias) => Some(alias),
                        ClassifierType::Class(_) => None,
                    })
                    .collect::<Option<Vec<_>>>()?;
                let argument_lists: Vec<&[TypeProjection]> =
                    aliases.iter().map(|alias| alias.arguments.as_slice()).collect();
                let arguments = self.commonize_arguments(&argument_lists, tag)?;
                let underlying: Vec<&ClassifierType> =
                    aliases.iter().map(|alias| &*alias.underlying).collect();
                let underlying =
                    self.commonize_classifiers(&underlying, TypeCommonizerOptions::default(), tag)?;
                Some(ClassifierType::TypeAlias(TypeAliasType {
                    alias_id: first.alias_id.clone(),
                    underlying: Box::new(underlying),
                    arguments,
                    nullable: false,
                }))
            }
        }
    }

    /// Commonize class types of one class: outer types, then arguments.
    fn commonize_class_types(
        &self,
        classes: &[&ClassType],
        tag: &mut UnsafeNumberTag,
    ) -> Option<ClassType> {
        let first = classes.first()?;
        let outer = if first.outer.is_some() {
            let outers = classes
                .iter()
                .map(|class| class.outer.as_deref())
                .collect::<Option<Vec<_>>>()?;
            Some(Box::new(self.commonize_class_types(&outers, tag)?))
        } else if classes.iter().any(|class| class.outer.is_some()) {
            return None;
        } else {
            None
        };

        let argument_lists: Vec<&[TypeProjection]> =
            classes.iter().map(|class| class.arguments.as_slice()).collect();
        let arguments = self.commonize_arguments(&argument_lists, tag)?;

        Some(ClassType {
            class_id: first.class_id.clone(),
            outer,
            arguments,
            nullable: false,
        })
    }

    // ========================================================================
    // Arguments
    // ========================================================================

    /// Commonize argument lists position by position.
    fn commonize_arguments(
        &self,
        lists: &[&[TypeProjection]],
        tag: &mut UnsafeNumberTag,
    ) -> Option<Vec<TypeProjection>> {
        commonize_positionally(lists, |column| self.commonize_projection(column, tag))
    }

    fn commonize_projection(
        &self,
        column: &[&TypeProjection],
        tag: &mut UnsafeNumberTag,
    ) -> Option<TypeProjection> {
        let first = *column.first()?;
        match first {
            TypeProjection::Star => column
                .iter()
                .all(|projection| matches!(projection, TypeProjection::Star))
                .then_some(TypeProjection::Star),
            TypeProjection::Regular { variance, .. } => {
                let variance = *variance;
                let types = column
                    .iter()
                    .map(|projection| match projection {
                        TypeProjection::Regular { variance: v, ty } if *v == variance => Some(ty),
                        _ => None,
                    })
                    .collect::<Option<Vec<_>>>()?;
                let ty = self.commonize_types(&types, TypeCommonizerOptions::default(), tag)?;
                Some(TypeProjection::Regular { variance, ty })
            }
        }
    }
}

impl BatchCommonizer<Type, CommonType> for TypeCommonizer<'_> {
    fn commonize(&self, values: &[&Type]) -> Option<CommonType> {
        TypeCommonizer::commonize(self, values)
    }
}

/// Nullability flags agree, or with covariance, any nullable wins.
#[derive(Copy, Clone, Debug)]
struct Nullability {
    covariant: bool,
}

impl AssociativeCommonizer<bool> for Nullability {
    fn commonize(&self, first: &bool, second: &bool) -> Option<bool> {
        if first == second {
            Some(*first)
        } else {
            self.covariant.then_some(true)
        }
    }
}

fn commonize_nullability(
    flags: impl Iterator<Item = bool>,
    options: TypeCommonizerOptions,
) -> Option<bool> {
    let flags: Vec<bool> = flags.collect();
    Nullability {
        covariant: options.covariant_nullability,
    }
    .commonize_all(&flags)
}

/// Set the use-site nullable mark unless the type is already nullable
/// through an alias.
fn mark_nullable(ty: ClassifierType, nullable: bool) -> ClassifierType {
    if ty.is_nullable() == nullable {
        ty
    } else {
        ty.with_nullable(nullable)
    }
}
