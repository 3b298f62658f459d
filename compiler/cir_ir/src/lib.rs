//! Commonizer IR - declaration model for cross-target commonization.
//!
//! This crate contains the data the commonizer reads and produces:
//! - Interned names and qualified classifier ids
//! - Types (class, type alias, type parameter, flexible) and projections
//! - Annotations with constant arguments
//! - Declarations (class, constructor, function, property, type alias) and
//!   the per-target trees holding them
//! - Targets and the classifier-resolution service
//!
//! # Design Philosophy
//!
//! - **Immutable facts**: declarations are plain values with no behavior
//!   beyond accessors; all merging lives in `cir_commonizer`.
//! - **Intern names**: every identifier is a `Name(u32)`, and the names the
//!   commonizer matches on are pre-interned constants.
//! - **Value identity**: classifier ids, types and annotations compare
//!   structurally; nothing depends on pointer identity.

mod annotation;
mod classifier;
mod decl;
mod entity_id;
mod interner;
mod modifiers;
mod name;
mod target;
mod tree;
mod types;
pub mod well_known;

pub use annotation::{Annotation, ConstantValue};
pub use classifier::{
    ClassifierIndex, ClassifierResolver, ProvidedClass, ProvidedClassifier, ProvidedTypeAlias,
};
pub use decl::{
    CallableMember, Class, Constructor, ContainingClass, Declaration, ExtensionReceiver, Function,
    HasValueParameters, Module, Package, Property, PropertyGetter, PropertySetter, TypeAlias,
    TypeParameter, ValueParameter,
};
pub use entity_id::{EntityId, PackageName};
pub use interner::{InternError, StringInterner};
pub use modifiers::{CallableKind, ClassKind, FunctionModifiers, Modality, Variance, Visibility};
pub use name::Name;
pub use target::{PointerWidth, Target};
pub use tree::{ClassTree, ModuleTree, PackageTree, TargetTree};
pub use types::{
    ClassType, ClassifierType, FlexibleType, Type, TypeAliasType, TypeParameterType,
    TypeProjection,
};
pub use well_known::{well_known, WellKnownIds};
