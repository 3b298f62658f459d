//! Approximation keys for merge-by-signature.
//!
//! Declarations of different targets land in one node when their keys are
//! equal. Keys are deliberately coarser than the declarations: parameter
//! names, modifiers and annotations never take part, so those differences
//! reach the commonizers instead of splitting nodes.

use cir_ir::{
    Declaration, EntityId, Name, PackageName, Type, TypeProjection, ValueParameter, Variance,
};
use smallvec::SmallVec;

use crate::stack::ensure_sufficient_stack;

/// Parameter signatures of one callable; most have few parameters.
pub type ParameterSignatures = SmallVec<[TypeSignature; 4]>;

/// Shape of a type for matching: expanded classifier, nullability and
/// arguments.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum TypeSignature {
    Classifier {
        id: EntityId,
        nullable: bool,
        arguments: Vec<ArgumentSignature>,
    },
    TypeParameter {
        index: u32,
        nullable: bool,
    },
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum ArgumentSignature {
    Star,
    Projection(Variance, TypeSignature),
}

impl TypeSignature {
    pub fn of(ty: &Type) -> Self {
        ensure_sufficient_stack(|| Self::of_inner(ty))
    }

    fn of_inner(ty: &Type) -> Self {
        match ty {
            Type::Classifier(classifier) => {
                let expanded = classifier.expanded();
                TypeSignature::Classifier {
                    id: expanded.class_id.clone(),
                    nullable: classifier.is_nullable(),
                    arguments: expanded.arguments.iter().map(ArgumentSignature::of).collect(),
                }
            }
            Type::TypeParameter(parameter) => TypeSignature::TypeParameter {
                index: parameter.index,
                nullable: parameter.nullable,
            },
            // Platform types match by their lower bound.
            Type::Flexible(flexible) => TypeSignature::of(&flexible.lower),
        }
    }
}

impl ArgumentSignature {
    fn of(projection: &TypeProjection) -> Self {
        match projection {
            TypeProjection::Star => ArgumentSignature::Star,
            TypeProjection::Regular { variance, ty } => {
                ArgumentSignature::Projection(*variance, TypeSignature::of(ty))
            }
        }
    }
}

/// Identity of a node among its siblings.
///
/// Classes and type aliases share one namespace but keep separate keys, so
/// a name that is a class on one target and an alias on another yields two
/// nodes, each absent somewhere.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum NodeKey {
    Module(Name),
    Package(PackageName),
    Class(Name),
    TypeAlias(Name),
    Function {
        name: Name,
        receiver: Option<TypeSignature>,
        parameters: ParameterSignatures,
    },
    Property {
        name: Name,
        receiver: Option<TypeSignature>,
    },
    Constructor {
        parameters: ParameterSignatures,
    },
}

impl NodeKey {
    pub fn of(declaration: &Declaration) -> Self {
        match declaration {
            Declaration::Module(module) => NodeKey::Module(module.name),
            Declaration::Package(package) => NodeKey::Package(package.name.clone()),
            Declaration::Class(class) => NodeKey::Class(class.name),
            Declaration::TypeAlias(alias) => NodeKey::TypeAlias(alias.name),
            Declaration::Function(function) => NodeKey::Function {
                name: function.name,
                receiver: function
                    .extension_receiver
                    .as_ref()
                    .map(|receiver| TypeSignature::of(&receiver.ty)),
                parameters: parameter_signatures(&function.value_parameters),
            },
            Declaration::Property(property) => NodeKey::Property {
                name: property.name,
                receiver: property
                    .extension_receiver
                    .as_ref()
                    .map(|receiver| TypeSignature::of(&receiver.ty)),
            },
            Declaration::Constructor(constructor) => NodeKey::Constructor {
                parameters: parameter_signatures(&constructor.value_parameters),
            },
        }
    }
}

fn parameter_signatures(parameters: &[ValueParameter]) -> ParameterSignatures {
    parameters
        .iter()
        .map(|parameter| TypeSignature::of(&parameter.return_type))
        .collect()
}
