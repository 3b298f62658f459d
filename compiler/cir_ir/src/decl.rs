//! Declarations.
//!
//! Each declaration is an immutable fact record for one target: names,
//! modifiers, annotations and types, with no bodies. The [`Declaration`]
//! enum closes the set of node kinds the commonizer walks.

use crate::{
    Annotation, CallableKind, ClassKind, ClassifierType, ClassType, ConstantValue,
    FunctionModifiers, Modality, Name, PackageName, Type, Variance, Visibility,
};

/// Any node of a declaration tree.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Declaration {
    Module(Module),
    Package(Package),
    Class(Class),
    Constructor(Constructor),
    Function(Function),
    Property(Property),
    TypeAlias(TypeAlias),
}

impl Declaration {
    /// Human-readable kind, for logging.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Declaration::Module(_) => "module",
            Declaration::Package(_) => "package",
            Declaration::Class(_) => "class",
            Declaration::Constructor(_) => "constructor",
            Declaration::Function(_) => "function",
            Declaration::Property(_) => "property",
            Declaration::TypeAlias(_) => "type alias",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Module {
    pub name: Name,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Package {
    pub name: PackageName,
}

/// Facts about the owner of a member that the member's commonization needs.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct ContainingClass {
    pub kind: ClassKind,
    pub modality: Modality,
    pub is_data: bool,
}

impl ContainingClass {
    pub fn of(class: &Class) -> Self {
        Self {
            kind: class.kind,
            modality: class.modality,
            is_data: class.is_data,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct TypeParameter {
    pub annotations: Vec<Annotation>,
    pub name: Name,
    pub is_reified: bool,
    pub variance: Variance,
    pub upper_bounds: Vec<Type>,
}

impl TypeParameter {
    pub fn new(name: Name) -> Self {
        Self {
            annotations: Vec::new(),
            name,
            is_reified: false,
            variance: Variance::Invariant,
            upper_bounds: Vec::new(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ValueParameter {
    pub annotations: Vec<Annotation>,
    pub name: Name,
    pub return_type: Type,
    pub vararg_element_type: Option<Type>,
    pub declares_default_value: bool,
    pub is_crossinline: bool,
    pub is_noinline: bool,
}

impl ValueParameter {
    pub fn new(name: Name, return_type: Type) -> Self {
        Self {
            annotations: Vec::new(),
            name,
            return_type,
            vararg_element_type: None,
            declares_default_value: false,
            is_crossinline: false,
            is_noinline: false,
        }
    }

    #[inline]
    pub fn is_vararg(&self) -> bool {
        self.vararg_element_type.is_some()
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ExtensionReceiver {
    pub annotations: Vec<Annotation>,
    pub ty: Type,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Class {
    pub annotations: Vec<Annotation>,
    pub name: Name,
    pub type_parameters: Vec<TypeParameter>,
    pub supertypes: Vec<ClassType>,
    pub visibility: Visibility,
    pub modality: Modality,
    pub kind: ClassKind,
    pub companion: Option<Name>,
    pub is_companion: bool,
    pub is_data: bool,
    pub is_value: bool,
    pub is_inner: bool,
    pub has_enum_entries: bool,
}

impl Class {
    /// Public final class with no supertypes.
    pub fn new(name: Name, kind: ClassKind) -> Self {
        Self {
            annotations: Vec::new(),
            name,
            type_parameters: Vec::new(),
            supertypes: Vec::new(),
            visibility: Visibility::Public,
            modality: if kind.is_interface() {
                Modality::Abstract
            } else {
                Modality::Final
            },
            kind,
            companion: None,
            is_companion: false,
            is_data: false,
            is_value: false,
            is_inner: false,
            has_enum_entries: false,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Constructor {
    pub annotations: Vec<Annotation>,
    pub type_parameters: Vec<TypeParameter>,
    pub visibility: Visibility,
    pub containing_class: ContainingClass,
    pub value_parameters: Vec<ValueParameter>,
    pub has_stable_parameter_names: bool,
    pub is_primary: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Function {
    pub annotations: Vec<Annotation>,
    pub name: Name,
    pub type_parameters: Vec<TypeParameter>,
    pub visibility: Visibility,
    pub modality: Modality,
    pub containing_class: Option<ContainingClass>,
    pub value_parameters: Vec<ValueParameter>,
    pub has_stable_parameter_names: bool,
    pub extension_receiver: Option<ExtensionReceiver>,
    pub return_type: Type,
    pub kind: CallableKind,
    pub modifiers: FunctionModifiers,
}

impl Function {
    /// Public final top-level function without parameters.
    pub fn new(name: Name, return_type: Type) -> Self {
        Self {
            annotations: Vec::new(),
            name,
            type_parameters: Vec::new(),
            visibility: Visibility::Public,
            modality: Modality::Final,
            containing_class: None,
            value_parameters: Vec::new(),
            has_stable_parameter_names: true,
            extension_receiver: None,
            return_type,
            kind: CallableKind::Declaration,
            modifiers: FunctionModifiers::empty(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct PropertyGetter {
    pub annotations: Vec<Annotation>,
    pub is_default: bool,
    pub is_inline: bool,
}

impl PropertyGetter {
    pub const DEFAULT: PropertyGetter = PropertyGetter {
        annotations: Vec::new(),
        is_default: true,
        is_inline: false,
    };
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct PropertySetter {
    pub annotations: Vec<Annotation>,
    pub parameter_annotations: Vec<Annotation>,
    pub visibility: Visibility,
    pub is_default: bool,
    pub is_inline: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Property {
    pub annotations: Vec<Annotation>,
    pub name: Name,
    pub type_parameters: Vec<TypeParameter>,
    pub visibility: Visibility,
    pub modality: Modality,
    pub containing_class: Option<ContainingClass>,
    pub extension_receiver: Option<ExtensionReceiver>,
    pub return_type: Type,
    pub kind: CallableKind,
    pub is_var: bool,
    pub is_late_init: bool,
    pub is_const: bool,
    pub is_delegate: bool,
    pub getter: Option<PropertyGetter>,
    pub setter: Option<PropertySetter>,
    pub compile_time_initializer: ConstantValue,
}

impl Property {
    /// Public final top-level `val` with a default getter.
    pub fn new(name: Name, return_type: Type) -> Self {
        Self {
            annotations: Vec::new(),
            name,
            type_parameters: Vec::new(),
            visibility: Visibility::Public,
            modality: Modality::Final,
            containing_class: None,
            extension_receiver: None,
            return_type,
            kind: CallableKind::Declaration,
            is_var: false,
            is_late_init: false,
            is_const: false,
            is_delegate: false,
            getter: Some(PropertyGetter::DEFAULT),
            setter: None,
            compile_time_initializer: ConstantValue::Null,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TypeAlias {
    pub annotations: Vec<Annotation>,
    pub name: Name,
    pub type_parameters: Vec<TypeParameter>,
    pub visibility: Visibility,
    pub underlying_type: ClassifierType,
    pub expanded_type: ClassType,
}

impl TypeAlias {
    /// Public alias; the expanded type is derived from `underlying_type`.
    pub fn new(name: Name, underlying_type: ClassifierType) -> Self {
        let expanded_type = underlying_type.expanded();
        Self {
            annotations: Vec::new(),
            name,
            type_parameters: Vec::new(),
            visibility: Visibility::Public,
            underlying_type,
            expanded_type,
        }
    }
}

// ========================================
// Shared views
// ========================================

/// Accessors shared by functions and properties.
pub trait CallableMember {
    fn annotations(&self) -> &[Annotation];
    fn name(&self) -> Name;
    fn type_parameters(&self) -> &[TypeParameter];
    fn visibility(&self) -> Visibility;
    fn modality(&self) -> Modality;
    fn containing_class(&self) -> Option<&ContainingClass>;
    fn extension_receiver(&self) -> Option<&ExtensionReceiver>;
    fn return_type(&self) -> &Type;
    fn kind(&self) -> CallableKind;

    /// Whether calls to this member are dispatched on the receiver's
    /// runtime class.
    fn is_virtual(&self) -> bool {
        let Some(owner) = self.containing_class() else {
            return false;
        };
        if self.visibility().is_private() || self.modality() == Modality::Final {
            return false;
        }
        owner.modality != Modality::Final || owner.kind == ClassKind::EnumClass
    }
}

macro_rules! impl_callable_member {
    ($ty:ty) => {
        impl CallableMember for $ty {
            fn annotations(&self) -> &[Annotation] {
                &self.annotations
            }
            fn name(&self) -> Name {
                self.name
            }
            fn type_parameters(&self) -> &[TypeParameter] {
                &self.type_parameters
            }
            fn visibility(&self) -> Visibility {
                self.visibility
            }
            fn modality(&self) -> Modality {
                self.modality
            }
            fn containing_class(&self) -> Option<&ContainingClass> {
                self.containing_class.as_ref()
            }
            fn extension_receiver(&self) -> Option<&ExtensionReceiver> {
                self.extension_receiver.as_ref()
            }
            fn return_type(&self) -> &Type {
                &self.return_type
            }
            fn kind(&self) -> CallableKind {
                self.kind
            }
        }
    };
}

impl_callable_member!(Function);
impl_callable_member!(Property);

/// Declarations with value parameters (and therefore parameter names).
pub trait HasValueParameters {
    fn value_parameters(&self) -> &[ValueParameter];
    fn value_parameters_mut(&mut self) -> &mut [ValueParameter];
    fn has_stable_parameter_names(&self) -> bool;
    /// Annotations of the declaration owning the parameters.
    fn owner_annotations(&self) -> &[Annotation];
}

impl HasValueParameters for Function {
    fn value_parameters(&self) -> &[ValueParameter] {
        &self.value_parameters
    }
    fn value_parameters_mut(&mut self) -> &mut [ValueParameter] {
        &mut self.value_parameters
    }
    fn has_stable_parameter_names(&self) -> bool {
        self.has_stable_parameter_names
    }
    fn owner_annotations(&self) -> &[Annotation] {
        &self.annotations
    }
}

impl HasValueParameters for Constructor {
    fn value_parameters(&self) -> &[ValueParameter] {
        &self.value_parameters
    }
    fn value_parameters_mut(&mut self) -> &mut [ValueParameter] {
        &mut self.value_parameters
    }
    fn has_stable_parameter_names(&self) -> bool {
        self.has_stable_parameter_names
    }
    fn owner_annotations(&self) -> &[Annotation] {
        &self.annotations
    }
}
