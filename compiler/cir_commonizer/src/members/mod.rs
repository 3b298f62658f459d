//! Declaration-level commonizers.
//!
//! Each entry point takes one declaration per target, in target order, and
//! returns the common declaration or `Ok(None)` when the targets disagree in
//! a way no relaxation covers. Functions and constructors may also need
//! their targets' parameter names rewritten; they return a [`Patched`]
//! result carrying that rewrite.

mod callable;
mod class;
mod constructor;
mod function;
mod property;
mod type_alias;
mod type_params;
mod value_params;

pub use class::commonize_class;
pub use constructor::commonize_constructor;
pub use function::commonize_function;
pub use property::commonize_property;
pub use type_alias::commonize_type_alias;
pub use type_params::commonize_type_parameters;
pub use value_params::{commonize_value_parameters, CommonValueParameters, ValueParameterNamesPatch};

/// A common declaration plus the rewrite its targets need.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Patched<T> {
    pub declaration: T,
    pub names_patch: Option<ValueParameterNamesPatch>,
}

impl<T> Patched<T> {
    /// A declaration that needs no rewrite.
    pub fn unpatched(declaration: T) -> Self {
        Self {
            declaration,
            names_patch: None,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Patched<U> {
        Patched {
            declaration: f(self.declaration),
            names_patch: self.names_patch,
        }
    }
}
