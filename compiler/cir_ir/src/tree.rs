//! Per-target declaration trees, as handed over by the target repository.

use crate::{Class, Constructor, Function, Module, Package, Property, TypeAlias};

/// Everything one target declares.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TargetTree {
    pub modules: Vec<ModuleTree>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ModuleTree {
    pub module: Module,
    pub packages: Vec<PackageTree>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PackageTree {
    pub package: Package,
    pub classes: Vec<ClassTree>,
    pub type_aliases: Vec<TypeAlias>,
    pub functions: Vec<Function>,
    pub properties: Vec<Property>,
}

impl PackageTree {
    pub fn new(package: Package) -> Self {
        Self {
            package,
            classes: Vec::new(),
            type_aliases: Vec::new(),
            functions: Vec::new(),
            properties: Vec::new(),
        }
    }
}

/// A class with its members and nested classes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClassTree {
    pub class: Class,
    pub constructors: Vec<Constructor>,
    pub functions: Vec<Function>,
    pub properties: Vec<Property>,
    pub classes: Vec<ClassTree>,
}

impl ClassTree {
    pub fn new(class: Class) -> Self {
        Self {
            class,
            constructors: Vec::new(),
            functions: Vec::new(),
            properties: Vec::new(),
            classes: Vec::new(),
        }
    }
}
