//! Annotations and their constant arguments.

use std::collections::BTreeMap;

use crate::{EntityId, Name};

/// An annotation application.
///
/// Arguments are keyed by parameter name (`BTreeMap` for deterministic
/// iteration and structural equality).
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Annotation {
    pub class_id: EntityId,
    pub constant_arguments: BTreeMap<Name, ConstantValue>,
    pub annotation_arguments: BTreeMap<Name, Annotation>,
}

impl Annotation {
    /// Annotation without arguments.
    pub fn new(class_id: EntityId) -> Self {
        Self {
            class_id,
            constant_arguments: BTreeMap::new(),
            annotation_arguments: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn with_constant(mut self, name: Name, value: ConstantValue) -> Self {
        self.constant_arguments.insert(name, value);
        self
    }

    #[must_use]
    pub fn with_annotation(mut self, name: Name, value: Annotation) -> Self {
        self.annotation_arguments.insert(name, value);
        self
    }

    #[inline]
    pub fn constant(&self, name: Name) -> Option<&ConstantValue> {
        self.constant_arguments.get(&name)
    }

    #[inline]
    pub fn annotation(&self, name: Name) -> Option<&Annotation> {
        self.annotation_arguments.get(&name)
    }
}

/// Compile-time constant.
///
/// Floating-point values are stored as raw bits so the type stays `Eq + Hash`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum ConstantValue {
    Null,
    String(String),
    Char(char),
    Byte(i8),
    Short(i16),
    Int(i32),
    Long(i64),
    UByte(u8),
    UShort(u16),
    UInt(u32),
    ULong(u64),
    Float(u32),
    Double(u64),
    Boolean(bool),
    Enum { class_id: EntityId, entry: Name },
    Array(Vec<ConstantValue>),
}

impl ConstantValue {
    pub fn float(value: f32) -> Self {
        ConstantValue::Float(value.to_bits())
    }

    pub fn double(value: f64) -> Self {
        ConstantValue::Double(value.to_bits())
    }

    #[inline]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            ConstantValue::String(s) => Some(s),
            _ => None,
        }
    }
}
