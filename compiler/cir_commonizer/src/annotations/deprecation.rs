//! The deprecation lattice.

use cir_ir::{well_known, Annotation, ConstantValue, Name};

use crate::core::NullableAssociativeCommonizer;

/// Message used when targets disagree on the deprecation message, or when
/// only some targets are deprecated.
pub const FALLBACK_MESSAGE: &str = "See concrete deprecation messages in actual declarations";

/// Deprecation severity, ordered `Warning < Error < Hidden`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DeprecationLevel {
    #[default]
    Warning,
    Error,
    Hidden,
}

impl DeprecationLevel {
    fn from_entry(entry: Name) -> Option<Self> {
        match entry {
            Name::WARNING => Some(DeprecationLevel::Warning),
            Name::ERROR => Some(DeprecationLevel::Error),
            Name::HIDDEN => Some(DeprecationLevel::Hidden),
            _ => None,
        }
    }

    fn entry(self) -> Name {
        match self {
            DeprecationLevel::Warning => Name::WARNING,
            DeprecationLevel::Error => Name::ERROR,
            DeprecationLevel::Hidden => Name::HIDDEN,
        }
    }
}

/// Suggested replacement carried by a deprecation.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ReplaceWith {
    pub expression: String,
    pub imports: Vec<String>,
}

/// A decoded deprecation annotation.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Deprecation {
    pub level: DeprecationLevel,
    pub message: String,
    pub replace_with: Option<ReplaceWith>,
}

impl Deprecation {
    pub fn new(level: DeprecationLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
            replace_with: None,
        }
    }

    /// Decode; missing arguments take their declared defaults.
    pub fn from_annotation(annotation: &Annotation) -> Self {
        let level = match annotation.constant(Name::LEVEL) {
            Some(ConstantValue::Enum { entry, .. }) => {
                DeprecationLevel::from_entry(*entry).unwrap_or_default()
            }
            _ => DeprecationLevel::Warning,
        };
        let message = annotation
            .constant(Name::MESSAGE)
            .and_then(ConstantValue::as_str)
            .unwrap_or_default()
            .to_owned();
        let replace_with = annotation
            .annotation(Name::REPLACE_WITH_ARG)
            .map(|replace| ReplaceWith {
                expression: replace
                    .constant(Name::EXPRESSION)
                    .and_then(ConstantValue::as_str)
                    .unwrap_or_default()
                    .to_owned(),
                imports: match replace.constant(Name::IMPORTS) {
                    Some(ConstantValue::Array(items)) => items
                        .iter()
                        .filter_map(ConstantValue::as_str)
                        .map(str::to_owned)
                        .collect(),
                    _ => Vec::new(),
                },
            });

        Self {
            level,
            message,
            replace_with,
        }
    }

    pub fn to_annotation(&self) -> Annotation {
        let ids = well_known();
        let mut annotation = Annotation::new(ids.deprecated.clone())
            .with_constant(Name::MESSAGE, ConstantValue::String(self.message.clone()));
        if self.level != DeprecationLevel::Warning {
            annotation = annotation.with_constant(
                Name::LEVEL,
                ConstantValue::Enum {
                    class_id: ids.deprecation_level.clone(),
                    entry: self.level.entry(),
                },
            );
        }
        if let Some(replace) = &self.replace_with {
            let imports = replace
                .imports
                .iter()
                .cloned()
                .map(ConstantValue::String)
                .collect();
            annotation = annotation.with_annotation(
                Name::REPLACE_WITH_ARG,
                Annotation::new(ids.replace_with.clone())
                    .with_constant(
                        Name::EXPRESSION,
                        ConstantValue::String(replace.expression.clone()),
                    )
                    .with_constant(Name::IMPORTS, ConstantValue::Array(imports)),
            );
        }
        annotation
    }
}

/// Deprecated if any target is; strongest level wins; message and
/// replacement survive only when every target agrees on them.
#[derive(Copy, Clone, Debug, Default)]
pub struct DeprecationCommonizer;

impl NullableAssociativeCommonizer<Deprecation> for DeprecationCommonizer {
    fn commonize(&self, first: Option<&Deprecation>, second: Option<&Deprecation>) -> Option<Deprecation> {
        match (first, second) {
            (None, None) => None,
            (Some(only), None) | (None, Some(only)) => Some(Deprecation {
                level: only.level,
                message: FALLBACK_MESSAGE.to_owned(),
                replace_with: None,
            }),
            (Some(a), Some(b)) => Some(Deprecation {
                level: a.level.max(b.level),
                message: if a.message == b.message {
                    a.message.clone()
                } else {
                    FALLBACK_MESSAGE.to_owned()
                },
                replace_with: if a.replace_with == b.replace_with {
                    a.replace_with.clone()
                } else {
                    None
                },
            }),
        }
    }
}
