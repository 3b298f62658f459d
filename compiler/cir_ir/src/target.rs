//! Commonization targets.

use std::fmt;

/// Native pointer width of a target platform.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PointerWidth {
    Bits32,
    Bits64,
}

/// One platform build output being unified.
///
/// Position in the target list is significant: every per-target list the
/// commonizer sees is ordered the same way.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Target {
    pub name: String,
    /// `None` when unknown; such a target never takes part in
    /// platform-width integer unification.
    pub pointer_width: Option<PointerWidth>,
}

impl Target {
    pub fn new(name: impl Into<String>, pointer_width: Option<PointerWidth>) -> Self {
        Self {
            name: name.into(),
            pointer_width,
        }
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}
