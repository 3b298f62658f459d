//! Interned identifier.
//!
//! Provides compact 32-bit interned identifiers. Every name the commonizer
//! reasons about by value (classifier segments, annotation argument names,
//! synthesized parameter names) is a `Name`, so equality is a single compare.

use std::fmt;

/// Interned string identifier.
///
/// Indices below [`Name::FIRST_DYNAMIC`] are pre-interned well-known names
/// (see [`crate::interner`]); their text is fixed for the lifetime of the
/// process regardless of which interner produced them.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(transparent)]
pub struct Name(u32);

impl Name {
    /// Pre-interned empty string.
    pub const EMPTY: Name = Name(0);

    /// First index handed out for names interned at runtime.
    pub const FIRST_DYNAMIC: u32 = 128;

    /// Create from raw u32 value.
    #[inline]
    pub const fn from_raw(raw: u32) -> Self {
        Name(raw)
    }

    /// Get raw u32 value.
    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// Whether this name was pre-interned at interner construction.
    #[inline]
    pub const fn is_well_known(self) -> bool {
        self.0 < Self::FIRST_DYNAMIC
    }
}

impl fmt::Debug for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Name({})", self.0)
    }
}

impl Default for Name {
    fn default() -> Self {
        Self::EMPTY
    }
}
