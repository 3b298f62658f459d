//! String interner for identifiers.
//!
//! Provides O(1) interning and lookup behind a single `RwLock`. The commonizer
//! interns few distinct strings per run (declaration names, package segments,
//! synthesized parameter names), so one lock is plenty.
//!
//! # Well-known names
//!
//! Names the commonizer matches on by value are pre-interned at fixed indices
//! and exposed as `Name` constants (`Name::INT`, `Name::DEPRECATED`, ...).
//! Every `StringInterner` agrees on them, so the constants can be compared
//! against names produced by any interner instance.

use parking_lot::RwLock;
use rustc_hash::FxHashMap;

use crate::Name;

/// Error when interning a string fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InternError {
    /// Interner exceeded capacity (over 4 billion strings).
    Overflow { count: usize },
}

impl std::fmt::Display for InternError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InternError::Overflow { count } => write!(
                f,
                "interner exceeded capacity: {count} strings, max is {}",
                u32::MAX
            ),
        }
    }
}

impl std::error::Error for InternError {}

macro_rules! well_known_names {
    ($($konst:ident => $text:literal,)*) => {
        #[allow(dead_code, non_camel_case_types, clippy::upper_case_acronyms)]
        #[repr(u32)]
        enum Slot {
            Empty,
            $($konst,)*
        }

        impl Name {
            $(
                #[doc = concat!("Pre-interned `", $text, "`.")]
                pub const $konst: Name = Name::from_raw(Slot::$konst as u32);
            )*
        }

        /// Texts of the pre-interned names, indexed by their raw value.
        const WELL_KNOWN: &[&str] = &["", $($text,)*];
    };
}

well_known_names! {
    // Package segments
    CORE => "core",
    RANGES => "ranges",
    INTEROP => "interop",

    // Numeric primitives
    BYTE => "Byte",
    SHORT => "Short",
    INT => "Int",
    LONG => "Long",
    UBYTE => "UByte",
    USHORT => "UShort",
    UINT => "UInt",
    ULONG => "ULong",
    FLOAT => "Float",
    DOUBLE => "Double",

    // Width-specific families
    INT_ARRAY => "IntArray",
    LONG_ARRAY => "LongArray",
    UINT_ARRAY => "UIntArray",
    ULONG_ARRAY => "ULongArray",
    INT_RANGE => "IntRange",
    LONG_RANGE => "LongRange",
    UINT_RANGE => "UIntRange",
    ULONG_RANGE => "ULongRange",
    INT_PROGRESSION => "IntProgression",
    LONG_PROGRESSION => "LongProgression",
    UINT_PROGRESSION => "UIntProgression",
    ULONG_PROGRESSION => "ULongProgression",
    INT_VAR_OF => "IntVarOf",
    LONG_VAR_OF => "LongVarOf",
    UINT_VAR_OF => "UIntVarOf",
    ULONG_VAR_OF => "ULongVarOf",

    // Width-agnostic families
    PLATFORM_INT => "PlatformInt",
    PLATFORM_UINT => "PlatformUInt",
    PLATFORM_INT_ARRAY => "PlatformIntArray",
    PLATFORM_UINT_ARRAY => "PlatformUIntArray",
    PLATFORM_INT_RANGE => "PlatformIntRange",
    PLATFORM_UINT_RANGE => "PlatformUIntRange",
    PLATFORM_INT_PROGRESSION => "PlatformIntProgression",
    PLATFORM_UINT_PROGRESSION => "PlatformUIntProgression",
    PLATFORM_INT_VAR_OF => "PlatformIntVarOf",
    PLATFORM_UINT_VAR_OF => "PlatformUIntVarOf",

    // Annotation classes and their arguments
    DEPRECATED => "Deprecated",
    REPLACE_WITH => "ReplaceWith",
    DEPRECATION_LEVEL => "DeprecationLevel",
    WARNING => "WARNING",
    ERROR => "ERROR",
    HIDDEN => "HIDDEN",
    MESSAGE => "message",
    REPLACE_WITH_ARG => "replaceWith",
    LEVEL => "level",
    EXPRESSION => "expression",
    IMPORTS => "imports",
    NATIVE_CALLABLE => "NativeCallable",
    UNSAFE_NUMBER => "UnsafeNumber",
    ACTUAL_PLATFORM_TYPES => "actualPlatformTypes",

    // Synthesized parameter names
    VARIADIC_ARGUMENTS => "variadicArguments",
}

/// Interned storage.
struct InternTable {
    /// Map from string content to raw index.
    map: FxHashMap<&'static str, u32>,
    /// Storage for string contents, indexed by raw value.
    strings: Vec<&'static str>,
}

impl InternTable {
    fn with_well_known() -> Self {
        let mut table = Self {
            map: FxHashMap::default(),
            strings: Vec::with_capacity(Name::FIRST_DYNAMIC as usize * 2),
        };
        for (raw, text) in (0u32..).zip(WELL_KNOWN.iter().copied()) {
            table.map.insert(text, raw);
            table.strings.push(text);
        }
        // Reserved, never looked up by content
        table.strings.resize(Name::FIRST_DYNAMIC as usize, "");
        table
    }
}

/// String interner.
///
/// # Thread Safety
/// Uses a `RwLock` so a driver may share one interner across threads that
/// commonize independent subtrees.
pub struct StringInterner {
    table: RwLock<InternTable>,
}

impl StringInterner {
    /// Create a new interner with the well-known names pre-interned.
    pub fn new() -> Self {
        Self {
            table: RwLock::new(InternTable::with_well_known()),
        }
    }

    /// Try to intern a string, returning its Name or an error on overflow.
    pub fn try_intern(&self, s: &str) -> Result<Name, InternError> {
        // Fast path: check if already interned
        {
            let guard = self.table.read();
            if let Some(&raw) = guard.map.get(s) {
                return Ok(Name::from_raw(raw));
            }
        }

        let mut guard = self.table.write();

        // Double-check after acquiring write lock
        if let Some(&raw) = guard.map.get(s) {
            return Ok(Name::from_raw(raw));
        }

        let raw = u32::try_from(guard.strings.len()).map_err(|_| InternError::Overflow {
            count: guard.strings.len(),
        })?;

        // Leak the string to get 'static lifetime
        let leaked: &'static str = Box::leak(s.to_owned().into_boxed_str());
        guard.strings.push(leaked);
        guard.map.insert(leaked, raw);

        Ok(Name::from_raw(raw))
    }

    /// Intern a string, returning its Name.
    ///
    /// # Panics
    /// Panics if the interner exceeds capacity (over 4 billion strings).
    pub fn intern(&self, s: &str) -> Name {
        self.try_intern(s).unwrap_or_else(|e| panic!("{}", e))
    }

    /// Look up the string for a Name.
    ///
    /// Names from a different interner that were never interned here resolve
    /// to the empty string.
    pub fn lookup(&self, name: Name) -> &'static str {
        let guard = self.table.read();
        guard
            .strings
            .get(name.raw() as usize)
            .copied()
            .unwrap_or_default()
    }

    /// Number of interned strings, including the reserved well-known range.
    pub fn len(&self) -> usize {
        self.table.read().strings.len()
    }

    /// Whether nothing beyond the reserved range was interned.
    pub fn is_empty(&self) -> bool {
        self.len() <= Name::FIRST_DYNAMIC as usize
    }
}

impl Default for StringInterner {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests;
