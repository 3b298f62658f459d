//! Well-known classifier ids.
//!
//! Built once per process from the pre-interned names, so lookups never need
//! an interner and the ids compare equal to ids parsed by any interner.

use std::sync::LazyLock;

use crate::{EntityId, Name, PackageName};

/// Registry of classifiers the commonizer recognizes by identity.
pub struct WellKnownIds {
    // Numeric primitives
    pub byte: EntityId,
    pub short: EntityId,
    pub int: EntityId,
    pub long: EntityId,
    pub ubyte: EntityId,
    pub ushort: EntityId,
    pub uint: EntityId,
    pub ulong: EntityId,
    pub float: EntityId,
    pub double: EntityId,

    // Width-specific families
    pub int_array: EntityId,
    pub long_array: EntityId,
    pub uint_array: EntityId,
    pub ulong_array: EntityId,
    pub int_range: EntityId,
    pub long_range: EntityId,
    pub uint_range: EntityId,
    pub ulong_range: EntityId,
    pub int_progression: EntityId,
    pub long_progression: EntityId,
    pub uint_progression: EntityId,
    pub ulong_progression: EntityId,
    pub int_var_of: EntityId,
    pub long_var_of: EntityId,
    pub uint_var_of: EntityId,
    pub ulong_var_of: EntityId,

    // Width-agnostic families
    pub platform_int: EntityId,
    pub platform_uint: EntityId,
    pub platform_int_array: EntityId,
    pub platform_uint_array: EntityId,
    pub platform_int_range: EntityId,
    pub platform_uint_range: EntityId,
    pub platform_int_progression: EntityId,
    pub platform_uint_progression: EntityId,
    pub platform_int_var_of: EntityId,
    pub platform_uint_var_of: EntityId,

    // Annotations
    pub deprecated: EntityId,
    pub replace_with: EntityId,
    pub deprecation_level: EntityId,
    pub native_callable: EntityId,
    pub unsafe_number: EntityId,
}

static WELL_KNOWN: LazyLock<WellKnownIds> = LazyLock::new(|| {
    let core = PackageName::new(&[Name::CORE]);
    let ranges = PackageName::new(&[Name::CORE, Name::RANGES]);
    let interop = PackageName::new(&[Name::CORE, Name::INTEROP]);
    let core_id = |name| EntityId::top_level(core.clone(), name);
    let ranges_id = |name| EntityId::top_level(ranges.clone(), name);
    let interop_id = |name| EntityId::top_level(interop.clone(), name);

    WellKnownIds {
        byte: core_id(Name::BYTE),
        short: core_id(Name::SHORT),
        int: core_id(Name::INT),
        long: core_id(Name::LONG),
        ubyte: core_id(Name::UBYTE),
        ushort: core_id(Name::USHORT),
        uint: core_id(Name::UINT),
        ulong: core_id(Name::ULONG),
        float: core_id(Name::FLOAT),
        double: core_id(Name::DOUBLE),

        int_array: core_id(Name::INT_ARRAY),
        long_array: core_id(Name::LONG_ARRAY),
        uint_array: core_id(Name::UINT_ARRAY),
        ulong_array: core_id(Name::ULONG_ARRAY),
        int_range: ranges_id(Name::INT_RANGE),
        long_range: ranges_id(Name::LONG_RANGE),
        uint_range: ranges_id(Name::UINT_RANGE),
        ulong_range: ranges_id(Name::ULONG_RANGE),
        int_progression: ranges_id(Name::INT_PROGRESSION),
        long_progression: ranges_id(Name::LONG_PROGRESSION),
        uint_progression: ranges_id(Name::UINT_PROGRESSION),
        ulong_progression: ranges_id(Name::ULONG_PROGRESSION),
        int_var_of: interop_id(Name::INT_VAR_OF),
        long_var_of: interop_id(Name::LONG_VAR_OF),
        uint_var_of: interop_id(Name::UINT_VAR_OF),
        ulong_var_of: interop_id(Name::ULONG_VAR_OF),

        platform_int: interop_id(Name::PLATFORM_INT),
        platform_uint: interop_id(Name::PLATFORM_UINT),
        platform_int_array: interop_id(Name::PLATFORM_INT_ARRAY),
        platform_uint_array: interop_id(Name::PLATFORM_UINT_ARRAY),
        platform_int_range: interop_id(Name::PLATFORM_INT_RANGE),
        platform_uint_range: interop_id(Name::PLATFORM_UINT_RANGE),
        platform_int_progression: interop_id(Name::PLATFORM_INT_PROGRESSION),
        platform_uint_progression: interop_id(Name::PLATFORM_UINT_PROGRESSION),
        platform_int_var_of: interop_id(Name::PLATFORM_INT_VAR_OF),
        platform_uint_var_of: interop_id(Name::PLATFORM_UINT_VAR_OF),

        deprecated: core_id(Name::DEPRECATED),
        replace_with: core_id(Name::REPLACE_WITH),
        deprecation_level: core_id(Name::DEPRECATION_LEVEL),
        native_callable: interop_id(Name::NATIVE_CALLABLE),
        unsafe_number: interop_id(Name::UNSAFE_NUMBER),
    }
});

/// The process-wide registry.
#[inline]
pub fn well_known() -> &'static WellKnownIds {
    &WELL_KNOWN
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::StringInterner;

    #[test]
    fn registry_matches_parsed_ids() {
        let interner = StringInterner::new();
        assert_eq!(well_known().int, EntityId::parse("core", "Int", &interner));
        assert_eq!(
            well_known().long_range,
            EntityId::parse("core.ranges", "LongRange", &interner)
        );
        assert_eq!(
            well_known().platform_uint_var_of,
            EntityId::parse("core.interop", "PlatformUIntVarOf", &interner)
        );
    }

    #[test]
    fn registry_displays_qualified_names() {
        let interner = StringInterner::new();
        assert_eq!(
            well_known().unsafe_number.display(&interner),
            "core.interop.UnsafeNumber"
        );
    }
}
