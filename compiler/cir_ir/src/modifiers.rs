//! Declaration modifiers: visibility, modality, kinds and flag sets.

use std::cmp::Ordering;

use bitflags::bitflags;

/// Declaration visibility.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Visibility {
    Public,
    Protected,
    Internal,
    Private,
}

impl Visibility {
    /// Compare by permissiveness: `Greater` means `self` is visible from more
    /// places than `other`.
    ///
    /// `Protected` and `Internal` grant access to unrelated sets of callers and
    /// are incomparable (`None`).
    pub fn compare_permissiveness(self, other: Self) -> Option<Ordering> {
        use Visibility::{Internal, Private, Protected, Public};

        if self == other {
            return Some(Ordering::Equal);
        }
        match (self, other) {
            (Protected, Internal) | (Internal, Protected) => None,
            (Public, _) | (_, Private) => Some(Ordering::Greater),
            (_, Public) | (Private, _) => Some(Ordering::Less),
            // Exhausted above: equal pairs and the protected/internal pair.
            (Protected | Internal, Protected | Internal) => None,
        }
    }

    #[inline]
    pub fn is_private(self) -> bool {
        self == Visibility::Private
    }
}

/// Declaration modality.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Modality {
    Final,
    Open,
    Abstract,
    Sealed,
}

/// Kind of a class-like declaration.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ClassKind {
    Class,
    Interface,
    EnumClass,
    EnumEntry,
    AnnotationClass,
    Object,
}

impl ClassKind {
    /// Interfaces may be inherited any number of times; everything else is
    /// subject to single inheritance.
    #[inline]
    pub fn is_interface(self) -> bool {
        self == ClassKind::Interface
    }

    /// Kinds with exactly one instance.
    #[inline]
    pub fn is_singleton(self) -> bool {
        matches!(self, ClassKind::Object | ClassKind::EnumEntry)
    }
}

/// Declaration-site or use-site variance.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Variance {
    Invariant,
    In,
    Out,
}

/// How a callable member came to exist in its owner.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CallableKind {
    /// Written in source.
    Declaration,
    /// Inherited without being redeclared.
    FakeOverride,
    /// Generated by interface delegation.
    Delegation,
    /// Generated by the compiler (e.g. data-class `copy`/`componentN`).
    Synthesized,
}

bitflags! {
    /// Function-only modifiers.
    #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
    pub struct FunctionModifiers: u8 {
        const OPERATOR = 1 << 0;
        const INFIX = 1 << 1;
        const INLINE = 1 << 2;
        const SUSPEND = 1 << 3;
    }
}
