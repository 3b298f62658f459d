//! Globally qualified classifier identifiers.
//!
//! A classifier (class or type alias) is identified by its package plus the
//! chain of names from the top-level classifier down to the nested one.
//! Identity is purely by value.

use smallvec::SmallVec;

use crate::{Name, StringInterner};

/// Dotted package name, stored as interned segments.
#[derive(Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PackageName {
    segments: SmallVec<[Name; 4]>,
}

impl PackageName {
    /// The root (unnamed) package.
    pub fn root() -> Self {
        Self::default()
    }

    /// Create a package name from its segments, outermost first.
    pub fn new(segments: &[Name]) -> Self {
        Self {
            segments: SmallVec::from_slice(segments),
        }
    }

    /// Intern a dotted package name such as `"core.ranges"`.
    pub fn parse(text: &str, interner: &StringInterner) -> Self {
        if text.is_empty() {
            return Self::root();
        }
        Self {
            segments: text.split('.').map(|s| interner.intern(s)).collect(),
        }
    }

    #[inline]
    pub fn segments(&self) -> &[Name] {
        &self.segments
    }

    #[inline]
    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// Render as a dotted string.
    pub fn display(&self, interner: &StringInterner) -> String {
        let mut out = String::new();
        for (i, segment) in self.segments.iter().enumerate() {
            if i > 0 {
                out.push('.');
            }
            out.push_str(interner.lookup(*segment));
        }
        out
    }
}

/// Identifier of a class or type alias.
///
/// `relative` is never empty: its last element is the classifier's own name
/// and the preceding ones are the enclosing classes.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EntityId {
    package: PackageName,
    relative: SmallVec<[Name; 2]>,
}

impl EntityId {
    /// Create an id for a classifier nested along `relative` inside `package`.
    ///
    /// An empty `relative` chain produces an id named [`Name::EMPTY`].
    pub fn new(package: PackageName, relative: &[Name]) -> Self {
        let mut relative = SmallVec::from_slice(relative);
        if relative.is_empty() {
            relative.push(Name::EMPTY);
        }
        Self { package, relative }
    }

    /// Create an id for a top-level classifier.
    pub fn top_level(package: PackageName, name: Name) -> Self {
        Self::new(package, &[name])
    }

    /// Intern an id from a package string and a `.`-separated relative name,
    /// e.g. `EntityId::parse("core.ranges", "IntRange", &interner)`.
    pub fn parse(package: &str, relative: &str, interner: &StringInterner) -> Self {
        let relative: SmallVec<[Name; 2]> =
            relative.split('.').map(|s| interner.intern(s)).collect();
        Self::new(PackageName::parse(package, interner), &relative)
    }

    /// Id of a classifier nested directly inside this one.
    #[must_use]
    pub fn nested(&self, name: Name) -> Self {
        let mut relative = self.relative.clone();
        relative.push(name);
        Self {
            package: self.package.clone(),
            relative,
        }
    }

    /// Id of the directly enclosing classifier, if nested.
    pub fn outer(&self) -> Option<Self> {
        if self.relative.len() < 2 {
            return None;
        }
        let mut relative = self.relative.clone();
        relative.pop();
        Some(Self {
            package: self.package.clone(),
            relative,
        })
    }

    #[inline]
    pub fn package(&self) -> &PackageName {
        &self.package
    }

    #[inline]
    pub fn relative_segments(&self) -> &[Name] {
        &self.relative
    }

    /// The classifier's own (innermost) name.
    #[inline]
    pub fn name(&self) -> Name {
        self.relative.last().copied().unwrap_or(Name::EMPTY)
    }

    #[inline]
    pub fn is_nested(&self) -> bool {
        self.relative.len() > 1
    }

    /// Render as a fully qualified dotted string.
    pub fn display(&self, interner: &StringInterner) -> String {
        let mut out = self.package.display(interner);
        for segment in &self.relative {
            if !out.is_empty() {
                out.push('.');
            }
            out.push_str(interner.lookup(*segment));
        }
        out
    }
}

#[cfg(test)]
mod tests;
