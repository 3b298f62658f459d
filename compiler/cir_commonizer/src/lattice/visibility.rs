//! Visibility commonization.
//!
//! Two policies exist. *Lowering* picks the least permissive of the inputs,
//! for members that are not overridable. *Equalizing* requires identical
//! visibility, for classes, constructors and aliases.

use std::cmp::Ordering;

use cir_ir::Visibility;

use crate::core::{commonize_all, Accumulator, StandardCommonizer};
use crate::CommonizeResult;

/// One target's visibility, with whether the member is virtually dispatched.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct VisibilityFact {
    pub visibility: Visibility,
    pub is_virtual: bool,
}

/// Lowering policy.
///
/// Private inputs fail; incomparable inputs fail; differing visibilities of a
/// virtual member fail (an override cannot narrow what it overrides).
#[derive(Clone, Debug, Default)]
pub struct LoweringVisibility {
    lowest: Option<Visibility>,
    differs: bool,
    any_virtual: bool,
}

impl Accumulator<VisibilityFact> for LoweringVisibility {
    type Output = Visibility;

    const NAME: &'static str = "lowering visibility";

    fn initialize(&mut self, first: &VisibilityFact) -> bool {
        if first.visibility.is_private() {
            return false;
        }
        self.lowest = Some(first.visibility);
        self.any_virtual = first.is_virtual;
        true
    }

    fn combine(&mut self, next: &VisibilityFact) -> bool {
        let Some(lowest) = self.lowest else {
            return false;
        };
        if next.visibility.is_private() {
            return false;
        }
        match lowest.compare_permissiveness(next.visibility) {
            None => return false,
            Some(Ordering::Equal) => {}
            Some(Ordering::Less) => self.differs = true,
            Some(Ordering::Greater) => {
                self.differs = true;
                self.lowest = Some(next.visibility);
            }
        }
        self.any_virtual |= next.is_virtual;
        !(self.differs && self.any_virtual)
    }

    fn output(&self) -> Option<Visibility> {
        self.lowest
    }
}

/// Equalizing policy: all identical and not private.
#[derive(Clone, Debug, Default)]
pub struct EqualizingVisibility {
    visibility: Option<Visibility>,
}

impl Accumulator<Visibility> for EqualizingVisibility {
    type Output = Visibility;

    const NAME: &'static str = "equalizing visibility";

    fn initialize(&mut self, first: &Visibility) -> bool {
        self.visibility = Some(*first);
        !first.is_private()
    }

    fn combine(&mut self, next: &Visibility) -> bool {
        self.visibility == Some(*next)
    }

    fn output(&self) -> Option<Visibility> {
        self.visibility
    }
}

/// Lower the visibilities of one member across all targets.
pub fn lower_visibility(facts: &[VisibilityFact]) -> CommonizeResult<Visibility> {
    commonize_all(
        &mut StandardCommonizer::new(LoweringVisibility::default()),
        facts,
    )
}

/// Require one identical, non-private visibility across all targets.
pub fn equalize_visibility(visibilities: &[Visibility]) -> CommonizeResult<Visibility> {
    commonize_all(
        &mut StandardCommonizer::new(EqualizingVisibility::default()),
        visibilities,
    )
}
