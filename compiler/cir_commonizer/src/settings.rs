//! Commonizer configuration.

/// Feature flags for a commonization run.
///
/// The default enables every fallback strategy.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct CommonizerSettings {
    /// Replace a type alias with a classifier from its underlying-type chain.
    pub forward_substitution: bool,
    /// Replace a classifier with a parameterless alias that stands for it.
    pub backward_substitution: bool,
    /// Unify width-specific integer families into width-agnostic ones using
    /// each target's pointer width.
    pub platform_integers: bool,
    /// Widen differing numeric primitives to the widest of them and mark the
    /// declaration as depending on an unsafe number.
    pub optimistic_numbers: bool,
}

impl Default for CommonizerSettings {
    fn default() -> Self {
        Self {
            forward_substitution: true,
            backward_substitution: true,
            platform_integers: true,
            optimistic_numbers: true,
        }
    }
}

impl CommonizerSettings {
    /// Every fallback disabled: only literally equal classifiers unify.
    pub fn strict() -> Self {
        Self {
            forward_substitution: false,
            backward_substitution: false,
            platform_integers: false,
            optimistic_numbers: false,
        }
    }

    #[must_use]
    pub fn with_forward_substitution(mut self, enabled: bool) -> Self {
        self.forward_substitution = enabled;
        self
    }

    #[must_use]
    pub fn with_backward_substitution(mut self, enabled: bool) -> Self {
        self.backward_substitution = enabled;
        self
    }

    #[must_use]
    pub fn with_platform_integers(mut self, enabled: bool) -> Self {
        self.platform_integers = enabled;
        self
    }

    #[must_use]
    pub fn with_optimistic_numbers(mut self, enabled: bool) -> Self {
        self.optimistic_numbers = enabled;
        self
    }

    /// Whether any substitution direction is enabled.
    #[inline]
    pub fn substitution_enabled(&self) -> bool {
        self.forward_substitution || self.backward_substitution
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_enables_everything() {
        let settings = CommonizerSettings::default();
        assert!(settings.forward_substitution);
        assert!(settings.backward_substitution);
        assert!(settings.platform_integers);
        assert!(settings.optimistic_numbers);
    }

    #[test]
    fn builders_toggle_single_flags() {
        let settings = CommonizerSettings::strict()
            .with_backward_substitution(true)
            .with_optimistic_numbers(true);
        assert!(!settings.forward_substitution);
        assert!(settings.backward_substitution);
        assert!(!settings.platform_integers);
        assert!(settings.optimistic_numbers);
        assert!(settings.substitution_enabled());
        assert!(!CommonizerSettings::strict().substitution_enabled());
    }
}
