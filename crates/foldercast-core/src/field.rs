//! Tri-state field model
//!
//! Every settable property in a patch is a [`Field`]: untouched, enabled
//! without a concrete choice, or set to an explicit value. The three states
//! are an explicit tagged union rather than an overloaded enum member, so
//! normalization stays a total function.

/// A tri-state settable value.
///
/// - `Unset`: do not touch this property on the remote resource.
/// - `Sentinel`: the field is enabled but no concrete choice was made
///   (provider-specific placeholder, e.g. "mute indefinitely").
/// - `Value(T)`: a concrete value to apply.
///
/// Neither `Unset` nor `Sentinel` is ever serialized as such; the wire
/// normalizer substitutes the category's concrete placeholder or drops
/// the property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Field<T> {
    /// Leave the remote property untouched
    #[default]
    Unset,
    /// Enabled, but no concrete choice yet
    Sentinel,
    /// Concrete value to apply
    Value(T),
}

impl<T> Field<T> {
    /// Map an enabled-checkbox plus an optional selection to a field state.
    ///
    /// Checkbox off discards any prior selection: the field resets to
    /// `Unset` and no stale value leaks through.
    #[inline]
    #[must_use]
    pub fn from_toggle(enabled: bool, choice: Option<T>) -> Self {
        if !enabled {
            return Self::Unset;
        }
        match choice {
            Some(value) => Self::Value(value),
            None => Self::Sentinel,
        }
    }

    /// Whether the field is `Unset`
    #[inline]
    #[must_use]
    pub fn is_unset(&self) -> bool {
        matches!(self, Self::Unset)
    }

    /// Whether the field is the `Sentinel` placeholder
    #[inline]
    #[must_use]
    pub fn is_sentinel(&self) -> bool {
        matches!(self, Self::Sentinel)
    }

    /// Whether the field holds a concrete value
    #[inline]
    #[must_use]
    pub fn is_value(&self) -> bool {
        matches!(self, Self::Value(_))
    }

    /// Concrete value, if any
    #[inline]
    #[must_use]
    pub fn value(&self) -> Option<&T> {
        match self {
            Self::Value(value) => Some(value),
            _ => None,
        }
    }

    /// Consume the field, returning the concrete value if any
    #[inline]
    #[must_use]
    pub fn into_value(self) -> Option<T> {
        match self {
            Self::Value(value) => Some(value),
            _ => None,
        }
    }

    /// Borrowing view of the field
    #[inline]
    #[must_use]
    pub fn as_ref(&self) -> Field<&T> {
        match self {
            Self::Unset => Field::Unset,
            Self::Sentinel => Field::Sentinel,
            Self::Value(value) => Field::Value(value),
        }
    }

    /// Map the concrete value, preserving `Unset` and `Sentinel`
    #[inline]
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Field<U> {
        match self {
            Self::Unset => Field::Unset,
            Self::Sentinel => Field::Sentinel,
            Self::Value(value) => Field::Value(f(value)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_off_is_unset() {
        assert_eq!(Field::from_toggle(false, None::<bool>), Field::Unset);
    }

    #[test]
    fn toggle_off_discards_prior_choice() {
        // Checkbox off after a value was chosen: the choice must not leak.
        assert_eq!(Field::from_toggle(false, Some(true)), Field::Unset);
    }

    #[test]
    fn toggle_on_without_choice_is_sentinel() {
        assert_eq!(Field::from_toggle(true, None::<u32>), Field::Sentinel);
    }

    #[test]
    fn toggle_on_with_choice_is_value() {
        assert_eq!(Field::from_toggle(true, Some(7_u32)), Field::Value(7));
    }

    #[test]
    fn map_preserves_non_values() {
        assert_eq!(Field::<u32>::Unset.map(|v| v + 1), Field::Unset);
        assert_eq!(Field::<u32>::Sentinel.map(|v| v + 1), Field::Sentinel);
        assert_eq!(Field::Value(1_u32).map(|v| v + 1), Field::Value(2));
    }

    #[test]
    fn default_is_unset() {
        assert!(Field::<String>::default().is_unset());
    }
}
