//! Controlled/uncontrolled state ownership.
//!
//! A widget never mutates a piece of externally-ownable state directly.
//! It computes the intended next value, emits it through a signal, and then
//! hands it to a [`Controllable`]. In uncontrolled mode the proposal is
//! stored; in controlled mode it is dropped and the owner is expected to
//! [`reflect`](Controllable::reflect) whatever value it decides on.
//!
//! The widget logic is identical in both modes; only this adapter differs.

use std::fmt;

use crate::property::Property;

/// Who owns the value held by a [`Controllable`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Ownership {
    /// The widget stores proposed values itself.
    #[default]
    Uncontrolled,
    /// An external owner supplies every value; proposals are only forwarded.
    Controlled,
}

/// A value that is either owned by the widget or reflected from an owner.
pub struct Controllable<T> {
    value: Property<T>,
    ownership: Ownership,
}

impl<T: Clone + PartialEq> Controllable<T> {
    /// Create a widget-owned value starting at `default`.
    pub fn uncontrolled(default: T) -> Self {
        Self {
            value: Property::new(default),
            ownership: Ownership::Uncontrolled,
        }
    }

    /// Create an externally-owned value starting at `initial`.
    pub fn controlled(initial: T) -> Self {
        Self {
            value: Property::new(initial),
            ownership: Ownership::Controlled,
        }
    }

    /// Create a value with an explicit ownership mode.
    pub fn with_ownership(value: T, ownership: Ownership) -> Self {
        Self {
            value: Property::new(value),
            ownership,
        }
    }

    /// The current value.
    pub fn get(&self) -> T {
        self.value.get()
    }

    /// Access the current value without cloning.
    pub fn with<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&T) -> R,
    {
        self.value.with(f)
    }

    /// Ownership mode.
    pub fn ownership(&self) -> Ownership {
        self.ownership
    }

    /// Whether an external owner supplies the value.
    pub fn is_controlled(&self) -> bool {
        self.ownership == Ownership::Controlled
    }

    /// Offer the widget's intended next value.
    ///
    /// Returns `true` if the value was stored (uncontrolled mode and the
    /// value differs from the current one).
    pub fn propose(&self, next: T) -> bool {
        match self.ownership {
            Ownership::Uncontrolled => self.value.set(next),
            Ownership::Controlled => false,
        }
    }

    /// Supply the value from outside the widget.
    ///
    /// This is how a controlled owner feeds its decision back; it is also
    /// accepted in uncontrolled mode so a host can reset the value.
    /// Returns `true` if the value changed.
    pub fn reflect(&self, value: T) -> bool {
        self.value.set(value)
    }
}

impl<T: Clone + PartialEq + Default> Default for Controllable<T> {
    fn default() -> Self {
        Self::uncontrolled(T::default())
    }
}

impl<T: Clone + fmt::Debug> fmt::Debug for Controllable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Controllable")
            .field("value", &self.value.get())
            .field("ownership", &self.ownership)
            .finish()
    }
}

static_assertions::assert_impl_all!(Controllable<Option<u64>>: Send, Sync);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uncontrolled_stores_proposals() {
        let state = Controllable::uncontrolled(0);
        assert!(!state.is_controlled());
        assert!(state.propose(5));
        assert_eq!(state.get(), 5);
        assert!(!state.propose(5));
    }

    #[test]
    fn test_controlled_ignores_proposals_until_reflected() {
        let state = Controllable::controlled(Some(1));
        assert!(state.is_controlled());
        assert!(!state.propose(Some(2)));
        assert_eq!(state.get(), Some(1));

        assert!(state.reflect(Some(2)));
        assert_eq!(state.get(), Some(2));
    }

    #[test]
    fn test_with_ownership() {
        let state = Controllable::with_ownership("x", Ownership::Controlled);
        assert_eq!(state.ownership(), Ownership::Controlled);
        assert_eq!(state.with(|s| s.len()), 1);
    }
}
