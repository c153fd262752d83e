//! Input events consumed by the picker.
//!
//! The picker is headless: a host translates its toolkit's keyboard and
//! focus events into these types and feeds them to the widget. An event the
//! host (or an external hook) has already accepted counts as
//! default-prevented and the widget leaves it alone.

/// Keyboard modifiers that may be held during input events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct KeyboardModifiers {
    /// The Shift key is held.
    pub shift: bool,
    /// The Control key is held (Cmd on macOS).
    pub control: bool,
    /// The Alt key is held (Option on macOS).
    pub alt: bool,
    /// The Meta/Super key is held.
    pub meta: bool,
}

impl KeyboardModifiers {
    /// No modifiers pressed.
    pub const NONE: Self = Self {
        shift: false,
        control: false,
        alt: false,
        meta: false,
    };

    /// Shift modifier only.
    pub const SHIFT: Self = Self {
        shift: true,
        control: false,
        alt: false,
        meta: false,
    };

    /// Control modifier only.
    pub const CTRL: Self = Self {
        shift: false,
        control: true,
        alt: false,
        meta: false,
    };

    /// Alt modifier only.
    pub const ALT: Self = Self {
        shift: false,
        control: false,
        alt: true,
        meta: false,
    };

    /// Check if any modifier is pressed.
    pub fn any(&self) -> bool {
        self.shift || self.control || self.alt || self.meta
    }

    /// Check if no modifiers are pressed.
    pub fn none(&self) -> bool {
        !self.any()
    }
}

/// Keys the picker and its surfaces react to.
///
/// Printable keys arrive as [`Key::Character`]; anything else the host
/// cannot map is [`Key::Unidentified`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    PageUp,
    PageDown,
    Home,
    End,
    Enter,
    Escape,
    Tab,
    Space,
    Backspace,
    Delete,
    Character(char),
    Unidentified,
}

/// Common data for all events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EventBase {
    /// Whether the event has been accepted (handled).
    accepted: bool,
}

impl EventBase {
    /// Create a new event base.
    pub fn new() -> Self {
        Self { accepted: false }
    }

    /// Check if the event has been accepted.
    pub fn is_accepted(&self) -> bool {
        self.accepted
    }

    /// Accept the event. The widget's default handling is skipped.
    pub fn accept(&mut self) {
        self.accepted = true;
    }

    /// Ignore the event, allowing default handling.
    pub fn ignore(&mut self) {
        self.accepted = false;
    }
}

/// A key down or key press (character) event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyPressEvent {
    /// Base event data.
    pub base: EventBase,
    /// The key that was pressed.
    pub key: Key,
    /// Keyboard modifiers held during the event.
    pub modifiers: KeyboardModifiers,
    /// The text this key produces, empty for non-printable keys.
    pub text: String,
    /// Whether this is a key repeat event (key held down).
    pub is_repeat: bool,
}

impl KeyPressEvent {
    /// Create a new key event.
    pub fn new(
        key: Key,
        modifiers: KeyboardModifiers,
        text: impl Into<String>,
        is_repeat: bool,
    ) -> Self {
        Self {
            base: EventBase::new(),
            key,
            modifiers,
            text: text.into(),
            is_repeat,
        }
    }

    /// A non-printable key with no modifiers.
    pub fn key(key: Key) -> Self {
        Self::new(key, KeyboardModifiers::NONE, "", false)
    }

    /// A non-printable key with modifiers.
    pub fn with_modifiers(key: Key, modifiers: KeyboardModifiers) -> Self {
        Self::new(key, modifiers, "", false)
    }

    /// A printable character.
    pub fn character(ch: char) -> Self {
        Self::new(Key::Character(ch), KeyboardModifiers::NONE, ch.to_string(), false)
    }

    /// Whether an earlier handler accepted this event.
    pub fn is_default_prevented(&self) -> bool {
        self.base.is_accepted()
    }
}

/// The focusable parts of the composite widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CompositePart {
    /// The text field.
    Input,
    /// The button toggling the calendar.
    DateButton,
    /// The button toggling the time list.
    TimeButton,
    /// Any element inside the calendar popup.
    Calendar,
    /// Any element inside the time-list popup.
    TimeList,
}

/// The reason for a focus change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FocusReason {
    /// Focus changed due to mouse click.
    Mouse,
    /// Focus changed due to Tab key.
    Tab,
    /// Focus changed due to Shift+Tab (backtab).
    Backtab,
    /// Focus changed programmatically.
    #[default]
    Other,
}

/// Focus entered one part of the composite.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FocusInEvent {
    /// Base event data.
    pub base: EventBase,
    /// The part that received focus.
    pub part: CompositePart,
    /// The reason focus was gained.
    pub reason: FocusReason,
}

impl FocusInEvent {
    /// Create a new focus in event.
    pub fn new(part: CompositePart, reason: FocusReason) -> Self {
        Self {
            base: EventBase::new(),
            part,
            reason,
        }
    }
}

/// Focus left one part of the composite.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FocusOutEvent {
    /// Base event data.
    pub base: EventBase,
    /// The part that lost focus.
    pub part: CompositePart,
    /// The reason focus was lost.
    pub reason: FocusReason,
}

impl FocusOutEvent {
    /// Create a new focus out event.
    pub fn new(part: CompositePart, reason: FocusReason) -> Self {
        Self {
            base: EventBase::new(),
            part,
            reason,
        }
    }
}
