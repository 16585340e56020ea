/// Keyboard state: the accessor the filter reads held modifiers through.
///
/// The viewer never owns a keyboard hook. Whatever produces key events
/// (the terminal in `live`, command-line flags elsewhere) implements
/// [`KeyboardState`] and is passed in.
pub mod terminal;

pub use terminal::TerminalKeyboard;

/// A physical modifier key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PhysicalKey {
    LeftControl,
    RightControl,
    LeftAlt,
    RightAlt,
    LeftShift,
    RightShift,
}

impl PhysicalKey {
    pub const ALL: [Self; 6] = [
        Self::LeftControl,
        Self::RightControl,
        Self::LeftAlt,
        Self::RightAlt,
        Self::LeftShift,
        Self::RightShift,
    ];

    /// The logical modifier this key belongs to.
    #[cfg(test)]
    #[must_use]
    pub const fn modifier(self) -> Modifier {
        match self {
            Self::LeftControl | Self::RightControl => Modifier::Control,
            Self::LeftAlt | Self::RightAlt => Modifier::Alt,
            Self::LeftShift | Self::RightShift => Modifier::Shift,
        }
    }
}

/// A logical modifier, either side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Modifier {
    Control,
    Alt,
    Shift,
}

impl Modifier {
    /// Filter prefix order: Control, then Alt, then Shift.
    pub const ORDER: [Self; 3] = [Self::Control, Self::Alt, Self::Shift];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Control => "Control",
            Self::Alt => "Alt",
            Self::Shift => "Shift",
        }
    }

    #[must_use]
    pub const fn keys(self) -> [PhysicalKey; 2] {
        match self {
            Self::Control => [PhysicalKey::LeftControl, PhysicalKey::RightControl],
            Self::Alt => [PhysicalKey::LeftAlt, PhysicalKey::RightAlt],
            Self::Shift => [PhysicalKey::LeftShift, PhysicalKey::RightShift],
        }
    }
}

/// Read access to which modifier keys are currently down.
pub trait KeyboardState {
    fn is_down(&self, key: PhysicalKey) -> bool;
}

/// Which logical modifiers are held.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HeldModifiers {
    pub control: bool,
    pub alt: bool,
    pub shift: bool,
}

impl HeldModifiers {
    /// Sample the keyboard; a modifier counts as held if either side is down.
    #[must_use]
    pub fn read(state: &dyn KeyboardState) -> Self {
        let held = |m: Modifier| m.keys().iter().any(|k| state.is_down(*k));
        Self {
            control: held(Modifier::Control),
            alt: held(Modifier::Alt),
            shift: held(Modifier::Shift),
        }
    }

    #[must_use]
    pub const fn contains(self, modifier: Modifier) -> bool {
        match modifier {
            Modifier::Control => self.control,
            Modifier::Alt => self.alt,
            Modifier::Shift => self.shift,
        }
    }

    #[must_use]
    pub const fn is_empty(self) -> bool {
        !self.control && !self.alt && !self.shift
    }

    /// `"<Name> + "` for each held modifier, in [`Modifier::ORDER`].
    ///
    /// Nothing held gives `""`, which matches every line.
    #[must_use]
    pub fn prefix(self) -> String {
        if self.is_empty() {
            return String::new();
        }
        let mut prefix = String::with_capacity(25);
        for modifier in Modifier::ORDER {
            if self.contains(modifier) {
                prefix.push_str(modifier.name());
                prefix.push_str(" + ");
            }
        }
        prefix
    }
}

/// A fixed set of held keys.
#[derive(Debug, Clone, Default)]
pub struct StaticKeyboard {
    down: Vec<PhysicalKey>,
}

impl StaticKeyboard {
    #[cfg(test)]
    #[must_use]
    pub fn new(down: &[PhysicalKey]) -> Self {
        Self {
            down: down.to_vec(),
        }
    }

    /// Hold the left key of each requested modifier.
    #[must_use]
    pub fn from_flags(control: bool, alt: bool, shift: bool) -> Self {
        let mut keyboard = Self::default();
        for (held, modifier) in [control, alt, shift].into_iter().zip(Modifier::ORDER) {
            if held {
                keyboard.press(modifier.keys()[0]);
            }
        }
        keyboard
    }

    pub fn press(&mut self, key: PhysicalKey) {
        if !self.down.contains(&key) {
            self.down.push(key);
        }
    }

    #[cfg(test)]
    pub fn release(&mut self, key: PhysicalKey) {
        self.down.retain(|k| *k != key);
    }
}

impl KeyboardState for StaticKeyboard {
    fn is_down(&self, key: PhysicalKey) -> bool {
        self.down.contains(&key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn prefix(keys: &[PhysicalKey]) -> String {
        HeldModifiers::read(&StaticKeyboard::new(keys)).prefix()
    }

    #[test]
    fn test_no_modifiers() {
        assert_eq!(prefix(&[]), "");
    }

    #[test]
    fn test_control_only() {
        assert_eq!(prefix(&[PhysicalKey::LeftControl]), "Control + ");
        assert_eq!(prefix(&[PhysicalKey::RightControl]), "Control + ");
    }

    #[test]
    fn test_control_shift() {
        assert_eq!(
            prefix(&[PhysicalKey::RightShift, PhysicalKey::LeftControl]),
            "Control + Shift + "
        );
    }

    #[test]
    fn test_fixed_order() {
        assert_eq!(
            prefix(&[
                PhysicalKey::LeftShift,
                PhysicalKey::RightAlt,
                PhysicalKey::RightControl
            ]),
            "Control + Alt + Shift + "
        );
        assert_eq!(
            prefix(&[PhysicalKey::LeftShift, PhysicalKey::LeftAlt]),
            "Alt + Shift + "
        );
    }

    #[test]
    fn test_both_sides_count_once() {
        assert_eq!(
            prefix(&[PhysicalKey::LeftAlt, PhysicalKey::RightAlt]),
            "Alt + "
        );
    }

    #[test]
    fn test_static_press_release() {
        let mut kb = StaticKeyboard::from_flags(true, false, true);
        assert!(kb.is_down(PhysicalKey::LeftControl));
        kb.release(PhysicalKey::LeftControl);
        kb.press(PhysicalKey::RightAlt);
        assert_eq!(HeldModifiers::read(&kb).prefix(), "Alt + Shift + ");
    }

    #[test]
    fn test_key_modifier_mapping() {
        for key in PhysicalKey::ALL {
            assert!(key.modifier().keys().contains(&key));
        }
    }
}
