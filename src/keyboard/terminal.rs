/// Modifier tracking from crossterm key events.
///
/// Terminals that speak the keyboard enhancement protocol report modifier
/// keys as `KeyCode::Modifier` with press/release kinds, and those events are
/// the only source of state. Legacy terminals only attach modifier flags to
/// ordinary keys; there the flags of each event are taken as the current
/// state, except that Shift on a typed character is treated as typing.
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers, ModifierKeyCode};

use super::{KeyboardState, Modifier, PhysicalKey};

/// What a key event meant for the tracked state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyTransition {
    /// A key went down (or repeated).
    Pressed,
    /// A key came up. Carries the modifier key when it was one.
    Released(Option<PhysicalKey>),
}

#[derive(Debug, Clone, Default)]
pub struct TerminalKeyboard {
    down: [bool; PhysicalKey::ALL.len()],
    enhanced: bool,
}

impl TerminalKeyboard {
    /// Tracker for a legacy terminal.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Tracker for a terminal with keyboard enhancement pushed. Modifier
    /// flags on ordinary keys are ignored there, since alternate-key
    /// reporting strips Shift from shifted characters.
    #[must_use]
    pub fn enhanced() -> Self {
        Self {
            enhanced: true,
            ..Self::default()
        }
    }

    /// Update the state from one key event.
    pub fn observe(&mut self, key: &KeyEvent) -> KeyTransition {
        if let KeyCode::Modifier(code) = key.code {
            if let Some(physical) = physical_key(code) {
                let pressed = key.kind != KeyEventKind::Release;
                self.set(physical, pressed);
                return if pressed {
                    KeyTransition::Pressed
                } else {
                    KeyTransition::Released(Some(physical))
                };
            }
        }

        if !self.enhanced {
            // A capital letter or shifted symbol is typing, not a held Shift.
            let typed_shift =
                matches!(key.code, KeyCode::Char(_)) && key.modifiers == KeyModifiers::SHIFT;
            self.sync_flags(key.modifiers, !typed_shift);
        }
        if key.kind == KeyEventKind::Release {
            KeyTransition::Released(None)
        } else {
            KeyTransition::Pressed
        }
    }

    /// Forget everything, e.g. after focus is lost.
    pub fn reset(&mut self) {
        self.down = [false; PhysicalKey::ALL.len()];
    }

    fn set(&mut self, key: PhysicalKey, down: bool) {
        self.down[index(key)] = down;
    }

    fn sync_flags(&mut self, flags: KeyModifiers, include_shift: bool) {
        for (modifier, flag) in [
            (Modifier::Control, KeyModifiers::CONTROL),
            (Modifier::Alt, KeyModifiers::ALT),
            (Modifier::Shift, KeyModifiers::SHIFT),
        ] {
            if modifier == Modifier::Shift && !include_shift {
                continue;
            }
            let [left, right] = modifier.keys();
            let held = self.is_down(left) || self.is_down(right);
            if flags.contains(flag) {
                if !held {
                    self.set(left, true);
                }
            } else if held {
                self.set(left, false);
                self.set(right, false);
            }
        }
    }
}

impl KeyboardState for TerminalKeyboard {
    fn is_down(&self, key: PhysicalKey) -> bool {
        self.down[index(key)]
    }
}

const fn index(key: PhysicalKey) -> usize {
    match key {
        PhysicalKey::LeftControl => 0,
        PhysicalKey::RightControl => 1,
        PhysicalKey::LeftAlt => 2,
        PhysicalKey::RightAlt => 3,
        PhysicalKey::LeftShift => 4,
        PhysicalKey::RightShift => 5,
    }
}

fn physical_key(code: ModifierKeyCode) -> Option<PhysicalKey> {
    match code {
        ModifierKeyCode::LeftControl => Some(PhysicalKey::LeftControl),
        ModifierKeyCode::RightControl => Some(PhysicalKey::RightControl),
        ModifierKeyCode::LeftAlt => Some(PhysicalKey::LeftAlt),
        ModifierKeyCode::RightAlt => Some(PhysicalKey::RightAlt),
        ModifierKeyCode::LeftShift => Some(PhysicalKey::LeftShift),
        ModifierKeyCode::RightShift => Some(PhysicalKey::RightShift),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keyboard::HeldModifiers;

    fn event(code: KeyCode, modifiers: KeyModifiers, kind: KeyEventKind) -> KeyEvent {
        KeyEvent::new_with_kind(code, modifiers, kind)
    }

    fn modifier(code: ModifierKeyCode, kind: KeyEventKind) -> KeyEvent {
        event(KeyCode::Modifier(code), KeyModifiers::NONE, kind)
    }

    #[test]
    fn test_enhanced_press_and_release() {
        let mut kb = TerminalKeyboard::new();
        let t = kb.observe(&modifier(ModifierKeyCode::LeftControl, KeyEventKind::Press));
        assert_eq!(t, KeyTransition::Pressed);
        kb.observe(&modifier(ModifierKeyCode::RightShift, KeyEventKind::Press));
        assert_eq!(HeldModifiers::read(&kb).prefix(), "Control + Shift + ");

        let t = kb.observe(&modifier(ModifierKeyCode::RightShift, KeyEventKind::Release));
        assert_eq!(t, KeyTransition::Released(Some(PhysicalKey::RightShift)));
        assert_eq!(HeldModifiers::read(&kb).prefix(), "Control + ");
    }

    #[test]
    fn test_legacy_flags() {
        let mut kb = TerminalKeyboard::new();
        kb.observe(&event(
            KeyCode::Char('s'),
            KeyModifiers::CONTROL | KeyModifiers::ALT,
            KeyEventKind::Press,
        ));
        assert_eq!(HeldModifiers::read(&kb).prefix(), "Control + Alt + ");

        kb.observe(&event(
            KeyCode::Char('a'),
            KeyModifiers::NONE,
            KeyEventKind::Press,
        ));
        assert!(HeldModifiers::read(&kb).is_empty());
    }

    #[test]
    fn test_flags_keep_known_side() {
        let mut kb = TerminalKeyboard::new();
        kb.observe(&modifier(ModifierKeyCode::RightControl, KeyEventKind::Press));
        kb.observe(&event(
            KeyCode::Char('k'),
            KeyModifiers::CONTROL,
            KeyEventKind::Press,
        ));
        assert!(kb.is_down(PhysicalKey::RightControl));
        assert!(!kb.is_down(PhysicalKey::LeftControl));
    }

    #[test]
    fn test_legacy_capital_letter_is_not_held_shift() {
        let mut kb = TerminalKeyboard::new();
        kb.observe(&event(KeyCode::Char('K'), KeyModifiers::SHIFT, KeyEventKind::Press));
        assert!(HeldModifiers::read(&kb).is_empty());

        kb.observe(&event(KeyCode::F(5), KeyModifiers::SHIFT, KeyEventKind::Press));
        assert_eq!(HeldModifiers::read(&kb).prefix(), "Shift + ");
        kb.observe(&event(KeyCode::Char('K'), KeyModifiers::SHIFT, KeyEventKind::Press));
        assert_eq!(HeldModifiers::read(&kb).prefix(), "Shift + ");

        kb.observe(&event(
            KeyCode::Char('s'),
            KeyModifiers::CONTROL | KeyModifiers::SHIFT,
            KeyEventKind::Press,
        ));
        assert_eq!(HeldModifiers::read(&kb).prefix(), "Control + Shift + ");
    }

    #[test]
    fn test_enhanced_ignores_flags_on_ordinary_keys() {
        let mut kb = TerminalKeyboard::enhanced();
        kb.observe(&modifier(ModifierKeyCode::LeftShift, KeyEventKind::Press));
        kb.observe(&event(KeyCode::Char('K'), KeyModifiers::NONE, KeyEventKind::Press));
        assert_eq!(HeldModifiers::read(&kb).prefix(), "Shift + ");

        kb.observe(&event(KeyCode::Char('x'), KeyModifiers::CONTROL, KeyEventKind::Press));
        assert_eq!(HeldModifiers::read(&kb).prefix(), "Shift + ");

        kb.observe(&modifier(ModifierKeyCode::LeftShift, KeyEventKind::Release));
        assert!(HeldModifiers::read(&kb).is_empty());
    }

    #[test]
    fn test_other_modifiers_ignored() {
        let mut kb = TerminalKeyboard::new();
        kb.observe(&modifier(ModifierKeyCode::LeftSuper, KeyEventKind::Press));
        assert!(HeldModifiers::read(&kb).is_empty());
        kb.observe(&modifier(ModifierKeyCode::LeftAlt, KeyEventKind::Repeat));
        kb.reset();
        assert!(HeldModifiers::read(&kb).is_empty());
    }
}
