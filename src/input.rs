use xkeysym::Keysym;

/// Keyboard input as the launcher cares about it, independent of the toolkit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    Char(char),
    Backspace,
    Enter,
    Escape,
    Up,
    Down,
    Other,
}

impl InputEvent {
    /// Normalizes a key press. `text` is the UTF-8 the keymap produced, if any.
    pub fn from_key(keysym: Keysym, text: Option<&str>, ctrl: bool) -> Self {
        match keysym {
            Keysym::Escape => InputEvent::Escape,
            Keysym::Return | Keysym::KP_Enter => InputEvent::Enter,
            Keysym::BackSpace => InputEvent::Backspace,
            Keysym::Up | Keysym::KP_Up => InputEvent::Up,
            Keysym::Down | Keysym::KP_Down => InputEvent::Down,
            _ if ctrl => InputEvent::Other,
            _ => {
                let c = match text {
                    Some(text) => {
                        let mut chars = text.chars();
                        match (chars.next(), chars.next()) {
                            (Some(c), None) => Some(c),
                            _ => None,
                        }
                    }
                    None => keysym.key_char(),
                };
                match c {
                    Some(c) if !c.is_control() => InputEvent::Char(c),
                    _ => InputEvent::Other,
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn control_keys_are_named() {
        assert_eq!(InputEvent::from_key(Keysym::Escape, Some("\u{1b}"), false), InputEvent::Escape);
        assert_eq!(InputEvent::from_key(Keysym::Return, Some("\r"), false), InputEvent::Enter);
        assert_eq!(InputEvent::from_key(Keysym::KP_Enter, None, false), InputEvent::Enter);
        assert_eq!(InputEvent::from_key(Keysym::new(0xff08), None, false), InputEvent::Backspace);
        assert_eq!(InputEvent::from_key(Keysym::Down, None, false), InputEvent::Down);
    }

    #[test]
    fn printable_text_becomes_char() {
        assert_eq!(InputEvent::from_key(Keysym::a, Some("a"), false), InputEvent::Char('a'));
        assert_eq!(InputEvent::from_key(Keysym::A, None, false), InputEvent::Char('A'));
        assert_eq!(InputEvent::from_key(Keysym::odiaeresis, Some("ö"), false), InputEvent::Char('ö'));
    }

    #[test]
    fn shortcuts_and_dead_keys_are_ignored() {
        assert_eq!(InputEvent::from_key(Keysym::c, Some("\u{3}"), true), InputEvent::Other);
        assert_eq!(InputEvent::from_key(Keysym::Shift_L, None, false), InputEvent::Other);
        assert_eq!(InputEvent::from_key(Keysym::Tab, Some("\t"), false), InputEvent::Other);
    }
}
