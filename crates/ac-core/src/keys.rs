// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Keyboard input as delivered by the host

use std::fmt;
use std::str::FromStr;

use crate::error::UnknownKey;

/// Keys the editor distinguishes; names follow DOM `KeyboardEvent.key`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Char(char),
    Enter,
    Tab,
    Backspace,
    Escape,
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
}

impl Key {
    /// Keys that move the highlight or resolve an open match
    pub fn is_navigation(&self) -> bool {
        matches!(
            self,
            Key::ArrowUp | Key::ArrowDown | Key::Enter | Key::Tab | Key::Escape
        )
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Char(c) => write!(f, "{c}"),
            Key::Enter => write!(f, "Enter"),
            Key::Tab => write!(f, "Tab"),
            Key::Backspace => write!(f, "Backspace"),
            Key::Escape => write!(f, "Escape"),
            Key::ArrowUp => write!(f, "ArrowUp"),
            Key::ArrowDown => write!(f, "ArrowDown"),
            Key::ArrowLeft => write!(f, "ArrowLeft"),
            Key::ArrowRight => write!(f, "ArrowRight"),
        }
    }
}

impl FromStr for Key {
    type Err = UnknownKey;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        if let (Some(c), None) = (chars.next(), chars.next()) {
            return Ok(Key::Char(c));
        }
        match s {
            "Enter" => Ok(Key::Enter),
            "Tab" => Ok(Key::Tab),
            "Backspace" => Ok(Key::Backspace),
            "Escape" | "Esc" => Ok(Key::Escape),
            "ArrowUp" => Ok(Key::ArrowUp),
            "ArrowDown" => Ok(Key::ArrowDown),
            "ArrowLeft" => Ok(Key::ArrowLeft),
            "ArrowRight" => Ok(Key::ArrowRight),
            _ => Err(UnknownKey(s.to_string())),
        }
    }
}

/// A key-down event travelling through the listeners
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    pub key: Key,
    default_prevented: bool,
}

impl KeyEvent {
    pub fn new(key: Key) -> Self {
        Self {
            key,
            default_prevented: false,
        }
    }

    /// Stops the host from applying its default editing action.
    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    pub fn is_default_prevented(&self) -> bool {
        self.default_prevented
    }
}

impl From<Key> for KeyEvent {
    fn from(key: Key) -> Self {
        KeyEvent::new(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_names_round_trip() {
        for key in [
            Key::Char('w'),
            Key::Char(' '),
            Key::Enter,
            Key::Tab,
            Key::Backspace,
            Key::Escape,
            Key::ArrowUp,
            Key::ArrowDown,
            Key::ArrowLeft,
            Key::ArrowRight,
        ] {
            assert_eq!(key.to_string().parse::<Key>(), Ok(key));
        }
    }

    #[test]
    fn test_unknown_key_name() {
        assert_eq!("F13".parse::<Key>(), Err(UnknownKey("F13".into())));
        assert_eq!("Esc".parse::<Key>(), Ok(Key::Escape));
    }

    #[test]
    fn test_navigation_keys() {
        for key in [Key::ArrowUp, Key::ArrowDown, Key::Enter, Key::Tab, Key::Escape] {
            assert!(key.is_navigation(), "{key}");
        }
        for key in [Key::Char('a'), Key::Backspace, Key::ArrowLeft, Key::ArrowRight] {
            assert!(!key.is_navigation(), "{key}");
        }
    }

    #[test]
    fn test_prevent_default() {
        let mut event = KeyEvent::from(Key::ArrowDown);
        assert!(!event.is_default_prevented());
        event.prevent_default();
        assert!(event.is_default_prevented());
    }
}
