//! Key codes and modifier state carried by key and mouse events.

use bitflags::bitflags;
use std::fmt;

/// A platform-neutral key code. Backends translate native key codes into
/// these values; codes without a named constant pass through unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyCode(pub u32);

impl KeyCode {
    pub const BACKSPACE: KeyCode = KeyCode(0x08);
    pub const TAB: KeyCode = KeyCode(0x09);
    pub const RETURN: KeyCode = KeyCode(0x0D);
    pub const ESCAPE: KeyCode = KeyCode(0x1B);
    pub const SPACE: KeyCode = KeyCode(0x20);
    pub const PAGE_UP: KeyCode = KeyCode(0x21);
    pub const PAGE_DOWN: KeyCode = KeyCode(0x22);
    pub const END: KeyCode = KeyCode(0x23);
    pub const HOME: KeyCode = KeyCode(0x24);
    pub const LEFT: KeyCode = KeyCode(0x25);
    pub const UP: KeyCode = KeyCode(0x26);
    pub const RIGHT: KeyCode = KeyCode(0x27);
    pub const DOWN: KeyCode = KeyCode(0x28);
    pub const DELETE: KeyCode = KeyCode(0x2E);
}

bitflags! {
    /// Modifier keys held while an event was generated.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct KeyModifiers: u8 {
        const CAPS_LOCK = 1 << 0;
        const SHIFT     = 1 << 1;
        const CONTROL   = 1 << 2;
        const OPTION    = 1 << 3;
        const COMMAND   = 1 << 4;
    }
}

impl KeyModifiers {
    /// Every modifier except caps lock.
    pub const NON_STICKY: KeyModifiers = KeyModifiers::SHIFT
        .union(KeyModifiers::CONTROL)
        .union(KeyModifiers::OPTION)
        .union(KeyModifiers::COMMAND);

    pub fn shift_down(self) -> bool {
        self.contains(KeyModifiers::SHIFT)
    }

    /// Whether `self`, ignoring caps lock, is exactly `expected`.
    pub fn only(self, expected: KeyModifiers) -> bool {
        self.intersection(KeyModifiers::NON_STICKY) == expected
    }
}

impl fmt::Display for KeyModifiers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (flag, symbol) in [
            (KeyModifiers::CONTROL, "⌃"),
            (KeyModifiers::OPTION, "⌥"),
            (KeyModifiers::SHIFT, "⇧"),
            (KeyModifiers::CAPS_LOCK, "⇪"),
            (KeyModifiers::COMMAND, "⌘"),
        ] {
            if self.contains(flag) {
                f.write_str(symbol)?;
            }
        }
        Ok(())
    }
}
