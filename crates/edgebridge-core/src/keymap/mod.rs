//! Key code translation tables for cross-platform keyboard event mapping.
//!
//! The canonical representation on the wire is the USB HID usage ID
//! (page 0x07, Keyboard/Keypad).  Platform-specific codes are translated
//! to/from HID at the capture and injection boundaries.
//!
//! Each platform is described purely as data: a [`KeyTable`] is a named list
//! of `(native_code, usage)` pairs.  Supporting another platform means adding
//! another table, never another lookup routine.

pub mod hid;
pub mod linux_evdev;
pub mod macos_cg;
pub mod windows_vk;

pub use hid::HidKeyCode;

/// A bidirectional mapping between one platform's native key codes and HID
/// usage IDs.
///
/// Every native code and every usage appears at most once, so both lookup
/// directions are unambiguous.
#[derive(Debug)]
pub struct KeyTable {
    name: &'static str,
    entries: &'static [(u16, HidKeyCode)],
}

/// All tables shipped with the crate, in lookup order for [`KeyTable::by_name`].
pub static ALL_TABLES: [&KeyTable; 3] = [
    &macos_cg::MACOS_CG,
    &windows_vk::WINDOWS_VK,
    &linux_evdev::LINUX_EVDEV,
];

impl KeyTable {
    /// Builds a table from static data.
    pub const fn new(name: &'static str, entries: &'static [(u16, HidKeyCode)]) -> Self {
        Self { name, entries }
    }

    /// Looks up a shipped table by its configuration name (`"macos"`,
    /// `"windows"`, `"linux"`).  Matching is case-insensitive.
    pub fn by_name(name: &str) -> Option<&'static KeyTable> {
        ALL_TABLES
            .iter()
            .copied()
            .find(|table| table.name.eq_ignore_ascii_case(name))
    }

    /// The configuration name of this table.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Translates a native key code to its HID usage.
    ///
    /// Returns `None` when the platform key has no mapping; the sending side
    /// drops such events.
    pub fn to_usage(&self, native: u16) -> Option<HidKeyCode> {
        self.entries
            .iter()
            .find(|(code, _)| *code == native)
            .map(|&(_, usage)| usage)
    }

    /// Translates a HID usage back to this platform's native key code.
    ///
    /// Returns `None` for [`HidKeyCode::Unknown`] and for usages this
    /// platform has no key for; the target side skips injection then.
    pub fn to_native(&self, usage: HidKeyCode) -> Option<u16> {
        if usage == HidKeyCode::Unknown {
            return None;
        }
        self.entries
            .iter()
            .find(|(_, mapped)| *mapped == usage)
            .map(|&(code, _)| code)
    }

    /// Iterates over every `(native_code, usage)` pair.
    pub fn iter(&self) -> impl Iterator<Item = (u16, HidKeyCode)> + '_ {
        self.entries.iter().copied()
    }
}
