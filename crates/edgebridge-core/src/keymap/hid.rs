//! USB HID Usage IDs (page 0x07, Keyboard/Keypad page).
//!
//! This is the canonical cross-platform key representation carried in
//! [`Packet::Key`](crate::protocol::Packet::Key).  The source translates its
//! native key codes to HID before sending; the target translates them back.
//!
//! Reference: USB HID Usage Tables 1.3, Section 10 (Keyboard/Keypad page 0x07).
//!
//! # What is a HID Usage ID? (for beginners)
//!
//! The **USB Human Interface Device (HID)** standard assigns a unique number to
//! every key on a keyboard.  These numbers identify **physical key positions**,
//! not characters: HID 0x04 is "the key where A sits on a US layout", whatever
//! the active layout makes it type.  That is why one number works for QWERTY,
//! AZERTY and Dvorak alike.
//!
//! | Key          | HID Usage ID |
//! |--------------|-------------|
//! | Letter A     | 0x04        |
//! | Enter        | 0x28        |
//! | Left Ctrl    | 0xE0        |
//!
//! # The `Unknown` sentinel
//!
//! [`HidKeyCode::Unknown`] (0x0000) stands for any usage this crate has no
//! variant for.  It is never mapped to a native key.

/// USB HID Usage ID for keyboard keys (page 0x07).
///
/// The numeric value of each variant is its HID Usage ID on the keyboard/keypad page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u16)]
pub enum HidKeyCode {
    // Letters (HID 0x04–0x1D)
    KeyA = 0x04,
    KeyB = 0x05,
    KeyC = 0x06,
    KeyD = 0x07,
    KeyE = 0x08,
    KeyF = 0x09,
    KeyG = 0x0A,
    KeyH = 0x0B,
    KeyI = 0x0C,
    KeyJ = 0x0D,
    KeyK = 0x0E,
    KeyL = 0x0F,
    KeyM = 0x10,
    KeyN = 0x11,
    KeyO = 0x12,
    KeyP = 0x13,
    KeyQ = 0x14,
    KeyR = 0x15,
    KeyS = 0x16,
    KeyT = 0x17,
    KeyU = 0x18,
    KeyV = 0x19,
    KeyW = 0x1A,
    KeyX = 0x1B,
    KeyY = 0x1C,
    KeyZ = 0x1D,

    // Digits (HID 0x1E–0x27)
    Digit1 = 0x1E,
    Digit2 = 0x1F,
    Digit3 = 0x20,
    Digit4 = 0x21,
    Digit5 = 0x22,
    Digit6 = 0x23,
    Digit7 = 0x24,
    Digit8 = 0x25,
    Digit9 = 0x26,
    Digit0 = 0x27,

    // Control and punctuation
    Enter = 0x28,
    Escape = 0x29,
    Backspace = 0x2A,
    Tab = 0x2B,
    Space = 0x2C,
    Minus = 0x2D,
    Equal = 0x2E,
    BracketLeft = 0x2F,
    BracketRight = 0x30,
    Backslash = 0x31,
    Semicolon = 0x33,
    Quote = 0x34,
    Backquote = 0x35,
    Comma = 0x36,
    Period = 0x37,
    Slash = 0x38,
    CapsLock = 0x39,

    // Function keys
    F1 = 0x3A,
    F2 = 0x3B,
    F3 = 0x3C,
    F4 = 0x3D,
    F5 = 0x3E,
    F6 = 0x3F,
    F7 = 0x40,
    F8 = 0x41,
    F9 = 0x42,
    F10 = 0x43,
    F11 = 0x44,
    F12 = 0x45,

    // Navigation cluster
    PrintScreen = 0x46,
    ScrollLock = 0x47,
    Pause = 0x48,
    Insert = 0x49,
    Home = 0x4A,
    PageUp = 0x4B,
    Delete = 0x4C,
    End = 0x4D,
    PageDown = 0x4E,
    ArrowRight = 0x4F,
    ArrowLeft = 0x50,
    ArrowDown = 0x51,
    ArrowUp = 0x52,

    // Keypad
    NumLock = 0x53,
    NumpadDivide = 0x54,
    NumpadMultiply = 0x55,
    NumpadSubtract = 0x56,
    NumpadAdd = 0x57,
    NumpadEnter = 0x58,
    Numpad1 = 0x59,
    Numpad2 = 0x5A,
    Numpad3 = 0x5B,
    Numpad4 = 0x5C,
    Numpad5 = 0x5D,
    Numpad6 = 0x5E,
    Numpad7 = 0x5F,
    Numpad8 = 0x60,
    Numpad9 = 0x61,
    Numpad0 = 0x62,
    NumpadDecimal = 0x63,

    // Application key
    ContextMenu = 0x65,

    // Extended function keys
    F13 = 0x68,
    F14 = 0x69,
    F15 = 0x6A,

    // Modifiers (HID 0xE0–0xE7)
    ControlLeft = 0xE0,
    ShiftLeft = 0xE1,
    AltLeft = 0xE2,
    MetaLeft = 0xE3,
    ControlRight = 0xE4,
    ShiftRight = 0xE5,
    AltRight = 0xE6,
    MetaRight = 0xE7,

    /// Sentinel for usages with no variant.
    Unknown = 0x0000,
}

/// Every known usage, sorted by numeric value so [`HidKeyCode::from_u16`]
/// can binary-search it.
const ALL: &[HidKeyCode] = &[
    HidKeyCode::KeyA, HidKeyCode::KeyB, HidKeyCode::KeyC, HidKeyCode::KeyD, HidKeyCode::KeyE,
    HidKeyCode::KeyF, HidKeyCode::KeyG, HidKeyCode::KeyH, HidKeyCode::KeyI, HidKeyCode::KeyJ,
    HidKeyCode::KeyK, HidKeyCode::KeyL, HidKeyCode::KeyM, HidKeyCode::KeyN, HidKeyCode::KeyO,
    HidKeyCode::KeyP, HidKeyCode::KeyQ, HidKeyCode::KeyR, HidKeyCode::KeyS, HidKeyCode::KeyT,
    HidKeyCode::KeyU, HidKeyCode::KeyV, HidKeyCode::KeyW, HidKeyCode::KeyX, HidKeyCode::KeyY,
    HidKeyCode::KeyZ, HidKeyCode::Digit1, HidKeyCode::Digit2, HidKeyCode::Digit3,
    HidKeyCode::Digit4, HidKeyCode::Digit5, HidKeyCode::Digit6, HidKeyCode::Digit7,
    HidKeyCode::Digit8, HidKeyCode::Digit9, HidKeyCode::Digit0, HidKeyCode::Enter,
    HidKeyCode::Escape, HidKeyCode::Backspace, HidKeyCode::Tab, HidKeyCode::Space,
    HidKeyCode::Minus, HidKeyCode::Equal, HidKeyCode::BracketLeft, HidKeyCode::BracketRight,
    HidKeyCode::Backslash, HidKeyCode::Semicolon, HidKeyCode::Quote, HidKeyCode::Backquote,
    HidKeyCode::Comma, HidKeyCode::Period, HidKeyCode::Slash, HidKeyCode::CapsLock,
    HidKeyCode::F1, HidKeyCode::F2, HidKeyCode::F3, HidKeyCode::F4, HidKeyCode::F5,
    HidKeyCode::F6, HidKeyCode::F7, HidKeyCode::F8, HidKeyCode::F9, HidKeyCode::F10,
    HidKeyCode::F11, HidKeyCode::F12, HidKeyCode::PrintScreen, HidKeyCode::ScrollLock,
    HidKeyCode::Pause, HidKeyCode::Insert, HidKeyCode::Home, HidKeyCode::PageUp,
    HidKeyCode::Delete, HidKeyCode::End, HidKeyCode::PageDown, HidKeyCode::ArrowRight,
    HidKeyCode::ArrowLeft, HidKeyCode::ArrowDown, HidKeyCode::ArrowUp, HidKeyCode::NumLock,
    HidKeyCode::NumpadDivide, HidKeyCode::NumpadMultiply, HidKeyCode::NumpadSubtract,
    HidKeyCode::NumpadAdd, HidKeyCode::NumpadEnter, HidKeyCode::Numpad1, HidKeyCode::Numpad2,
    HidKeyCode::Numpad3, HidKeyCode::Numpad4, HidKeyCode::Numpad5, HidKeyCode::Numpad6,
    HidKeyCode::Numpad7, HidKeyCode::Numpad8, HidKeyCode::Numpad9, HidKeyCode::Numpad0,
    HidKeyCode::NumpadDecimal, HidKeyCode::ContextMenu, HidKeyCode::F13, HidKeyCode::F14,
    HidKeyCode::F15, HidKeyCode::ControlLeft, HidKeyCode::ShiftLeft, HidKeyCode::AltLeft,
    HidKeyCode::MetaLeft, HidKeyCode::ControlRight, HidKeyCode::ShiftRight,
    HidKeyCode::AltRight, HidKeyCode::MetaRight,
];

impl HidKeyCode {
    /// Converts a raw u16 HID Usage ID to a [`HidKeyCode`].
    ///
    /// Returns [`HidKeyCode::Unknown`] if the value does not correspond to a
    /// known key code variant.
    pub fn from_u16(value: u16) -> Self {
        ALL.binary_search_by_key(&value, |code| code.as_u16())
            .map(|index| ALL[index])
            .unwrap_or(HidKeyCode::Unknown)
    }

    /// Returns the raw u16 HID Usage ID for this key code.
    pub fn as_u16(self) -> u16 {
        self as u16
    }
}
