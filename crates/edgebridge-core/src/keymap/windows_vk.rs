//! Windows virtual-key ↔ HID usage table.
//!
//! # What is a Windows Virtual Key code? (for beginners)
//!
//! Windows identifies keys with *virtual-key codes* (VK codes), defined in
//! `<winuser.h>` as `VK_*` constants: `VK_RETURN = 0x0D`, `VK_SPACE = 0x20`.
//! They are "virtual" because they name *logical* keys.  Letters and digits
//! reuse their ASCII values (`VK_A = 0x41`, `VK_0 = 0x30`), which makes those
//! ranges easy to read below.
//!
//! The keypad Enter key reports `VK_RETURN` with an extended-key flag rather
//! than a VK code of its own, so `NumpadEnter` is not in this table.

use super::hid::HidKeyCode::{self, *};
use super::KeyTable;

/// The Windows table, configuration name `"windows"`.
pub static WINDOWS_VK: KeyTable = KeyTable::new("windows", ENTRIES);

#[rustfmt::skip]
const ENTRIES: &[(u16, HidKeyCode)] = &[
    // ── Alphabet keys (VK_A=0x41 … VK_Z=0x5A) ────────────────────────────────
    (0x41, KeyA), (0x42, KeyB), (0x43, KeyC), (0x44, KeyD), (0x45, KeyE),
    (0x46, KeyF), (0x47, KeyG), (0x48, KeyH), (0x49, KeyI), (0x4A, KeyJ),
    (0x4B, KeyK), (0x4C, KeyL), (0x4D, KeyM), (0x4E, KeyN), (0x4F, KeyO),
    (0x50, KeyP), (0x51, KeyQ), (0x52, KeyR), (0x53, KeyS), (0x54, KeyT),
    (0x55, KeyU), (0x56, KeyV), (0x57, KeyW), (0x58, KeyX), (0x59, KeyY),
    (0x5A, KeyZ),

    // ── Digit row (VK_0=0x30 … VK_9=0x39) ────────────────────────────────────
    (0x30, Digit0), (0x31, Digit1), (0x32, Digit2), (0x33, Digit3), (0x34, Digit4),
    (0x35, Digit5), (0x36, Digit6), (0x37, Digit7), (0x38, Digit8), (0x39, Digit9),

    // ── Control keys ─────────────────────────────────────────────────────────
    (0x0D, Enter),        // VK_RETURN
    (0x1B, Escape),
    (0x08, Backspace),    // VK_BACK
    (0x09, Tab),
    (0x20, Space),
    (0x14, CapsLock),     // VK_CAPITAL
    (0x91, ScrollLock),   // VK_SCROLL
    (0x13, Pause),
    (0x2C, PrintScreen),  // VK_SNAPSHOT
    (0x5D, ContextMenu),  // VK_APPS

    // ── Navigation ───────────────────────────────────────────────────────────
    (0x2D, Insert), (0x24, Home), (0x21, PageUp),     // VK_PRIOR
    (0x2E, Delete), (0x23, End), (0x22, PageDown),    // VK_NEXT
    (0x25, ArrowLeft), (0x26, ArrowUp), (0x27, ArrowRight), (0x28, ArrowDown),

    // ── Function keys (VK_F1=0x70 …) ─────────────────────────────────────────
    (0x70, F1), (0x71, F2), (0x72, F3), (0x73, F4), (0x74, F5), (0x75, F6),
    (0x76, F7), (0x77, F8), (0x78, F9), (0x79, F10), (0x7A, F11), (0x7B, F12),
    (0x7C, F13), (0x7D, F14), (0x7E, F15),

    // ── Numpad ───────────────────────────────────────────────────────────────
    (0x60, Numpad0), (0x61, Numpad1), (0x62, Numpad2), (0x63, Numpad3), (0x64, Numpad4),
    (0x65, Numpad5), (0x66, Numpad6), (0x67, Numpad7), (0x68, Numpad8), (0x69, Numpad9),
    (0x6A, NumpadMultiply), (0x6B, NumpadAdd), (0x6D, NumpadSubtract),
    (0x6E, NumpadDecimal), (0x6F, NumpadDivide), (0x90, NumLock),

    // ── OEM punctuation (US layout) ──────────────────────────────────────────
    (0xBD, Minus),        // VK_OEM_MINUS
    (0xBB, Equal),        // VK_OEM_PLUS
    (0xDB, BracketLeft),  // VK_OEM_4
    (0xDD, BracketRight), // VK_OEM_6
    (0xDC, Backslash),    // VK_OEM_5
    (0xBA, Semicolon),    // VK_OEM_1
    (0xDE, Quote),        // VK_OEM_7
    (0xC0, Backquote),    // VK_OEM_3
    (0xBC, Comma),
    (0xBE, Period),
    (0xBF, Slash),        // VK_OEM_2

    // ── Modifiers (sided VK codes) ───────────────────────────────────────────
    (0xA2, ControlLeft), (0xA3, ControlRight),
    (0xA0, ShiftLeft), (0xA1, ShiftRight),
    (0xA4, AltLeft), (0xA5, AltRight),      // VK_LMENU / VK_RMENU
    (0x5B, MetaLeft), (0x5C, MetaRight),    // VK_LWIN / VK_RWIN
];
