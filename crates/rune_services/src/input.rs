//! Input state and the shared key table
//!
//! `Keycode` values cross the script boundary as raw integers, so the numbers
//! below are part of the bridge contract. Renumbering any of them breaks every
//! compiled script module.

use num_enum::{IntoPrimitive, TryFromPrimitive};
use serde::{Deserialize, Serialize};

/// Physical key identifiers.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, IntoPrimitive, TryFromPrimitive, Serialize, Deserialize,
)]
#[repr(u32)]
pub enum Keycode {
    Space = 32,
    Apostrophe = 39,
    Comma = 44,
    Minus = 45,
    Period = 46,
    Slash = 47,
    D0 = 48,
    D1 = 49,
    D2 = 50,
    D3 = 51,
    D4 = 52,
    D5 = 53,
    D6 = 54,
    D7 = 55,
    D8 = 56,
    D9 = 57,
    Semicolon = 59,
    Equal = 61,
    A = 65,
    B = 66,
    C = 67,
    D = 68,
    E = 69,
    F = 70,
    G = 71,
    H = 72,
    I = 73,
    J = 74,
    K = 75,
    L = 76,
    M = 77,
    N = 78,
    O = 79,
    P = 80,
    Q = 81,
    R = 82,
    S = 83,
    T = 84,
    U = 85,
    V = 86,
    W = 87,
    X = 88,
    Y = 89,
    Z = 90,
    LeftBracket = 91,
    Backslash = 92,
    RightBracket = 93,
    GraveAccent = 96,
    World1 = 161,
    World2 = 162,

    Escape = 256,
    Enter = 257,
    Tab = 258,
    Backspace = 259,
    Insert = 260,
    Delete = 261,
    Right = 262,
    Left = 263,
    Down = 264,
    Up = 265,
    PageUp = 266,
    PageDown = 267,
    Home = 268,
    End = 269,
    CapsLock = 280,
    ScrollLock = 281,
    NumLock = 282,
    PrintScreen = 283,
    Pause = 284,
    F1 = 290,
    F2 = 291,
    F3 = 292,
    F4 = 293,
    F5 = 294,
    F6 = 295,
    F7 = 296,
    F8 = 297,
    F9 = 298,
    F10 = 299,
    F11 = 300,
    F12 = 301,
    F13 = 302,
    F14 = 303,
    F15 = 304,
    F16 = 305,
    F17 = 306,
    F18 = 307,
    F19 = 308,
    F20 = 309,
    F21 = 310,
    F22 = 311,
    F23 = 312,
    F24 = 313,
    F25 = 314,
    Keypad0 = 320,
    Keypad1 = 321,
    Keypad2 = 322,
    Keypad3 = 323,
    Keypad4 = 324,
    Keypad5 = 325,
    Keypad6 = 326,
    Keypad7 = 327,
    Keypad8 = 328,
    Keypad9 = 329,
    KeypadDecimal = 330,
    KeypadDivide = 331,
    KeypadMultiply = 332,
    KeypadSubtract = 333,
    KeypadAdd = 334,
    KeypadEnter = 335,
    KeypadEqual = 336,
    LeftShift = 340,
    LeftControl = 341,
    LeftAlt = 342,
    LeftSuper = 343,
    RightShift = 344,
    RightControl = 345,
    RightAlt = 346,
    RightSuper = 347,
    Menu = 348,
}

impl Keycode {
    pub const LAST: Keycode = Keycode::Menu;

    /// The value that crosses the boundary.
    pub fn to_raw(self) -> i32 {
        u32::from(self) as i32
    }

    /// Decode a boundary value. Negative and unassigned values are `None`.
    pub fn from_raw(raw: i32) -> Option<Self> {
        u32::try_from(raw).ok().and_then(|v| Self::try_from(v).ok())
    }

    fn slot(self) -> usize {
        u32::from(self) as usize
    }
}

const KEY_SLOTS: usize = Keycode::LAST as usize + 1;

/// Events fed to the input system by the platform layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    KeyDown(Keycode),
    KeyUp(Keycode),
}

#[derive(Clone, Copy)]
struct State {
    keys: [bool; KEY_SLOTS],
}

impl Default for State {
    fn default() -> Self {
        Self {
            keys: [false; KEY_SLOTS],
        }
    }
}

/// Native key state with one frame of history.
///
/// Queries always read the live state; nothing is snapshotted for scripts.
#[derive(Default)]
pub struct InputSystem {
    current: State,
    last: State,
}

impl InputSystem {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new frame: the current state becomes the previous one.
    pub fn new_frame(&mut self) {
        self.last = self.current;
    }

    pub fn apply(&mut self, event: InputEvent) {
        match event {
            InputEvent::KeyDown(key) => self.key_pressed(key),
            InputEvent::KeyUp(key) => self.key_released(key),
        }
    }

    pub fn key_pressed(&mut self, key: Keycode) {
        self.current.keys[key.slot()] = true;
    }

    pub fn key_released(&mut self, key: Keycode) {
        self.current.keys[key.slot()] = false;
    }

    /// Release every key, e.g. when the window loses focus.
    pub fn clear(&mut self) {
        self.current = State::default();
    }

    /// Key is currently down.
    pub fn is_key_held(&self, key: Keycode) -> bool {
        self.current.keys[key.slot()]
    }

    /// Key went down since the previous frame.
    pub fn is_key_down(&self, key: Keycode) -> bool {
        self.current.keys[key.slot()] && !self.last.keys[key.slot()]
    }

    /// Key went up since the previous frame.
    pub fn is_key_up(&self, key: Keycode) -> bool {
        !self.current.keys[key.slot()] && self.last.keys[key.slot()]
    }
}
