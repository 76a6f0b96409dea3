//! Rune Services Layer
//!
//! Native subsystems scripts may query (input) and host configuration.

pub mod input;
pub mod settings;

pub use input::{InputEvent, InputSystem, Keycode};
pub use settings::{EntitySettings, KeyHold, Settings, SettingsError, SimulationSettings};
