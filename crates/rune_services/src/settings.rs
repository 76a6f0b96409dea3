//! Runtime settings

use std::path::Path;

use rune_core::{EntityId, Vector3};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::input::Keycode;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse settings: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid settings: {0}")]
    Invalid(String),
}

/// Largest accepted `max_delta_seconds`.
pub const MAX_DELTA_LIMIT: f32 = 60.0;

/// Runtime settings, loaded from JSON.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub log_level: String,
    pub simulation: SimulationSettings,
    /// Script module the host loads before building any script object.
    pub module: String,
    pub scene: Vec<EntitySettings>,
    /// Scripted key holds for headless runs.
    pub input: Vec<KeyHold>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationSettings {
    pub frames: u32,
    /// Fixed delta per frame; `None` measures wall-clock time.
    pub delta_seconds: Option<f32>,
    pub max_delta_seconds: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntitySettings {
    pub name: String,
    #[serde(default)]
    pub id: Option<EntityId>,
    #[serde(default)]
    pub translation: Vector3,
    /// Fully qualified script class, e.g. `Sandbox.Player`.
    #[serde(default)]
    pub script: Option<String>,
}

/// Hold `key` for frames `from_frame..to_frame`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct KeyHold {
    pub key: Keycode,
    pub from_frame: u32,
    pub to_frame: u32,
}

impl KeyHold {
    pub fn is_active(&self, frame: u32) -> bool {
        (self.from_frame..self.to_frame).contains(&frame)
    }
}

impl Settings {
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let text = std::fs::read_to_string(path)?;
        let settings = Self::from_json(&text)?;
        tracing::debug!(path = %path.display(), "loaded settings");
        Ok(settings)
    }

    pub fn from_json(text: &str) -> Result<Self, SettingsError> {
        let settings: Self = serde_json::from_str(text)?;
        settings.validate()?;
        Ok(settings)
    }

    fn validate(&self) -> Result<(), SettingsError> {
        let sim = &self.simulation;
        if !(sim.max_delta_seconds > 0.0 && sim.max_delta_seconds <= MAX_DELTA_LIMIT) {
            return Err(SettingsError::Invalid(format!(
                "max_delta_seconds must be in (0, {MAX_DELTA_LIMIT}], got {}",
                sim.max_delta_seconds
            )));
        }
        if let Some(delta) = sim.delta_seconds {
            if !(delta.is_finite() && delta >= 0.0) {
                return Err(SettingsError::Invalid(format!(
                    "delta_seconds must be non-negative, got {delta}"
                )));
            }
        }
        if let Some(entity) = self.scene.iter().find(|e| e.id.is_some_and(EntityId::is_none)) {
            return Err(SettingsError::Invalid(format!(
                "entity '{}' uses reserved id 0",
                entity.name
            )));
        }
        Ok(())
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            simulation: SimulationSettings::default(),
            module: "Sandbox".to_string(),
            scene: vec![EntitySettings {
                name: "Player".to_string(),
                id: None,
                translation: Vector3::ZERO,
                script: Some("Sandbox.Player".to_string()),
            }],
            input: vec![KeyHold {
                key: Keycode::Keypad8,
                from_frame: 0,
                to_frame: 30,
            }],
        }
    }
}

impl Default for SimulationSettings {
    fn default() -> Self {
        Self {
            frames: 60,
            delta_seconds: Some(1.0 / 60.0),
            max_delta_seconds: 0.25,
        }
    }
}
