use once_cell::sync::Lazy;
use serde::Deserialize;
use std::path::PathBuf;

use crate::voices::NUM_VOICES;

#[derive(Deserialize, Debug, Clone)]
pub struct EngineConfig {
    /// Control loop period in milliseconds.
    #[serde(default = "default_tick_ms")]
    pub control_tick_ms: u64,
    /// Detune spread at full drive, in cents.
    #[serde(default = "default_max_cents")]
    pub max_detune_cents: f32,
    /// Starting position on the tone-set table (0 = A).
    #[serde(default)]
    pub initial_root: i32,
    #[serde(default)]
    pub initial_minor: bool,
    /// Capacity of the control-to-audio command queue.
    #[serde(default = "default_queue")]
    pub command_queue: usize,
    /// Fixed panel values used when no hardware surface is wired.
    #[serde(default = "default_levels")]
    pub levels: [f32; NUM_VOICES],
    #[serde(default = "default_drive")]
    pub drive: f32,
}

fn default_tick_ms() -> u64 {
    1
}

fn default_max_cents() -> f32 {
    2.0
}

fn default_queue() -> usize {
    1024
}

fn default_levels() -> [f32; NUM_VOICES] {
    [0.8; NUM_VOICES]
}

fn default_drive() -> f32 {
    0.5
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            control_tick_ms: default_tick_ms(),
            max_detune_cents: default_max_cents(),
            initial_root: 0,
            initial_minor: false,
            command_queue: default_queue(),
            levels: default_levels(),
            drive: default_drive(),
        }
    }
}

pub static CONFIG: Lazy<EngineConfig> = Lazy::new(|| {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("config.toml");
    if let Ok(txt) = std::fs::read_to_string(&path) {
        toml::from_str(&txt).unwrap_or_default()
    } else {
        EngineConfig::default()
    }
});
