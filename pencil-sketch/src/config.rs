use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

/// Conversion defaults read from a TOML file. Every key is optional.
///
/// ```toml
/// output_folder = "sketches"
/// output_name = "portrait.jpg"
/// show_result = false
/// darkness_factor = 1.5
/// ```
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Derivative)]
#[derivative(Default)]
#[serde(default)]
pub struct Preset {
    pub output_folder: Option<PathBuf>,

    #[derivative(Default(value = "PathBuf::from(\"pencil_sketch.jpg\")"))]
    pub output_name: PathBuf,

    #[derivative(Default(value = "true"))]
    pub show_result: bool,

    #[derivative(Default(value = "1.3"))]
    pub darkness_factor: f32,
}

impl Preset {
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("read config file {} failed", path.display()))?;

        let preset = toml::from_str::<Preset>(&text)
            .with_context(|| format!("parse config file {} failed", path.display()))?;

        log::debug!("loaded preset from {}: {preset:?}", path.display());
        Ok(preset)
    }
}
