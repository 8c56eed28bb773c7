//! Output location configuration.

use std::path::PathBuf;

/// Where the texture set is written
#[derive(Debug, Clone)]
pub struct OutputConfig {
    /// Output directory, relative to the working directory
    pub output_dir: PathBuf,

    /// DuDv map file name (JPEG)
    pub dudv_file: String,

    /// Glow sprite file name (PNG, keeps alpha)
    pub glow_file: String,

    /// Reflection map file name (JPEG)
    pub reflection_file: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("textures"),
            dudv_file: "waterDuDv.jpg".to_string(),
            glow_file: "raindrop_glow.png".to_string(),
            reflection_file: "waterReflection.jpg".to_string(),
        }
    }
}

impl OutputConfig {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            ..Self::default()
        }
    }

    pub fn dudv_path(&self) -> PathBuf {
        self.output_dir.join(&self.dudv_file)
    }

    pub fn glow_path(&self) -> PathBuf {
        self.output_dir.join(&self.glow_file)
    }

    pub fn reflection_path(&self) -> PathBuf {
        self.output_dir.join(&self.reflection_file)
    }
}
