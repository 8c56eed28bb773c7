//! Command-line argument parsing and the texture build driver.

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use clap::{Parser, ValueEnum};

use crate::dudv::WaveDuDvGenerator;
use crate::error::Result;
use crate::glow::RadialGlowGenerator;
use crate::output::{Encoding, ImageSink};
use crate::params::{DuDvParams, GlowParams, OutputConfig, SkyParams, StarParams};
use crate::sky::SkyReflectionGenerator;
use crate::texture::TextureGenerator;

/// The three textures of the rain effect
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum TextureKind {
    /// Water UV distortion map (JPEG)
    Dudv,
    /// Night-sky water reflection map (JPEG)
    Reflection,
    /// Raindrop glow sprite with alpha (PNG)
    Glow,
}

impl TextureKind {
    /// Build order of a full run
    pub const ALL: [TextureKind; 3] = [Self::Dudv, Self::Reflection, Self::Glow];

    pub fn path(&self, output: &OutputConfig) -> PathBuf {
        match self {
            Self::Dudv => output.dudv_path(),
            Self::Reflection => output.reflection_path(),
            Self::Glow => output.glow_path(),
        }
    }
}

/// Command line arguments
#[derive(Parser, Debug)]
#[command(name = "raintex")]
#[command(about = "Generate the water and raindrop textures", long_about = None)]
pub struct Args {
    /// Directory the textures are written to
    #[arg(long, value_name = "DIR", default_value = "textures")]
    pub out_dir: PathBuf,

    /// Only build the given texture (repeatable); all three by default
    #[arg(long, value_enum, value_name = "TEXTURE")]
    pub only: Vec<TextureKind>,

    /// Leave textures that already exist on disk untouched
    #[arg(long)]
    pub skip_existing: bool,

    /// Star placement seed for the reflection map
    #[arg(long, default_value_t = 42)]
    pub seed: u64,

    /// Number of stars in the reflection map
    #[arg(long, value_name = "COUNT", default_value_t = 2000)]
    pub stars: usize,

    /// DuDv map size (width = height)
    #[arg(long, value_name = "PIXELS", default_value_t = 512)]
    pub dudv_size: u32,

    /// Glow sprite size (width = height)
    #[arg(long, value_name = "PIXELS", default_value_t = 128)]
    pub glow_size: u32,

    /// Reflection map size (width = height)
    #[arg(long, value_name = "PIXELS", default_value_t = 1024)]
    pub reflection_size: u32,

    /// JPEG quality for the DuDv and reflection maps
    #[arg(long, value_name = "1-100", default_value_t = 95)]
    pub quality: u8,
}

/// Outcome of one texture in a run
#[derive(Debug, Clone)]
pub struct TextureReport {
    pub kind: TextureKind,
    pub path: PathBuf,
    pub width: u32,
    pub height: u32,
    pub encoding: Encoding,
    /// True when `--skip-existing` found the file already present
    pub skipped: bool,
    pub elapsed: Duration,
}

impl Args {
    pub fn output_config(&self) -> OutputConfig {
        OutputConfig::new(&self.out_dir)
    }

    /// Requested textures in build order, without duplicates
    pub fn selected(&self) -> Vec<TextureKind> {
        TextureKind::ALL
            .into_iter()
            .filter(|kind| self.only.is_empty() || self.only.contains(kind))
            .collect()
    }

    pub fn dudv_params(&self) -> DuDvParams {
        DuDvParams {
            width: self.dudv_size,
            height: self.dudv_size,
            jpeg_quality: self.quality,
            ..DuDvParams::default()
        }
    }

    pub fn glow_params(&self) -> GlowParams {
        GlowParams {
            width: self.glow_size,
            height: self.glow_size,
            ..GlowParams::default()
        }
    }

    pub fn sky_params(&self) -> SkyParams {
        SkyParams {
            width: self.reflection_size,
            height: self.reflection_size,
            stars: StarParams {
                count: self.stars,
                seed: self.seed,
                ..StarParams::default()
            },
            jpeg_quality: self.quality,
            ..SkyParams::default()
        }
    }

    /// Generator configured for `kind`
    pub fn generator(&self, kind: TextureKind) -> Box<dyn TextureGenerator> {
        match kind {
            TextureKind::Dudv => Box::new(WaveDuDvGenerator::new(self.dudv_params())),
            TextureKind::Reflection => Box::new(SkyReflectionGenerator::new(self.sky_params())),
            TextureKind::Glow => Box::new(RadialGlowGenerator::new(self.glow_params())),
        }
    }
}

/// Build every selected texture in order, stopping at the first failure
pub fn run(args: &Args, sink: &dyn ImageSink) -> Result<Vec<TextureReport>> {
    let output = args.output_config();
    let mut reports = Vec::new();

    for kind in args.selected() {
        let generator = args.generator(kind);
        let path = kind.path(&output);
        let (width, height) = generator.default_dimensions();

        let start = Instant::now();
        let skipped = args.skip_existing && exists(&path);
        if skipped {
            log::info!("{}: {} already exists, skipping", generator.name(), path.display());
        } else {
            generator.generate(width, height, &path, sink)?;
        }

        reports.push(TextureReport {
            kind,
            path,
            width,
            height,
            encoding: generator.encoding(),
            skipped,
            elapsed: start.elapsed(),
        });
    }

    Ok(reports)
}

fn exists(path: &Path) -> bool {
    path.try_exists().unwrap_or(false)
}
