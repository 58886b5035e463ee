//! Command line arguments.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use color_eyre::eyre::WrapErr;
use drizzle_config::Config;
use drizzle_core::{RainSettings, Rgb, TrailProfile, parse_hex_color};
use rand::{SeedableRng, rngs::StdRng};
use serde_json::Value;

/// Digital rain for your terminal, with a mouse-reactive glyph trail.
#[derive(Debug, Parser)]
#[command(name = "drizzle", version, about, long_about = None)]
pub struct Cli {
    /// Configuration file [default: <config dir>/drizzle/config.toml]
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Fixed glyph color as RRGGBB hex; used when rainbow mode is off
    #[arg(long, value_name = "HEX", value_parser = parse_color)]
    pub color: Option<Rgb>,

    /// Start with rainbow mode off
    #[arg(long)]
    pub no_rainbow: bool,

    /// Rainbow speed on a 0-100 scale
    #[arg(long, value_name = "SPEED", value_parser = parse_speed)]
    pub rainbow_speed: Option<f64>,

    /// Milliseconds between frames
    #[arg(long, value_name = "MS", value_parser = clap::value_parser!(u64).range(1..))]
    pub interval: Option<u64>,

    /// How mouse movement seeds the glyph trail
    #[arg(long, value_enum)]
    pub profile: Option<ProfileArg>,

    /// Set a property as a host would, e.g. `--set rainbowSpeed=30`
    #[arg(long = "set", value_name = "NAME=VALUE", value_parser = parse_property)]
    pub properties: Vec<(String, Value)>,

    /// Seed for reproducible glyph sequences
    #[arg(long)]
    pub seed: Option<u64>,

    /// Write logs to this file (filter with RUST_LOG)
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

/// Trail profile choices on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ProfileArg {
    /// Eight glyphs on a ring around the pointer
    Ring,
    /// The four neighbouring cells, skipping occupied ones
    Cardinal,
}

impl From<ProfileArg> for TrailProfile {
    fn from(arg: ProfileArg) -> Self {
        match arg {
            ProfileArg::Ring => TrailProfile::Ring,
            ProfileArg::Cardinal => TrailProfile::Cardinal,
        }
    }
}

impl Cli {
    /// Resolve settings: defaults, then the config file, then flags, then `--set`.
    pub fn settings(&self) -> color_eyre::Result<RainSettings> {
        let config = match &self.config {
            Some(path) => Config::load_from(path)?,
            None => Config::load()?,
        };
        let mut settings = config
            .to_settings()
            .wrap_err("invalid configuration file")?;
        self.apply_overrides(&mut settings);
        Ok(settings)
    }

    /// Apply command line flags and properties on top of `settings`.
    pub fn apply_overrides(&self, settings: &mut RainSettings) {
        if let Some(color) = self.color {
            settings.color = color;
        }
        if self.no_rainbow {
            settings.rainbow = false;
        }
        if let Some(speed) = self.rainbow_speed {
            settings.rainbow_speed = speed / 100.0;
        }
        if let Some(interval) = self.interval {
            settings.frame_interval_ms = interval;
        }
        if let Some(profile) = self.profile {
            settings.trail_profile = profile.into();
        }
        for (name, value) in &self.properties {
            if !settings.set_property(name, value) {
                tracing::warn!(name, %value, "--set had no effect");
            }
        }
    }

    /// Random source for the animation.
    pub fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        }
    }
}

fn parse_color(s: &str) -> Result<Rgb, String> {
    parse_hex_color(s).ok_or_else(|| format!("`{s}` is not a RRGGBB hex color"))
}

fn parse_speed(s: &str) -> Result<f64, String> {
    s.trim()
        .parse::<f64>()
        .ok()
        .filter(|speed| speed.is_finite())
        .ok_or_else(|| format!("`{s}` is not a finite number"))
}

/// Parse `NAME=VALUE`. The value is read as JSON when possible and kept as
/// a plain string otherwise, so `--set matrixColor=#00FF41` works unquoted.
fn parse_property(s: &str) -> Result<(String, Value), String> {
    let (name, raw) = s
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=VALUE, got `{s}`"))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(format!("missing property name in `{s}`"));
    }
    let value = serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()));
    Ok((name.to_string(), value))
}
