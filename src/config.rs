// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Command line and configuration file handling.
//!
//! Settings come from an optional YAML file; images listed on the command
//! line replace the ones listed in the file.

use anyhow::{Context, Result};
use clap::Parser;
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Parser)]
#[command(name = "boxmark", version, about = "Draw bounding boxes over a sequence of images")]
pub struct Cli {
    /// Images to annotate, in order
    pub images: Vec<PathBuf>,

    /// YAML configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Write submitted annotations here instead of asking for a location
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Largest on-screen image width, in pixels
    pub max_display_width: f64,
    /// Largest on-screen image height, in pixels
    pub max_display_height: f64,
    /// Default file name offered when submitting
    pub export_file_name: String,
    pub images: Vec<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_display_width: 800.0,
            max_display_height: 450.0,
            export_file_name: "annotations.json".to_string(),
            images: Vec::new(),
        }
    }
}

impl Config {
    /// Read a YAML configuration file.
    pub fn load(path: &Path) -> Result<Self> {
        let yaml = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        let config = serde_yaml::from_str(&yaml)
            .with_context(|| format!("Invalid config {}", path.display()))?;
        Ok(config)
    }

    /// Build the effective configuration from command line arguments.
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let mut config = match &cli.config {
            Some(path) => Self::load(path)?,
            None => Self::default(),
        };
        if !cli.images.is_empty() {
            config.images = cli.images.clone();
        }
        log::debug!("Effective config: {:?}", config);
        Ok(config)
    }

    /// Image references as shown in exports.
    pub fn image_refs(&self) -> Vec<String> {
        self.images
            .iter()
            .map(|p| p.to_string_lossy().into_owned())
            .collect()
    }
}
