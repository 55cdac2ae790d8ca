// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Image file loading.
//!
//! This module decodes image files into RGBA pixels suitable for an egui
//! texture and works out the size they are displayed at.

use crate::models::session::DisplayMetrics;
use crate::util::geometry::fit_within;
use anyhow::{Context, Result};
use std::path::Path;

/// A decoded image ready for upload as a texture.
pub struct LoadedImage {
    pub width: u32,
    pub height: u32,
    /// RGBA8, row major.
    pub pixels: Vec<u8>,
}

impl LoadedImage {
    /// On-screen size within the given bounds.
    pub fn display_metrics(&self, max_width: f64, max_height: f64) -> DisplayMetrics {
        fit_within(self.width, self.height, max_width, max_height)
    }
}

/// Decode the image at `path`.
pub fn load_image(path: &Path) -> Result<LoadedImage> {
    let img = image::open(path)
        .with_context(|| format!("Failed to open image {}", path.display()))?
        .to_rgba8();
    let (width, height) = img.dimensions();
    Ok(LoadedImage {
        width,
        height,
        pixels: img.into_raw(),
    })
}
