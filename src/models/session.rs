// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Image session state.
//!
//! Tracks the fixed list of images being annotated, which one is shown,
//! and the scaled size it is displayed at.

use crate::error::EditorError;

/// Scaled on-screen size of the current image, in canvas pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DisplayMetrics {
    pub width: f64,
    pub height: f64,
}

impl DisplayMetrics {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Position within the image list.
#[derive(Debug, Clone)]
pub struct ImageSession {
    images: Vec<String>,
    current: usize,
    metrics: Option<DisplayMetrics>,
}

impl ImageSession {
    /// Start a session on the first of `images`.
    pub fn new(images: Vec<String>) -> Result<Self, EditorError> {
        if images.is_empty() {
            return Err(EditorError::NoImages);
        }
        Ok(Self {
            images,
            current: 0,
            metrics: None,
        })
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    /// Reference string of the image on display.
    pub fn current_image(&self) -> &str {
        &self.images[self.current]
    }

    pub fn image_count(&self) -> usize {
        self.images.len()
    }

    pub fn last_index(&self) -> usize {
        self.images.len() - 1
    }

    pub fn metrics(&self) -> Option<DisplayMetrics> {
        self.metrics
    }

    /// Record metrics reported for the image at `index`.
    ///
    /// Reports for any other image are late arrivals and are dropped.
    pub fn set_metrics(&mut self, index: usize, metrics: DisplayMetrics) -> bool {
        if index != self.current {
            log::warn!(
                "Dropped display metrics for image {} while image {} is current",
                index,
                self.current
            );
            return false;
        }
        self.metrics = Some(metrics);
        true
    }

    /// Advance one image. Returns false at the end of the list.
    pub fn next(&mut self) -> bool {
        if self.current >= self.last_index() {
            return false;
        }
        self.go_to(self.current + 1);
        true
    }

    /// Go back one image. Returns false at the start of the list.
    pub fn previous(&mut self) -> bool {
        if self.current == 0 {
            return false;
        }
        self.go_to(self.current - 1);
        true
    }

    fn go_to(&mut self, index: usize) {
        self.current = index;
        // The old image's display space is gone until the new one reports.
        self.metrics = None;
    }
}
