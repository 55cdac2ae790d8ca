// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Geometric utility functions.
//!
//! This module provides the fit-to-bounds scaling used to size images on
//! screen, and conversions between screen and canvas-local coordinates.

use crate::models::{annotation::Point, session::DisplayMetrics};

/// Scale an image to fit within `max_width` x `max_height`, keeping its
/// aspect ratio. Images already inside the bounds keep their size.
///
/// Width is clamped first, then height, so an image too large in both
/// directions ends up limited by whichever bound is tighter.
pub fn fit_within(width: u32, height: u32, max_width: f64, max_height: f64) -> DisplayMetrics {
    let mut new_width = width as f64;
    let mut new_height = height as f64;
    if width == 0 || height == 0 {
        return DisplayMetrics::new(new_width, new_height);
    }
    let aspect_ratio = new_width / new_height;

    if new_width > max_width {
        new_width = max_width;
        new_height = new_width / aspect_ratio;
    }

    if new_height > max_height {
        new_height = max_height;
        new_width = new_height * aspect_ratio;
    }

    DisplayMetrics::new(new_width, new_height)
}

/// Convert a screen position to coordinates relative to the canvas origin.
pub fn to_canvas(screen_x: f32, screen_y: f32, origin_x: f32, origin_y: f32) -> Point {
    Point::new((screen_x - origin_x) as f64, (screen_y - origin_y) as f64)
}

/// Convert canvas-local coordinates back to a screen position.
pub fn to_screen(point: Point, origin_x: f32, origin_y: f32) -> (f32, f32) {
    (origin_x + point.x as f32, origin_y + point.y as f32)
}
