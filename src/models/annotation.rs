// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Annotation data structures.
//!
//! An annotation is a rectangle stored as an anchor corner plus a signed
//! extent, so that it grows in whatever direction the user drags. All
//! coordinates are canvas-local pixels in the scaled image space.

use serde::Deserialize;
use uuid::Uuid;

/// Opaque annotation identifier.
pub type AnnotationId = Uuid;

/// A 2D point in canvas-local pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Rectangle geometry: anchor corner plus signed width/height.
///
/// Negative extents mean the rectangle was dragged up and/or left of its
/// anchor. Use [`Rect::normalized`] when real min/max edges are needed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Zero-sized rectangle anchored at `point`.
    pub fn at(point: Point) -> Self {
        Self::new(point.x, point.y, 0.0, 0.0)
    }

    /// Rectangle anchored at `anchor` and extending to `corner`.
    pub fn spanning(anchor: Point, corner: Point) -> Self {
        Self::new(anchor.x, anchor.y, corner.x - anchor.x, corner.y - anchor.y)
    }

    /// True when both extents are zero (a click without a drag).
    pub fn is_degenerate(&self) -> bool {
        self.width == 0.0 && self.height == 0.0
    }

    /// The corner diagonally opposite the anchor.
    pub fn far_corner(&self) -> Point {
        Point::new(self.x + self.width, self.y + self.height)
    }

    /// Equivalent rectangle with non-negative extents.
    pub fn normalized(&self) -> Self {
        let far = self.far_corner();
        Self::new(
            self.x.min(far.x),
            self.y.min(far.y),
            self.width.abs(),
            self.height.abs(),
        )
    }

    /// Check if a point lies inside the rectangle, whatever its drag direction.
    pub fn contains(&self, point: Point) -> bool {
        let r = self.normalized();
        point.x >= r.x && point.x <= r.x + r.width && point.y >= r.y && point.y <= r.y + r.height
    }

    /// Corner-to-corner box in export form.
    pub fn to_box(&self) -> BoxRecord {
        let far = self.far_corner();
        BoxRecord {
            x1: self.x,
            y1: self.y,
            x2: far.x,
            y2: far.y,
        }
    }
}

/// A committed bounding-box annotation.
#[derive(Debug, Clone, PartialEq)]
pub struct Annotation {
    pub id: AnnotationId,
    pub rect: Rect,
}

impl Annotation {
    /// Create an annotation with a freshly generated id.
    pub fn new(rect: Rect) -> Self {
        Self::with_id(Uuid::new_v4(), rect)
    }

    pub fn with_id(id: AnnotationId, rect: Rect) -> Self {
        Self { id, rect }
    }

    pub fn is_degenerate(&self) -> bool {
        self.rect.is_degenerate()
    }
}

/// One exported box. `x2 < x1` (or `y2 < y1`) is legal and records a
/// rectangle that was dragged towards the origin.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct BoxRecord {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}
