// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Annotation export.
//!
//! The export is a JSON object keyed by image reference, each value an
//! array of `{x1, y1, x2, y2}` boxes in annotation order:
//!
//! ```json
//! {"images/cat.jpg":[{"x1":10,"y1":10,"x2":110,"y2":60}]}
//! ```

use crate::models::annotation::Annotation;
use anyhow::{Context, Result};
use serde_json::{Map, Number, Value};
use std::path::Path;

/// Largest magnitude at which every integer is exactly representable as f64.
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

/// Serialize `annotations` for `image` into compact export JSON.
pub fn serialize(image: &str, annotations: &[Annotation]) -> String {
    let boxes = annotations
        .iter()
        .map(|annotation| {
            let b = annotation.rect.to_box();
            let mut record = Map::new();
            record.insert("x1".to_string(), number(b.x1));
            record.insert("y1".to_string(), number(b.y1));
            record.insert("x2".to_string(), number(b.x2));
            record.insert("y2".to_string(), number(b.y2));
            Value::Object(record)
        })
        .collect();

    let mut root = Map::new();
    root.insert(image.to_string(), Value::Array(boxes));
    Value::Object(root).to_string()
}

/// Whole numbers are written without a fractional part (`10`, not `10.0`).
fn number(value: f64) -> Value {
    if value.fract() == 0.0 && value.abs() <= MAX_SAFE_INTEGER {
        Value::Number(Number::from(value as i64))
    } else {
        Number::from_f64(value).map_or(Value::Null, Value::Number)
    }
}

/// Write an export string to disk.
pub fn write_export(json: &str, path: &Path) -> Result<()> {
    std::fs::write(path, json)
        .with_context(|| format!("Failed to write annotations to {}", path.display()))?;
    Ok(())
}
