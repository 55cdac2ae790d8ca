// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Editor error types.
//!
//! None of these are fatal. The `Display` text of each variant is the
//! advisory shown to the user when an action is refused.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EditorError {
    #[error("Please save before submitting annotations")]
    NotSaved,

    #[error("Annotations changed since the last save. Please save again before submitting")]
    StaleExport,

    #[error("No annotations to submit.")]
    NoAnnotations,

    #[error("Annotations belong to image {set} but image {current} is displayed")]
    CoordinateSpaceMismatch { set: usize, current: usize },

    #[error("No images to annotate")]
    NoImages,
}
