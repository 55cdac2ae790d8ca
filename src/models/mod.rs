// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Data model for annotations and the image session.

pub mod annotation;
pub mod annotation_set;
pub mod session;
