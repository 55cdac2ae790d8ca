// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Per-image annotation collection.
//!
//! The set is tagged with the index of the image whose display coordinate
//! space its geometry lives in. Every mutation bumps a revision counter,
//! which is how the editor decides whether a saved export went stale.

use super::annotation::{Annotation, AnnotationId, Rect};
use crate::error::EditorError;

#[derive(Debug, Clone, PartialEq)]
pub struct AnnotationSet {
    image_index: usize,
    revision: u64,
    annotations: Vec<Annotation>,
}

impl AnnotationSet {
    /// Create an empty set for the image at `image_index`.
    pub fn new(image_index: usize) -> Self {
        Self {
            image_index,
            revision: 0,
            annotations: Vec::new(),
        }
    }

    /// Monotonic counter, bumped by every successful mutation.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn len(&self) -> usize {
        self.annotations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.annotations.is_empty()
    }

    /// Annotations in insertion order; reverse it for topmost-first.
    pub fn iter(&self) -> std::slice::Iter<'_, Annotation> {
        self.annotations.iter()
    }

    pub fn as_slice(&self) -> &[Annotation] {
        &self.annotations
    }

    pub fn get(&self, id: AnnotationId) -> Option<&Annotation> {
        self.annotations.iter().find(|a| a.id == id)
    }

    pub fn contains(&self, id: AnnotationId) -> bool {
        self.get(id).is_some()
    }

    /// Check that this set belongs to the image at `current`.
    pub fn ensure_space(&self, current: usize) -> Result<(), EditorError> {
        if self.image_index == current {
            Ok(())
        } else {
            Err(EditorError::CoordinateSpaceMismatch {
                set: self.image_index,
                current,
            })
        }
    }

    /// Append an annotation.
    ///
    /// Degenerate rectangles and duplicate ids are rejected. Returns whether
    /// the annotation was added.
    pub fn add(&mut self, annotation: Annotation) -> bool {
        if annotation.is_degenerate() {
            log::debug!("Rejected degenerate annotation {}", annotation.id);
            return false;
        }
        if self.contains(annotation.id) {
            log::debug!("Rejected duplicate annotation id {}", annotation.id);
            return false;
        }
        self.annotations.push(annotation);
        self.revision += 1;
        true
    }

    /// Replace the geometry of annotation `id`, keeping its position.
    ///
    /// Zero-size geometry is rejected and the old rectangle kept.
    pub fn update(&mut self, id: AnnotationId, rect: Rect) -> bool {
        if rect.is_degenerate() {
            log::debug!("Rejected zero-size geometry for annotation {}", id);
            return false;
        }
        match self.annotations.iter_mut().find(|a| a.id == id) {
            Some(annotation) => {
                annotation.rect = rect;
                self.revision += 1;
                true
            }
            None => {
                log::debug!("Ignored update of unknown annotation {}", id);
                false
            }
        }
    }

    /// Remove annotation `id`, returning it if it was present.
    pub fn remove(&mut self, id: AnnotationId) -> Option<Annotation> {
        let Some(pos) = self.annotations.iter().position(|a| a.id == id) else {
            log::debug!("Ignored removal of unknown annotation {}", id);
            return None;
        };
        self.revision += 1;
        Some(self.annotations.remove(pos))
    }

    /// Remove every annotation. The image tag is kept.
    pub fn clear(&mut self) {
        self.annotations.clear();
        self.revision += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::annotation::Point;
    use std::collections::HashSet;

    fn rect(x: f64) -> Rect {
        Rect::new(x, x, 10.0, 10.0)
    }

    #[test]
    fn test_add_preserves_insertion_order() {
        let mut set = AnnotationSet::new(0);
        let a = Annotation::new(rect(1.0));
        let b = Annotation::new(rect(2.0));
        assert!(set.add(a.clone()));
        assert!(set.add(b.clone()));
        assert_eq!(set.as_slice(), &[a, b]);
    }

    #[test]
    fn test_add_rejects_degenerate() {
        let mut set = AnnotationSet::new(0);
        assert!(!set.add(Annotation::new(Rect::new(4.0, 4.0, 0.0, 0.0))));
        assert!(set.is_empty());
        assert_eq!(set.revision(), 0);
    }

    #[test]
    fn test_ids_stay_unique() {
        let mut set = AnnotationSet::new(0);
        let a = Annotation::new(rect(1.0));
        let id = a.id;
        set.add(a);
        assert!(!set.add(Annotation::with_id(id, rect(5.0))));
        set.update(id, rect(7.0));
        set.add(Annotation::new(rect(3.0)));
        set.remove(id);
        set.add(Annotation::with_id(id, rect(9.0)));

        let ids: HashSet<_> = set.iter().map(|a| a.id).collect();
        assert_eq!(ids.len(), set.len());
    }

    #[test]
    fn test_update_in_place() {
        let mut set = AnnotationSet::new(0);
        let a = Annotation::new(rect(1.0));
        let b = Annotation::new(rect(2.0));
        let c = Annotation::new(rect(3.0));
        set.add(a.clone());
        set.add(b.clone());
        set.add(c.clone());

        assert!(set.update(b.id, Rect::new(50.0, 60.0, -5.0, 8.0)));
        let ids: Vec<_> = set.iter().map(|a| a.id).collect();
        assert_eq!(ids, vec![a.id, b.id, c.id]);
        assert_eq!(set.get(b.id).unwrap().rect, Rect::new(50.0, 60.0, -5.0, 8.0));
    }

    #[test]
    fn test_update_rejects_degenerate() {
        let mut set = AnnotationSet::new(0);
        let a = Annotation::new(rect(1.0));
        set.add(a.clone());

        assert!(!set.update(a.id, Rect::new(1.0, 1.0, 0.0, 0.0)));
        assert_eq!(set.get(a.id).unwrap().rect, a.rect);
        assert_eq!(set.revision(), 1);
    }

    #[test]
    fn test_iter_reverses_to_topmost_first() {
        let mut set = AnnotationSet::new(0);
        let a = Annotation::new(rect(1.0));
        let b = Annotation::new(rect(2.0));
        set.add(a.clone());
        set.add(b.clone());

        let top = set.iter().rev().find(|x| x.rect.contains(Point::new(5.0, 5.0)));
        assert_eq!(top, Some(&b));
    }

    #[test]
    fn test_unknown_ids_are_no_ops() {
        let mut set = AnnotationSet::new(0);
        set.add(Annotation::new(rect(1.0)));
        let before = set.clone();

        let ghost = AnnotationId::new_v4();
        assert!(!set.update(ghost, rect(9.0)));
        assert!(set.remove(ghost).is_none());
        assert_eq!(set, before);
    }

    #[test]
    fn test_every_mutation_bumps_revision() {
        let mut set = AnnotationSet::new(0);
        let a = Annotation::new(rect(1.0));
        let id = a.id;

        set.add(a);
        assert_eq!(set.revision(), 1);
        set.update(id, rect(2.0));
        assert_eq!(set.revision(), 2);
        set.remove(id);
        assert_eq!(set.revision(), 3);
        set.clear();
        assert_eq!(set.revision(), 4);
    }

    #[test]
    fn test_ensure_space() {
        let set = AnnotationSet::new(2);
        assert!(set.ensure_space(2).is_ok());
        assert_eq!(
            set.ensure_space(3),
            Err(EditorError::CoordinateSpaceMismatch { set: 2, current: 3 })
        );
    }
}
