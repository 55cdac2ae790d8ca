// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Selecting, moving, resizing and deleting annotations.
//!
//! A move or resize is held as a [`Transform`] over the annotation's
//! committed geometry until the pointer is released; only then is the
//! result written back to the annotation set.

use super::Editor;
use crate::models::annotation::{AnnotationId, Point, Rect};

/// Corner handle of a selected annotation, in on-screen terms.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Handle {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl Handle {
    pub const ALL: [Handle; 4] = [
        Handle::TopLeft,
        Handle::TopRight,
        Handle::BottomLeft,
        Handle::BottomRight,
    ];

    /// Where this handle sits on `rect`.
    pub fn position(self, rect: &Rect) -> Point {
        let r = rect.normalized();
        let (left, top, right, bottom) = (r.x, r.y, r.x + r.width, r.y + r.height);
        match self {
            Handle::TopLeft => Point::new(left, top),
            Handle::TopRight => Point::new(right, top),
            Handle::BottomLeft => Point::new(left, bottom),
            Handle::BottomRight => Point::new(right, bottom),
        }
    }

    /// The corner that stays put while this handle is dragged.
    pub fn opposite(self) -> Handle {
        match self {
            Handle::TopLeft => Handle::BottomRight,
            Handle::TopRight => Handle::BottomLeft,
            Handle::BottomLeft => Handle::TopRight,
            Handle::BottomRight => Handle::TopLeft,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransformKind {
    Move,
    Resize(Handle),
}

/// In-flight move or resize of one annotation.
///
/// Position is tracked directly; size changes are tracked as a scale over
/// the original extents, the way a resize handle reports them.
#[derive(Debug, Clone, PartialEq)]
pub struct Transform {
    id: AnnotationId,
    kind: TransformKind,
    origin: Rect,
    press: Point,
    x: f64,
    y: f64,
    scale_x: f64,
    scale_y: f64,
    changed: bool,
}

impl Transform {
    pub fn new(id: AnnotationId, kind: TransformKind, origin: Rect, press: Point) -> Self {
        Self {
            id,
            kind,
            origin,
            press,
            x: origin.x,
            y: origin.y,
            scale_x: 1.0,
            scale_y: 1.0,
            changed: false,
        }
    }

    pub fn id(&self) -> AnnotationId {
        self.id
    }

    pub fn kind(&self) -> TransformKind {
        self.kind
    }

    /// Update from the current pointer position.
    pub fn drag_to(&mut self, pointer: Point) {
        match self.kind {
            TransformKind::Move => {
                self.x = self.origin.x + (pointer.x - self.press.x);
                self.y = self.origin.y + (pointer.y - self.press.y);
            }
            TransformKind::Resize(handle) => {
                let fixed = handle.opposite().position(&self.origin);
                let (x, scale_x) = resize_axis(self.origin.x, self.origin.width, fixed.x, pointer.x);
                let (y, scale_y) =
                    resize_axis(self.origin.y, self.origin.height, fixed.y, pointer.y);
                self.x = x;
                self.y = y;
                self.scale_x = scale_x;
                self.scale_y = scale_y;
            }
        }
        self.changed = true;
    }

    /// Geometry with the scale folded into the extents.
    pub fn folded(&self) -> Rect {
        Rect::new(
            self.x,
            self.y,
            self.origin.width * self.scale_x,
            self.origin.height * self.scale_y,
        )
    }
}

/// Resize one axis so it spans `fixed`..`pointer`, keeping the sign of the
/// original extent. Returns the new anchor coordinate and scale.
fn resize_axis(anchor: f64, extent: f64, fixed: f64, pointer: f64) -> (f64, f64) {
    if extent == 0.0 {
        // Nothing to scale along a flat axis.
        return (anchor, 1.0);
    }
    let (low, high) = (fixed.min(pointer), fixed.max(pointer));
    let scale = (high - low) / extent.abs();
    let anchor = if extent > 0.0 { low } else { high };
    (anchor, scale)
}

impl Editor {
    /// Make `id` the single selected annotation.
    pub(super) fn select(&mut self, id: AnnotationId) -> bool {
        if self.draw.draft().is_some() || self.transform.is_some() {
            log::debug!("Ignored selection of {} during a drag", id);
            return false;
        }
        if !self.annotations.contains(id) {
            log::debug!("Ignored selection of unknown annotation {}", id);
            return false;
        }
        if self.selected == Some(id) {
            return false;
        }
        self.selected = Some(id);
        log::info!("Selected annotation {}", id);
        true
    }

    pub(super) fn deselect(&mut self) -> bool {
        self.transform = None;
        match self.selected.take() {
            Some(id) => {
                log::info!("Deselected annotation {}", id);
                true
            }
            None => false,
        }
    }

    pub(super) fn begin_transform(
        &mut self,
        id: AnnotationId,
        kind: TransformKind,
        at: Point,
    ) -> bool {
        if self.selected != Some(id) || self.transform.is_some() {
            return false;
        }
        let Some(annotation) = self.annotations.get(id) else {
            return false;
        };
        self.transform = Some(Transform::new(id, kind, annotation.rect, at));
        true
    }

    pub(super) fn drag_transform(&mut self, to: Point) -> bool {
        match self.transform.as_mut() {
            Some(transform) => {
                transform.drag_to(to);
                true
            }
            None => false,
        }
    }

    /// Write the transformed geometry back, with scale reset to 1.
    pub(super) fn end_transform(&mut self) -> bool {
        let Some(transform) = self.transform.take() else {
            return false;
        };
        if !transform.changed {
            return false;
        }
        let rect = transform.folded();
        if rect.is_degenerate() {
            log::debug!("Discarded resize of {} down to zero size", transform.id);
            return true;
        }
        if self.annotations.update(transform.id, rect) {
            log::info!(
                "Updated annotation {} to ({:.1}, {:.1}, {:.1}, {:.1})",
                transform.id,
                rect.x,
                rect.y,
                rect.width,
                rect.height
            );
        }
        true
    }

    pub(super) fn delete_selected(&mut self) -> bool {
        let Some(id) = self.selected.take() else {
            return false;
        };
        self.transform = None;
        if self.annotations.remove(id).is_some() {
            log::info!("Deleted annotation, total: {}", self.annotations.len());
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::super::Event;
    use super::*;

    fn editor_with(rects: &[Rect]) -> (Editor, Vec<AnnotationId>) {
        let mut editor = Editor::new(vec!["a.png".to_string()]).unwrap();
        editor.toggle_annotation_mode();
        for r in rects {
            let far = r.far_corner();
            editor.apply(Event::PointerDown(Point::new(r.x, r.y)));
            editor.apply(Event::PointerMove(far));
            editor.apply(Event::PointerUp);
        }
        let ids = editor.annotations().iter().map(|a| a.id).collect();
        (editor, ids)
    }

    #[test]
    fn test_selecting_replaces_previous_selection() {
        let (mut editor, ids) = editor_with(&[
            Rect::new(0.0, 0.0, 10.0, 10.0),
            Rect::new(20.0, 20.0, 10.0, 10.0),
        ]);
        editor.apply(Event::Select(ids[0]));
        editor.apply(Event::Select(ids[1]));
        assert_eq!(editor.selected(), Some(ids[1]));
    }

    #[test]
    fn test_select_unknown_id_is_ignored() {
        let (mut editor, ids) = editor_with(&[Rect::new(0.0, 0.0, 10.0, 10.0)]);
        editor.apply(Event::Select(ids[0]));
        assert!(!editor.apply(Event::Select(AnnotationId::new_v4())));
        assert_eq!(editor.selected(), Some(ids[0]));
    }

    #[test]
    fn test_background_click_deselects() {
        let (mut editor, ids) = editor_with(&[Rect::new(0.0, 0.0, 10.0, 10.0)]);
        editor.apply(Event::Select(ids[0]));
        assert!(editor.apply(Event::Deselect));
        assert_eq!(editor.selected(), None);
        assert!(!editor.apply(Event::Deselect));
    }

    #[test]
    fn test_move_writes_back_position_on_release() {
        let (mut editor, ids) = editor_with(&[Rect::new(10.0, 10.0, 40.0, 20.0)]);
        editor.save().unwrap();
        editor.apply(Event::Select(ids[0]));
        editor.apply(Event::BeginMove {
            id: ids[0],
            at: Point::new(20.0, 15.0),
        });
        editor.apply(Event::PointerMove(Point::new(25.0, 35.0)));

        // Committed geometry is untouched until release.
        let annotation = editor.annotations().get(ids[0]).unwrap().clone();
        assert_eq!(annotation.rect, Rect::new(10.0, 10.0, 40.0, 20.0));
        assert_eq!(
            editor.display_rect(&annotation),
            Rect::new(15.0, 30.0, 40.0, 20.0)
        );
        assert!(editor.export_ready());

        editor.apply(Event::PointerUp);
        assert_eq!(
            editor.annotations().get(ids[0]).unwrap().rect,
            Rect::new(15.0, 30.0, 40.0, 20.0)
        );
        assert!(editor.transform().is_none());
        assert_eq!(editor.selected(), Some(ids[0]));
        assert!(!editor.export_ready());
    }

    #[test]
    fn test_click_without_drag_leaves_export_ready() {
        let (mut editor, ids) = editor_with(&[Rect::new(10.0, 10.0, 40.0, 20.0)]);
        editor.save().unwrap();
        editor.apply(Event::Select(ids[0]));
        editor.apply(Event::BeginMove {
            id: ids[0],
            at: Point::new(20.0, 15.0),
        });
        editor.apply(Event::PointerUp);
        assert!(editor.export_ready());
    }

    #[test]
    fn test_resize_folds_scale_into_extent() {
        let (mut editor, ids) = editor_with(&[Rect::new(10.0, 10.0, 40.0, 20.0)]);
        editor.apply(Event::Select(ids[0]));
        editor.apply(Event::BeginResize {
            id: ids[0],
            handle: Handle::BottomRight,
            at: Point::new(50.0, 30.0),
        });
        editor.apply(Event::PointerMove(Point::new(90.0, 40.0)));
        assert_eq!(
            editor.transform().unwrap().folded(),
            Rect::new(10.0, 10.0, 80.0, 30.0)
        );

        editor.apply(Event::PointerUp);
        assert_eq!(
            editor.annotations().get(ids[0]).unwrap().rect,
            Rect::new(10.0, 10.0, 80.0, 30.0)
        );
    }

    #[test]
    fn test_resize_onto_fixed_corner_keeps_old_geometry() {
        let (mut editor, ids) = editor_with(&[Rect::new(10.0, 10.0, 40.0, 20.0)]);
        editor.save().unwrap();
        editor.apply(Event::Select(ids[0]));
        editor.apply(Event::BeginResize {
            id: ids[0],
            handle: Handle::BottomRight,
            at: Point::new(50.0, 30.0),
        });
        editor.apply(Event::PointerMove(Point::new(10.0, 10.0)));
        editor.apply(Event::PointerUp);

        let rect = editor.annotations().get(ids[0]).unwrap().rect;
        assert_eq!(rect, Rect::new(10.0, 10.0, 40.0, 20.0));
        assert!(editor.annotations().iter().all(|a| !a.is_degenerate()));
        assert!(editor.transform().is_none());
        assert!(editor.export_ready());
    }

    #[test]
    fn test_resize_from_top_left_moves_anchor() {
        let (mut editor, ids) = editor_with(&[Rect::new(10.0, 10.0, 40.0, 20.0)]);
        editor.apply(Event::Select(ids[0]));
        editor.apply(Event::BeginResize {
            id: ids[0],
            handle: Handle::TopLeft,
            at: Point::new(10.0, 10.0),
        });
        editor.apply(Event::PointerMove(Point::new(30.0, 20.0)));
        editor.apply(Event::PointerUp);
        assert_eq!(
            editor.annotations().get(ids[0]).unwrap().rect,
            Rect::new(30.0, 20.0, 20.0, 10.0)
        );
    }

    #[test]
    fn test_resize_keeps_drag_direction_sign() {
        // Drawn up-left: anchor at (50, 40), far corner at (10, 20).
        let (mut editor, ids) = editor_with(&[Rect::new(50.0, 40.0, -40.0, -20.0)]);
        editor.apply(Event::Select(ids[0]));
        editor.apply(Event::BeginResize {
            id: ids[0],
            handle: Handle::TopLeft,
            at: Point::new(10.0, 20.0),
        });
        editor.apply(Event::PointerMove(Point::new(30.0, 30.0)));
        editor.apply(Event::PointerUp);
        assert_eq!(
            editor.annotations().get(ids[0]).unwrap().rect,
            Rect::new(50.0, 40.0, -20.0, -10.0)
        );
    }

    #[test]
    fn test_transform_requires_selection() {
        let (mut editor, ids) = editor_with(&[Rect::new(10.0, 10.0, 40.0, 20.0)]);
        assert!(!editor.apply(Event::BeginMove {
            id: ids[0],
            at: Point::new(20.0, 15.0),
        }));
        assert!(editor.transform().is_none());
    }

    #[test]
    fn test_cannot_select_during_draft() {
        let (mut editor, ids) = editor_with(&[Rect::new(10.0, 10.0, 40.0, 20.0)]);
        editor.apply(Event::PointerDown(Point::new(100.0, 100.0)));
        assert!(!editor.apply(Event::Select(ids[0])));
        assert_eq!(editor.selected(), None);
        assert!(editor.draft().is_some());
    }

    #[test]
    fn test_delete_during_move_abandons_it() {
        let (mut editor, ids) = editor_with(&[
            Rect::new(10.0, 10.0, 40.0, 20.0),
            Rect::new(70.0, 70.0, 5.0, 5.0),
        ]);
        editor.apply(Event::Select(ids[0]));
        editor.apply(Event::BeginMove {
            id: ids[0],
            at: Point::new(20.0, 15.0),
        });
        editor.apply(Event::PointerMove(Point::new(25.0, 35.0)));
        editor.apply(Event::Delete);

        assert!(editor.transform().is_none());
        assert!(!editor.apply(Event::PointerUp));
        assert_eq!(editor.annotations().len(), 1);
        assert_eq!(editor.annotations().as_slice()[0].id, ids[1]);
    }

    #[test]
    fn test_handle_positions_follow_normalized_rect() {
        let rect = Rect::new(50.0, 40.0, -40.0, -20.0);
        assert_eq!(Handle::TopLeft.position(&rect), Point::new(10.0, 20.0));
        assert_eq!(Handle::BottomRight.position(&rect), Point::new(50.0, 40.0));
        assert_eq!(Handle::TopRight.opposite(), Handle::BottomLeft);
    }
}
