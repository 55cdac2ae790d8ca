// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Annotation editor state machine.
//!
//! [`Editor`] holds the whole editing session: the image position, the
//! annotation set for the displayed image, the in-progress draft, and the
//! selection. The canvas turns pointer and keyboard input into [`Event`]s
//! and feeds them to [`Editor::apply`] one at a time; toolbar commands are
//! plain methods. Nothing here knows about egui, so every transition can be
//! tested directly.

mod draw;
mod selection;

use draw::DrawState;
pub use selection::{Handle, Transform, TransformKind};

use crate::error::EditorError;
use crate::io::serialization;
use crate::models::{
    annotation::{Annotation, AnnotationId, Point, Rect},
    annotation_set::AnnotationSet,
    session::{DisplayMetrics, ImageSession},
};

/// Canvas input, in canvas-local coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Event {
    /// Primary button pressed over empty image background.
    PointerDown(Point),
    PointerMove(Point),
    PointerUp,
    /// Primary button pressed over an annotation.
    Select(AnnotationId),
    /// Background clicked while something is selected.
    Deselect,
    /// Start dragging the selected annotation's body.
    BeginMove { id: AnnotationId, at: Point },
    /// Start dragging one of the selected annotation's corner handles.
    BeginResize {
        id: AnnotationId,
        handle: Handle,
        at: Point,
    },
    /// Delete or Backspace.
    Delete,
}

pub struct Editor {
    session: ImageSession,
    annotations: AnnotationSet,
    draw: DrawState,
    selected: Option<AnnotationId>,
    transform: Option<Transform>,
    annotation_mode: bool,
    /// Set revision captured by the last save, if still applicable.
    saved_revision: Option<u64>,
}

impl Editor {
    /// Start editing the first of `images`.
    pub fn new(images: Vec<String>) -> Result<Self, EditorError> {
        let session = ImageSession::new(images)?;
        let annotations = AnnotationSet::new(session.current_index());
        Ok(Self {
            session,
            annotations,
            draw: DrawState::Idle,
            selected: None,
            transform: None,
            annotation_mode: false,
            saved_revision: None,
        })
    }

    pub fn session(&self) -> &ImageSession {
        &self.session
    }

    pub fn annotations(&self) -> &AnnotationSet {
        &self.annotations
    }

    pub fn draft(&self) -> Option<&Annotation> {
        self.draw.draft()
    }

    pub fn selected(&self) -> Option<AnnotationId> {
        self.selected
    }

    pub fn transform(&self) -> Option<&Transform> {
        self.transform.as_ref()
    }

    pub fn annotation_mode(&self) -> bool {
        self.annotation_mode
    }

    /// True when the last save still describes the current annotations.
    pub fn export_ready(&self) -> bool {
        self.saved_revision == Some(self.annotations.revision())
    }

    /// Geometry to draw for `annotation`, including any move or resize in
    /// progress.
    pub fn display_rect(&self, annotation: &Annotation) -> Rect {
        match &self.transform {
            Some(t) if t.id() == annotation.id => t.folded(),
            _ => annotation.rect,
        }
    }

    /// Process one canvas event. Returns whether anything changed.
    pub fn apply(&mut self, event: Event) -> bool {
        match event {
            Event::PointerDown(at) => self.begin_draft(at),
            Event::PointerMove(to) => {
                if self.transform.is_some() {
                    self.drag_transform(to)
                } else {
                    self.drag_draft(to)
                }
            }
            Event::PointerUp => {
                if self.transform.is_some() {
                    self.end_transform()
                } else {
                    self.finish_draft()
                }
            }
            Event::Select(id) => self.select(id),
            Event::Deselect => self.deselect(),
            Event::BeginMove { id, at } => self.begin_transform(id, TransformKind::Move, at),
            Event::BeginResize { id, handle, at } => {
                self.begin_transform(id, TransformKind::Resize(handle), at)
            }
            Event::Delete => self.delete_selected(),
        }
    }

    /// Flip annotation mode and return the new value.
    pub fn toggle_annotation_mode(&mut self) -> bool {
        self.annotation_mode = !self.annotation_mode;
        log::info!(
            "Annotation mode {}",
            if self.annotation_mode { "enabled" } else { "disabled" }
        );
        self.annotation_mode
    }

    /// Record the display size reported for image `index`.
    pub fn set_display_metrics(&mut self, index: usize, metrics: DisplayMetrics) -> bool {
        self.session.set_metrics(index, metrics)
    }

    /// Serialize the current image's annotations.
    pub fn export(&self) -> Result<String, EditorError> {
        self.annotations.ensure_space(self.session.current_index())?;
        Ok(serialization::serialize(
            self.session.current_image(),
            self.annotations.as_slice(),
        ))
    }

    /// Mark the current annotations as ready for submission.
    pub fn save(&mut self) -> Result<String, EditorError> {
        let json = self.export()?;
        self.saved_revision = Some(self.annotations.revision());
        log::info!("Saved annotations: {}", json);
        Ok(json)
    }

    /// Produce the export for download.
    ///
    /// Refused unless a save happened since the last change and there is at
    /// least one annotation. The export stays ready until
    /// [`Editor::mark_submitted`] is called once it has been written out.
    pub fn submit(&self) -> Result<String, EditorError> {
        self.check_submit()?;
        self.export()
    }

    /// Consume the saved export; the next submit needs a new save.
    pub fn mark_submitted(&mut self) {
        self.saved_revision = None;
    }

    /// Whether [`Editor::submit`] would succeed, without submitting.
    pub fn check_submit(&self) -> Result<(), EditorError> {
        let Some(saved) = self.saved_revision else {
            log::warn!("Submit refused: not saved");
            return Err(EditorError::NotSaved);
        };
        if saved != self.annotations.revision() {
            log::warn!("Submit refused: annotations changed since save");
            return Err(EditorError::StaleExport);
        }
        if self.annotations.is_empty() {
            log::warn!("Submit refused: no annotations");
            return Err(EditorError::NoAnnotations);
        }
        Ok(())
    }

    /// Remove every annotation and drop the draft and selection.
    pub fn clear(&mut self) {
        self.annotations.clear();
        self.reset_interaction();
        log::info!("Cleared annotations");
    }

    /// Show the next image. Out-of-range calls do nothing.
    pub fn next(&mut self) -> bool {
        if !self.session.next() {
            log::debug!("Already at the last image");
            return false;
        }
        self.enter_image();
        true
    }

    /// Show the previous image. Out-of-range calls do nothing.
    pub fn previous(&mut self) -> bool {
        if !self.session.previous() {
            log::debug!("Already at the first image");
            return false;
        }
        self.enter_image();
        true
    }

    /// Annotations are only valid in the display space they were drawn in,
    /// so a new image always starts from an empty set.
    fn enter_image(&mut self) {
        self.annotations = AnnotationSet::new(self.session.current_index());
        self.reset_interaction();
        log::info!(
            "Showing image {}/{}: {}",
            self.session.current_index() + 1,
            self.session.image_count(),
            self.session.current_image()
        );
    }

    fn reset_interaction(&mut self) {
        self.draw = DrawState::Idle;
        self.selected = None;
        self.transform = None;
        self.saved_revision = None;
    }
}
