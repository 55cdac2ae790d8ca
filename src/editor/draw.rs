// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Drawing new rectangles by pointer drag.

use super::Editor;
use crate::models::annotation::{Annotation, Point, Rect};

/// Draft rectangle lifecycle.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawState {
    Idle,
    /// A rectangle is being dragged out from its anchor.
    Dragging {
        draft: Annotation,
        /// Image whose display space the draft was started in.
        image_index: usize,
    },
}

impl DrawState {
    pub fn draft(&self) -> Option<&Annotation> {
        match self {
            DrawState::Idle => None,
            DrawState::Dragging { draft, .. } => Some(draft),
        }
    }
}

impl Editor {
    /// Processes a pointer press over the image background.
    ///
    /// A draft starts only in annotation mode, with nothing selected and no
    /// draft already under way.
    pub(super) fn begin_draft(&mut self, at: Point) -> bool {
        if !self.annotation_mode {
            log::debug!("Ignored press at ({:.1}, {:.1}): annotation mode is off", at.x, at.y);
            return false;
        }
        if self.selected.is_some() || self.transform.is_some() {
            log::debug!("Ignored press: an annotation is selected");
            return false;
        }
        if !matches!(self.draw, DrawState::Idle) {
            return false;
        }

        self.draw = DrawState::Dragging {
            draft: Annotation::new(Rect::at(at)),
            image_index: self.session.current_index(),
        };
        true
    }

    /// Stretches the draft so its far corner follows the pointer.
    pub(super) fn drag_draft(&mut self, to: Point) -> bool {
        let DrawState::Dragging { draft, .. } = &mut self.draw else {
            return false;
        };
        let anchor = Point::new(draft.rect.x, draft.rect.y);
        let rect = Rect::spanning(anchor, to);
        if rect == draft.rect {
            return false;
        }
        draft.rect = rect;
        true
    }

    /// Ends the drag, committing the draft unless it has no extent.
    pub(super) fn finish_draft(&mut self) -> bool {
        let DrawState::Dragging { draft, image_index } =
            std::mem::replace(&mut self.draw, DrawState::Idle)
        else {
            return false;
        };

        if draft.is_degenerate() {
            log::debug!("Discarded zero-size draft");
            return true;
        }
        if let Err(e) = self.annotations.ensure_space(image_index) {
            log::error!("Discarded draft: {}", e);
            return true;
        }

        let id = draft.id;
        if self.annotations.add(draft) {
            log::info!(
                "Added annotation {}, total: {}",
                id,
                self.annotations.len()
            );
        }
        true
    }
}
