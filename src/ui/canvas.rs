// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Drawing canvas for image display and annotation.
//!
//! This module shows the current image at its display size, draws the
//! annotations over it, and turns pointer input into editor events. It owns
//! no state: everything it draws comes from the [`Editor`].

use crate::editor::{Editor, Event, Handle, TransformKind};
use crate::models::annotation::{Point, Rect};
use crate::util::geometry::{to_canvas, to_screen};

/// Pointer distance, in pixels, within which a corner handle is grabbed.
const HANDLE_GRAB_RADIUS: f64 = 6.0;
/// Half the side of the square drawn for each handle.
const HANDLE_HALF_SIZE: f32 = 4.0;

const ANNOTATION_COLOR: egui::Color32 = egui::Color32::from_rgb(48, 84, 229);
const SELECTED_COLOR: egui::Color32 = egui::Color32::from_rgb(255, 196, 0);
const DRAFT_COLOR: egui::Color32 = egui::Color32::LIGHT_BLUE;

/// Display the canvas and collect the events produced this frame.
pub fn show(
    ui: &mut egui::Ui,
    editor: &Editor,
    image_texture: &Option<egui::TextureHandle>,
) -> Vec<Event> {
    let mut events = Vec::new();
    ui.style_mut().visuals.extreme_bg_color = egui::Color32::from_gray(40);

    let (Some(texture), Some(metrics)) = (image_texture, editor.session().metrics()) else {
        ui.centered_and_justified(|ui| {
            ui.label(
                egui::RichText::new("Loading image...")
                    .color(egui::Color32::WHITE),
            );
        });
        return events;
    };

    let size = egui::vec2(metrics.width as f32, metrics.height as f32);
    let (response, painter) = ui.allocate_painter(size, egui::Sense::click_and_drag());
    let image_rect = response.rect;
    let origin = image_rect.min;

    painter.image(
        texture.id(),
        image_rect,
        egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
        egui::Color32::WHITE,
    );
    painter.rect_stroke(image_rect, 0.0, egui::Stroke::new(2.0, ANNOTATION_COLOR));

    // Pointer input
    let (pressed, released, moving, pointer) = ui.input(|i| {
        (
            i.pointer.primary_pressed(),
            i.pointer.primary_released(),
            i.pointer.is_moving(),
            i.pointer.interact_pos(),
        )
    });

    if let Some(pos) = pointer {
        let at = to_canvas(pos.x, pos.y, origin.x, origin.y);
        if pressed && image_rect.contains(pos) {
            events.extend(press_events(editor, at));
        } else if moving && (editor.draft().is_some() || editor.transform().is_some()) {
            events.push(Event::PointerMove(at));
        }
        if image_rect.contains(pos) {
            ui.ctx().set_cursor_icon(cursor_for(editor, at));
        }
    }
    if released {
        events.push(Event::PointerUp);
    }

    // Annotations
    for annotation in editor.annotations().iter() {
        let rect = editor.display_rect(annotation);
        let is_selected = editor.selected() == Some(annotation.id);
        let color = if is_selected { SELECTED_COLOR } else { ANNOTATION_COLOR };
        painter.rect_stroke(screen_rect(&rect, origin), 0.0, egui::Stroke::new(2.0, color));

        if is_selected {
            for handle in Handle::ALL {
                let (x, y) = to_screen(handle.position(&rect), origin.x, origin.y);
                let square = egui::Rect::from_center_size(
                    egui::pos2(x, y),
                    egui::vec2(HANDLE_HALF_SIZE * 2.0, HANDLE_HALF_SIZE * 2.0),
                );
                painter.rect_filled(square, 0.0, egui::Color32::WHITE);
                painter.rect_stroke(square, 0.0, egui::Stroke::new(1.0, color));
            }
        }
    }

    if let Some(draft) = editor.draft() {
        painter.rect_stroke(
            screen_rect(&draft.rect, origin),
            0.0,
            egui::Stroke::new(2.0, DRAFT_COLOR),
        );
    }

    events
}

/// Decide what a primary-button press at `at` means.
///
/// Handles of the selected annotation win, then the topmost annotation under
/// the pointer; a press on bare background either clears the selection or
/// starts a new rectangle.
pub fn press_events(editor: &Editor, at: Point) -> Vec<Event> {
    if let Some(selected) = editor
        .selected()
        .and_then(|id| editor.annotations().get(id))
    {
        for handle in Handle::ALL {
            let p = handle.position(&selected.rect);
            if (p.x - at.x).hypot(p.y - at.y) <= HANDLE_GRAB_RADIUS {
                return vec![Event::BeginResize {
                    id: selected.id,
                    handle,
                    at,
                }];
            }
        }
    }

    if let Some(hit) = editor
        .annotations()
        .iter()
        .rev()
        .find(|a| a.rect.contains(at))
    {
        return vec![Event::Select(hit.id), Event::BeginMove { id: hit.id, at }];
    }

    if editor.selected().is_some() {
        vec![Event::Deselect]
    } else {
        vec![Event::PointerDown(at)]
    }
}

fn cursor_for(editor: &Editor, at: Point) -> egui::CursorIcon {
    match editor.transform().map(|t| t.kind()) {
        Some(TransformKind::Move) => return egui::CursorIcon::Grabbing,
        Some(TransformKind::Resize(Handle::TopLeft | Handle::BottomRight)) => {
            return egui::CursorIcon::ResizeNwSe
        }
        Some(TransformKind::Resize(_)) => return egui::CursorIcon::ResizeNeSw,
        None => {}
    }
    if editor.annotations().iter().any(|a| a.rect.contains(at)) {
        egui::CursorIcon::Move
    } else {
        egui::CursorIcon::Crosshair
    }
}

fn screen_rect(rect: &Rect, origin: egui::Pos2) -> egui::Rect {
    let (x1, y1) = to_screen(Point::new(rect.x, rect.y), origin.x, origin.y);
    let (x2, y2) = to_screen(rect.far_corner(), origin.x, origin.y);
    egui::Rect::from_two_pos(egui::pos2(x1, y1), egui::pos2(x2, y2))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn editor_with_two() -> Editor {
        let mut editor = Editor::new(vec!["a.png".to_string()]).unwrap();
        editor.toggle_annotation_mode();
        for (from, to) in [((10.0, 10.0), (60.0, 60.0)), ((40.0, 40.0), (90.0, 90.0))] {
            editor.apply(Event::PointerDown(Point::new(from.0, from.1)));
            editor.apply(Event::PointerMove(Point::new(to.0, to.1)));
            editor.apply(Event::PointerUp);
        }
        editor
    }

    #[test]
    fn test_press_on_background_starts_draft() {
        let editor = editor_with_two();
        assert_eq!(
            press_events(&editor, Point::new(200.0, 5.0)),
            vec![Event::PointerDown(Point::new(200.0, 5.0))]
        );
    }

    #[test]
    fn test_press_on_overlap_picks_topmost() {
        let editor = editor_with_two();
        let top = editor.annotations().as_slice()[1].id;
        let at = Point::new(50.0, 50.0);
        assert_eq!(
            press_events(&editor, at),
            vec![Event::Select(top), Event::BeginMove { id: top, at }]
        );
    }

    #[test]
    fn test_press_on_background_while_selected_only_deselects() {
        let mut editor = editor_with_two();
        let id = editor.annotations().as_slice()[0].id;
        editor.apply(Event::Select(id));
        assert_eq!(
            press_events(&editor, Point::new(200.0, 5.0)),
            vec![Event::Deselect]
        );
    }

    #[test]
    fn test_press_on_handle_starts_resize() {
        let mut editor = editor_with_two();
        let id = editor.annotations().as_slice()[0].id;
        editor.apply(Event::Select(id));
        let at = Point::new(61.0, 12.0);
        assert_eq!(
            press_events(&editor, at),
            vec![Event::BeginResize {
                id,
                handle: Handle::TopRight,
                at
            }]
        );
    }

    #[test]
    fn test_press_events_drive_full_move() {
        let mut editor = editor_with_two();
        let id = editor.annotations().as_slice()[0].id;
        for event in press_events(&editor, Point::new(20.0, 20.0)) {
            editor.apply(event);
        }
        editor.apply(Event::PointerMove(Point::new(25.0, 30.0)));
        editor.apply(Event::PointerUp);

        assert_eq!(editor.selected(), Some(id));
        assert_eq!(
            editor.annotations().get(id).unwrap().rect,
            Rect::new(15.0, 20.0, 50.0, 50.0)
        );
    }
}
