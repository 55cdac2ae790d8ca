// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Toolbar with navigation, mode and export commands.

use crate::editor::Editor;

/// Command requested from the toolbar this frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolbarAction {
    None,
    Previous,
    ToggleAnnotationMode,
    Save,
    Submit,
    Clear,
    Next,
}

/// Display the toolbar and report which button, if any, was clicked.
pub fn show(ui: &mut egui::Ui, editor: &Editor) -> ToolbarAction {
    let mut action = ToolbarAction::None;

    ui.horizontal(|ui| {
        ui.spacing_mut().item_spacing.x = 8.0;

        if ui.button("⬅ Previous").clicked() {
            action = ToolbarAction::Previous;
        }

        let mode_label = if editor.annotation_mode() {
            "✖ Disable Annotation"
        } else {
            "✏ Enable Annotation"
        };
        if ui.selectable_label(editor.annotation_mode(), mode_label).clicked() {
            action = ToolbarAction::ToggleAnnotationMode;
        }

        if ui.button("💾 Save").clicked() {
            action = ToolbarAction::Save;
        }
        if ui.button("⬇ Submit").clicked() {
            action = ToolbarAction::Submit;
        }
        if ui.button("🗑 Clear").clicked() {
            action = ToolbarAction::Clear;
        }
        if ui.button("Next ➡").clicked() {
            action = ToolbarAction::Next;
        }

        ui.separator();

        ui.label(egui::RichText::new(status_text(editor)).italics().weak());
    });

    action
}

/// Position, mode, annotation count and save state of the editor.
pub fn status_text(editor: &Editor) -> String {
    let session = editor.session();
    format!(
        "Image {}/{} | {} | {} annotation(s) | {}",
        session.current_index() + 1,
        session.image_count(),
        if editor.annotation_mode() { "annotating" } else { "viewing" },
        editor.annotations().len(),
        if editor.export_ready() { "saved" } else { "unsaved" }
    )
}
