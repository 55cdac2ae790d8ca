// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Main application state and egui App implementation.
//!
//! This module wires the egui panels to the [`Editor`]: toolbar clicks
//! become editor commands, canvas input becomes editor events, and images
//! are decoded on a background thread and uploaded as textures.

use crate::config::Config;
use crate::editor::{Editor, Event};
use crate::io::{
    media::{self, LoadedImage},
    serialization,
};
use crate::ui::{canvas, toolbar, toolbar::ToolbarAction};
use anyhow::Result;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{channel, Receiver};

/// Result of a background load, tagged with the image index it was for.
type LoadResult = (usize, Result<LoadedImage, String>);

/// Main application state.
pub struct BoxmarkApp {
    editor: Editor,

    config: Config,

    /// Fixed export destination; a save dialog is shown when unset
    output: Option<PathBuf>,

    /// Texture of the image on display
    image_texture: Option<egui::TextureHandle>,

    /// Receiver for background image loading
    image_loader: Option<Receiver<LoadResult>>,

    /// Message shown in a pop-up until dismissed
    advisory: Option<String>,
}

impl BoxmarkApp {
    /// Create the application and start loading the first image.
    pub fn new(config: Config, output: Option<PathBuf>) -> Result<Self> {
        let editor = Editor::new(config.image_refs())?;
        let mut app = Self {
            editor,
            config,
            output,
            image_texture: None,
            image_loader: None,
            advisory: None,
        };
        app.load_current_image();
        Ok(app)
    }

    /// Decode the current image on a background thread.
    fn load_current_image(&mut self) {
        let (sender, receiver) = channel();
        self.image_loader = Some(receiver);
        self.image_texture = None;

        let index = self.editor.session().current_index();
        let path = PathBuf::from(self.editor.session().current_image());

        std::thread::spawn(move || {
            let result = media::load_image(&path).map_err(|e| format!("{:#}", e));
            if let Ok(img) = &result {
                log::info!("Loaded image: {} ({}x{})", path.display(), img.width, img.height);
            }
            let _ = sender.send((index, result));
        });
    }

    fn poll_image_loader(&mut self, ctx: &egui::Context) {
        let Some(receiver) = &self.image_loader else {
            return;
        };
        let Ok((index, result)) = receiver.try_recv() else {
            return;
        };
        self.image_loader = None;

        match result {
            Ok(loaded) => {
                let metrics = loaded
                    .display_metrics(self.config.max_display_width, self.config.max_display_height);
                if !self.editor.set_display_metrics(index, metrics) {
                    return;
                }

                let size = [loaded.width as usize, loaded.height as usize];
                let color_image = egui::ColorImage::from_rgba_unmultiplied(size, &loaded.pixels);
                self.image_texture = Some(ctx.load_texture(
                    format!("image-{}", index),
                    color_image,
                    egui::TextureOptions::LINEAR,
                ));
                log::info!(
                    "Displaying image {} at {:.0}x{:.0}",
                    index + 1,
                    metrics.width,
                    metrics.height
                );
            }
            Err(e) => {
                log::error!("Failed to load image: {}", e);
                self.advisory = Some(e);
            }
        }
    }

    fn handle_toolbar(&mut self, action: ToolbarAction) {
        match action {
            ToolbarAction::Previous => {
                if self.editor.previous() {
                    self.load_current_image();
                }
            }
            ToolbarAction::Next => {
                if self.editor.next() {
                    self.load_current_image();
                }
            }
            ToolbarAction::ToggleAnnotationMode => {
                self.editor.toggle_annotation_mode();
            }
            ToolbarAction::Save => {
                if let Err(e) = self.editor.save() {
                    self.advisory = Some(e.to_string());
                }
            }
            ToolbarAction::Submit => self.submit(),
            ToolbarAction::Clear => self.editor.clear(),
            ToolbarAction::None => {}
        }
    }

    /// Write the saved annotations to the export file.
    fn submit(&mut self) {
        if let Err(e) = self.editor.check_submit() {
            self.advisory = Some(e.to_string());
            return;
        }

        let path = match &self.output {
            Some(path) => path.clone(),
            None => match rfd::FileDialog::new()
                .add_filter("JSON", &["json"])
                .set_file_name(self.config.export_file_name.as_str())
                .save_file()
            {
                Some(path) => path,
                None => return,
            },
        };

        match submit_to(&mut self.editor, &path) {
            Ok(()) => log::info!("Exported annotations to {}", path.display()),
            Err(e) => {
                log::error!("{:#}", e);
                self.advisory = Some(format!("{:#}", e));
            }
        }
    }

    fn show_advisory(&mut self, ctx: &egui::Context) {
        let Some(message) = &self.advisory else {
            return;
        };
        let mut dismissed = false;
        egui::Window::new("Notice")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, egui::vec2(0.0, 0.0))
            .show(ctx, |ui| {
                ui.label(message.as_str());
                ui.add_space(8.0);
                if ui.button("OK").clicked() {
                    dismissed = true;
                }
            });
        if dismissed {
            self.advisory = None;
        }
    }
}

/// Write the submitted export to `path`.
///
/// The saved export is only consumed once the file has been written, so a
/// failed write can be retried without saving again.
fn submit_to(editor: &mut Editor, path: &Path) -> Result<()> {
    let json = editor.submit()?;
    serialization::write_export(&json, path)?;
    editor.mark_submitted();
    Ok(())
}

impl eframe::App for BoxmarkApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_image_loader(ctx);

        // Keep polling until the image arrives
        if self.image_loader.is_some() {
            ctx.request_repaint();
        }

        let toolbar_action = egui::TopBottomPanel::top("toolbar")
            .show(ctx, |ui| toolbar::show(ui, &self.editor))
            .inner;
        self.handle_toolbar(toolbar_action);

        // Delete or Backspace removes the selected annotation
        if self.advisory.is_none()
            && !ctx.wants_keyboard_input()
            && ctx.input(|i| i.key_pressed(egui::Key::Delete) || i.key_pressed(egui::Key::Backspace))
        {
            self.editor.apply(Event::Delete);
        }

        let events = egui::CentralPanel::default()
            .show(ctx, |ui| canvas::show(ui, &self.editor, &self.image_texture))
            .inner;

        // The advisory pop-up is modal for canvas input
        if self.advisory.is_none() {
            for event in events {
                self.editor.apply(event);
            }
        }

        self.show_advisory(ctx);
    }
}
