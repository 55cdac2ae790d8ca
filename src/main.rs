// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! BOXMARK - bounding box annotation editor
//!
//! A desktop application for drawing, editing and exporting rectangular
//! annotations over a sequence of images.

mod app;
mod config;
mod editor;
mod error;
mod io;
mod models;
mod ui;
mod util;

use anyhow::Result;
use app::BoxmarkApp;
use clap::Parser;
use config::{Cli, Config};

fn main() -> Result<()> {
    // Initialize logging
    env_logger::init();

    let cli = Cli::parse();
    let config = Config::from_cli(&cli)?;
    let app = BoxmarkApp::new(config, cli.output)?;

    // Configure egui options
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([960.0, 600.0])
            .with_min_inner_size([820.0, 520.0])
            .with_title("BOXMARK - Bounding Box Annotation"),
        ..Default::default()
    };

    // Run the application
    eframe::run_native("BOXMARK", options, Box::new(|_cc| Ok(Box::new(app))))
        .map_err(|e| anyhow::anyhow!("Application error: {}", e))?;

    Ok(())
}
