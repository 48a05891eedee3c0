#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

use std::path::PathBuf;

use eframe::egui;
use profile_paint::export::FileHostForm;
use profile_paint::{BaselineImage, Editor, EditorApp};

const DEFAULT_PICTURE_SIZE: u32 = 240;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    // Required collaborator: a missing or undecodable default picture aborts
    // startup instead of leaving the editor half wired.
    let default_image = BaselineImage::placeholder(DEFAULT_PICTURE_SIZE, DEFAULT_PICTURE_SIZE)?;

    // Optional profile picture passed on the command line
    let profile = match std::env::args().nth(1) {
        Some(path) => Some(BaselineImage::from_bytes(std::fs::read(&path)?)?),
        None => None,
    };

    let form = FileHostForm::new(PathBuf::from("profile_upload.txt"));
    let editor = Editor::new(profile, default_image, Box::new(form));

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Profile picture editor")
            .with_inner_size([760.0, 560.0]),
        ..Default::default()
    };
    eframe::run_native(
        "profile_paint",
        native_options,
        Box::new(|cc| Ok(Box::new(EditorApp::new(cc, editor)))),
    )?;
    Ok(())
}
