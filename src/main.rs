use std::path::{Path, PathBuf};
use std::process::ExitCode;

use eframe::egui;
use hitbox_edit::config::{EditorConfig, CONFIG_FILE_NAME};

mod app;

use app::HitboxEditApp;

// ── Main ────────────────────────────────────────────────────────────────────

fn main() -> ExitCode {
    let config_path = Path::new(CONFIG_FILE_NAME);
    let loaded = config_path.exists().then(|| EditorConfig::load(config_path));

    let level = match &loaded {
        Some(Ok(cfg)) => cfg.log_level,
        _ => Default::default(),
    };
    env_logger::Builder::new()
        .filter_level(level.to_level_filter())
        .parse_default_env()
        .init();

    let config = match loaded {
        Some(Ok(cfg)) => {
            log::info!("using {}", config_path.display());
            cfg
        }
        Some(Err(e)) => {
            log::warn!("{}; using defaults", e);
            EditorConfig::default()
        }
        None => EditorConfig::default(),
    };

    // Optional image to open right away, like `hitbox-edit sheet.png`.
    let initial_image = std::env::args_os().nth(1).map(PathBuf::from);

    let title = match initial_image.as_deref().and_then(Path::file_name) {
        Some(name) => format!("hitbox-edit — {}", name.to_string_lossy()),
        None => "hitbox-edit".to_string(),
    };

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(config.window_size)
            .with_title(&title),
        ..Default::default()
    };

    let result = eframe::run_native(
        &title,
        options,
        Box::new(move |_cc| Ok(Box::new(HitboxEditApp::new(config, initial_image)))),
    );
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("failed to run eframe: {}", e);
            ExitCode::FAILURE
        }
    }
}
