// src/main.rs
use std::env;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use popcorn::app::PopcornApp;
use popcorn::config::load_config;

fn pick_renderer() -> eframe::Renderer {
    match env::var("POPCORN_RENDERER").as_deref() {
        Ok("glow") => eframe::Renderer::Glow,
        Ok("wgpu") => eframe::Renderer::Wgpu,
        _ => {
            // Default: Windows = WGPU (DX12), Others = Glow (GL)
            #[cfg(target_os = "windows")]
            { eframe::Renderer::Wgpu }
            #[cfg(not(target_os = "windows"))]
            { eframe::Renderer::Glow }
        }
    }
}

fn main() -> eframe::Result<()> {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .try_init();

    let cfg = load_config();
    info!("starting usePopcorn (max rating {})", cfg.max_rating);

    let options = eframe::NativeOptions {
        renderer: pick_renderer(),
        viewport: eframe::egui::ViewportBuilder::default().with_inner_size([1100.0, 720.0]),
        ..Default::default()
    };

    match eframe::run_native(
        "usePopcorn",
        options,
        Box::new(move |cc| {
            let app = PopcornApp::new(cc, &cfg)?;
            Ok(Box::new(app) as Box<dyn eframe::App>)
        }),
    ) {
        Ok(_) => Ok(()),
        Err(e) => {
            error!("eframe failed to start: {e:?}");
            error!("Hint: try POPCORN_RENDERER=wgpu or glow.");
            Err(e)
        }
    }
}
