//! Showcase Widgets Entry Point

mod app;
mod checklist;
mod components;
mod config;
mod countdown;
mod crossfade;
mod data;
mod dom;
mod ducking;
mod effects;
mod error;
mod fade;
mod map;
mod markdown;
mod media;
mod models;
mod parallax;
mod particles;
mod playback;
mod storage;
mod timer;

use config::ShowcaseConfig;

/// Panic report preceded by the log lines leading up to it
fn install_panic_hook() {
    std::panic::set_hook(Box::new(|info| {
        let recent = console_logger::recent_lines();
        if !recent.is_empty() {
            let title = format!("last {} log lines before panic", recent.len());
            web_sys::console::group_collapsed_1(&title.into());
            for line in &recent {
                web_sys::console::log_1(&line.into());
            }
            web_sys::console::group_end();
        }
        console_error_panic_hook::hook(info);
    }));
}

fn main() {
    install_panic_hook();

    let (config, config_error) = match ShowcaseConfig::from_page() {
        Ok(config) => (config, None),
        Err(e) => (ShowcaseConfig::default(), Some(e)),
    };
    if let Err(e) = console_logger::init(config.log_level()) {
        web_sys::console::warn_1(&format!("logger already set: {}", e).into());
    }
    if let Some(e) = config_error {
        log::warn!("page config ignored, using defaults: {}", e);
    }

    log::info!("showcase starting");
    app::start(&config);
}
