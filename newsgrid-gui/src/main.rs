mod app;
mod fonts;

use std::sync::Arc;

use eframe::{egui, NativeOptions};
use newsgrid_core::{AppConfig, MemoryCache, NewsFetcher};
use reqwest::{redirect, ClientBuilder};
use tokio::runtime::Runtime;
use tracing_subscriber::EnvFilter;

use crate::app::{AppInit, NewsGridApp};

const WINDOW_TITLE: &str = "テスラ関連ニュース収集ダッシュボード";

fn main() -> eframe::Result<()> {
    init_tracing();

    let config = AppConfig::load();
    let runtime = Arc::new(Runtime::new().expect("failed to initialise Tokio runtime"));
    let fetch_config = config.feed.to_fetch_config();
    let client = ClientBuilder::new()
        .redirect(redirect::Policy::limited(5))
        .user_agent(concat!("NewsGrid/", env!("CARGO_PKG_VERSION")))
        .build()
        .expect("failed to build HTTP client");
    // One cache for the whole process, handed to the fetcher.
    let cache = MemoryCache::shared(fetch_config.cache_ttl);
    let fetcher = NewsFetcher::new(client, cache, fetch_config);

    let viewport = egui::ViewportBuilder::default()
        .with_title(WINDOW_TITLE)
        .with_inner_size([config.ui.window_width, config.ui.window_height])
        .with_min_inner_size([600.0, 500.0]);

    let init = AppInit {
        runtime,
        fetcher,
        ui: config.ui,
        theme: config.theme,
    };

    eframe::run_native(
        "NewsGrid",
        NativeOptions {
            viewport,
            ..Default::default()
        },
        Box::new(move |cc| {
            fonts::install_cjk_fonts(&cc.egui_ctx);
            Box::new(NewsGridApp::new(init, &cc.egui_ctx))
        }),
    )
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}
