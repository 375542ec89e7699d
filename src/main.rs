//! Taskboard Frontend Entry Point

mod api;
mod app;
mod components;
mod context;
mod route;
mod store;

use app::App;
use leptos::prelude::*;
use taskboard_core::TrackerConfig;

fn main() {
    console_error_panic_hook::set_once();

    let config = TrackerConfig::from_build();
    if let Err(err) = rolling_logger::init(config.log_level, config.log_capacity) {
        web_sys::console::warn_1(&format!("[APP] Logger not installed: {}", err).into());
    }
    log::info!("[APP] Using GraphQL endpoint {}", config.graphql_endpoint);

    mount_to_body(move || view! { <App config=config /> });
}
