//! Orçamentos Admin Frontend Entry Point

mod app;
mod columns;
mod components;
mod context;
mod crud;
mod storage;
mod store;

use app::App;
use leptos::prelude::*;
use log::LevelFilter;

fn main() {
    console_error_panic_hook::set_once();

    let level = if cfg!(debug_assertions) {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    if let Err(e) = console_logger::init_logger("orcamento-ui", level) {
        web_sys::console::warn_1(&format!("logger already set: {e}").into());
    }

    mount_to_body(App);
}
