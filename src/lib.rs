mod utils;

pub mod color;
pub mod config;
pub mod debounce;
pub mod error;
pub mod field;
pub mod particle;
pub mod pointer;
pub mod surface;
pub mod web;

pub use config::FieldConfig;
pub use error::FieldError;
pub use field::ParticleField;
pub use particle::{Particle, Traits};
pub use pointer::PointerState;
pub use surface::{GradientStop, Surface};

use wasm_bindgen::prelude::*;
use web_sys::console;

// When the `wee_alloc` feature is enabled, use `wee_alloc` as the global
// allocator.
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

#[wasm_bindgen]
pub fn initialize() {
    utils::set_panic_hook();
    utils::init_logging(log::Level::Info);
}

// Called by the host page once it has loaded. Builds the one field for the
// page and keeps it animating until the page goes away.
#[wasm_bindgen]
pub fn start() -> Result<(), JsValue> {
    start_on(&FieldConfig::default().canvas_id)
}

#[wasm_bindgen]
pub fn start_on(canvas_id: &str) -> Result<(), JsValue> {
    initialize();
    let config = FieldConfig {
        canvas_id: canvas_id.to_owned(),
        ..FieldConfig::default()
    };
    if let Err(e) = web::run(config) {
        log::error!("ember field failed to start: {}", e);
        return Err(e.into());
    }
    Ok(())
}

/// Wraps a `console.time` / `console.timeEnd` pair around a scope.
pub struct Timer<'a> {
    name: &'a str,
}

impl<'a> Timer<'a> {
    pub fn new(name: &'a str) -> Timer<'a> {
        console::time_with_label(name);
        Timer { name }
    }
}

impl<'a> Drop for Timer<'a> {
    fn drop(&mut self) {
        console::time_end_with_label(self.name);
    }
}
