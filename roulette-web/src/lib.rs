#![forbid(unsafe_code)]
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

pub mod app;
pub mod components;
pub mod dom;
pub mod game;
pub mod i18n;
pub mod loader;
pub mod logging;

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
    if let Err(err) = logging::init() {
        dom::console_error(&format!("logger already installed: {err}"));
    }
    crate::dom::set_document_lang(&crate::i18n::current_lang());
    yew::Renderer::<app::App>::new().render();
}
