//! Thin access to the browser environment.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::JsValue;
#[cfg(target_arch = "wasm32")]
use web_sys::{Document, Window};

/// Retrieve the global `window` object, if there is one.
#[cfg(target_arch = "wasm32")]
#[must_use]
pub fn window() -> Option<Window> {
    web_sys::window()
}

/// Retrieve the document object for DOM interactions.
#[cfg(target_arch = "wasm32")]
#[must_use]
pub fn document() -> Option<Document> {
    window().and_then(|win| win.document())
}

/// Log an error message to the browser console.
#[cfg(target_arch = "wasm32")]
pub fn console_error(message: &str) {
    web_sys::console::error_1(&JsValue::from(message));
}

/// Set `<html lang>` to the active locale.
#[cfg(target_arch = "wasm32")]
pub fn set_document_lang(lang: &str) {
    if let Some(el) = document().and_then(|doc| doc.document_element()) {
        let _ = el.set_attribute("lang", lang);
    }
}

/// Entropy from the client's own random source and clock.
///
/// Returns `None` outside a browser window, which keeps the loader on its
/// placeholder.
#[must_use]
pub fn client_entropy() -> Option<u64> {
    #[cfg(target_arch = "wasm32")]
    {
        window()?;
        Some(mix_entropy(
            js_sys::Math::random().to_bits(),
            js_sys::Date::now().to_bits(),
        ))
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        None
    }
}

#[cfg_attr(not(any(target_arch = "wasm32", test)), allow(dead_code))]
const fn mix_entropy(random_bits: u64, clock_bits: u64) -> u64 {
    random_bits.rotate_left(29) ^ clock_bits.wrapping_mul(0x9E37_79B9_7F4A_7C15)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn native_targets_have_no_client_entropy() {
        #[cfg(not(target_arch = "wasm32"))]
        assert_eq!(client_entropy(), None);
    }

    #[test]
    fn entropy_mixing_depends_on_both_sources() {
        let base = mix_entropy(1, 2);
        assert_ne!(base, mix_entropy(3, 2));
        assert_ne!(base, mix_entropy(1, 4));
    }
}
