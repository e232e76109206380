mod bundle;
mod locales;
mod render;

pub use bundle::current_lang;
pub use render::{t, tr};
