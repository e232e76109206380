//! Client-only gate in front of the game widget.

use crate::components::RouletteGame;
use crate::i18n;
use yew::prelude::*;

/// Placeholder shown until the browser environment is confirmed.
#[function_component(LoadingPlaceholder)]
pub fn loading_placeholder() -> Html {
    html! {
        <div class="loading" id="loading" aria-busy="true">{ i18n::t("app.loading") }</div>
    }
}

/// Mounts [`RouletteGame`] once client entropy is available.
///
/// Effects never run during server rendering, so the placeholder is all a
/// server-rendered page contains. Readiness is latched: once the widget is
/// mounted the loader never falls back to the placeholder.
#[function_component(Loader)]
pub fn loader() -> Html {
    let entropy = use_state(|| None::<u64>);

    {
        let entropy = entropy.clone();
        use_effect_with((), move |()| {
            if entropy.is_none() {
                match crate::dom::client_entropy() {
                    Some(seed) => {
                        log::debug!("client environment ready");
                        entropy.set(Some(seed));
                    }
                    None => log::warn!("no client environment; staying on placeholder"),
                }
            }
            || {}
        });
    }

    match *entropy {
        Some(seed) => html! { <RouletteGame entropy={seed} /> },
        None => html! { <LoadingPlaceholder /> },
    }
}
