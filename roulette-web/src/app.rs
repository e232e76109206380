use crate::loader::Loader;
use yew::prelude::*;

const STYLESHEET: &str = include_str!("../static/roulette.css");

/// Top-level component mounted into `<body>`.
#[function_component(App)]
pub fn app() -> Html {
    html! {
        <main id="main">
            <style>{ STYLESHEET }</style>
            <Loader />
        </main>
    }
}
