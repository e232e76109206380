use crate::game::Status;
use crate::i18n;
use yew::prelude::*;

#[derive(Properties, Clone, PartialEq)]
pub struct Props {
    pub status: Status,
}

#[function_component(StatusBanner)]
pub fn status_banner(p: &Props) -> Html {
    let (class, key) = match p.status {
        Status::Playing => ("status--playing", "status.playing"),
        Status::Dead => ("status--dead", "status.dead"),
    };
    html! {
        <div class="roulette__status" id="status" aria-live="polite">
            { i18n::t("status.label") }
            <span class={class}>{ i18n::t(key) }</span>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;
    use yew::LocalServerRenderer;

    fn render(status: Status) -> String {
        block_on(LocalServerRenderer::<StatusBanner>::with_props(Props { status }).render())
    }

    #[test]
    fn shows_alive_text_while_playing() {
        let html = render(Status::Playing);
        assert!(html.contains("存活中 ✅"));
        assert!(html.contains("status--playing"));
    }

    #[test]
    fn shows_game_over_when_dead() {
        let html = render(Status::Dead);
        assert!(html.contains("爆炸 💥 Game Over"));
        assert!(html.contains("status--dead"));
    }
}
