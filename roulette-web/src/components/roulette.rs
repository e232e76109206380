use crate::components::button::Button;
use crate::components::chamber_ring::ChamberRing;
use crate::components::history_list::HistoryList;
use crate::components::status_banner::StatusBanner;
use crate::game::{Action, RouletteModel};
use crate::i18n;
use yew::prelude::*;

#[cfg(target_arch = "wasm32")]
use crate::game::FIRE_DELAY_MS;
#[cfg(target_arch = "wasm32")]
use gloo::timers::future::TimeoutFuture;
#[cfg(target_arch = "wasm32")]
use wasm_bindgen_futures::spawn_local;

#[derive(Properties, Clone, PartialEq)]
pub struct Props {
    /// Client entropy the first session is dealt from.
    pub entropy: u64,
}

/// The game widget: status, chambers, controls and round history.
#[function_component(RouletteGame)]
pub fn roulette_game(props: &Props) -> Html {
    let entropy = props.entropy;
    let model = use_reducer(move || RouletteModel::new(entropy));
    let session = model.session();

    // One deferred resolution per accepted trigger. A reset in the meantime
    // turns it into a stale ticket, which the reducer ignores.
    {
        let dispatcher = model.dispatcher();
        use_effect_with(session.pending(), move |pending| {
            #[cfg(target_arch = "wasm32")]
            {
                if let Some(ticket) = *pending {
                    spawn_local(async move {
                        TimeoutFuture::new(FIRE_DELAY_MS).await;
                        dispatcher.dispatch(Action::Resolve(ticket));
                    });
                }
            }
            #[cfg(not(target_arch = "wasm32"))]
            {
                let _ = (pending, dispatcher);
            }
            || {}
        });
    }

    let on_fire = {
        let dispatcher = model.dispatcher();
        Callback::from(move |_: MouseEvent| dispatcher.dispatch(Action::Trigger))
    };
    let on_reset = {
        let dispatcher = model.dispatcher();
        Callback::from(move |_: MouseEvent| dispatcher.dispatch(Action::Reset))
    };

    let fire_label = if session.is_in_flight() {
        i18n::t("controls.firing")
    } else {
        i18n::t("controls.fire")
    };

    html! {
        <div class="roulette" data-generation={session.generation().to_string()}>
            <h1 class="roulette__title">{ i18n::t("app.title") }</h1>
            <StatusBanner status={session.status()} />
            <ChamberRing marks={session.chamber_marks()} />
            <div class="controls">
                <Button
                    id={AttrValue::from("fire-btn")}
                    class={classes!("btn--fire")}
                    label={AttrValue::from(fire_label)}
                    disabled={!session.can_fire()}
                    onclick={on_fire}
                />
                <Button
                    id={AttrValue::from("reset-btn")}
                    class={classes!("btn--reset")}
                    label={AttrValue::from(i18n::t("controls.reset"))}
                    onclick={on_reset}
                />
            </div>
            <HistoryList records={session.history().to_vec()} />
        </div>
    }
}
