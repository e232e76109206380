use crate::game::{Outcome, RoundRecord};
use crate::i18n;
use std::collections::BTreeMap;
use yew::prelude::*;

#[derive(Properties, Clone, PartialEq)]
pub struct Props {
    pub records: Vec<RoundRecord>,
}

fn round_label(round: u32) -> String {
    let round = round.to_string();
    let mut vars = BTreeMap::new();
    vars.insert("round", round.as_str());
    i18n::tr("history.round", Some(&vars))
}

const fn outcome_key(outcome: Outcome) -> &'static str {
    match outcome {
        Outcome::Safe => "history.safe",
        Outcome::Fatal => "history.fatal",
    }
}

#[function_component(HistoryList)]
pub fn history_list(p: &Props) -> Html {
    html! {
        <section class="history" aria-labelledby="history-title">
            <h2 class="history__title" id="history-title">{ i18n::t("history.title") }</h2>
            <ul class="history__list" id="history">
                { for p.records.iter().map(|record| html! {
                    <li key={record.round} class="history__item" data-outcome={outcome_key(record.outcome)}>
                        <span class="history__round">{ round_label(record.round) }</span>
                        <span>{ i18n::t(outcome_key(record.outcome)) }</span>
                    </li>
                }) }
            </ul>
        </section>
    }
}
