use crate::game::{CHAMBER_COUNT, ChamberMark};
use yew::prelude::*;

const LOADED_GLYPH: &str = "⚪";
const FATAL_GLYPH: &str = "💥";
const POINTER_GLYPH: &str = "⬆️";

#[derive(Properties, Clone, PartialEq)]
pub struct Props {
    pub marks: [ChamberMark; CHAMBER_COUNT as usize],
}

const fn glyph(mark: ChamberMark) -> &'static str {
    match mark {
        ChamberMark::Fatal => FATAL_GLYPH,
        ChamberMark::Idle | ChamberMark::Current | ChamberMark::Spent => LOADED_GLYPH,
    }
}

const fn mark_class(mark: ChamberMark) -> &'static str {
    match mark {
        ChamberMark::Idle => "chamber--idle",
        ChamberMark::Current => "chamber--current",
        ChamberMark::Spent => "chamber--spent",
        ChamberMark::Fatal => "chamber--fatal",
    }
}

/// Six chamber indicators with a pointer under the hammer.
#[function_component(ChamberRing)]
pub fn chamber_ring(p: &Props) -> Html {
    html! {
        <ol class="chambers" id="chambers">
            { for p.marks.iter().enumerate().map(|(idx, mark)| {
                let under_hammer = matches!(mark, ChamberMark::Current | ChamberMark::Fatal);
                html! {
                    <li key={idx} class={classes!("chamber", mark_class(*mark))} data-chamber={idx.to_string()}>
                        { glyph(*mark) }
                        if under_hammer {
                            <span class="chamber__pointer" aria-hidden="true">{ POINTER_GLYPH }</span>
                        }
                    </li>
                }
            }) }
        </ol>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;
    use yew::LocalServerRenderer;

    #[test]
    fn fatal_chamber_shows_explosion_and_pointer() {
        let marks = [
            ChamberMark::Spent,
            ChamberMark::Fatal,
            ChamberMark::Idle,
            ChamberMark::Idle,
            ChamberMark::Idle,
            ChamberMark::Idle,
        ];
        let html = block_on(LocalServerRenderer::<ChamberRing>::with_props(Props { marks }).render());
        assert_eq!(html.matches(FATAL_GLYPH).count(), 1);
        assert_eq!(html.matches(LOADED_GLYPH).count(), 5);
        assert_eq!(html.matches("chamber__pointer").count(), 1);
        assert!(html.contains("chamber--spent"));
    }
}
