pub mod button;
pub mod chamber_ring;
pub mod history_list;
pub mod roulette;
pub mod status_banner;

pub use roulette::RouletteGame;
