pub mod card;
pub mod wave_bars;
