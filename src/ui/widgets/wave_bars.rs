use ratatui::{layout::Rect, style::Style, widgets::Sparkline, Frame};

use crate::ui::Theme;

pub const BAR_COUNT: usize = 30;
pub const MIN_HEIGHT: u64 = 5;
pub const MAX_HEIGHT: u64 = 35;

const STAGGER_MS: u64 = 80;
const CYCLE_MS: u64 = 600;

/// Bar heights at `elapsed_ms` into the animation.
///
/// Bar `i` stays at rest for `i * 80ms`, then re-rolls its height every
/// cycle. Same inputs, same heights.
pub fn wave_heights(elapsed_ms: u64, count: usize) -> Vec<u64> {
    (0..count as u64)
        .map(|bar| {
            let delay = bar * STAGGER_MS;
            if elapsed_ms < delay {
                return MIN_HEIGHT;
            }
            let cycle = (elapsed_ms - delay) / CYCLE_MS;
            MIN_HEIGHT + scramble(bar, cycle) % (MAX_HEIGHT - MIN_HEIGHT + 1)
        })
        .collect()
}

// splitmix64 finaliser
fn scramble(bar: u64, cycle: u64) -> u64 {
    let mut z = bar
        .wrapping_mul(0x9E37_79B9_7F4A_7C15)
        .wrapping_add(cycle.wrapping_mul(0xBF58_476D_1CE4_E5B9));
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

pub fn render(f: &mut Frame, area: Rect, theme: &Theme, elapsed_ms: u64, playing: bool) {
    let heights = if playing {
        wave_heights(elapsed_ms, BAR_COUNT)
    } else {
        vec![MIN_HEIGHT; BAR_COUNT]
    };
    let color = if playing { theme.accent } else { theme.surface };

    let bars = Sparkline::default()
        .data(&heights)
        .max(MAX_HEIGHT)
        .style(Style::default().fg(color));
    f.render_widget(bars, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_heights_stay_in_range() {
        for t in (0..20_000).step_by(137) {
            for h in wave_heights(t, BAR_COUNT) {
                assert!((MIN_HEIGHT..=MAX_HEIGHT).contains(&h), "{} at {}", h, t);
            }
        }
    }

    #[test]
    fn test_bars_start_staggered() {
        let heights = wave_heights(0, BAR_COUNT);
        assert!(heights.iter().all(|&h| h == MIN_HEIGHT));

        // At 100ms only bars 0 and 1 have started.
        let heights = wave_heights(100, BAR_COUNT);
        assert!(heights[2..].iter().all(|&h| h == MIN_HEIGHT));
    }

    #[test]
    fn test_deterministic_and_moving() {
        assert_eq!(wave_heights(4_321, BAR_COUNT), wave_heights(4_321, BAR_COUNT));

        let frames: Vec<Vec<u64>> = (0..10).map(|c| wave_heights(3_000 + c * CYCLE_MS, BAR_COUNT)).collect();
        assert!(frames.windows(2).any(|w| w[0] != w[1]));
    }
}
