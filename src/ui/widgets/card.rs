use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Padding, Paragraph},
    Frame,
};

use crate::ui::utils::truncate;
use crate::ui::view::Visual;
use crate::ui::Theme;

const ART_WIDTH: u16 = 12;
const PULSE_MS: u64 = 500;

/// Album art slot plus track info.
pub fn render(f: &mut Frame, area: Rect, theme: &Theme, visual: Visual<'_>, elapsed_ms: u64) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(ART_WIDTH), Constraint::Min(1)])
        .split(area);

    render_art(f, chunks[0], theme, visual, elapsed_ms);
    render_info(f, chunks[1], theme, visual, elapsed_ms);
}

fn pulse_style(theme: &Theme, elapsed_ms: u64) -> Style {
    if (elapsed_ms / PULSE_MS) % 2 == 0 {
        Style::default().fg(theme.surface)
    } else {
        Style::default().fg(theme.overlay)
    }
}

fn render_art(f: &mut Frame, area: Rect, theme: &Theme, visual: Visual<'_>, elapsed_ms: u64) {
    let (glyph, style) = match visual {
        Visual::Loading => ("♪", pulse_style(theme, elapsed_ms)),
        Visual::NotPlaying | Visual::PlayingWithoutArt { .. } => {
            ("♪", Style::default().fg(theme.overlay))
        }
        Visual::Playing { .. } => (
            "▣",
            Style::default().fg(theme.accent).add_modifier(Modifier::BOLD),
        ),
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.surface));
    let inner = block.inner(area);
    f.render_widget(block, area);

    // vertically centre the glyph
    let pad = inner.height.saturating_sub(1) / 2;
    let mut lines = vec![Line::default(); pad as usize];
    lines.push(Line::from(Span::styled(glyph, style)));

    f.render_widget(Paragraph::new(lines).alignment(Alignment::Center), inner);
}

fn render_info(f: &mut Frame, area: Rect, theme: &Theme, visual: Visual<'_>, elapsed_ms: u64) {
    let width = area.width.saturating_sub(1) as usize;

    let lines = match visual {
        Visual::Loading => {
            let style = pulse_style(theme, elapsed_ms);
            vec![
                Line::default(),
                Line::from(Span::styled("▆".repeat(width * 4 / 5), style)),
                Line::from(Span::styled("▆".repeat(width * 2 / 3), style)),
            ]
        }
        Visual::NotPlaying => vec![
            Line::default(),
            Line::from(Span::styled(
                "Not Playing",
                Style::default().fg(theme.text).add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled("Stay tuned!", Style::default().fg(theme.subtext))),
        ],
        Visual::Playing {
            title,
            artist,
            song_url,
            ..
        }
        | Visual::PlayingWithoutArt {
            title,
            artist,
            song_url,
        } => vec![
            Line::default(),
            Line::from(Span::styled(
                truncate(title, width),
                Style::default().fg(theme.text).add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                truncate(artist, width),
                Style::default().fg(theme.subtext),
            )),
            Line::from(Span::styled(
                truncate(song_url, width),
                Style::default()
                    .fg(theme.overlay)
                    .add_modifier(Modifier::DIM | Modifier::UNDERLINED),
            )),
        ],
    };

    let info = Paragraph::new(lines).block(Block::default().padding(Padding::left(1)));
    f.render_widget(info, area);
}
