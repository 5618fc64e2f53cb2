pub mod layout;
pub mod theme;
pub mod utils;
pub mod view;
pub mod widgets;

pub use theme::Theme;
pub use view::Visual;

use crate::app::App;
use ratatui::{
    layout::Alignment,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};

/// Draw the whole widget. Reads `app`, never changes it.
pub fn ui(f: &mut Frame, app: &App) {
    let theme = &app.theme;
    let visual = app.visual();
    let main_layout = layout::get_main_layout(f.area());

    // 1. Card frame
    let border = if visual.is_playing() {
        theme.accent
    } else {
        theme.surface
    };
    let card = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .title(Line::from(Span::styled(
            format!(" {} ", app.header),
            Style::default().fg(theme.accent).add_modifier(Modifier::BOLD),
        )))
        .border_style(Style::default().fg(border));
    let inner = card.inner(main_layout.card_area);
    f.render_widget(card, main_layout.card_area);

    // 2. Art + info, wave bars underneath
    let card_layout = layout::get_card_layout(inner, app.wave_bars);
    widgets::card::render(f, card_layout.body, theme, visual, app.elapsed_ms);
    if let Some(bars) = card_layout.bars {
        widgets::wave_bars::render(f, bars, theme, app.elapsed_ms, visual.is_playing());
    }

    // 3. Footer
    let key = Style::default().fg(theme.overlay).add_modifier(Modifier::BOLD);
    let label = Style::default().fg(theme.overlay);
    let mut hint = vec![Span::styled(" q ", key), Span::styled("quit", label)];
    if visual.song_url().is_some() {
        hint.push(Span::styled("  o ", key));
        hint.push(Span::styled("open", label));
    }
    f.render_widget(
        Paragraph::new(Line::from(hint)).alignment(Alignment::Right),
        main_layout.footer_area,
    );
}
