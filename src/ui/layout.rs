use ratatui::layout::{Constraint, Direction, Layout, Rect};

pub struct MainLayout {
    pub card_area: Rect,
    pub footer_area: Rect,
}

/// Card on top, one line of key hints below.
pub fn get_main_layout(area: Rect) -> MainLayout {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(area);

    MainLayout {
        card_area: chunks[0],
        footer_area: chunks[1],
    }
}

pub struct CardLayout {
    pub body: Rect,
    pub bars: Option<Rect>,
}

/// Split the inside of the card. The wave bars need at least
/// eight rows of card before they get their own strip.
pub fn get_card_layout(inner: Rect, wave_bars: bool) -> CardLayout {
    if !wave_bars || inner.height < 8 {
        return CardLayout {
            body: inner,
            bars: None,
        };
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(5), Constraint::Length(2)])
        .split(inner);

    CardLayout {
        body: chunks[0],
        bars: Some(chunks[1]),
    }
}
