use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use super::config::UserConfig;
use crate::poller::PollState;
use crate::ui::{Theme, Visual};

/// Something the event loop has to do outside of `App`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Quit,
    OpenUrl(String),
}

/// Everything the renderer reads.
pub struct App {
    pub poll_state: PollState,
    pub theme: Theme,
    pub header: String,
    pub wave_bars: bool,
    pub is_running: bool,
    /// Animation clock, advanced by ticks.
    pub elapsed_ms: u64,
}

impl App {
    pub fn new(config: &UserConfig) -> Self {
        Self {
            poll_state: PollState::Loading,
            theme: config.theme.clone(),
            header: config.header.clone(),
            wave_bars: config.wave_bars,
            is_running: true,
            elapsed_ms: 0,
        }
    }

    pub fn apply(&mut self, state: PollState) {
        self.poll_state = state;
    }

    pub fn on_tick(&mut self, since_start: Duration) {
        self.elapsed_ms = since_start.as_millis() as u64;
    }

    pub fn visual(&self) -> Visual<'_> {
        Visual::from(&self.poll_state)
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Option<Action> {
        if key.kind != KeyEventKind::Press {
            return None;
        }

        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => {
                self.is_running = false;
                Some(Action::Quit)
            }
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.is_running = false;
                Some(Action::Quit)
            }
            KeyCode::Char('o') => self.visual().song_url().map(|url| Action::OpenUrl(url.to_string())),
            _ => None,
        }
    }
}
