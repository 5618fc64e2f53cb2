use crossterm::event::Event;

use crate::poller::PollState;

pub enum AppEvent {
    Input(Event),
    Poll(PollState),
    Tick,
}
