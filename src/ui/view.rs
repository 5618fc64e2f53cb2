use std::fmt;

use crate::poller::PollState;

/// The four things the widget can look like.
///
/// Errors of every kind collapse into `NotPlaying`: the widget is decorative
/// and a broken endpoint must look exactly like an idle listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visual<'a> {
    Loading,
    NotPlaying,
    Playing {
        title: &'a str,
        artist: &'a str,
        song_url: &'a str,
        album_art_url: &'a str,
    },
    PlayingWithoutArt {
        title: &'a str,
        artist: &'a str,
        song_url: &'a str,
    },
}

impl<'a> From<&'a PollState> for Visual<'a> {
    fn from(state: &'a PollState) -> Self {
        match state {
            PollState::Loading => Visual::Loading,
            PollState::Idle | PollState::Error(_) => Visual::NotPlaying,
            PollState::Playing(track) => match track.album_art_url.as_deref() {
                Some(url) if track.has_album_art() => Visual::Playing {
                    title: &track.title,
                    artist: &track.artist,
                    song_url: &track.song_url,
                    album_art_url: url,
                },
                _ => Visual::PlayingWithoutArt {
                    title: &track.title,
                    artist: &track.artist,
                    song_url: &track.song_url,
                },
            },
        }
    }
}

impl<'a> Visual<'a> {
    pub fn is_playing(&self) -> bool {
        matches!(
            self,
            Visual::Playing { .. } | Visual::PlayingWithoutArt { .. }
        )
    }

    pub fn song_url(&self) -> Option<&'a str> {
        match *self {
            Visual::Playing { song_url, .. } | Visual::PlayingWithoutArt { song_url, .. } => {
                Some(song_url)
            }
            _ => None,
        }
    }
}

/// One-line form, used by `--plain`.
impl fmt::Display for Visual<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Visual::Loading => write!(f, "loading"),
            Visual::NotPlaying => write!(f, "not playing"),
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
            } => write!(f, "♪ {} - {} <{}>", title, artist, song_url),
        }
    }
}
