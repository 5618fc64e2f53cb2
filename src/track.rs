use serde::{Deserialize, Serialize};
use thiserror::Error;

/// What the now-playing endpoint reports for the current track.
///
/// Field values are kept exactly as received; the URLs are opaque link and
/// image targets and are never normalised.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackSnapshot {
    pub title: String,
    pub artist: String,
    #[serde(rename = "songUrl")]
    pub song_url: String,
    /// Missing on tracks without artwork (local files, some podcasts).
    #[serde(rename = "albumImageUrl", alias = "albumArtUrl", default)]
    pub album_art_url: Option<String>,
}

#[derive(Debug, Error)]
pub enum TrackParseError {
    #[error("invalid track json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("track field `{0}` is empty")]
    EmptyField(&'static str),
}

impl TrackSnapshot {
    /// Parse a response body from the now-playing endpoint.
    pub fn from_json(body: &[u8]) -> Result<Self, TrackParseError> {
        let track: TrackSnapshot = serde_json::from_slice(body)?;
        if track.title.trim().is_empty() {
            return Err(TrackParseError::EmptyField("title"));
        }
        if track.artist.trim().is_empty() {
            return Err(TrackParseError::EmptyField("artist"));
        }
        Ok(track)
    }

    pub fn has_album_art(&self) -> bool {
        self.album_art_url
            .as_deref()
            .map(|url| !url.trim().is_empty())
            .unwrap_or(false)
    }
}
