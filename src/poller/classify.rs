use super::source::{RawResponse, TransportError};
use super::state::{PollError, PollState};
use crate::track::TrackSnapshot;

const NO_CONTENT: u16 = 204;

/// Whether a response with this status gets its body parsed.
pub fn needs_body(status: u16) -> bool {
    (200..300).contains(&status) && status != NO_CONTENT
}

/// Turn one completed fetch into the next `PollState`.
pub fn classify(outcome: Result<RawResponse, TransportError>) -> PollState {
    let response = match outcome {
        Ok(response) => response,
        Err(err) => return PollState::Error(PollError::Transport(err.to_string())),
    };

    if response.status == NO_CONTENT {
        return PollState::Idle;
    }
    if !needs_body(response.status) {
        return PollState::Error(PollError::Status(response.status));
    }

    match TrackSnapshot::from_json(&response.body) {
        Ok(track) => PollState::Playing(track),
        Err(err) => PollState::Error(PollError::MalformedPayload(err.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::poller::state::PollErrorKind;

    const SAMPLE: &str =
        r#"{"title":"A","artist":"B","songUrl":"http://x","albumImageUrl":"http://y"}"#;

    #[test]
    fn test_no_content_is_idle_even_with_a_body() {
        assert_eq!(classify(Ok(RawResponse::no_content())), PollState::Idle);
        assert_eq!(classify(Ok(RawResponse::new(204, SAMPLE))), PollState::Idle);
    }

    #[test]
    fn test_error_statuses_are_content_absent() {
        for status in [400, 401, 404, 429, 500, 502, 503, 599] {
            let state = classify(Ok(RawResponse::new(status, SAMPLE)));
            match state {
                PollState::Error(err) => {
                    assert_eq!(err, PollError::Status(status));
                    assert_eq!(err.kind(), PollErrorKind::ContentAbsent);
                }
                other => panic!("status {} gave {:?}", status, other),
            }
        }
    }

    #[test]
    fn test_redirect_status_is_not_parsed() {
        let state = classify(Ok(RawResponse::new(304, SAMPLE)));
        assert_eq!(state, PollState::Error(PollError::Status(304)));
    }

    #[test]
    fn test_ok_with_track_is_playing() {
        let state = classify(Ok(RawResponse::new(200, SAMPLE)));
        let expected = TrackSnapshot {
            title: "A".to_string(),
            artist: "B".to_string(),
            song_url: "http://x".to_string(),
            album_art_url: Some("http://y".to_string()),
        };
        assert_eq!(state, PollState::Playing(expected));
    }

    #[test]
    fn test_ok_with_garbage_is_malformed() {
        let state = classify(Ok(RawResponse::new(200, "not json")));
        match state {
            PollState::Error(err) => {
                assert_eq!(err.kind(), PollErrorKind::MalformedPayload);
                assert!(err.to_string().starts_with("malformed payload"));
            }
            other => panic!("expected malformed payload, got {:?}", other),
        }
    }

    #[test]
    fn test_ok_with_empty_body_is_malformed() {
        let state = classify(Ok(RawResponse::new(200, Vec::new())));
        assert!(matches!(
            state,
            PollState::Error(PollError::MalformedPayload(_))
        ));
    }

    #[test]
    fn test_transport_failure() {
        let state = classify(Err(TransportError::Timeout));
        match state {
            PollState::Error(err) => {
                assert_eq!(err.kind(), PollErrorKind::TransportError);
                assert_eq!(err.to_string(), "fetch failed: request timed out");
            }
            other => panic!("expected transport error, got {:?}", other),
        }
    }

    #[test]
    fn test_needs_body() {
        assert!(needs_body(200));
        assert!(needs_body(203));
        assert!(!needs_body(204));
        assert!(!needs_body(301));
        assert!(!needs_body(404));
    }
}
