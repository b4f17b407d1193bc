use derive_more::Display;
use serde::{Deserialize, Serialize};

use crate::error::Error;

#[derive(Default, Display, Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TrackSource {
    #[default]
    #[display(fmt = "UNKNOWN")]
    Unknown,
    #[display(fmt = "CAMERA")]
    Camera,
    #[display(fmt = "MICROPHONE")]
    Microphone,
    #[display(fmt = "SCREEN_SHARE")]
    ScreenShare,
    #[display(fmt = "SCREEN_SHARE_AUDIO")]
    ScreenShareAudio,
}

/// A media track published by a participant
#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaTrack {
    sid: String,
    source: TrackSource,
    muted: bool,
}

impl MediaTrack {
    pub fn new(sid: impl Into<String>, source: TrackSource) -> Self {
        Self {
            sid: sid.into(),
            source,
            muted: false,
        }
    }

    pub fn sid(&self) -> &str {
        &self.sid
    }

    pub fn source(&self) -> TrackSource {
        self.source
    }

    pub fn muted(&self) -> bool {
        self.muted
    }

    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }
}

/// Resolve the track a mute command applies to.
///
/// A non-empty `explicit` sid is returned as is without checking that it belongs to `tracks`;
/// the gateway rejects it later if it does not exist. Otherwise the first microphone track in
/// `tracks` is selected.
pub fn resolve(tracks: &[MediaTrack], explicit: Option<&str>) -> Result<String, Error> {
    if let Some(sid) = explicit.filter(|sid| !sid.is_empty()) {
        return Ok(sid.to_string());
    }

    tracks
        .iter()
        .find(|track| track.source == TrackSource::Microphone)
        .map(|track| track.sid.clone())
        .ok_or(Error::TrackNotFound)
}

#[cfg(test)]
mod test {
    use super::*;

    fn tracks() -> Vec<MediaTrack> {
        vec![
            MediaTrack::new("t1", TrackSource::Camera),
            MediaTrack::new("t2", TrackSource::Microphone),
            MediaTrack::new("t3", TrackSource::Microphone),
        ]
    }

    #[test]
    fn defaults_to_first_microphone() {
        assert_eq!(resolve(&tracks(), None).unwrap(), "t2");
        assert_eq!(resolve(&tracks(), Some("")).unwrap(), "t2");
    }

    #[test]
    fn explicit_sid_is_not_validated() {
        assert_eq!(resolve(&tracks(), Some("t9")).unwrap(), "t9");
        assert_eq!(resolve(&[], Some("t1")).unwrap(), "t1");
    }

    #[test]
    fn no_microphone() {
        assert!(matches!(resolve(&[], None), Err(Error::TrackNotFound)));

        let tracks = [
            MediaTrack::new("t1", TrackSource::Camera),
            MediaTrack::new("t4", TrackSource::ScreenShareAudio),
        ];
        assert!(matches!(resolve(&tracks, Some("")), Err(Error::TrackNotFound)));
    }
}
