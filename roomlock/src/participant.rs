use bytes::Bytes;
use derive_more::Display;
use serde::{Deserialize, Serialize};

use crate::track::MediaTrack;

/// Connection state of a participant as reported by the session manager
#[derive(Default, Display, Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ParticipantState {
    #[default]
    #[display(fmt = "JOINING")]
    Joining,
    #[display(fmt = "JOINED")]
    Joined,
    #[display(fmt = "ACTIVE")]
    Active,
    #[display(fmt = "DISCONNECTED")]
    Disconnected,
}

/// Snapshot of a participant loaded from the gateway
#[derive(Default, Debug, Clone, PartialEq, Eq)]
pub struct Participant {
    identity: String,
    state: ParticipantState,
    metadata: Bytes,
    tracks: Vec<MediaTrack>,
}

impl Participant {
    pub fn new(identity: impl Into<String>, state: ParticipantState) -> Self {
        Self {
            identity: identity.into(),
            state,
            ..Default::default()
        }
    }

    pub fn with_metadata(mut self, metadata: impl Into<Bytes>) -> Self {
        self.metadata = metadata.into();
        self
    }

    pub fn with_tracks(mut self, tracks: Vec<MediaTrack>) -> Self {
        self.tracks = tracks;
        self
    }
}

impl Participant {
    pub fn identity(&self) -> &str {
        &self.identity
    }

    pub fn state(&self) -> ParticipantState {
        self.state
    }

    /// Metadata blob as held by the cache at load time
    pub fn metadata(&self) -> &Bytes {
        &self.metadata
    }

    pub fn tracks(&self) -> &[MediaTrack] {
        &self.tracks
    }

    /// Only active participants can be moderated
    pub fn is_active(&self) -> bool {
        self.state == ParticipantState::Active
    }
}
