use std::collections::HashMap;

use async_trait::async_trait;
use bytes::Bytes;
use indexmap::IndexMap;
use roomlock::error::Error;
use roomlock::gateway::ParticipantStateGateway;
use roomlock::participant::{Participant, ParticipantState};
use roomlock::sync::{Arc, RwLock};
use roomlock::track::MediaTrack;
use roomlock::Extension;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, Default)]
struct Versioned {
    blob: Bytes,
    version: u64,
}

impl Versioned {
    fn new(blob: Bytes) -> Self {
        Self { blob, version: 1 }
    }

    fn replace(&mut self, blob: Bytes) -> u64 {
        self.blob = blob;
        self.version += 1;
        self.version
    }
}

#[derive(Debug, Clone)]
struct ParticipantEntry {
    state: ParticipantState,
    metadata: Versioned,
    tracks: Vec<MediaTrack>,
}

impl ParticipantEntry {
    fn snapshot(&self, identity: &str) -> Participant {
        Participant::new(identity, self.state)
            .with_metadata(self.metadata.blob.clone())
            .with_tracks(self.tracks.clone())
    }
}

#[derive(Debug, Clone, Default)]
struct RoomEntry {
    metadata: Versioned,
    participants: IndexMap<String, ParticipantEntry>,
}

impl RoomEntry {
    fn participant_mut(&mut self, identity: &str) -> Result<&mut ParticipantEntry> {
        self.participants
            .get_mut(identity)
            .ok_or(Error::ParticipantNotFound)
    }
}

/// In-process stand-in for the shared session cache.
///
/// Room and participant metadata are versioned blobs; every write replaces the blob and bumps
/// the version. The seeding functions play the part of the session manager, which owns room
/// creation and participant lifecycle.
#[derive(Clone, Default)]
pub struct MemoryGateway {
    rooms: Arc<RwLock<HashMap<String, RoomEntry>>>,
}

impl Extension for MemoryGateway {
    fn id(&self) -> String {
        String::from("roomlock-gateway-memory")
    }

    fn name(&self) -> String {
        String::from("In-Memory Session Gateway")
    }
}

impl MemoryGateway {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn create_room(&self, room_id: &str, metadata: impl Into<Bytes>) {
        let room = RoomEntry {
            metadata: Versioned::new(metadata.into()),
            ..Default::default()
        };
        self.rooms.write().insert(room_id.to_string(), room);
    }

    pub fn add_participant(
        &self,
        room_id: &str,
        identity: &str,
        state: ParticipantState,
        metadata: impl Into<Bytes>,
    ) -> Result<()> {
        let mut rooms = self.rooms.write();
        let room = rooms.get_mut(room_id).ok_or(Error::RoomNotFound)?;
        room.participants.insert(
            identity.to_string(),
            ParticipantEntry {
                state,
                metadata: Versioned::new(metadata.into()),
                tracks: vec![],
            },
        );
        Ok(())
    }

    pub fn publish_track(&self, room_id: &str, identity: &str, track: MediaTrack) -> Result<()> {
        let mut rooms = self.rooms.write();
        let room = rooms.get_mut(room_id).ok_or(Error::RoomNotFound)?;
        room.participant_mut(identity)?.tracks.push(track);
        Ok(())
    }

    pub fn set_state(&self, room_id: &str, identity: &str, state: ParticipantState) -> Result<()> {
        let mut rooms = self.rooms.write();
        let room = rooms.get_mut(room_id).ok_or(Error::RoomNotFound)?;
        room.participant_mut(identity)?.state = state;
        Ok(())
    }

    pub fn room_version(&self, room_id: &str) -> Option<u64> {
        self.rooms
            .read()
            .get(room_id)
            .map(|room| room.metadata.version)
    }

    pub fn participant_version(&self, room_id: &str, identity: &str) -> Option<u64> {
        self.rooms
            .read()
            .get(room_id)
            .and_then(|room| room.participants.get(identity))
            .map(|participant| participant.metadata.version)
    }

    pub fn track(&self, room_id: &str, identity: &str, track_sid: &str) -> Option<MediaTrack> {
        self.rooms
            .read()
            .get(room_id)
            .and_then(|room| room.participants.get(identity))
            .and_then(|participant| participant.tracks.iter().find(|t| t.sid() == track_sid))
            .cloned()
    }
}

#[async_trait]
impl ParticipantStateGateway for MemoryGateway {
    async fn load_participant(&self, room_id: &str, user_id: &str) -> Result<Option<Participant>> {
        let rooms = self.rooms.read();
        let room = rooms.get(room_id).ok_or(Error::RoomNotFound)?;
        Ok(room
            .participants
            .get(user_id)
            .map(|participant| participant.snapshot(user_id)))
    }

    async fn load_participants(&self, room_id: &str) -> Result<Vec<Participant>> {
        let rooms = self.rooms.read();
        let room = rooms.get(room_id).ok_or(Error::RoomNotFound)?;
        Ok(room
            .participants
            .iter()
            .map(|(identity, participant)| participant.snapshot(identity))
            .collect())
    }

    async fn load_room_metadata(&self, room_id: &str) -> Result<Bytes> {
        let rooms = self.rooms.read();
        let room = rooms.get(room_id).ok_or(Error::RoomNotFound)?;
        Ok(room.metadata.blob.clone())
    }

    async fn write_participant_metadata(
        &self,
        room_id: &str,
        user_id: &str,
        metadata: Bytes,
    ) -> Result<()> {
        let mut rooms = self.rooms.write();
        let room = rooms.get_mut(room_id).ok_or(Error::RoomNotFound)?;
        let participant = room.participant_mut(user_id)?;
        if participant.state != ParticipantState::Active {
            return Err(Error::TargetNotActive);
        }
        let version = participant.metadata.replace(metadata);
        tracing::debug!(%room_id, identity = %user_id, version, "participant metadata replaced");
        Ok(())
    }

    async fn write_room_metadata(&self, room_id: &str, metadata: Bytes) -> Result<()> {
        let mut rooms = self.rooms.write();
        let room = rooms.get_mut(room_id).ok_or(Error::RoomNotFound)?;
        let version = room.metadata.replace(metadata);
        tracing::debug!(%room_id, version, "room metadata replaced");
        Ok(())
    }

    async fn set_track_mute(
        &self,
        room_id: &str,
        user_id: &str,
        track_sid: &str,
        muted: bool,
    ) -> Result<()> {
        let mut rooms = self.rooms.write();
        let room = rooms.get_mut(room_id).ok_or(Error::RoomNotFound)?;
        let track = room
            .participant_mut(user_id)?
            .tracks
            .iter_mut()
            .find(|track| track.sid() == track_sid)
            .ok_or(Error::TrackNotFound)?;
        track.set_muted(muted);
        Ok(())
    }

    async fn remove_participant(&self, room_id: &str, user_id: &str) -> Result<()> {
        let mut rooms = self.rooms.write();
        let room = rooms.get_mut(room_id).ok_or(Error::RoomNotFound)?;
        room.participants
            .shift_remove(user_id)
            .ok_or(Error::ParticipantNotFound)?;
        Ok(())
    }
}
