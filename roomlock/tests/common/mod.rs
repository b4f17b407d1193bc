#![allow(dead_code)]
use std::collections::HashSet;

use async_trait::async_trait;
use bytes::Bytes;
use roomlock::error::Error;
use roomlock::gateway::ParticipantStateGateway;
use roomlock::lock::{Capability, LockFlag};
use roomlock::metadata::{LockMetadata, ParticipantMetadata, RoomMetadata};
use roomlock::participant::{Participant, ParticipantState};
use roomlock::sync::Mutex;
use roomlock::track::{MediaTrack, TrackSource};

pub const ROOM: &str = "room-1";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    LoadParticipant(String),
    LoadParticipants,
    LoadRoomMetadata,
    WriteParticipantMetadata(String),
    WriteRoomMetadata,
    SetTrackMute {
        user_id: String,
        track_sid: String,
        muted: bool,
    },
    RemoveParticipant(String),
}

/// Gateway backed by a fixed participant list that records every call and can be told to fail
#[derive(Default)]
pub struct TestGateway {
    participants: Mutex<Vec<Participant>>,
    room_metadata: Mutex<Bytes>,
    calls: Mutex<Vec<Call>>,
    failing: Mutex<HashSet<String>>,
    stalled: Mutex<HashSet<String>>,
    fail_room_write: Mutex<bool>,
}

impl TestGateway {
    pub fn new(participants: Vec<Participant>) -> Self {
        Self {
            participants: Mutex::new(participants),
            ..Default::default()
        }
    }

    pub fn with_room_metadata(self, metadata: impl Into<Bytes>) -> Self {
        *self.room_metadata.lock() = metadata.into();
        self
    }

    /// Writes and mutes for `identity` fail with a gateway error
    pub fn fail_for(self, identity: &str) -> Self {
        self.failing.lock().insert(identity.to_string());
        self
    }

    /// Writes and mutes for `identity` never complete
    pub fn stall_for(self, identity: &str) -> Self {
        self.stalled.lock().insert(identity.to_string());
        self
    }

    pub fn fail_room_write(self) -> Self {
        *self.fail_room_write.lock() = true;
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().clone()
    }

    pub fn writes(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                Call::WriteParticipantMetadata(id) => Some(id),
                _ => None,
            })
            .collect()
    }

    pub fn mutes(&self) -> Vec<(String, String, bool)> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                Call::SetTrackMute {
                    user_id,
                    track_sid,
                    muted,
                } => Some((user_id, track_sid, muted)),
                _ => None,
            })
            .collect()
    }

    pub fn participant_lock(&self, identity: &str, capability: Capability) -> LockFlag {
        let participants = self.participants.lock();
        let participant = participants
            .iter()
            .find(|p| p.identity() == identity)
            .expect("participant exist");
        ParticipantMetadata::decode(participant.metadata())
            .expect("valid metadata")
            .lock_settings()
            .get(capability)
    }

    pub fn participant_metadata(&self, identity: &str) -> ParticipantMetadata {
        let participants = self.participants.lock();
        let participant = participants
            .iter()
            .find(|p| p.identity() == identity)
            .expect("participant exist");
        ParticipantMetadata::decode(participant.metadata()).expect("valid metadata")
    }

    pub fn room_lock(&self, capability: Capability) -> LockFlag {
        RoomMetadata::decode(&self.room_metadata.lock())
            .expect("valid metadata")
            .default_lock_settings()
            .get(capability)
    }

    fn log(&self, call: Call) {
        self.calls.lock().push(call);
    }

    async fn check(&self, identity: &str) -> Result<(), Error> {
        let stalled = self.stalled.lock().contains(identity);
        if stalled {
            futures::future::pending::<()>().await;
        }
        let failing = self.failing.lock().contains(identity);
        if failing {
            return Err(Error::Gateway(format!("write to {identity} rejected")));
        }
        Ok(())
    }
}

#[async_trait]
impl ParticipantStateGateway for TestGateway {
    async fn load_participant(
        &self,
        _room_id: &str,
        user_id: &str,
    ) -> Result<Option<Participant>, Error> {
        self.log(Call::LoadParticipant(user_id.to_string()));
        let participant = self
            .participants
            .lock()
            .iter()
            .find(|p| p.identity() == user_id)
            .cloned();
        Ok(participant)
    }

    async fn load_participants(&self, _room_id: &str) -> Result<Vec<Participant>, Error> {
        self.log(Call::LoadParticipants);
        Ok(self.participants.lock().clone())
    }

    async fn load_room_metadata(&self, _room_id: &str) -> Result<Bytes, Error> {
        self.log(Call::LoadRoomMetadata);
        Ok(self.room_metadata.lock().clone())
    }

    async fn write_participant_metadata(
        &self,
        _room_id: &str,
        user_id: &str,
        metadata: Bytes,
    ) -> Result<(), Error> {
        self.log(Call::WriteParticipantMetadata(user_id.to_string()));
        self.check(user_id).await?;
        let mut participants = self.participants.lock();
        if let Some(participant) = participants.iter_mut().find(|p| p.identity() == user_id) {
            *participant = participant.clone().with_metadata(metadata);
        }
        Ok(())
    }

    async fn write_room_metadata(&self, _room_id: &str, metadata: Bytes) -> Result<(), Error> {
        self.log(Call::WriteRoomMetadata);
        if *self.fail_room_write.lock() {
            return Err(Error::Gateway("room metadata rejected".into()));
        }
        *self.room_metadata.lock() = metadata;
        Ok(())
    }

    async fn set_track_mute(
        &self,
        _room_id: &str,
        user_id: &str,
        track_sid: &str,
        muted: bool,
    ) -> Result<(), Error> {
        self.log(Call::SetTrackMute {
            user_id: user_id.to_string(),
            track_sid: track_sid.to_string(),
            muted,
        });
        self.check(user_id).await
    }

    async fn remove_participant(&self, _room_id: &str, user_id: &str) -> Result<(), Error> {
        self.log(Call::RemoveParticipant(user_id.to_string()));
        self.check(user_id).await
    }
}

pub fn active(identity: &str) -> Participant {
    Participant::new(identity, ParticipantState::Active)
}

pub fn with_microphone(participant: Participant, sid: &str) -> Participant {
    participant.with_tracks(vec![
        MediaTrack::new(format!("{sid}-cam"), TrackSource::Camera),
        MediaTrack::new(sid, TrackSource::Microphone),
    ])
}
