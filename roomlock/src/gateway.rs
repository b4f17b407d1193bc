use async_trait::async_trait;
use bytes::Bytes;

use crate::error::Error;
use crate::participant::Participant;
use crate::sync::Arc;

/// ParticipantStateGateway is the interface to the session manager and the shared cache that holds
/// room and participant state. Implementations own retries and transport concerns.
///
/// Anything returned is a snapshot that may already be stale by the time it is used; callers
/// must not assume that a write is visible to a later read.
#[async_trait]
pub trait ParticipantStateGateway: Send + Sync {
    /// Returns the participant, or `None` if the room has no participant with that identity
    async fn load_participant(
        &self,
        room_id: &str,
        user_id: &str,
    ) -> Result<Option<Participant>, Error>;

    /// Returns every participant of the room, in the order held by the cache
    async fn load_participants(&self, room_id: &str) -> Result<Vec<Participant>, Error>;

    /// Returns the room metadata blob
    async fn load_room_metadata(&self, room_id: &str) -> Result<Bytes, Error>;

    /// Replaces the participant metadata blob
    async fn write_participant_metadata(
        &self,
        room_id: &str,
        user_id: &str,
        metadata: Bytes,
    ) -> Result<(), Error>;

    /// Replaces the room metadata blob
    async fn write_room_metadata(&self, room_id: &str, metadata: Bytes) -> Result<(), Error>;

    /// Mutes or unmutes a published track.
    ///
    /// Note: unmuting a remote track depends on the transport allowing remote unmute, which is
    /// configured outside of this crate.
    async fn set_track_mute(
        &self,
        room_id: &str,
        user_id: &str,
        track_sid: &str,
        muted: bool,
    ) -> Result<(), Error>;

    /// Disconnects the participant from the room
    async fn remove_participant(&self, room_id: &str, user_id: &str) -> Result<(), Error>;
}

#[async_trait]
impl<T: ?Sized> ParticipantStateGateway for Arc<T>
where
    T: ParticipantStateGateway,
{
    async fn load_participant(
        &self,
        room_id: &str,
        user_id: &str,
    ) -> Result<Option<Participant>, Error> {
        (**self).load_participant(room_id, user_id).await
    }

    async fn load_participants(&self, room_id: &str) -> Result<Vec<Participant>, Error> {
        (**self).load_participants(room_id).await
    }

    async fn load_room_metadata(&self, room_id: &str) -> Result<Bytes, Error> {
        (**self).load_room_metadata(room_id).await
    }

    async fn write_participant_metadata(
        &self,
        room_id: &str,
        user_id: &str,
        metadata: Bytes,
    ) -> Result<(), Error> {
        (**self)
            .write_participant_metadata(room_id, user_id, metadata)
            .await
    }

    async fn write_room_metadata(&self, room_id: &str, metadata: Bytes) -> Result<(), Error> {
        (**self).write_room_metadata(room_id, metadata).await
    }

    async fn set_track_mute(
        &self,
        room_id: &str,
        user_id: &str,
        track_sid: &str,
        muted: bool,
    ) -> Result<(), Error> {
        (**self)
            .set_track_mute(room_id, user_id, track_sid, muted)
            .await
    }

    async fn remove_participant(&self, room_id: &str, user_id: &str) -> Result<(), Error> {
        (**self).remove_participant(room_id, user_id).await
    }
}
