//! Moderation commands issued by room admins:
//! - lock or unlock a capability for one participant or for the whole room
//! - mute or unmute a participant track, or every microphone in the room
//! - remove a participant
//!
//! Every command is a read-modify-write against the gateway. Nothing here holds a lock on the
//! shared cache, so concurrent writers to the same blob resolve as last writer wins.
mod fanout;

pub mod context;
pub mod lock;
pub mod mute;
pub mod removal;
pub mod report;

pub use context::CallerContext;
pub use lock::LockPropagationService;
pub use mute::MuteTrackService;
pub use removal::ParticipantRemovalService;
pub use report::{BulkReport, Outcome, SkipReason};

use crate::config::Config;
use crate::error::Error;
use crate::gateway::ParticipantStateGateway;
use crate::lock::{Capability, LockDirection};
use crate::sync::Arc;

/// Reserved user id that targets every participant of the room except the requester
pub const BULK_TARGET: &str = "all";

/// Entry point for moderation commands. Validates the caller and dispatches to the
/// lock, mute and removal services, which share one gateway.
pub struct Moderation<G> {
    locks: LockPropagationService<Arc<G>>,
    mutes: MuteTrackService<Arc<G>>,
    removal: ParticipantRemovalService<Arc<G>>,
    config: Config,
}

impl<G: ParticipantStateGateway> Moderation<G> {
    pub fn new(gateway: G, config: Config) -> Self {
        Self::with_shared(Arc::new(gateway), config)
    }

    pub fn with_shared(gateway: Arc<G>, config: Config) -> Self {
        Self {
            locks: LockPropagationService::new(gateway.clone(), config.clone()),
            mutes: MuteTrackService::new(gateway.clone(), config.clone()),
            removal: ParticipantRemovalService::new(gateway),
            config,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn locks(&self) -> &LockPropagationService<Arc<G>> {
        &self.locks
    }

    pub fn mutes(&self) -> &MuteTrackService<Arc<G>> {
        &self.mutes
    }

    pub fn removal(&self) -> &ParticipantRemovalService<Arc<G>> {
        &self.removal
    }
}

impl<G: ParticipantStateGateway> Moderation<G> {
    /// Lock or unlock a capability given by its command names (eg `"mic"` and `"lock"`).
    ///
    /// Unrecognized names merge as a no-op, unless the config asks for strict commands. The
    /// target checks and the rewrite still run either way.
    pub async fn update_lock(
        &self,
        ctx: &CallerContext,
        user_id: &str,
        service: &str,
        direction: &str,
    ) -> Result<Outcome, Error> {
        ctx.validate()?;

        let command = service
            .parse::<Capability>()
            .and_then(|capability| Ok((capability, direction.parse::<LockDirection>()?)));

        match command {
            Ok((capability, direction)) => {
                self.locks
                    .update_lock(ctx, capability, direction, user_id)
                    .await
            }
            Err(e) if self.config.strict_commands() => Err(e),
            Err(e) => {
                tracing::warn!(
                    room_id = %ctx.room_id(),
                    %user_id,
                    error = %e,
                    "unrecognized lock command, settings are left as is"
                );
                self.locks
                    .update_lock_command(ctx, service, direction, user_id)
                    .await
            }
        }
    }

    /// Mute or unmute a track. Without `track_sid` the target's microphone is used, and a
    /// single target with no microphone fails with [`Error::TrackNotFound`].
    pub async fn set_mute(
        &self,
        ctx: &CallerContext,
        user_id: &str,
        track_sid: Option<&str>,
        muted: bool,
    ) -> Result<Outcome, Error> {
        ctx.validate()?;
        self.mutes.set_mute(ctx, user_id, track_sid, muted).await
    }

    pub async fn remove(&self, ctx: &CallerContext, user_id: &str) -> Result<(), Error> {
        ctx.validate()?;
        self.removal.remove(ctx, user_id).await
    }
}
