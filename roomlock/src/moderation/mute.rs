use crate::config::Config;
use crate::error::Error;
use crate::gateway::ParticipantStateGateway;
use crate::participant::Participant;
use crate::track;

use super::fanout::fan_out;
use super::report::{BulkReport, Outcome, SkipReason};
use super::{CallerContext, BULK_TARGET};

/// Mutes and unmutes participant tracks through the gateway.
///
/// Remote unmute only works when the transport has been configured to allow it; there is
/// intentionally no way to override that from here.
pub struct MuteTrackService<G> {
    gateway: G,
    config: Config,
}

impl<G: ParticipantStateGateway> MuteTrackService<G> {
    pub fn new(gateway: G, config: Config) -> Self {
        Self { gateway, config }
    }

    /// Mute or unmute a track of `target`. Without a `track_sid` the participant's
    /// microphone is used, and [`Error::TrackNotFound`] is returned when there is none. With
    /// [`BULK_TARGET`] the microphone of every active participant but the requester is
    /// targeted.
    #[tracing::instrument(skip(self, ctx), fields(room_id = %ctx.room_id()))]
    pub async fn set_mute(
        &self,
        ctx: &CallerContext,
        target: &str,
        track_sid: Option<&str>,
        muted: bool,
    ) -> Result<Outcome, Error> {
        if target == BULK_TARGET {
            return self.set_mute_all(ctx, muted).await.map(Outcome::Bulk);
        }

        let participant = self
            .gateway
            .load_participant(ctx.room_id(), target)
            .await?
            .filter(Participant::is_active)
            .ok_or(Error::TargetNotActive)?;

        let track_sid = track::resolve(participant.tracks(), track_sid)?;

        self.gateway
            .set_track_mute(ctx.room_id(), participant.identity(), &track_sid, muted)
            .await?;

        Ok(Outcome::Applied)
    }

    pub async fn set_mute_all(&self, ctx: &CallerContext, muted: bool) -> Result<BulkReport, Error> {
        let room_id = ctx.room_id();
        let participants = self.gateway.load_participants(room_id).await?;

        let mut report = BulkReport::default();
        let mut targets = vec![];
        for participant in participants {
            let identity = participant.identity();
            if identity == ctx.requester_id() {
                continue;
            }
            if !participant.is_active() {
                report.skip(identity, SkipReason::Inactive);
                continue;
            }
            match track::resolve(participant.tracks(), None) {
                Ok(track_sid) => {
                    targets.push((identity.to_string(), (identity.to_string(), track_sid)))
                }
                Err(_) => report.skip(identity, SkipReason::NoMicrophone),
            }
        }

        let results = fan_out(&self.config, targets, |(identity, track_sid)| async move {
            self.gateway
                .set_track_mute(room_id, &identity, &track_sid, muted)
                .await
        })
        .await;

        for (identity, result) in results {
            report.record(identity, result);
        }

        tracing::info!(
            muted,
            updated = report.updated().len(),
            failed = report.failed().len(),
            "room microphones updated"
        );

        Ok(report)
    }
}
