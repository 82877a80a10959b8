//! Public character and corporation profiles.
//!
//! Profiles are replaced wholesale by primary identity on every fetch.

use crate::{
    data::{
        character::CharacterRepository, corporation::CorporationRepository, UpsertOutcome,
    },
    error::Error,
    model::esi::{CharacterProfile, CorporationProfile},
    reconciler::{ReconcileSummary, SyncContext},
};

pub async fn character_profile(ctx: &SyncContext<'_>) -> Result<ReconcileSummary, Error> {
    let path = ctx.path(&ctx.vars())?;
    let profile: CharacterProfile = ctx.esi_client.get_json(&path, None).await?;

    CharacterRepository::new(ctx.db)
        .upsert_profile(ctx.character_id, profile)
        .await?;

    let mut summary = ReconcileSummary::fetched(1);
    summary.record(UpsertOutcome::Updated);

    Ok(summary)
}

/// Fetches the character's corporation. A character without a known corporation is a no-op.
pub async fn corporation_profile(ctx: &SyncContext<'_>) -> Result<ReconcileSummary, Error> {
    let Some(corporation_id) = ctx.corporation_id().await? else {
        tracing::debug!(
            character_id = ctx.character_id,
            "Character has no corporation yet, skipping corporation profile"
        );
        return Ok(ReconcileSummary::default());
    };

    let path = ctx.path(&ctx.vars().with_corporation(Some(corporation_id)))?;
    let profile: CorporationProfile = ctx.esi_client.get_json(&path, None).await?;

    let corporation_repo = CorporationRepository::new(ctx.db);
    let outcome = match corporation_repo.get_by_corporation_id(corporation_id).await? {
        Some(_) => UpsertOutcome::Updated,
        None => UpsertOutcome::Inserted,
    };
    corporation_repo
        .upsert_profile(corporation_id, profile)
        .await?;

    let mut summary = ReconcileSummary::fetched(1);
    summary.record(outcome);

    Ok(summary)
}
