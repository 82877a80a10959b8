//! Corporation hangar and wallet division names.

use entity::corporation_division::DivisionKind;
use sea_orm::TransactionTrait;

use crate::{
    data::division::DivisionRepository,
    error::Error,
    model::esi::CorporationDivisions,
    reconciler::{ReconcileSummary, SyncContext},
};

/// Upserts both division lists by `(corporation, kind, division)`.
///
/// A character whose corporation is not known yet is a no-op success.
pub async fn corporation_divisions(ctx: &SyncContext<'_>) -> Result<ReconcileSummary, Error> {
    let Some(corporation_id) = ctx.corporation_id().await? else {
        tracing::debug!(
            character_id = ctx.character_id,
            "Character has no corporation yet, skipping divisions"
        );
        return Ok(ReconcileSummary::default());
    };

    let path = ctx.path(&ctx.vars().with_corporation(Some(corporation_id)))?;
    let divisions: CorporationDivisions = ctx.esi_client.get_json(&path, ctx.access_token).await?;

    let txn = ctx.db.begin().await?;
    let division_repo = DivisionRepository::new(&txn);
    let hangar = division_repo
        .upsert_many(corporation_id, DivisionKind::Hangar, &divisions.hangar)
        .await?;
    let wallet = division_repo
        .upsert_many(corporation_id, DivisionKind::Wallet, &divisions.wallet)
        .await?;
    txn.commit().await?;

    Ok(ReconcileSummary {
        fetched: (divisions.hangar.len() + divisions.wallet.len()) as u64,
        inserted: hangar.inserted + wallet.inserted,
        updated: hangar.updated + wallet.updated,
    })
}
