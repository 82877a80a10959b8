//! Wallet balances.

use sea_orm::TransactionTrait;

use crate::{
    data::wallet::WalletRepository,
    error::Error,
    model::esi::CorporationWalletBalance,
    reconciler::{ReconcileSummary, SyncContext},
};

/// `GET /characters/{character_id}/wallet/` returns the balance as a bare number.
pub async fn character_wallet(ctx: &SyncContext<'_>) -> Result<ReconcileSummary, Error> {
    let path = ctx.path(&ctx.vars())?;
    let balance: f64 = ctx.esi_client.get_json(&path, ctx.access_token).await?;

    let outcome = WalletRepository::new(ctx.db)
        .upsert_character_balance(ctx.character_id, balance)
        .await?;

    let mut summary = ReconcileSummary::fetched(1);
    summary.record(outcome);

    Ok(summary)
}

/// Balances of every wallet division of the character's corporation.
pub async fn corporation_wallets(ctx: &SyncContext<'_>) -> Result<ReconcileSummary, Error> {
    let Some(corporation_id) = ctx.corporation_id().await? else {
        return Ok(ReconcileSummary::default());
    };

    let path = ctx.path(&ctx.vars().with_corporation(Some(corporation_id)))?;
    let balances: Vec<CorporationWalletBalance> =
        ctx.esi_client.get_json(&path, ctx.access_token).await?;

    let txn = ctx.db.begin().await?;
    let outcomes = WalletRepository::new(&txn)
        .upsert_corporation_balances(corporation_id, &balances)
        .await?;
    txn.commit().await?;

    let mut summary = ReconcileSummary::fetched(balances.len() as u64);
    for outcome in outcomes {
        summary.record(outcome);
    }

    Ok(summary)
}
