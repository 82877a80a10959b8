//! Wallet market transactions, deduplicated like the journal.

use sea_orm::TransactionTrait;

use crate::{
    data::{division::DivisionRepository, transaction::TransactionRepository},
    error::Error,
    model::esi::WalletTransaction,
    reconciler::{ReconcileSummary, SyncContext},
};

pub async fn character_wallet_transactions(
    ctx: &SyncContext<'_>,
) -> Result<ReconcileSummary, Error> {
    let path = ctx.path(&ctx.vars())?;
    let transactions: Vec<WalletTransaction> =
        ctx.esi_client.get_json(&path, ctx.access_token).await?;
    let fetched = transactions.len() as u64;

    let txn = ctx.db.begin().await?;
    let inserted = TransactionRepository::new(&txn)
        .insert_missing_for_character(ctx.character_id, transactions)
        .await?;
    txn.commit().await?;

    Ok(ReconcileSummary {
        fetched,
        inserted,
        updated: 0,
    })
}

pub async fn corporation_wallet_transactions(
    ctx: &SyncContext<'_>,
) -> Result<ReconcileSummary, Error> {
    let Some(corporation_id) = ctx.corporation_id().await? else {
        return Ok(ReconcileSummary::default());
    };

    let divisions = DivisionRepository::new(ctx.db)
        .get_wallet_divisions(corporation_id)
        .await?;

    let mut responses = Vec::with_capacity(divisions.len());
    for division in divisions {
        let vars = ctx
            .vars()
            .with_corporation(Some(corporation_id))
            .with_division(division);
        let transactions: Vec<WalletTransaction> = ctx
            .esi_client
            .get_json(&ctx.path(&vars)?, ctx.access_token)
            .await?;
        responses.push((division, transactions));
    }

    let mut summary = ReconcileSummary::default();
    let txn = ctx.db.begin().await?;
    let transaction_repo = TransactionRepository::new(&txn);
    for (division, transactions) in responses {
        summary.fetched += transactions.len() as u64;
        summary.inserted += transaction_repo
            .insert_missing_for_corporation(corporation_id, division, transactions)
            .await?;
    }
    txn.commit().await?;

    Ok(summary)
}
