//! Wallet journals.
//!
//! Journal pages are fetched in full before anything is written, so a failing page leaves
//! the ledger as it was. Stored entries are never updated.

use sea_orm::TransactionTrait;

use crate::{
    data::{division::DivisionRepository, journal::JournalRepository},
    error::Error,
    model::esi::JournalEntry,
    reconciler::{ReconcileSummary, SyncContext},
};

pub async fn character_wallet_journal(ctx: &SyncContext<'_>) -> Result<ReconcileSummary, Error> {
    let path = ctx.path(&ctx.vars())?;
    let entries: Vec<JournalEntry> = ctx.esi_client.get_json(&path, ctx.access_token).await?;
    let fetched = entries.len() as u64;

    let txn = ctx.db.begin().await?;
    let inserted = JournalRepository::new(&txn)
        .insert_missing_for_character(ctx.character_id, entries)
        .await?;
    txn.commit().await?;

    Ok(ReconcileSummary {
        fetched,
        inserted,
        updated: 0,
    })
}

/// Fetches the journal of every known wallet division of the character's corporation.
///
/// Divisions are learned from the divisions endpoint; a corporation without stored wallet
/// divisions has nothing to fetch yet.
pub async fn corporation_wallet_journal(ctx: &SyncContext<'_>) -> Result<ReconcileSummary, Error> {
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
        let entries: Vec<JournalEntry> = ctx
            .esi_client
            .get_json(&ctx.path(&vars)?, ctx.access_token)
            .await?;
        responses.push((division, entries));
    }

    let mut summary = ReconcileSummary::default();
    let txn = ctx.db.begin().await?;
    let journal_repo = JournalRepository::new(&txn);
    for (division, entries) in responses {
        summary.fetched += entries.len() as u64;
        summary.inserted += journal_repo
            .insert_missing_for_corporation(corporation_id, division, entries)
            .await?;
    }
    txn.commit().await?;

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use entity::corporation_division::DivisionKind;
    use esi_sync_test_utils::prelude::*;
    use mockito::Matcher;
    use sea_orm::{ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter};
    use serde_json::json;

    use super::*;
    use crate::reconciler::test::ReconcileSetup;

    /// Should assemble every page and insert each entry once
    #[tokio::test]
    async fn character_journal_assembles_pages() -> Result<(), TestError> {
        let mut test = test_setup_with_sync_tables!()?;
        test.eve()
            .insert_mock_character(TEST_CHARACTER_ID, None)
            .await?;
        let setup = ReconcileSetup::new(&mut test).await;
        let pages = test.eve().create_paged_esi_endpoint(
            &format!("/characters/{}/wallet/journal/", TEST_CHARACTER_ID),
            vec![
                json!([factory::mock_journal_entry(3, 3.0), factory::mock_journal_entry(2, 2.0)]),
                json!([factory::mock_journal_entry(1, 1.0)]),
            ],
            1,
        );
        test.mocks.extend(pages);

        let ctx = SyncContext {
            db: &test.db,
            esi_client: &setup.esi_client,
            character_id: TEST_CHARACTER_ID,
            endpoint: setup.endpoint(api::CHARACTER_WALLET_JOURNAL),
            access_token: Some("token"),
        };
        let summary = character_wallet_journal(&ctx).await.unwrap();

        assert_eq!(summary.fetched, 3);
        assert_eq!(summary.inserted, 3);
        test.assert_mocks();

        Ok(())
    }

    /// Should write nothing when a later page fails
    #[tokio::test]
    async fn failed_page_writes_nothing() -> Result<(), TestError> {
        let mut test = test_setup_with_sync_tables!()?;
        test.eve()
            .insert_mock_character(TEST_CHARACTER_ID, None)
            .await?;
        let setup = ReconcileSetup::new(&mut test).await;
        let path = format!("/characters/{}/wallet/journal/", TEST_CHARACTER_ID);
        let first_page = test
            .server
            .mock("GET", path.as_str())
            .match_query(Matcher::Exact(String::new()))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_header("x-pages", "2")
            .with_body(json!([factory::mock_journal_entry(1, 1.0)]).to_string())
            .expect(1)
            .create();
        let second_page = test
            .server
            .mock("GET", path.as_str())
            .match_query(Matcher::UrlEncoded("page".to_string(), "2".to_string()))
            .with_status(404)
            .expect(1)
            .create();
        test.mocks.extend([first_page, second_page]);

        let ctx = SyncContext {
            db: &test.db,
            esi_client: &setup.esi_client,
            character_id: TEST_CHARACTER_ID,
            endpoint: setup.endpoint(api::CHARACTER_WALLET_JOURNAL),
            access_token: Some("token"),
        };
        let result = character_wallet_journal(&ctx).await;

        assert!(result.is_err());
        test.assert_mocks();
        let stored = entity::prelude::CharacterWalletJournal::find()
            .count(&test.db)
            .await?;
        assert_eq!(stored, 0);

        Ok(())
    }

    /// Should fetch once per known wallet division and scope rows by division
    #[tokio::test]
    async fn corporation_journal_iterates_wallet_divisions() -> Result<(), TestError> {
        let mut test = test_setup_with_sync_tables!()?;
        test.eve()
            .insert_mock_character(TEST_CHARACTER_ID, Some(TEST_CORPORATION_ID))
            .await?;
        test.eve()
            .insert_mock_division(TEST_CORPORATION_ID, DivisionKind::Wallet, 1, "Master")
            .await?;
        test.eve()
            .insert_mock_division(TEST_CORPORATION_ID, DivisionKind::Wallet, 2, "Ops")
            .await?;
        test.eve()
            .insert_mock_division(TEST_CORPORATION_ID, DivisionKind::Hangar, 3, "Hangar")
            .await?;
        let setup = ReconcileSetup::new(&mut test).await;
        for division in [1, 2] {
            let endpoint = test.eve().create_esi_endpoint(
                &format!(
                    "/corporations/{}/wallets/{}/journal/",
                    TEST_CORPORATION_ID, division
                ),
                json!([factory::mock_journal_entry(500, 1.0)]),
                1,
            );
            test.mocks.push(endpoint);
        }

        let ctx = SyncContext {
            db: &test.db,
            esi_client: &setup.esi_client,
            character_id: TEST_CHARACTER_ID,
            endpoint: setup.endpoint(api::CORPORATION_WALLET_JOURNAL),
            access_token: Some("token"),
        };
        let summary = corporation_wallet_journal(&ctx).await.unwrap();

        assert_eq!(summary.fetched, 2);
        assert_eq!(summary.inserted, 2);

        let division_two = entity::prelude::CorporationWalletJournal::find()
            .filter(entity::corporation_wallet_journal::Column::Division.eq(2))
            .count(&test.db)
            .await?;
        assert_eq!(division_two, 1);
        test.assert_mocks();

        Ok(())
    }
}
