use mockito::{Mock, Server, ServerGuard};
use sea_orm::{sea_query::TableCreateStatement, ConnectionTrait, Database, DatabaseConnection};

use crate::error::TestError;

/// Per-test environment: an in-memory SQLite database and a mock server standing in for
/// both ESI and the SSO token endpoint.
pub struct TestSetup {
    pub server: ServerGuard,
    pub db: DatabaseConnection,
    pub mocks: Vec<Mock>,
}

impl TestSetup {
    pub async fn new() -> Result<Self, TestError> {
        let server = Server::new_async().await;
        let db = Database::connect("sqlite::memory:").await?;

        Ok(TestSetup {
            server,
            db,
            mocks: Vec::new(),
        })
    }

    pub async fn with_tables(&self, stmts: Vec<TableCreateStatement>) -> Result<(), TestError> {
        for stmt in stmts {
            self.db.execute(&stmt).await?;
        }

        Ok(())
    }

    /// Base URL for both the ESI client and the SSO client.
    pub fn url(&self) -> String {
        self.server.url()
    }

    /// Assert all mock endpoints were called as expected.
    ///
    /// # Panics
    /// Panics if any mock endpoint was not called the expected number of times
    pub fn assert_mocks(&self) {
        for mock in &self.mocks {
            mock.assert();
        }
    }
}

#[macro_export]
macro_rules! test_setup_with_tables {
    // Pattern 1: No entities provided
    () => {{
        TestSetup::new().await
    }};

    // Pattern 2: Entities provided
    ($($entity:expr),+ $(,)?) => {{
        async {
            let setup = TestSetup::new().await?;

            let schema = sea_orm::Schema::new(sea_orm::DbBackend::Sqlite);
            let stmts = vec![
                $(schema.create_table_with_index_from_entity($entity),)+
            ];
            setup.with_tables(stmts).await?;

            Ok::<_, $crate::error::TestError>(setup)
        }.await
    }};
}

/// Creates every table the sync engine touches.
#[macro_export]
macro_rules! test_setup_with_sync_tables {
    () => {{
        async {
            let setup = TestSetup::new().await?;

            let schema = sea_orm::Schema::new(sea_orm::DbBackend::Sqlite);
            let stmts = vec![
                schema.create_table_with_index_from_entity(entity::prelude::EveCharacter),
                schema.create_table_with_index_from_entity(entity::prelude::EveCorporation),
                schema.create_table_with_index_from_entity(entity::prelude::CharacterAccessToken),
                schema.create_table_with_index_from_entity(entity::prelude::EsiApiGroup),
                schema.create_table_with_index_from_entity(entity::prelude::EsiApi),
                schema.create_table_with_index_from_entity(entity::prelude::CharacterApi),
                schema.create_table_with_index_from_entity(entity::prelude::CorporationDivision),
                schema.create_table_with_index_from_entity(entity::prelude::CharacterWallet),
                schema.create_table_with_index_from_entity(entity::prelude::CorporationWallet),
                schema.create_table_with_index_from_entity(entity::prelude::CharacterWalletJournal),
                schema.create_table_with_index_from_entity(entity::prelude::CorporationWalletJournal),
                schema.create_table_with_index_from_entity(entity::prelude::CharacterWalletTransaction),
                schema.create_table_with_index_from_entity(entity::prelude::CorporationWalletTransaction),
            ];
            setup.with_tables(stmts).await?;

            Ok::<_, $crate::error::TestError>(setup)
        }.await
    }};
}
