use sea_orm::{ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter, QueryOrder};

/// Read access to the endpoint catalog.
pub struct EsiApiRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> EsiApiRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn get_all(&self) -> Result<Vec<entity::esi_api::Model>, DbErr> {
        entity::prelude::EsiApi::find()
            .order_by_asc(entity::esi_api::Column::Id)
            .all(self.db)
            .await
    }

    pub async fn get_by_group_id(
        &self,
        group_id: i32,
    ) -> Result<Vec<entity::esi_api::Model>, DbErr> {
        entity::prelude::EsiApi::find()
            .filter(entity::esi_api::Column::GroupId.eq(group_id))
            .order_by_asc(entity::esi_api::Column::Id)
            .all(self.db)
            .await
    }
}
