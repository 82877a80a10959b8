use chrono::Utc;
use migration::OnConflict;
use sea_orm::{ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter};

use crate::model::esi::CorporationProfile;

pub struct CorporationRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> CorporationRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn get_by_corporation_id(
        &self,
        corporation_id: i64,
    ) -> Result<Option<entity::eve_corporation::Model>, DbErr> {
        entity::prelude::EveCorporation::find()
            .filter(entity::eve_corporation::Column::CorporationId.eq(corporation_id))
            .one(self.db)
            .await
    }

    /// Inserts or fully replaces the profile attributes of `corporation_id`.
    pub async fn upsert_profile(
        &self,
        corporation_id: i64,
        profile: CorporationProfile,
    ) -> Result<entity::eve_corporation::Model, DbErr> {
        let now = Utc::now().naive_utc();
        let corporation = entity::eve_corporation::ActiveModel {
            corporation_id: ActiveValue::Set(corporation_id),
            name: ActiveValue::Set(profile.name),
            ticker: ActiveValue::Set(profile.ticker),
            alliance_id: ActiveValue::Set(profile.alliance_id),
            ceo_id: ActiveValue::Set(profile.ceo_id),
            creator_id: ActiveValue::Set(profile.creator_id),
            date_founded: ActiveValue::Set(profile.date_founded.map(|date| date.naive_utc())),
            description: ActiveValue::Set(profile.description),
            faction_id: ActiveValue::Set(profile.faction_id),
            home_station_id: ActiveValue::Set(profile.home_station_id),
            member_count: ActiveValue::Set(profile.member_count),
            shares: ActiveValue::Set(profile.shares),
            tax_rate: ActiveValue::Set(profile.tax_rate),
            url: ActiveValue::Set(profile.url),
            war_eligible: ActiveValue::Set(profile.war_eligible),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        };

        entity::prelude::EveCorporation::insert(corporation)
            .on_conflict(
                OnConflict::column(entity::eve_corporation::Column::CorporationId)
                    .update_columns([
                        entity::eve_corporation::Column::Name,
                        entity::eve_corporation::Column::Ticker,
                        entity::eve_corporation::Column::AllianceId,
                        entity::eve_corporation::Column::CeoId,
                        entity::eve_corporation::Column::CreatorId,
                        entity::eve_corporation::Column::DateFounded,
                        entity::eve_corporation::Column::Description,
                        entity::eve_corporation::Column::FactionId,
                        entity::eve_corporation::Column::HomeStationId,
                        entity::eve_corporation::Column::MemberCount,
                        entity::eve_corporation::Column::Shares,
                        entity::eve_corporation::Column::TaxRate,
                        entity::eve_corporation::Column::Url,
                        entity::eve_corporation::Column::WarEligible,
                        entity::eve_corporation::Column::UpdatedAt,
                    ])
                    .to_owned(),
            )
            .exec_with_returning(self.db)
            .await
    }
}
