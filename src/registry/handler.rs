//! Closed set of reconcilers an endpoint can be bound to.

use std::{fmt, str::FromStr};

use crate::{
    error::{sync::SyncError, Error},
    reconciler::{
        division, journal, profile, transaction, wallet, ReconcileSummary, SyncContext,
    },
};

/// Reconciler bound to an endpoint through the catalog's `handler` column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Handler {
    CharacterProfile,
    CorporationProfile,
    CharacterWallet,
    CharacterWalletJournal,
    CharacterWalletTransactions,
    CorporationDivisions,
    CorporationWallets,
    CorporationWalletJournal,
    CorporationWalletTransactions,
}

impl Handler {
    pub const ALL: [Handler; 9] = [
        Handler::CharacterProfile,
        Handler::CorporationProfile,
        Handler::CharacterWallet,
        Handler::CharacterWalletJournal,
        Handler::CharacterWalletTransactions,
        Handler::CorporationDivisions,
        Handler::CorporationWallets,
        Handler::CorporationWalletJournal,
        Handler::CorporationWalletTransactions,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Handler::CharacterProfile => "character_profile",
            Handler::CorporationProfile => "corporation_profile",
            Handler::CharacterWallet => "character_wallet",
            Handler::CharacterWalletJournal => "character_wallet_journal",
            Handler::CharacterWalletTransactions => "character_wallet_transactions",
            Handler::CorporationDivisions => "corporation_divisions",
            Handler::CorporationWallets => "corporation_wallets",
            Handler::CorporationWalletJournal => "corporation_wallet_journal",
            Handler::CorporationWalletTransactions => "corporation_wallet_transactions",
        }
    }

    /// Public profiles are fetched without a bearer token.
    pub fn requires_auth(&self) -> bool {
        !matches!(
            self,
            Handler::CharacterProfile | Handler::CorporationProfile
        )
    }

    /// Runs the bound reconciler.
    pub async fn reconcile(&self, ctx: &SyncContext<'_>) -> Result<ReconcileSummary, Error> {
        match self {
            Handler::CharacterProfile => profile::character_profile(ctx).await,
            Handler::CorporationProfile => profile::corporation_profile(ctx).await,
            Handler::CharacterWallet => wallet::character_wallet(ctx).await,
            Handler::CharacterWalletJournal => journal::character_wallet_journal(ctx).await,
            Handler::CharacterWalletTransactions => {
                transaction::character_wallet_transactions(ctx).await
            }
            Handler::CorporationDivisions => division::corporation_divisions(ctx).await,
            Handler::CorporationWallets => wallet::corporation_wallets(ctx).await,
            Handler::CorporationWalletJournal => journal::corporation_wallet_journal(ctx).await,
            Handler::CorporationWalletTransactions => {
                transaction::corporation_wallet_transactions(ctx).await
            }
        }
    }
}

impl FromStr for Handler {
    type Err = SyncError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Handler::ALL
            .into_iter()
            .find(|handler| handler.as_str() == s)
            .ok_or_else(|| SyncError::UnknownHandler(s.to_string()))
    }
}

impl fmt::Display for Handler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
