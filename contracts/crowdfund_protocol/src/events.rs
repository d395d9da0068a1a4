//! # Events
//!
//! Typed payload structs for every event the contract publishes. Topics are
//! `(symbol, project_id)` so indexers can filter per project; payloads are
//! `#[contracttype]` structs decodable off-chain.
//!
//! | Topic symbol | Payload                |
//! |--------------|------------------------|
//! | `created`    | [`ProjectCreated`]     |
//! | `contrib`    | [`ContributionReceived`] |
//! | `cancelled`  | [`ProjectCancelled`]   |
//! | `refunded`   | [`RefundIssued`]       |
//! | `withdrawn`  | [`FundsWithdrawn`]     |
//! | `badge`      | [`BadgeAwarded`]       |
//! | `bxfer`      | [`BadgeTransferred`]   |

use soroban_sdk::{contracttype, Address, String};

/// A project was accepted by the registry. The project id is the handle all
/// subsequent calls use.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ProjectCreated {
    pub project_id: u64,
    pub owner: Address,
    pub name: String,
    pub goal: i128,
}

/// A contribution was recorded and the funds taken into escrow.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ContributionReceived {
    pub project_id: u64,
    pub contributor: Address,
    pub amount: i128,
}

/// The owner cancelled an active project.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ProjectCancelled {
    pub project_id: u64,
    pub owner: Address,
}

/// A contributor reclaimed their full contribution.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RefundIssued {
    pub project_id: u64,
    pub contributor: Address,
    pub amount: i128,
}

/// The owner withdrew from a successful project.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FundsWithdrawn {
    pub project_id: u64,
    pub amount: i128,
    /// Escrow balance remaining after this withdrawal.
    pub remaining: i128,
}

/// A contributor minted an earned badge.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BadgeAwarded {
    pub project_id: u64,
    pub contributor: Address,
    pub badge_id: u64,
}

/// A badge changed hands.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BadgeTransferred {
    pub project_id: u64,
    pub from: Address,
    pub to: Address,
    pub badge_id: u64,
}
