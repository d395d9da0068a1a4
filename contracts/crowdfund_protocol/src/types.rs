//! # Types
//!
//! Shared data structures of the crowdfund escrow.
//!
//! ## Design decisions
//!
//! ### Config / State split
//!
//! A project is internally stored as two separate ledger entries:
//!
//! - [`ProjectConfig`] — written once at creation; never mutated.
//! - [`ProjectState`] — written on every contribution, refund, withdrawal,
//!   cancellation and badge mint.
//!
//! The public API exposes the reconstructed [`Project`] struct for convenience.
//!
//! ### Status is derived, never stored
//!
//! [`ProjectStatus`] is a pure function of the cancel flag, the lifetime
//! raised total, the goal and elapsed ledger time — see [`derive_status`].
//! There is no persisted status field, so a stored flag can never drift out
//! of sync with the facts that determine it. The derivation reads
//! `total_raised`, which only ever grows, never the live escrow balance:
//! withdrawals and refunds reduce `current_funding` but can never move a
//! project out of a terminal state. Evaluation priority:
//!
//! ```text
//! Cancelled › Failed › Succeeded › Active
//! ```
//!
//! `Cancelled`, `Failed` and `Succeeded` are terminal: new contributions and
//! cancellation are rejected, while refunds, withdrawals and badge
//! operations each apply their own status rules.

use soroban_sdk::{contracttype, Address, String};

/// Smallest representable fraction of the funding token (7 decimals).
const STROOPS_PER_UNIT: i128 = 10_000_000;

/// One whole unit of the base currency. A contributor earns one badge per
/// full unit of lifetime contribution.
pub const BADGE_UNIT: i128 = STROOPS_PER_UNIT;

/// Minimum accepted contribution: 0.01 of the base currency.
pub const MIN_CONTRIBUTION: i128 = STROOPS_PER_UNIT / 100;

/// Smallest viable funding goal: one whole unit.
pub const MIN_GOAL: i128 = STROOPS_PER_UNIT;

/// Funding window, fixed at creation: 30 days of ledger time.
pub const FUNDING_WINDOW: u64 = 30 * 86_400;

/// Lifecycle status of a project, derived on every read.
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ProjectStatus {
    /// Accepting contributions: not cancelled, goal unmet, deadline ahead.
    Active,
    /// Owner cancelled while the project was still active.
    Cancelled,
    /// Deadline passed without reaching the goal.
    Failed,
    /// Lifetime raised total reached the goal.
    Succeeded,
}

/// Immutable project configuration, written once at creation.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ProjectConfig {
    pub id: u64,
    /// Address that created the project; sole withdraw/cancel authority.
    pub owner: Address,
    /// Registry-unique project name.
    pub name: String,
    /// Target funding amount, at least [`MIN_GOAL`].
    pub goal: i128,
    /// Creation timestamp + [`FUNDING_WINDOW`].
    pub deadline: u64,
}

/// Mutable project state, kept small so frequent writes stay cheap.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ProjectState {
    /// Funds currently held in escrow for this project. Decremented by
    /// withdrawals and refunds; never drives the status.
    pub current_funding: i128,
    /// Lifetime sum of all contributions. Monotonically non-decreasing;
    /// the sole funding input to [`derive_status`].
    pub total_raised: i128,
    /// Set once by the owner; irreversible.
    pub cancelled: bool,
    /// Badges issued so far; doubles as the last assigned badge id.
    pub badge_count: u64,
}

/// Full public view of a project, reconstructed from the split
/// `ProjectConfig` + `ProjectState` entries with the status derived at
/// read time.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Project {
    pub id: u64,
    pub owner: Address,
    pub name: String,
    pub goal: i128,
    pub deadline: u64,
    pub current_funding: i128,
    pub total_raised: i128,
    pub status: ProjectStatus,
}

/// Compute the current status from primitive facts.
///
/// Goal comparisons read `total_raised`, not the live escrow balance, so
/// `Succeeded` is permanent even once the owner has withdrawn the balance
/// below the goal. `Failed` is checked before `Succeeded`, but its
/// condition requires the goal to be unmet, so a project that reached its
/// goal stays `Succeeded` past the deadline. `Active` requires the deadline
/// to be strictly ahead: a call exactly at the deadline already sees
/// `Failed`.
pub fn derive_status(config: &ProjectConfig, state: &ProjectState, now: u64) -> ProjectStatus {
    if state.cancelled {
        ProjectStatus::Cancelled
    } else if now >= config.deadline && state.total_raised < config.goal {
        ProjectStatus::Failed
    } else if state.total_raised >= config.goal {
        ProjectStatus::Succeeded
    } else {
        ProjectStatus::Active
    }
}
