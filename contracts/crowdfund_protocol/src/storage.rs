//! # Storage
//!
//! Typed helpers over Soroban's two storage tiers.
//!
//! ## Instance storage (contract-lifetime TTL)
//!
//! | Key            | Type      | Description                         |
//! |----------------|-----------|-------------------------------------|
//! | `FundingToken` | `Address` | Token accepted for contributions    |
//! | `ProjectCount` | `u64`     | Auto-increment project id counter   |
//!
//! Instance TTL is bumped by **7 days** whenever it falls below 1 day remaining.
//!
//! ## Persistent storage (per-entry TTL)
//!
//! | Key                          | Type            | Description                          |
//! |------------------------------|-----------------|--------------------------------------|
//! | `ProjConfig(id)`             | `ProjectConfig` | Immutable project configuration      |
//! | `ProjState(id)`              | `ProjectState`  | Mutable project state                |
//! | `Contribution(id, addr)`     | `i128`          | Lifetime contribution total          |
//! | `Refunded(id, addr)`         | `bool`          | Refund already claimed               |
//! | `BadgesMinted(id, addr)`     | `u64`           | Badges issued to this contributor    |
//! | `BadgeOwner(id, badge_id)`   | `Address`       | Current badge holder                 |
//! | `BadgeDelegate(id, badge_id)`| `Address`       | Approved transfer operator           |
//! | `NameTaken(name)`            | `bool`          | Project name permanently reserved    |
//!
//! Persistent TTL is bumped by **30 days** whenever it falls below 7 days
//! remaining.
//!
//! `Contribution` totals are monotonically non-decreasing: a refund flips
//! the separate `Refunded` flag but never touches the recorded total, which
//! is what keeps badge quotas intact after a payout.

use soroban_sdk::{contracttype, Address, Env, String};

use crate::types::{derive_status, Project, ProjectConfig, ProjectState};
use crate::Error;

// ── TTL Constants ────────────────────────────────────────────────────

/// Approximate ledgers per day (~5 seconds per ledger).
const DAY_IN_LEDGERS: u32 = 17_280;

/// Instance storage: bump by 7 days when below 1 day remaining.
const INSTANCE_BUMP_AMOUNT: u32 = 7 * DAY_IN_LEDGERS;
const INSTANCE_LIFETIME_THRESHOLD: u32 = DAY_IN_LEDGERS;

/// Persistent storage: bump by 30 days when below 7 days remaining.
const PERSISTENT_BUMP_AMOUNT: u32 = 30 * DAY_IN_LEDGERS;
const PERSISTENT_LIFETIME_THRESHOLD: u32 = 7 * DAY_IN_LEDGERS;

// ── Storage Keys ─────────────────────────────────────────────────────

/// All contract storage keys.
///
/// Instance-tier keys (`FundingToken`, `ProjectCount`) live as long as the
/// contract and are extended together. Persistent-tier keys hold
/// per-project data with independent TTLs.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum DataKey {
    /// Token contract accepted for all value transfers (Instance).
    FundingToken,
    /// Global auto-increment counter for project ids (Instance).
    ProjectCount,
    /// Immutable project configuration keyed by id (Persistent).
    ProjConfig(u64),
    /// Mutable project state keyed by id (Persistent).
    ProjState(u64),
    /// Lifetime contribution total per (project, contributor) (Persistent).
    Contribution(u64, Address),
    /// Refund-claimed flag per (project, contributor) (Persistent).
    Refunded(u64, Address),
    /// Badges issued per (project, contributor) (Persistent).
    BadgesMinted(u64, Address),
    /// Badge holder per (project, badge id) (Persistent).
    BadgeOwner(u64, u64),
    /// Approved transfer operator per (project, badge id) (Persistent).
    BadgeDelegate(u64, u64),
    /// Permanently reserved project name (Persistent).
    NameTaken(String),
}

// ── Instance Storage Helpers ─────────────────────────────────────────

/// Extend instance storage TTL if it falls below the threshold.
fn bump_instance(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(INSTANCE_LIFETIME_THRESHOLD, INSTANCE_BUMP_AMOUNT);
}

/// Record the funding token at initialization.
pub fn set_funding_token(env: &Env, token: &Address) {
    env.storage().instance().set(&DataKey::FundingToken, token);
    bump_instance(env);
}

/// Return `true` once `init` has recorded the funding token.
pub fn is_initialized(env: &Env) -> bool {
    env.storage().instance().has(&DataKey::FundingToken)
}

/// Retrieve the funding token. Fails with `NotInitialized` before `init`.
pub fn funding_token(env: &Env) -> Result<Address, Error> {
    bump_instance(env);
    env.storage()
        .instance()
        .get(&DataKey::FundingToken)
        .ok_or(Error::NotInitialized)
}

/// Atomically reads, increments, and stores the project counter.
/// Returns the id to use for the *current* project (pre-increment value).
pub fn next_project_id(env: &Env) -> u64 {
    bump_instance(env);
    let current: u64 = env
        .storage()
        .instance()
        .get(&DataKey::ProjectCount)
        .unwrap_or(0);
    env.storage()
        .instance()
        .set(&DataKey::ProjectCount, &(current + 1));
    current
}

/// Number of projects created so far.
pub fn project_count(env: &Env) -> u64 {
    bump_instance(env);
    env.storage()
        .instance()
        .get(&DataKey::ProjectCount)
        .unwrap_or(0)
}

// ── Persistent Storage Helpers ───────────────────────────────────────

/// Extend the TTL for a persistent storage key.
fn bump_persistent(env: &Env, key: &DataKey) {
    env.storage()
        .persistent()
        .extend_ttl(key, PERSISTENT_LIFETIME_THRESHOLD, PERSISTENT_BUMP_AMOUNT);
}

/// Save the immutable config and the initial mutable state for a new project.
pub fn save_new_project(env: &Env, config: &ProjectConfig) {
    let config_key = DataKey::ProjConfig(config.id);
    let state_key = DataKey::ProjState(config.id);

    let state = ProjectState {
        current_funding: 0,
        total_raised: 0,
        cancelled: false,
        badge_count: 0,
    };

    env.storage().persistent().set(&config_key, config);
    env.storage().persistent().set(&state_key, &state);
    bump_persistent(env, &config_key);
    bump_persistent(env, &state_key);
}

/// Load the immutable project configuration.
/// Fails with `ProjectNotFound` for an unknown id.
pub fn load_project_config(env: &Env, id: u64) -> Result<ProjectConfig, Error> {
    let key = DataKey::ProjConfig(id);
    let config: ProjectConfig = env
        .storage()
        .persistent()
        .get(&key)
        .ok_or(Error::ProjectNotFound)?;
    bump_persistent(env, &key);
    Ok(config)
}

/// Load the mutable project state.
/// Fails with `ProjectNotFound` for an unknown id.
pub fn load_project_state(env: &Env, id: u64) -> Result<ProjectState, Error> {
    let key = DataKey::ProjState(id);
    let state: ProjectState = env
        .storage()
        .persistent()
        .get(&key)
        .ok_or(Error::ProjectNotFound)?;
    bump_persistent(env, &key);
    Ok(state)
}

/// Save only the mutable project state.
pub fn save_project_state(env: &Env, id: u64, state: &ProjectState) {
    let key = DataKey::ProjState(id);
    env.storage().persistent().set(&key, state);
    bump_persistent(env, &key);
}

/// Load the full `Project` view, deriving the status at read time.
pub fn load_project(env: &Env, id: u64) -> Result<Project, Error> {
    let config = load_project_config(env, id)?;
    let state = load_project_state(env, id)?;
    let status = derive_status(&config, &state, env.ledger().timestamp());
    Ok(Project {
        id: config.id,
        owner: config.owner,
        name: config.name,
        goal: config.goal,
        deadline: config.deadline,
        current_funding: state.current_funding,
        total_raised: state.total_raised,
        status,
    })
}

// ── Per-contributor Entries ──────────────────────────────────────────

/// Lifetime contribution total of `contributor`; zero if never contributed.
pub fn contribution(env: &Env, id: u64, contributor: &Address) -> i128 {
    let key = DataKey::Contribution(id, contributor.clone());
    let total: Option<i128> = env.storage().persistent().get(&key);
    match total {
        Some(total) => {
            bump_persistent(env, &key);
            total
        }
        None => 0,
    }
}

/// Add `amount` to the lifetime contribution total. Never decremented.
pub fn add_contribution(env: &Env, id: u64, contributor: &Address, amount: i128) {
    let key = DataKey::Contribution(id, contributor.clone());
    let total: i128 = env.storage().persistent().get(&key).unwrap_or(0);
    env.storage().persistent().set(&key, &(total + amount));
    bump_persistent(env, &key);
}

/// Whether `contributor` has already claimed a refund.
pub fn has_refunded(env: &Env, id: u64, contributor: &Address) -> bool {
    let key = DataKey::Refunded(id, contributor.clone());
    let flag: Option<bool> = env.storage().persistent().get(&key);
    match flag {
        Some(flag) => {
            bump_persistent(env, &key);
            flag
        }
        None => false,
    }
}

/// Mark `contributor` as refunded. One-way.
pub fn set_refunded(env: &Env, id: u64, contributor: &Address) {
    let key = DataKey::Refunded(id, contributor.clone());
    env.storage().persistent().set(&key, &true);
    bump_persistent(env, &key);
}

/// Badges already issued to `contributor` for this project.
pub fn badges_minted(env: &Env, id: u64, contributor: &Address) -> u64 {
    let key = DataKey::BadgesMinted(id, contributor.clone());
    let minted: Option<u64> = env.storage().persistent().get(&key);
    match minted {
        Some(minted) => {
            bump_persistent(env, &key);
            minted
        }
        None => 0,
    }
}

/// Record the badges-issued count for `contributor`.
pub fn set_badges_minted(env: &Env, id: u64, contributor: &Address, minted: u64) {
    let key = DataKey::BadgesMinted(id, contributor.clone());
    env.storage().persistent().set(&key, &minted);
    bump_persistent(env, &key);
}

// ── Badge Ownership Entries ──────────────────────────────────────────

/// Current holder of a badge, if the badge exists.
pub fn badge_owner(env: &Env, id: u64, badge_id: u64) -> Option<Address> {
    let key = DataKey::BadgeOwner(id, badge_id);
    let owner: Option<Address> = env.storage().persistent().get(&key);
    if owner.is_some() {
        bump_persistent(env, &key);
    }
    owner
}

/// Assign a badge to `holder`.
pub fn set_badge_owner(env: &Env, id: u64, badge_id: u64, holder: &Address) {
    let key = DataKey::BadgeOwner(id, badge_id);
    env.storage().persistent().set(&key, holder);
    bump_persistent(env, &key);
}

/// Approved transfer operator for a badge, if any.
pub fn badge_delegate(env: &Env, id: u64, badge_id: u64) -> Option<Address> {
    let key = DataKey::BadgeDelegate(id, badge_id);
    let delegate: Option<Address> = env.storage().persistent().get(&key);
    if delegate.is_some() {
        bump_persistent(env, &key);
    }
    delegate
}

/// Approve `operator` to transfer a badge on the holder's behalf.
pub fn set_badge_delegate(env: &Env, id: u64, badge_id: u64, operator: &Address) {
    let key = DataKey::BadgeDelegate(id, badge_id);
    env.storage().persistent().set(&key, operator);
    bump_persistent(env, &key);
}

/// Clear any approval on a badge (done on every transfer).
pub fn clear_badge_delegate(env: &Env, id: u64, badge_id: u64) {
    env.storage()
        .persistent()
        .remove(&DataKey::BadgeDelegate(id, badge_id));
}

// ── Name Index Entries ───────────────────────────────────────────────

/// Whether `name` has ever been accepted by a creation call.
pub fn is_name_taken(env: &Env, name: &String) -> bool {
    let key = DataKey::NameTaken(name.clone());
    let taken: Option<bool> = env.storage().persistent().get(&key);
    match taken {
        Some(taken) => {
            bump_persistent(env, &key);
            taken
        }
        None => false,
    }
}

/// Reserve `name` forever. Never unset.
pub fn mark_name_taken(env: &Env, name: &String) {
    let key = DataKey::NameTaken(name.clone());
    env.storage().persistent().set(&key, &true);
    bump_persistent(env, &key);
}
