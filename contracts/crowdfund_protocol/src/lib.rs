//! # Crowdfund Protocol Contract
//!
//! Single-project crowdfunding escrow: contributors fund a project toward a
//! fixed goal; depending on outcome the owner withdraws the raised funds or
//! contributors reclaim theirs; contributors earn transferable badges in
//! proportion to their lifetime contribution, independent of outcome.
//!
//! | Concern      | Entry Point(s)                                        |
//! |--------------|-------------------------------------------------------|
//! | Bootstrap    | [`CrowdfundProtocol::init`]                           |
//! | Registry     | [`CrowdfundProtocol::create`]                         |
//! | Funding      | [`CrowdfundProtocol::contribute`]                     |
//! | Settlement   | `cancel`, `refund`, `withdraw`                        |
//! | Badges       | `mint_badge`, `approve_badge`, `transfer_badge`       |
//! | Queries      | `get_project`, `status`, `contribution`, `has_refunded`, `badge_owner`, `badge_approved`, `badges_minted`, `project_count`, `is_name_taken` |
//!
//! ## Architecture
//!
//! A project's status is never stored: it is derived on every call from the
//! cancel flag, the lifetime raised total and elapsed ledger time
//! ([`types`]). Name uniqueness and id allocation live in [`registry`]; the
//! badge ownership ledger in [`badges`]; storage access in [`storage`].
//! This file contains only the public entry points, their precondition
//! checks and event emissions.
//!
//! ## Payout ordering
//!
//! `refund` and `withdraw` commit every state write (refund flag, funding
//! decrement) *before* invoking the token transfer. The outbound transfer
//! is the only step that can reach foreign code, and by then the books
//! already reflect the payout, so a re-entrant call observes updated state.

#![no_std]

use soroban_sdk::{
    contract, contracterror, contractimpl, symbol_short, token, Address, Env, String,
};

mod badges;
pub mod events;
mod registry;
mod storage;
mod types;

#[cfg(test)]
mod invariants;
#[cfg(test)]
mod test_events;

use events::{
    BadgeAwarded, BadgeTransferred, ContributionReceived, FundsWithdrawn, ProjectCancelled,
    ProjectCreated, RefundIssued,
};
use types::derive_status;
pub use types::{Project, ProjectStatus, BADGE_UNIT, FUNDING_WINDOW, MIN_CONTRIBUTION, MIN_GOAL};

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Error {
    AlreadyInitialized   = 1,
    NotInitialized       = 2,
    ProjectNotFound      = 3,
    // Registry validation:
    InvalidName          = 4,
    NameAlreadyTaken     = 5,
    InvalidGoal          = 6,
    // State errors:
    ProjectNotActive     = 7,
    ProjectNotSuccessful = 8,
    RefundUnavailable    = 9,
    // Authorization:
    NotOwner             = 10,
    // Validation / entitlement:
    ContributionTooSmall = 11,
    InvalidAmount        = 12,
    ExceedsBalance       = 13,
    AlreadyRefunded      = 14,
    NothingToRefund      = 15,
    NoBadgeDue           = 16,
    BadgeNotFound        = 17,
    NotBadgeHolder       = 18,
}

#[contract]
pub struct CrowdfundProtocol;

#[contractimpl]
impl CrowdfundProtocol {
    // ─────────────────────────────────────────────────────────
    // Initialisation
    // ─────────────────────────────────────────────────────────

    /// Record the token accepted for all contributions and payouts.
    ///
    /// Must be called exactly once after deployment. Subsequent calls fail
    /// with `Error::AlreadyInitialized`.
    pub fn init(env: Env, token: Address) -> Result<(), Error> {
        if storage::is_initialized(&env) {
            return Err(Error::AlreadyInitialized);
        }
        storage::set_funding_token(&env, &token);
        Ok(())
    }

    // ─────────────────────────────────────────────────────────
    // Registry
    // ─────────────────────────────────────────────────────────

    /// Create a new project and return its id.
    ///
    /// - `owner` must sign; they become the sole cancel/withdraw authority.
    /// - `name` must be non-empty and never used by any prior successful
    ///   creation (exact, case-sensitive match). Accepted names are reserved
    ///   forever.
    /// - `goal` must be at least [`MIN_GOAL`].
    ///
    /// The funding deadline is fixed at creation time + [`FUNDING_WINDOW`]
    /// and can never be changed.
    pub fn create(env: Env, owner: Address, name: String, goal: i128) -> Result<u64, Error> {
        owner.require_auth();
        if !storage::is_initialized(&env) {
            return Err(Error::NotInitialized);
        }
        if name.len() == 0 {
            return Err(Error::InvalidName);
        }
        if registry::exists(&env, &name) {
            return Err(Error::NameAlreadyTaken);
        }
        if goal < MIN_GOAL {
            return Err(Error::InvalidGoal);
        }

        registry::reserve(&env, &name);
        let id = registry::allocate_project_id(&env);

        let config = types::ProjectConfig {
            id,
            owner: owner.clone(),
            name: name.clone(),
            goal,
            deadline: env.ledger().timestamp() + FUNDING_WINDOW,
        };
        storage::save_new_project(&env, &config);

        env.events().publish(
            (symbol_short!("created"), id),
            ProjectCreated {
                project_id: id,
                owner,
                name,
                goal,
            },
        );
        Ok(id)
    }

    // ─────────────────────────────────────────────────────────
    // Funding
    // ─────────────────────────────────────────────────────────

    /// Contribute `amount` to an active project.
    ///
    /// - `contributor` must sign and hold at least `amount` of the funding
    ///   token.
    /// - The project must currently derive to `Active`: a call at or after
    ///   the deadline, after the goal has been reached, or after
    ///   cancellation fails with `ProjectNotActive`.
    /// - `amount` must be at least [`MIN_CONTRIBUTION`].
    ///
    /// The final contribution that pushes the total past the goal is
    /// accepted in full; nothing is returned as change.
    pub fn contribute(
        env: Env,
        project_id: u64,
        contributor: Address,
        amount: i128,
    ) -> Result<(), Error> {
        contributor.require_auth();

        let config = storage::load_project_config(&env, project_id)?;
        let mut state = storage::load_project_state(&env, project_id)?;

        let now = env.ledger().timestamp();
        if derive_status(&config, &state, now) != ProjectStatus::Active {
            return Err(Error::ProjectNotActive);
        }
        if amount < MIN_CONTRIBUTION {
            return Err(Error::ContributionTooSmall);
        }

        // Pull the funds into escrow, then record them.
        let token_client = token::Client::new(&env, &storage::funding_token(&env)?);
        token_client.transfer(&contributor, &env.current_contract_address(), &amount);

        state.current_funding += amount;
        state.total_raised += amount;
        storage::save_project_state(&env, project_id, &state);
        storage::add_contribution(&env, project_id, &contributor, amount);

        env.events().publish(
            (symbol_short!("contrib"), project_id),
            ContributionReceived {
                project_id,
                contributor,
                amount,
            },
        );
        Ok(())
    }

    // ─────────────────────────────────────────────────────────
    // Settlement
    // ─────────────────────────────────────────────────────────

    /// Cancel an active project. Irreversible.
    ///
    /// - `caller` must sign and be the project owner.
    /// - The project must currently derive to `Active`; cancelling after the
    ///   goal is reached, after the deadline, or a second time fails with
    ///   `ProjectNotActive`.
    pub fn cancel(env: Env, project_id: u64, caller: Address) -> Result<(), Error> {
        caller.require_auth();

        let config = storage::load_project_config(&env, project_id)?;
        let mut state = storage::load_project_state(&env, project_id)?;

        if caller != config.owner {
            return Err(Error::NotOwner);
        }
        let now = env.ledger().timestamp();
        if derive_status(&config, &state, now) != ProjectStatus::Active {
            return Err(Error::ProjectNotActive);
        }

        state.cancelled = true;
        storage::save_project_state(&env, project_id, &state);

        env.events().publish(
            (symbol_short!("cancelled"), project_id),
            ProjectCancelled {
                project_id,
                owner: caller,
            },
        );
        Ok(())
    }

    /// Reclaim the caller's full contribution from a cancelled or failed
    /// project. Succeeds at most once per address.
    ///
    /// The refund flag is committed and the funding total decremented before
    /// the outbound transfer; a second attempt fails with `AlreadyRefunded`
    /// regardless of later contributions or badge activity.
    pub fn refund(env: Env, project_id: u64, caller: Address) -> Result<(), Error> {
        caller.require_auth();

        let config = storage::load_project_config(&env, project_id)?;
        let mut state = storage::load_project_state(&env, project_id)?;

        let now = env.ledger().timestamp();
        match derive_status(&config, &state, now) {
            ProjectStatus::Cancelled | ProjectStatus::Failed => {}
            _ => return Err(Error::RefundUnavailable),
        }
        if storage::has_refunded(&env, project_id, &caller) {
            return Err(Error::AlreadyRefunded);
        }
        let amount = storage::contribution(&env, project_id, &caller);
        if amount <= 0 {
            return Err(Error::NothingToRefund);
        }

        // Commit the books before paying out.
        storage::set_refunded(&env, project_id, &caller);
        state.current_funding -= amount;
        storage::save_project_state(&env, project_id, &state);

        let token_client = token::Client::new(&env, &storage::funding_token(&env)?);
        token_client.transfer(&env.current_contract_address(), &caller, &amount);

        env.events().publish(
            (symbol_short!("refunded"), project_id),
            RefundIssued {
                project_id,
                contributor: caller,
                amount,
            },
        );
        Ok(())
    }

    /// Withdraw `amount` from a successful project to the owner.
    ///
    /// - `caller` must sign and be the project owner; `NotOwner` is reported
    ///   before any status error, so a non-owner never learns whether the
    ///   project succeeded.
    /// - The project must currently derive to `Succeeded`. Success reads the
    ///   lifetime raised total, so earlier withdrawals never close the door
    ///   on later ones.
    /// - `amount` must be positive and at most the live escrow balance.
    ///
    /// Multiple partial withdrawals are allowed until the balance reaches
    /// zero; each is validated independently.
    pub fn withdraw(env: Env, project_id: u64, caller: Address, amount: i128) -> Result<(), Error> {
        caller.require_auth();

        let config = storage::load_project_config(&env, project_id)?;
        let mut state = storage::load_project_state(&env, project_id)?;

        if caller != config.owner {
            return Err(Error::NotOwner);
        }
        let now = env.ledger().timestamp();
        if derive_status(&config, &state, now) != ProjectStatus::Succeeded {
            return Err(Error::ProjectNotSuccessful);
        }
        if amount <= 0 {
            return Err(Error::InvalidAmount);
        }
        if amount > state.current_funding {
            return Err(Error::ExceedsBalance);
        }

        // Commit the books before paying out.
        state.current_funding -= amount;
        storage::save_project_state(&env, project_id, &state);

        let token_client = token::Client::new(&env, &storage::funding_token(&env)?);
        token_client.transfer(&env.current_contract_address(), &caller, &amount);

        env.events().publish(
            (symbol_short!("withdrawn"), project_id),
            FundsWithdrawn {
                project_id,
                amount,
                remaining: state.current_funding,
            },
        );
        Ok(())
    }

    // ─────────────────────────────────────────────────────────
    // Badges
    // ─────────────────────────────────────────────────────────

    /// Mint the caller's next earned badge and return its id.
    ///
    /// One badge is due per full [`BADGE_UNIT`] of lifetime contribution;
    /// refunds never reduce the quota. Works in every project status. Fails
    /// with `NoBadgeDue` once every earned badge has been issued.
    pub fn mint_badge(env: Env, project_id: u64, caller: Address) -> Result<u64, Error> {
        caller.require_auth();
        // Existence check before touching per-contributor entries.
        storage::load_project_config(&env, project_id)?;

        let badge_id = badges::mint(&env, project_id, &caller)?;

        env.events().publish(
            (symbol_short!("badge"), project_id),
            BadgeAwarded {
                project_id,
                contributor: caller,
                badge_id,
            },
        );
        Ok(badge_id)
    }

    /// Approve `operator` to transfer one badge on the holder's behalf.
    ///
    /// `holder` must sign and currently own the badge. The approval is
    /// cleared by any transfer of that badge.
    pub fn approve_badge(
        env: Env,
        project_id: u64,
        holder: Address,
        operator: Address,
        badge_id: u64,
    ) -> Result<(), Error> {
        holder.require_auth();
        badges::approve(&env, project_id, &holder, &operator, badge_id)
    }

    /// Transfer a badge to `to`.
    ///
    /// `caller` must sign and be the current holder or the approved
    /// operator. Succeeds in every project status — badges are decoupled
    /// from fund state.
    pub fn transfer_badge(
        env: Env,
        project_id: u64,
        caller: Address,
        to: Address,
        badge_id: u64,
    ) -> Result<(), Error> {
        caller.require_auth();

        let holder = badges::owner_of(&env, project_id, badge_id)?;
        badges::transfer(&env, project_id, &caller, &to, badge_id)?;

        env.events().publish(
            (symbol_short!("bxfer"), project_id),
            BadgeTransferred {
                project_id,
                from: holder,
                to,
                badge_id,
            },
        );
        Ok(())
    }

    // ─────────────────────────────────────────────────────────
    // Queries
    // ─────────────────────────────────────────────────────────

    /// Full project view with the status derived at read time.
    pub fn get_project(env: Env, project_id: u64) -> Result<Project, Error> {
        storage::load_project(&env, project_id)
    }

    /// Current derived status of a project.
    pub fn status(env: Env, project_id: u64) -> Result<ProjectStatus, Error> {
        let config = storage::load_project_config(&env, project_id)?;
        let state = storage::load_project_state(&env, project_id)?;
        Ok(derive_status(&config, &state, env.ledger().timestamp()))
    }

    /// Funds currently held in escrow for a project.
    pub fn current_funding(env: Env, project_id: u64) -> Result<i128, Error> {
        Ok(storage::load_project_state(&env, project_id)?.current_funding)
    }

    /// Lifetime contribution total of `contributor` (never reduced by
    /// refunds).
    pub fn contribution(env: Env, project_id: u64, contributor: Address) -> Result<i128, Error> {
        storage::load_project_config(&env, project_id)?;
        Ok(storage::contribution(&env, project_id, &contributor))
    }

    /// Whether `contributor` has already claimed a refund.
    pub fn has_refunded(env: Env, project_id: u64, contributor: Address) -> Result<bool, Error> {
        storage::load_project_config(&env, project_id)?;
        Ok(storage::has_refunded(&env, project_id, &contributor))
    }

    /// Current holder of a badge.
    pub fn badge_owner(env: Env, project_id: u64, badge_id: u64) -> Result<Address, Error> {
        badges::owner_of(&env, project_id, badge_id)
    }

    /// Approved transfer operator for a badge, if any.
    pub fn badge_approved(
        env: Env,
        project_id: u64,
        badge_id: u64,
    ) -> Result<Option<Address>, Error> {
        badges::owner_of(&env, project_id, badge_id)?;
        Ok(storage::badge_delegate(&env, project_id, badge_id))
    }

    /// Badges issued so far to `contributor` for this project.
    pub fn badges_minted(env: Env, project_id: u64, contributor: Address) -> Result<u64, Error> {
        storage::load_project_config(&env, project_id)?;
        Ok(storage::badges_minted(&env, project_id, &contributor))
    }

    /// Number of projects ever created.
    pub fn project_count(env: Env) -> u64 {
        storage::project_count(&env)
    }

    /// Whether `name` is reserved by a prior creation.
    pub fn is_name_taken(env: Env, name: String) -> bool {
        registry::exists(&env, &name)
    }
}
