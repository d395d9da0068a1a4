//! # Badges
//!
//! Contributor badges: a per-project non-fungible ownership ledger plus the
//! quota rule that drives issuance.
//!
//! One badge is due per full [`BADGE_UNIT`](crate::types::BADGE_UNIT) of an
//! address's *lifetime* contribution. The quota reads the contribution total,
//! which refunds never decrement, so badges stay mintable and transferable
//! after cancellation, failure, or a completed refund — they are a permanent
//! souvenir of contribution, decoupled from fund state.
//!
//! Badge ids are sequential starting at 1 and unique per project, not
//! globally. Ownership is a plain `(project, badge id) → holder` mapping
//! with an optional per-badge approved operator, cleared on every transfer.

use soroban_sdk::{Address, Env};

use crate::storage;
use crate::types::BADGE_UNIT;
use crate::Error;

/// Total badges an address has earned: `floor(lifetime contribution / unit)`.
pub fn quota(contributed: i128) -> u64 {
    (contributed / BADGE_UNIT) as u64
}

/// Issue the next badge to `contributor`, returning its id.
///
/// Fails with `NoBadgeDue` when every earned badge has already been minted.
/// Each call issues at most one badge; a contributor eligible for N badges
/// must call N times.
pub fn mint(env: &Env, project_id: u64, contributor: &Address) -> Result<u64, Error> {
    let contributed = storage::contribution(env, project_id, contributor);
    let minted = storage::badges_minted(env, project_id, contributor);
    if quota(contributed) <= minted {
        return Err(Error::NoBadgeDue);
    }

    let mut state = storage::load_project_state(env, project_id)?;
    state.badge_count += 1;
    let badge_id = state.badge_count;
    storage::save_project_state(env, project_id, &state);

    storage::set_badge_owner(env, project_id, badge_id, contributor);
    storage::set_badges_minted(env, project_id, contributor, minted + 1);
    Ok(badge_id)
}

/// Current holder of a badge. Fails with `BadgeNotFound` for unknown ids.
pub fn owner_of(env: &Env, project_id: u64, badge_id: u64) -> Result<Address, Error> {
    storage::badge_owner(env, project_id, badge_id).ok_or(Error::BadgeNotFound)
}

/// Approve `operator` to transfer the badge on the holder's behalf.
///
/// `holder` must currently own the badge. A later approval replaces any
/// earlier one; a transfer clears it.
pub fn approve(
    env: &Env,
    project_id: u64,
    holder: &Address,
    operator: &Address,
    badge_id: u64,
) -> Result<(), Error> {
    if owner_of(env, project_id, badge_id)? != *holder {
        return Err(Error::NotBadgeHolder);
    }
    storage::set_badge_delegate(env, project_id, badge_id, operator);
    Ok(())
}

/// Transfer a badge to `to`.
///
/// `caller` must be the current holder or the approved operator. Succeeds in
/// every project status.
pub fn transfer(
    env: &Env,
    project_id: u64,
    caller: &Address,
    to: &Address,
    badge_id: u64,
) -> Result<(), Error> {
    let holder = owner_of(env, project_id, badge_id)?;
    let approved = storage::badge_delegate(env, project_id, badge_id);
    if *caller != holder && approved.as_ref() != Some(caller) {
        return Err(Error::NotBadgeHolder);
    }
    storage::set_badge_owner(env, project_id, badge_id, to);
    storage::clear_badge_delegate(env, project_id, badge_id);
    Ok(())
}
