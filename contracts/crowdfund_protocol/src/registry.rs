//! # Registry
//!
//! Process-wide project identity: the name→existence index and the project
//! id allocator. A name, once accepted, is reserved for the lifetime of the
//! contract — there is no teardown path. Matching is exact and
//! case-sensitive (bytewise comparison of the stored `String`).
//!
//! Input validation (empty names, undersized goals) stays with the `create`
//! entry point; this module owns only the index.

use soroban_sdk::{Env, String};

use crate::storage;

/// Return `true` if `name` was accepted by any prior creation call.
pub fn exists(env: &Env, name: &String) -> bool {
    storage::is_name_taken(env, name)
}

/// Permanently reserve `name`. Callers must check [`exists`] first; the
/// reservation itself is unconditional.
pub fn reserve(env: &Env, name: &String) {
    storage::mark_name_taken(env, name);
}

/// Allocate the next sequential project id.
pub fn allocate_project_id(env: &Env) -> u64 {
    storage::next_project_id(env)
}
