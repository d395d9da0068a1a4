#![allow(dead_code)]

extern crate std;

use crate::types::{Project, ProjectStatus, BADGE_UNIT, MIN_GOAL};

/// INV-1: Escrow conservation — the funds held always equal contributions
/// in, minus successful withdrawals, minus successful refunds, and never go
/// negative.
pub fn assert_conservation(
    contributed: i128,
    withdrawn: i128,
    refunded: i128,
    current_funding: i128,
) {
    assert_eq!(
        current_funding,
        contributed - withdrawn - refunded,
        "INV-1 violated: {} in - {} withdrawn - {} refunded != {} held",
        contributed,
        withdrawn,
        refunded,
        current_funding
    );
    assert!(
        current_funding >= 0,
        "INV-1 violated: escrow balance is negative ({})",
        current_funding
    );
}

/// INV-2: Project goal must always be at least the minimum viable goal.
pub fn assert_goal_viable(project: &Project) {
    assert!(
        project.goal >= MIN_GOAL,
        "INV-2 violated: project {} has undersized goal ({})",
        project.id,
        project.goal
    );
}

/// INV-3: Status monotonicity — once a project leaves `Active` it never
/// returns. Any terminal-to-terminal pair other than identity is also
/// invalid, except the timed `Cancelled`/`Failed` overlap resolved in favor
/// of `Cancelled`.
pub fn assert_status_monotonic(before: ProjectStatus, after: ProjectStatus) {
    if before != ProjectStatus::Active {
        assert_ne!(
            after,
            ProjectStatus::Active,
            "INV-3 violated: project returned to Active from {:?}",
            before
        );
        assert_eq!(
            before, after,
            "INV-3 violated: terminal status changed from {:?} to {:?}",
            before, after
        );
    }
}

/// INV-4: Badge quota — an address can never hold more badges minted than
/// full units contributed.
pub fn assert_badge_quota(contributed: i128, minted: u64) {
    assert!(
        i128::from(minted) <= contributed / BADGE_UNIT,
        "INV-4 violated: {} badges minted for {} contributed",
        minted,
        contributed
    );
}

/// INV-5: Immutable configuration — owner, name, goal and deadline never
/// change after creation.
pub fn assert_config_immutable(original: &Project, current: &Project) {
    assert_eq!(original.id, current.id, "INV-5 violated: project id changed");
    assert_eq!(
        original.owner, current.owner,
        "INV-5 violated: project owner changed"
    );
    assert_eq!(
        original.name, current.name,
        "INV-5 violated: project name changed"
    );
    assert_eq!(
        original.goal, current.goal,
        "INV-5 violated: project goal changed"
    );
    assert_eq!(
        original.deadline, current.deadline,
        "INV-5 violated: project deadline changed"
    );
}
