extern crate std;

use soroban_sdk::{
    symbol_short,
    testutils::{Address as _, Events, Ledger},
    token, vec, Address, Env, IntoVal, String, TryIntoVal,
};

use crate::events::{
    BadgeAwarded, BadgeTransferred, ContributionReceived, FundsWithdrawn, ProjectCancelled,
    ProjectCreated, RefundIssued,
};
use crate::{CrowdfundProtocol, CrowdfundProtocolClient, BADGE_UNIT, FUNDING_WINDOW};

const ONE: i128 = BADGE_UNIT;

fn setup() -> (
    Env,
    CrowdfundProtocolClient<'static>,
    token::StellarAssetClient<'static>,
) {
    let env = Env::default();
    env.mock_all_auths();
    let contract_id = env.register(CrowdfundProtocol, ());
    let client = CrowdfundProtocolClient::new(&env, &contract_id);

    let token_admin = Address::generate(&env);
    let sac = env.register_stellar_asset_contract_v2(token_admin);
    client.init(&sac.address());
    let minter = token::StellarAssetClient::new(&env, &sac.address());
    (env, client, minter)
}

fn funded_project(
    env: &Env,
    client: &CrowdfundProtocolClient,
    minter: &token::StellarAssetClient,
    owner: &Address,
    contributor: &Address,
    goal: i128,
    amount: i128,
) -> u64 {
    let id = client.create(owner, &String::from_str(env, "Lemonade Stand"), &goal);
    minter.mint(contributor, &amount);
    client.contribute(&id, contributor, &amount);
    id
}

#[test]
fn test_project_created_event() {
    let (env, client, _) = setup();
    let alice = Address::generate(&env);
    let name = String::from_str(&env, "Orange Juice Factory");
    let goal = 2 * ONE;

    let id = client.create(&alice, &name, &goal);

    let all_events = env.events().all();
    let last_event = all_events.last().expect("No events found");

    // Topic: (symbol_short!("created"), project_id)
    assert_eq!(last_event.0, client.address);
    let expected_topics = vec![
        &env,
        symbol_short!("created").into_val(&env),
        id.into_val(&env),
    ];
    assert_eq!(last_event.1, expected_topics);

    // Data: ProjectCreated struct
    let event_data: ProjectCreated = last_event.2.try_into_val(&env).unwrap();
    assert_eq!(
        event_data,
        ProjectCreated {
            project_id: id,
            owner: alice.clone(),
            name: name.clone(),
            goal,
        }
    );
}

#[test]
fn test_contribution_event() {
    let (env, client, minter) = setup();
    let alice = Address::generate(&env);
    let bob = Address::generate(&env);

    let id = funded_project(&env, &client, &minter, &alice, &bob, 5 * ONE, ONE);

    let all_events = env.events().all();
    let last_event = all_events.last().expect("No events found");

    assert_eq!(last_event.0, client.address);
    let expected_topics = vec![
        &env,
        symbol_short!("contrib").into_val(&env),
        id.into_val(&env),
    ];
    assert_eq!(last_event.1, expected_topics);

    let event_data: ContributionReceived = last_event.2.try_into_val(&env).unwrap();
    assert_eq!(
        event_data,
        ContributionReceived {
            project_id: id,
            contributor: bob.clone(),
            amount: ONE,
        }
    );
}

#[test]
fn test_cancellation_event() {
    let (env, client, _) = setup();
    let alice = Address::generate(&env);

    let id = client.create(&alice, &String::from_str(&env, "Lemonade Stand"), &(5 * ONE));
    client.cancel(&id, &alice);

    let all_events = env.events().all();
    let last_event = all_events.last().expect("No events found");

    assert_eq!(last_event.0, client.address);
    let expected_topics = vec![
        &env,
        symbol_short!("cancelled").into_val(&env),
        id.into_val(&env),
    ];
    assert_eq!(last_event.1, expected_topics);

    let event_data: ProjectCancelled = last_event.2.try_into_val(&env).unwrap();
    assert_eq!(
        event_data,
        ProjectCancelled {
            project_id: id,
            owner: alice.clone(),
        }
    );
}

#[test]
fn test_refund_event() {
    let (env, client, minter) = setup();
    let alice = Address::generate(&env);
    let bob = Address::generate(&env);

    let id = funded_project(&env, &client, &minter, &alice, &bob, 5 * ONE, 2 * ONE);
    env.ledger().with_mut(|li| li.timestamp += FUNDING_WINDOW);
    client.refund(&id, &bob);

    let all_events = env.events().all();
    let last_event = all_events.last().expect("No events found");

    assert_eq!(last_event.0, client.address);
    let expected_topics = vec![
        &env,
        symbol_short!("refunded").into_val(&env),
        id.into_val(&env),
    ];
    assert_eq!(last_event.1, expected_topics);

    let event_data: RefundIssued = last_event.2.try_into_val(&env).unwrap();
    assert_eq!(
        event_data,
        RefundIssued {
            project_id: id,
            contributor: bob.clone(),
            amount: 2 * ONE,
        }
    );
}

#[test]
fn test_withdrawal_event_carries_remaining_balance() {
    let (env, client, minter) = setup();
    let alice = Address::generate(&env);
    let bob = Address::generate(&env);

    let id = funded_project(&env, &client, &minter, &alice, &bob, 5 * ONE, 15 * ONE);
    client.withdraw(&id, &alice, &ONE);

    let all_events = env.events().all();
    let last_event = all_events.last().expect("No events found");

    assert_eq!(last_event.0, client.address);
    let expected_topics = vec![
        &env,
        symbol_short!("withdrawn").into_val(&env),
        id.into_val(&env),
    ];
    assert_eq!(last_event.1, expected_topics);

    let event_data: FundsWithdrawn = last_event.2.try_into_val(&env).unwrap();
    assert_eq!(
        event_data,
        FundsWithdrawn {
            project_id: id,
            amount: ONE,
            remaining: 14 * ONE,
        }
    );
}

#[test]
fn test_badge_awarded_event() {
    let (env, client, minter) = setup();
    let alice = Address::generate(&env);
    let bob = Address::generate(&env);

    let id = funded_project(&env, &client, &minter, &alice, &bob, 5 * ONE, ONE);
    let badge_id = client.mint_badge(&id, &bob);

    let all_events = env.events().all();
    let last_event = all_events.last().expect("No events found");

    assert_eq!(last_event.0, client.address);
    let expected_topics = vec![
        &env,
        symbol_short!("badge").into_val(&env),
        id.into_val(&env),
    ];
    assert_eq!(last_event.1, expected_topics);

    let event_data: BadgeAwarded = last_event.2.try_into_val(&env).unwrap();
    assert_eq!(
        event_data,
        BadgeAwarded {
            project_id: id,
            contributor: bob.clone(),
            badge_id,
        }
    );
}

#[test]
fn test_badge_transferred_event() {
    let (env, client, minter) = setup();
    let alice = Address::generate(&env);
    let bob = Address::generate(&env);
    let chris = Address::generate(&env);

    let id = funded_project(&env, &client, &minter, &alice, &bob, 5 * ONE, ONE);
    let badge_id = client.mint_badge(&id, &bob);
    client.transfer_badge(&id, &bob, &chris, &badge_id);

    let all_events = env.events().all();
    let last_event = all_events.last().expect("No events found");

    assert_eq!(last_event.0, client.address);
    let expected_topics = vec![
        &env,
        symbol_short!("bxfer").into_val(&env),
        id.into_val(&env),
    ];
    assert_eq!(last_event.1, expected_topics);

    let event_data: BadgeTransferred = last_event.2.try_into_val(&env).unwrap();
    assert_eq!(
        event_data,
        BadgeTransferred {
            project_id: id,
            from: bob.clone(),
            to: chris.clone(),
            badge_id,
        }
    );
}
