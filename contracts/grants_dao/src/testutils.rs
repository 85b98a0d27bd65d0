extern crate std;

use soroban_sdk::{
    testutils::{Address as _, Events},
    token, Address, Env, String, Symbol, TryFromVal, Val, Vec,
};

use crate::{Competition, Grant, GrantsDao, GrantsDaoClient, Initiative};

pub struct Setup {
    pub env: Env,
    pub client: GrantsDaoClient<'static>,
    pub admin: Address,
    pub token: token::Client<'static>,
}

fn create_token(env: &Env, admin: &Address) -> token::Client<'static> {
    let addr = env.register_stellar_asset_contract_v2(admin.clone());
    token::Client::new(env, &addr.address())
}

/// Deployed and initialised DAO plus one payment token with an empty pool.
pub fn setup() -> Setup {
    let env = Env::default();
    env.mock_all_auths();
    let contract_id = env.register(GrantsDao, ());
    let client = GrantsDaoClient::new(&env, &contract_id);
    let admin = Address::generate(&env);
    client.init(&admin);
    let token_admin = Address::generate(&env);
    let token = create_token(&env, &token_admin);
    Setup {
        env,
        client,
        admin,
        token,
    }
}

/// Same as [`setup`] with `pool` tokens already held by the contract.
pub fn setup_funded(pool: i128) -> Setup {
    let s = setup();
    fund(&s, pool);
    s
}

pub fn fund(s: &Setup, amount: i128) {
    token::StellarAssetClient::new(&s.env, &s.token.address).mint(&s.client.address, &amount);
}

pub fn text(env: &Env, value: &str) -> String {
    String::from_str(env, value)
}

pub fn amounts(env: &Env, values: &[i128]) -> Vec<i128> {
    Vec::from_slice(env, values)
}

pub fn pool(s: &Setup) -> i128 {
    s.token.balance(&s.client.address)
}

pub fn create_grant(s: &Setup, key: &str, milestones: &[i128], receiver: &Address) -> Grant {
    s.client.create_grant(
        &s.admin,
        &text(&s.env, key),
        &text(&s.env, "Rebuild the whole protocol"),
        &text(&s.env, "Rewrite every contract under the new paradigm"),
        &amounts(&s.env, milestones),
        &s.token.address,
        &text(&s.env, "Danijel"),
        receiver,
    )
}

pub fn create_initiative(s: &Setup, key: &str, milestones: &[i128]) -> Initiative {
    s.client.create_initiative(
        &s.admin,
        &text(&s.env, key),
        &text(&s.env, "Audit the staking module"),
        &text(&s.env, "Commission an external review"),
        &amounts(&s.env, milestones),
        &s.token.address,
    )
}

pub fn create_competition(s: &Setup, key: &str, places: &[i128]) -> Competition {
    let total: i128 = places.iter().sum();
    s.client.create_competition(
        &s.admin,
        &text(&s.env, key),
        &text(&s.env, "Dashboard hackathon"),
        &text(&s.env, "Best analytics dashboard wins"),
        &s.token.address,
        &total,
        &amounts(&s.env, places),
    )
}

pub fn generate(env: &Env, count: usize) -> Vec<Address> {
    let mut out = Vec::new(env);
    for _ in 0..count {
        out.push_back(Address::generate(env));
    }
    out
}

/// Payloads of every event published by the DAO under topic `name`, oldest first.
pub fn events_named(s: &Setup, name: &str) -> std::vec::Vec<Val> {
    let wanted = Symbol::new(&s.env, name);
    let mut found = std::vec::Vec::new();
    for (contract, topics, data) in s.env.events().all().iter() {
        if contract != s.client.address {
            continue;
        }
        let Some(first) = topics.get(0) else {
            continue;
        };
        if let Ok(topic) = Symbol::try_from_val(&s.env, &first) {
            if topic == wanted {
                found.push(data);
            }
        }
    }
    found
}
