use soroban_sdk::{contracttype, symbol_short, Address, Env};

pub const EVENT_VERSION: u32 = 1;

#[contracttype]
#[derive(Clone, Debug)]
pub struct AgreementInitialized {
    pub version: u32,
    pub beneficiary: Address,
    pub bounty_percentage: u32,
    pub tip_percentage: u32,
    pub minimum_amount: i128,
    pub timestamp: u64,
}

pub fn emit_agreement_initialized(env: &Env, event: AgreementInitialized) {
    let topics = (symbol_short!("init"),);
    env.events().publish(topics, event);
}

#[contracttype]
#[derive(Clone, Debug)]
pub struct DepositReceived {
    pub version: u32,
    pub hacker: Address,
    pub amount: i128,
    pub timestamp: u64,
}

pub fn emit_deposit_received(env: &Env, event: DepositReceived) {
    let topics = (symbol_short!("deposit"), event.hacker.clone());
    env.events().publish(topics, event);
}

#[contracttype]
#[derive(Clone, Debug)]
pub struct FundsAdded {
    pub version: u32,
    pub from: Address,
    pub amount: i128,
    pub timestamp: u64,
}

pub fn emit_funds_added(env: &Env, event: FundsAdded) {
    let topics = (symbol_short!("fund"),);
    env.events().publish(topics, event);
}

#[contracttype]
#[derive(Clone, Debug)]
pub struct PayoutsSent {
    pub version: u32,
    pub bounty_amount: i128,
    pub tip_amount: i128,
    pub beneficiary_amount: i128,
    pub timestamp: u64,
}

pub fn emit_payouts_sent(env: &Env, event: PayoutsSent) {
    let topics = (symbol_short!("payout"),);
    env.events().publish(topics, event);
}

#[contracttype]
#[derive(Clone, Debug)]
pub struct AgreementCancelled {
    pub version: u32,
    pub hacker: Address,
    pub amount: i128,
    pub timestamp: u64,
}

pub fn emit_agreement_cancelled(env: &Env, event: AgreementCancelled) {
    let topics = (symbol_short!("cancel"), event.hacker.clone());
    env.events().publish(topics, event);
}

#[contracttype]
#[derive(Clone, Debug)]
pub struct TokenSwept {
    pub version: u32,
    pub token: Address,
    pub amount: i128,
    pub timestamp: u64,
}

pub fn emit_token_swept(env: &Env, event: TokenSwept) {
    let topics = (symbol_short!("sweep"), event.token.clone());
    env.events().publish(topics, event);
}
