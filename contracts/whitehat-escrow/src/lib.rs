#![no_std]
//! Escrow agreement for the voluntary return of exploited funds.
//!
//! A whitehat ("hacker") returns recovered funds into custody; the victim
//! organization ("beneficiary") later triggers a three-way split that pays
//! the hacker a fixed bounty percentage, an optional tip recipient a tip
//! percentage, and the beneficiary the remainder. The hacker may instead
//! cancel and reclaim the full balance. Either path retires the agreement
//! permanently.

use soroban_sdk::{
    contract, contracterror, contractimpl, contracttype, token, Address, Env,
};

mod events;
pub mod payout_math;
mod reentrancy_guard;


use events::{
    emit_agreement_cancelled, emit_agreement_initialized, emit_deposit_received,
    emit_funds_added, emit_payouts_sent, emit_token_swept, AgreementCancelled,
    AgreementInitialized, DepositReceived, FundsAdded, PayoutsSent, TokenSwept,
};

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Error {
    /// Contract has already been initialized.
    AlreadyInitialized = 1,
    /// Contract has not been initialized yet. Call `init` first.
    NotInitialized = 2,
    /// Bounty and tip percentages together exceed 100%.
    InvalidDistribution = 3,
    /// The identity-fixing deposit was given no recipient.
    InvalidHacker = 4,
    /// The hacker slot is already fixed; only plain `fund` top-ups are accepted.
    AlreadyDeposited = 5,
    /// The identity-fixing deposit is below the configured minimum.
    MustDepositMinimumAmount = 6,
    /// No hacker has been established yet.
    MustHaveHackerBeforeDeposit = 7,
    /// Only the hacker may cancel the agreement.
    OnlyHacker = 8,
    /// Only the beneficiary may perform this operation.
    OnlyBeneficiary = 9,
    /// Custody balance is below the minimum required for distribution.
    NotMinimumAmount = 10,
    /// The bounty transfer to the hacker was rejected.
    BountyPayoutFailed = 11,
    /// The tip transfer was rejected.
    TipPayoutFailed = 12,
    /// The refund transfer to the hacker was rejected.
    CancelPayoutFailed = 13,
    /// The agreement has been retired by a terminal operation.
    AgreementRetired = 14,
    /// The escrow token itself cannot be swept.
    NotForeignAsset = 15,
    /// Amount must be positive.
    InvalidAmount = 16,
    /// Arithmetic overflow while computing the payout split.
    Overflow = 17,
}

/// Lifecycle of the agreement. Transitions are one-way:
/// `Pending → Funded → Terminated`, with `Pending` skipped when the hacker
/// is already known at initialization.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum AgreementState {
    /// Hacker identity not yet established; only `deposit` may fund.
    Pending,
    /// Hacker fixed; top-ups and both terminal operations are available.
    Funded,
    /// A terminal operation has run; the agreement no longer exists.
    Terminated,
}

/// Immutable payout configuration, captured once at `init`.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AgreementConfig {
    pub beneficiary: Address,
    pub tip_address: Option<Address>,
    /// Hacker share of the balance, in basis points out of 10 000.
    pub bounty_percentage: u32,
    /// Tip share of the balance, in basis points out of 10 000.
    pub tip_percentage: u32,
    /// Smallest balance that may be deposited first or distributed.
    pub minimum_amount: i128,
    /// Token held in custody (the native asset's SAC on Stellar).
    pub token: Address,
}

#[contracttype]
pub enum DataKey {
    Config,
    Hacker,
    State,
    ReentrancyGuard,
}

#[contract]
pub struct WhitehatEscrowContract;

#[contractimpl]
impl WhitehatEscrowContract {
    /// Create the agreement. Call once.
    ///
    /// `hacker` may be left unset to deploy anonymously; the identity is then
    /// fixed by the first `deposit`. The only validation performed here is
    /// that the two percentages fit inside 100%.
    pub fn init(
        env: Env,
        hacker: Option<Address>,
        beneficiary: Address,
        tip_address: Option<Address>,
        bounty_percentage: u32,
        tip_percentage: u32,
        minimum_amount: i128,
        token: Address,
    ) -> Result<(), Error> {
        if env.storage().instance().has(&DataKey::Config) {
            return Err(Error::AlreadyInitialized);
        }
        let total = bounty_percentage
            .checked_add(tip_percentage)
            .ok_or(Error::InvalidDistribution)?;
        if total > payout_math::HUNDRED_PERCENT_BPS {
            return Err(Error::InvalidDistribution);
        }

        let config = AgreementConfig {
            beneficiary: beneficiary.clone(),
            tip_address,
            bounty_percentage,
            tip_percentage,
            minimum_amount,
            token,
        };
        env.storage().instance().set(&DataKey::Config, &config);

        let state = match &hacker {
            Some(hacker) => {
                env.storage().instance().set(&DataKey::Hacker, hacker);
                AgreementState::Funded
            }
            None => AgreementState::Pending,
        };
        env.storage().instance().set(&DataKey::State, &state);

        emit_agreement_initialized(
            &env,
            AgreementInitialized {
                version: events::EVENT_VERSION,
                beneficiary,
                bounty_percentage,
                tip_percentage,
                minimum_amount,
                timestamp: env.ledger().timestamp(),
            },
        );
        Ok(())
    }

    /// Identity-fixing first deposit: funds the agreement and permanently
    /// fixes who will receive the bounty.
    ///
    /// The deployment tooling passes the recipient through as it received it,
    /// so an absent recipient is rejected here rather than upstream. The
    /// first deposit must meet `minimum_amount`; later top-ups go through
    /// `fund` with no per-deposit minimum.
    pub fn deposit(
        env: Env,
        from: Address,
        recipient: Option<Address>,
        amount: i128,
    ) -> Result<(), Error> {
        let config = Self::ensure_live(&env)?;
        reentrancy_guard::acquire(&env);
        from.require_auth();

        let recipient = recipient.ok_or(Error::InvalidHacker)?;
        if env.storage().instance().has(&DataKey::Hacker) {
            return Err(Error::AlreadyDeposited);
        }
        if amount < config.minimum_amount {
            return Err(Error::MustDepositMinimumAmount);
        }
        if amount <= 0 {
            return Err(Error::InvalidAmount);
        }

        // EFFECTS: fix the hacker identity before the inbound transfer
        env.storage().instance().set(&DataKey::Hacker, &recipient);
        env.storage()
            .instance()
            .set(&DataKey::State, &AgreementState::Funded);

        // INTERACTION: external token transfer is last
        let client = token::Client::new(&env, &config.token);
        client.transfer(&from, &env.current_contract_address(), &amount);

        emit_deposit_received(
            &env,
            DepositReceived {
                version: events::EVENT_VERSION,
                hacker: recipient,
                amount,
                timestamp: env.ledger().timestamp(),
            },
        );
        reentrancy_guard::release(&env);
        Ok(())
    }

    /// Top-up deposit, the analogue of a plain value transfer. Accepted only
    /// once the hacker is fixed; the minimum is enforced at distribution
    /// time, not per top-up.
    pub fn fund(env: Env, from: Address, amount: i128) -> Result<(), Error> {
        let config = Self::ensure_live(&env)?;
        reentrancy_guard::acquire(&env);
        from.require_auth();

        if !env.storage().instance().has(&DataKey::Hacker) {
            return Err(Error::MustHaveHackerBeforeDeposit);
        }
        if amount <= 0 {
            return Err(Error::InvalidAmount);
        }

        let client = token::Client::new(&env, &config.token);
        client.transfer(&from, &env.current_contract_address(), &amount);

        emit_funds_added(
            &env,
            FundsAdded {
                version: events::EVENT_VERSION,
                from,
                amount,
                timestamp: env.ledger().timestamp(),
            },
        );
        reentrancy_guard::release(&env);
        Ok(())
    }

    /// Distribute the full custody balance three ways and retire the
    /// agreement. Beneficiary only.
    ///
    /// Shares are floored basis-point fractions of the balance observed at
    /// entry; the rounding remainder accrues to the beneficiary.
    ///
    /// # Reentrancy
    /// The `Terminated` transition and hacker-slot removal are committed
    /// before the first outbound transfer, so a call nested inside a
    /// transfer hook fails its own state check. The guard flag is a
    /// secondary backstop.
    pub fn send_payouts(env: Env, caller: Address) -> Result<(), Error> {
        let config = Self::ensure_live(&env)?;
        reentrancy_guard::acquire(&env);
        caller.require_auth();
        if caller != config.beneficiary {
            return Err(Error::OnlyBeneficiary);
        }
        let hacker: Address = env
            .storage()
            .instance()
            .get(&DataKey::Hacker)
            .ok_or(Error::MustHaveHackerBeforeDeposit)?;

        let contract = env.current_contract_address();
        let client = token::Client::new(&env, &config.token);
        let balance = client.balance(&contract);
        if balance < config.minimum_amount {
            return Err(Error::NotMinimumAmount);
        }

        let tip_bps = match &config.tip_address {
            Some(_) => config.tip_percentage,
            None => 0,
        };
        let split = payout_math::split_balance(balance, config.bounty_percentage, tip_bps)
            .ok_or(Error::Overflow)?;

        // EFFECTS: retire the agreement before any outbound transfer
        env.storage()
            .instance()
            .set(&DataKey::State, &AgreementState::Terminated);
        env.storage().instance().remove(&DataKey::Hacker);

        // INTERACTIONS: any failed leg aborts and rolls back the whole call
        if client.try_transfer(&contract, &hacker, &split.bounty).is_err() {
            return Err(Error::BountyPayoutFailed);
        }
        if let Some(tip_address) = &config.tip_address {
            if split.tip > 0
                && client.try_transfer(&contract, tip_address, &split.tip).is_err()
            {
                return Err(Error::TipPayoutFailed);
            }
        }
        client.transfer(&contract, &config.beneficiary, &split.beneficiary);

        emit_payouts_sent(
            &env,
            PayoutsSent {
                version: events::EVENT_VERSION,
                bounty_amount: split.bounty,
                tip_amount: split.tip,
                beneficiary_amount: split.beneficiary,
                timestamp: env.ledger().timestamp(),
            },
        );
        reentrancy_guard::release(&env);
        Ok(())
    }

    /// Refund the full balance to the hacker and retire the agreement.
    /// Hacker only; a zero balance is a valid no-op refund.
    ///
    /// # Reentrancy
    /// Same ordering as `send_payouts`: state is retired before the refund
    /// transfer is issued.
    pub fn cancel_agreement(env: Env, caller: Address) -> Result<(), Error> {
        let config = Self::ensure_live(&env)?;
        reentrancy_guard::acquire(&env);
        caller.require_auth();
        let hacker: Address = env
            .storage()
            .instance()
            .get(&DataKey::Hacker)
            .ok_or(Error::OnlyHacker)?;
        if caller != hacker {
            return Err(Error::OnlyHacker);
        }

        let contract = env.current_contract_address();
        let client = token::Client::new(&env, &config.token);
        let balance = client.balance(&contract);

        // EFFECTS: retire before the refund transfer
        env.storage()
            .instance()
            .set(&DataKey::State, &AgreementState::Terminated);
        env.storage().instance().remove(&DataKey::Hacker);

        if balance > 0 && client.try_transfer(&contract, &hacker, &balance).is_err() {
            return Err(Error::CancelPayoutFailed);
        }

        emit_agreement_cancelled(
            &env,
            AgreementCancelled {
                version: events::EVENT_VERSION,
                hacker,
                amount: balance,
                timestamp: env.ledger().timestamp(),
            },
        );
        reentrancy_guard::release(&env);
        Ok(())
    }

    /// Recover a foreign token mistakenly sent to the agreement. Beneficiary
    /// only. Independent of the native lifecycle: usable before, during, and
    /// after termination. The escrow token itself is not sweepable, as that
    /// would bypass the distribution state machine.
    pub fn sweep_token(
        env: Env,
        caller: Address,
        token: Address,
        amount: i128,
    ) -> Result<(), Error> {
        let config = Self::config(&env)?;
        reentrancy_guard::acquire(&env);
        caller.require_auth();
        if caller != config.beneficiary {
            return Err(Error::OnlyBeneficiary);
        }
        if token == config.token {
            return Err(Error::NotForeignAsset);
        }
        if amount <= 0 {
            return Err(Error::InvalidAmount);
        }

        let client = token::Client::new(&env, &token);
        client.transfer(
            &env.current_contract_address(),
            &config.beneficiary,
            &amount,
        );

        emit_token_swept(
            &env,
            TokenSwept {
                version: events::EVENT_VERSION,
                token,
                amount,
                timestamp: env.ledger().timestamp(),
            },
        );
        reentrancy_guard::release(&env);
        Ok(())
    }

    // ── Read accessors ──────────────────────────────────────────────────

    /// Bounty recipient, `None` until the first deposit fixes it (and again
    /// after the agreement is retired).
    pub fn hacker(env: Env) -> Result<Option<Address>, Error> {
        Self::config(&env)?;
        Ok(env.storage().instance().get(&DataKey::Hacker))
    }

    pub fn beneficiary(env: Env) -> Result<Address, Error> {
        Ok(Self::config(&env)?.beneficiary)
    }

    pub fn tip_address(env: Env) -> Result<Option<Address>, Error> {
        Ok(Self::config(&env)?.tip_address)
    }

    pub fn bounty_percentage(env: Env) -> Result<u32, Error> {
        Ok(Self::config(&env)?.bounty_percentage)
    }

    pub fn tip_percentage(env: Env) -> Result<u32, Error> {
        Ok(Self::config(&env)?.tip_percentage)
    }

    pub fn minimum_amount(env: Env) -> Result<i128, Error> {
        Ok(Self::config(&env)?.minimum_amount)
    }

    /// Live custody balance in the escrow token.
    pub fn balance(env: Env) -> Result<i128, Error> {
        let config = Self::config(&env)?;
        let client = token::Client::new(&env, &config.token);
        Ok(client.balance(&env.current_contract_address()))
    }

    pub fn agreement_state(env: Env) -> Result<AgreementState, Error> {
        env.storage()
            .instance()
            .get(&DataKey::State)
            .ok_or(Error::NotInitialized)
    }

    // ── Internal helpers ────────────────────────────────────────────────

    fn config(env: &Env) -> Result<AgreementConfig, Error> {
        env.storage()
            .instance()
            .get(&DataKey::Config)
            .ok_or(Error::NotInitialized)
    }

    /// Load the config and reject calls against a retired agreement. Every
    /// native-lifecycle entry point goes through this before anything else,
    /// so a reentrant call during a terminal operation observes the already
    /// committed `Terminated` state.
    fn ensure_live(env: &Env) -> Result<AgreementConfig, Error> {
        let config = Self::config(env)?;
        let state: AgreementState = env
            .storage()
            .instance()
            .get(&DataKey::State)
            .ok_or(Error::NotInitialized)?;
        if state == AgreementState::Terminated {
            return Err(Error::AgreementRetired);
        }
        Ok(config)
    }
}
