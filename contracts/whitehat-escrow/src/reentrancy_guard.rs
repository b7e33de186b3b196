//! Reentrancy guard for the escrow agreement.
//!
//! Uses the `DataKey::ReentrancyGuard` flag in instance storage. Soroban
//! rolls back all state on panic or `Err` return, so the flag cannot get
//! permanently stuck. The guard is a backstop behind the contract's
//! effects-before-interactions ordering: entry points check the agreement
//! state before acquiring, so a nested call against a retired agreement
//! fails its state check rather than tripping the flag.

use crate::DataKey;
use soroban_sdk::Env;

/// Acquire the reentrancy guard.
///
/// # Panics
/// Panics with `"Reentrancy detected"` if the guard is already held.
pub fn acquire(env: &Env) {
    let entered: bool = env
        .storage()
        .instance()
        .get(&DataKey::ReentrancyGuard)
        .unwrap_or(false);
    if entered {
        panic!("Reentrancy detected");
    }
    env.storage()
        .instance()
        .set(&DataKey::ReentrancyGuard, &true);
}

/// Release the reentrancy guard.
pub fn release(env: &Env) {
    env.storage()
        .instance()
        .set(&DataKey::ReentrancyGuard, &false);
}
