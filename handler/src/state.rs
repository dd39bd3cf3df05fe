//! State definitions for the token handler contract
//!
//! Registry and ledger storage live next to the code that owns them
//! (`registry` and `safe`); this module holds configuration and the
//! deposit audit log.

use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Addr, Binary, Uint128};
use cw_storage_plus::{Item, Map};

// ============================================================================
// Core Configuration
// ============================================================================

/// Contract configuration, fixed at instantiation
#[cw_serde]
pub struct Config {
    /// The only identity allowed to deposit, execute, withdraw and fund
    pub bridge: Addr,
    /// Identity allowed to edit the resource registry
    pub admin: Addr,
    /// Bech32 prefix used to turn 20-byte recipients into local addresses
    pub address_prefix: String,
}

/// Audit entry for an accepted deposit
#[cw_serde]
pub struct DepositRecord {
    pub asset: Addr,
    pub destination_chain_id: u64,
    pub resource_id: [u8; 32],
    pub recipient_address_length: u64,
    pub recipient_address: Binary,
    pub depositor: Addr,
    pub amount: Uint128,
}

// ============================================================================
// Constants
// ============================================================================

/// Contract name for cw2 migration info
pub const CONTRACT_NAME: &str = "crates.io:cl8y-token-handler";

/// Contract version for cw2 migration info
pub const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Address prefix used when none is configured
pub const DEFAULT_ADDRESS_PREFIX: &str = "terra";

// ============================================================================
// Storage
// ============================================================================

pub const CONFIG: Item<Config> = Item::new("config");

/// Deposit records
/// Key: (destination_chain_id, deposit_nonce), Value: DepositRecord
pub const DEPOSIT_RECORDS: Map<(u64, u64), DepositRecord> = Map::new("deposit_records");
