//! CL8Y Token Handler - Custody and Routing for Bridged CW20 Tokens
//!
//! The handler is the asset side of the bridge. The bridge contract is its
//! only caller for value-moving operations; it decides when a transfer is
//! authoritative, and the handler moves the tokens.
//!
//! # Deposit (outgoing)
//! 1. Bridge calls `Deposit` with a resource id and an amount payload
//! 2. The resource id resolves to a whitelisted CW20 contract
//! 3. Burnable tokens are burned from the depositor; custodied tokens are
//!    moved into this contract
//! 4. A deposit record is stored under (destination chain, nonce)
//!
//! # Execution (incoming)
//! 1. Bridge calls `ExecuteTransfer` with a resource id and an
//!    amount/recipient payload
//! 2. Burnable tokens are minted to the recipient; custodied tokens are
//!    released from custody
//!
//! # Ledger
//! - Locked balance per token; a release can never exceed it
//! - Burned total per token; only ever grows
//! - A failing CW20 call reverts the whole transaction

pub mod address_codec;
pub mod contract;
pub mod error;
mod execute;
pub mod msg;
mod query;
pub mod registry;
pub mod safe;
pub mod state;

pub use crate::error::ContractError;
pub use crate::registry::{AssetEntry, AssetKind};
pub use common::{DepositPayload, ExecutionPayload, ResourceId};
