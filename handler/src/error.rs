//! Error types for the token handler contract

use common::CodecError;
use cosmwasm_std::{StdError, Uint128};
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum ContractError {
    #[error("{0}")]
    Std(#[from] StdError),

    // ========================================================================
    // Authorization Errors
    // ========================================================================
    #[error("Unauthorized: only the bridge can perform this action")]
    Unauthorized,

    #[error("Unauthorized: only admin can perform this action")]
    UnauthorizedAdmin,

    // ========================================================================
    // Routing Errors
    // ========================================================================
    #[error("Unknown or unwhitelisted asset for resource {resource_id}")]
    UnknownOrUnwhitelistedAsset { resource_id: String },

    #[error("Asset not registered: {asset}")]
    AssetNotRegistered { asset: String },

    #[error("Resource id mismatch: call names {expected}, payload names {got}")]
    ResourceIdMismatch { expected: String, got: String },

    // ========================================================================
    // Payload Errors
    // ========================================================================
    #[error("Malformed payload: {0}")]
    MalformedPayload(#[from] CodecError),

    // ========================================================================
    // Ledger Errors
    // ========================================================================
    #[error("Invalid amount: {reason}")]
    InvalidAmount { reason: String },

    #[error("Insufficient custody for {asset}: locked {locked}, requested {requested}")]
    InsufficientCustody {
        asset: String,
        locked: Uint128,
        requested: Uint128,
    },

    #[error("Ledger overflow for {asset}")]
    LedgerOverflow { asset: String },

    #[error("External asset call failed ({call}): {reason}")]
    ExternalAssetCallFailed { call: String, reason: String },

    #[error("Unknown reply id: {id}")]
    UnknownReplyId { id: u64 },

    // ========================================================================
    // Record Errors
    // ========================================================================
    #[error("Deposit already recorded for chain {destination_chain_id}, nonce {deposit_nonce}")]
    DepositAlreadyRecorded {
        destination_chain_id: u64,
        deposit_nonce: u64,
    },

    // ========================================================================
    // Instantiation Errors
    // ========================================================================
    #[error("Resource list mismatch: {resource_ids} resource ids, {assets} asset addresses")]
    ResourceListMismatch { resource_ids: usize, assets: usize },
}
