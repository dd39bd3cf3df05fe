//! Safe - custody ledger and CW20 calls
//!
//! Tracks, per asset, the amount held in custody (`LOCKED_BALANCES`) and the
//! cumulative amount burned (`BURNED_BALANCES`). Each operation updates the
//! ledger and returns the CW20 sub-message that moves the value. The caller
//! attaches the sub-message to its `Response`; if the CW20 call fails the
//! `reply` entry point turns the failure into
//! [`ContractError::ExternalAssetCallFailed`] and the whole transaction,
//! ledger write included, is reverted.

use cosmwasm_std::{to_json_binary, Addr, StdResult, Storage, SubMsg, Uint128, WasmMsg};
use cw20::Cw20ExecuteMsg;
use cw_storage_plus::Map;

use crate::error::ContractError;

/// Custodied amount per asset (increases on fund-in, lock and mint)
pub const LOCKED_BALANCES: Map<&Addr, Uint128> = Map::new("locked_balances");

/// Cumulative burned amount per asset (never decreases)
pub const BURNED_BALANCES: Map<&Addr, Uint128> = Map::new("burned_balances");

/// The external call behind each ledger operation. The discriminant is the
/// sub-message reply id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetCall {
    FundIn = 1,
    Lock = 2,
    Release = 3,
    Mint = 4,
    Burn = 5,
}

impl AssetCall {
    pub fn id(self) -> u64 {
        self as u64
    }

    pub fn from_id(id: u64) -> Option<Self> {
        match id {
            1 => Some(AssetCall::FundIn),
            2 => Some(AssetCall::Lock),
            3 => Some(AssetCall::Release),
            4 => Some(AssetCall::Mint),
            5 => Some(AssetCall::Burn),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            AssetCall::FundIn => "fund_in",
            AssetCall::Lock => "lock",
            AssetCall::Release => "release",
            AssetCall::Mint => "mint",
            AssetCall::Burn => "burn",
        }
    }
}

pub fn locked_balance(storage: &dyn Storage, asset: &Addr) -> StdResult<Uint128> {
    Ok(LOCKED_BALANCES.may_load(storage, asset)?.unwrap_or_default())
}

pub fn burned_balance(storage: &dyn Storage, asset: &Addr) -> StdResult<Uint128> {
    Ok(BURNED_BALANCES.may_load(storage, asset)?.unwrap_or_default())
}

// ============================================================================
// Operations
// ============================================================================

/// Pull `amount` from `from` into the custody account (`custody`).
pub fn fund_in(
    storage: &mut dyn Storage,
    asset: &Addr,
    from: &Addr,
    custody: &Addr,
    amount: Uint128,
) -> Result<SubMsg, ContractError> {
    ensure_nonzero(amount)?;
    credit_locked(storage, asset, amount)?;

    asset_call(
        asset,
        AssetCall::FundIn,
        &Cw20ExecuteMsg::TransferFrom {
            owner: from.to_string(),
            recipient: custody.to_string(),
            amount,
        },
    )
}

/// Move `amount` from `from` to `to` (normally the custody account) and
/// count it as locked.
pub fn lock(
    storage: &mut dyn Storage,
    asset: &Addr,
    from: &Addr,
    to: &Addr,
    amount: Uint128,
) -> Result<SubMsg, ContractError> {
    ensure_nonzero(amount)?;
    credit_locked(storage, asset, amount)?;

    asset_call(
        asset,
        AssetCall::Lock,
        &Cw20ExecuteMsg::TransferFrom {
            owner: from.to_string(),
            recipient: to.to_string(),
            amount,
        },
    )
}

/// Send `amount` of custodied `asset` to `to`.
pub fn release(
    storage: &mut dyn Storage,
    asset: &Addr,
    to: &Addr,
    amount: Uint128,
) -> Result<SubMsg, ContractError> {
    ensure_nonzero(amount)?;

    let locked = locked_balance(storage, asset)?;
    if amount > locked {
        return Err(ContractError::InsufficientCustody {
            asset: asset.to_string(),
            locked,
            requested: amount,
        });
    }
    LOCKED_BALANCES.save(storage, asset, &(locked - amount))?;

    asset_call(
        asset,
        AssetCall::Release,
        &Cw20ExecuteMsg::Transfer {
            recipient: to.to_string(),
            amount,
        },
    )
}

/// Issue `amount` of `asset` to `to`.
///
/// Nothing enters custody, but the locked balance is still credited so both
/// asset kinds are booked the same way.
pub fn mint(
    storage: &mut dyn Storage,
    asset: &Addr,
    to: &Addr,
    amount: Uint128,
) -> Result<SubMsg, ContractError> {
    ensure_nonzero(amount)?;
    credit_locked(storage, asset, amount)?;

    asset_call(
        asset,
        AssetCall::Mint,
        &Cw20ExecuteMsg::Mint {
            recipient: to.to_string(),
            amount,
        },
    )
}

/// Destroy `amount` of `from`'s holdings of `asset`.
pub fn burn(
    storage: &mut dyn Storage,
    asset: &Addr,
    from: &Addr,
    amount: Uint128,
) -> Result<SubMsg, ContractError> {
    ensure_nonzero(amount)?;

    let burned = burned_balance(storage, asset)?;
    let burned = burned
        .checked_add(amount)
        .map_err(|_| ContractError::LedgerOverflow {
            asset: asset.to_string(),
        })?;
    BURNED_BALANCES.save(storage, asset, &burned)?;

    asset_call(
        asset,
        AssetCall::Burn,
        &Cw20ExecuteMsg::BurnFrom {
            owner: from.to_string(),
            amount,
        },
    )
}

// ============================================================================
// Internal Helpers
// ============================================================================

fn ensure_nonzero(amount: Uint128) -> Result<(), ContractError> {
    if amount.is_zero() {
        return Err(ContractError::InvalidAmount {
            reason: "Amount must be greater than zero".to_string(),
        });
    }
    Ok(())
}

fn credit_locked(
    storage: &mut dyn Storage,
    asset: &Addr,
    amount: Uint128,
) -> Result<(), ContractError> {
    let locked = locked_balance(storage, asset)?
        .checked_add(amount)
        .map_err(|_| ContractError::LedgerOverflow {
            asset: asset.to_string(),
        })?;
    LOCKED_BALANCES.save(storage, asset, &locked)?;
    Ok(())
}

fn asset_call(
    asset: &Addr,
    call: AssetCall,
    msg: &Cw20ExecuteMsg,
) -> Result<SubMsg, ContractError> {
    let wasm = WasmMsg::Execute {
        contract_addr: asset.to_string(),
        msg: to_json_binary(msg)?,
        funds: vec![],
    };
    Ok(SubMsg::reply_on_error(wasm, call.id()))
}
