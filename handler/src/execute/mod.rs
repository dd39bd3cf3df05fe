//! Execute handlers for the token handler contract.
//!
//! - `transfer` - Bridge entry points: deposit, execute transfer/proposal, withdraw, fund-in
//! - `admin` - Resource registry administration

mod admin;
mod transfer;

pub use admin::*;
pub use transfer::*;
