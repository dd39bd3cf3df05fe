//! Resource identifiers
//!
//! A resource id is an opaque 32-byte routing key. By convention it is built
//! from the asset's raw address bytes followed by the one-byte identifier of
//! the chain the asset lives on, left-padded with zeros:
//!
//! ```text
//! | zero padding | asset raw address (<= 31 bytes) | chain id (1 byte) |
//! ```

use std::fmt;

use crate::codec::CodecError;

/// Length of a resource identifier in bytes.
pub const RESOURCE_ID_LEN: usize = 32;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ResourceId(pub [u8; RESOURCE_ID_LEN]);

impl ResourceId {
    pub const fn new(bytes: [u8; RESOURCE_ID_LEN]) -> Self {
        Self(bytes)
    }

    /// Parse from a byte slice that must be exactly 32 bytes long.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, CodecError> {
        let array: [u8; RESOURCE_ID_LEN] = bytes
            .try_into()
            .map_err(|_| CodecError::InvalidResourceId { got: bytes.len() })?;
        Ok(Self(array))
    }

    /// Build the conventional id for an asset on a given chain.
    pub fn from_parts(chain_id: u8, asset_raw: &[u8]) -> Result<Self, CodecError> {
        if asset_raw.is_empty() || asset_raw.len() > RESOURCE_ID_LEN - 1 {
            return Err(CodecError::InvalidResourceId {
                got: asset_raw.len(),
            });
        }

        let mut bytes = [0u8; RESOURCE_ID_LEN];
        let start = RESOURCE_ID_LEN - 1 - asset_raw.len();
        bytes[start..RESOURCE_ID_LEN - 1].copy_from_slice(asset_raw);
        bytes[RESOURCE_ID_LEN - 1] = chain_id;
        Ok(Self(bytes))
    }

    pub fn as_bytes(&self) -> &[u8; RESOURCE_ID_LEN] {
        &self.0
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.0
    }

    /// 0x-prefixed lowercase hex, used in attributes and error messages.
    pub fn to_hex(&self) -> String {
        format!("0x{}", hex::encode(self.0))
    }
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl From<[u8; RESOURCE_ID_LEN]> for ResourceId {
    fn from(bytes: [u8; RESOURCE_ID_LEN]) -> Self {
        Self(bytes)
    }
}
