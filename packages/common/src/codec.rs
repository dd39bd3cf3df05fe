//! Transfer payload codec
//!
//! Payloads are sequences of 32-byte words followed by an optional
//! variable-length tail:
//!
//! ```text
//! Deposit (canonical):   | amount (32) |
//! Deposit (with target): | amount (32) | recipient_len (32) | recipient (recipient_len) |
//! Execution:             | amount (32) | recipient_len (32) | recipient (recipient_len) |
//! Envelope:              | resource_id (32) | body ... |
//! ```
//!
//! All integers are big-endian unsigned 256-bit words. Amounts must fit in
//! 128 bits. Every read goes through [`Reader`], which bounds-checks against
//! the supplied buffer, so decoding never indexes out of range.

use cosmwasm_std::{Uint128, Uint256};
use thiserror::Error;

use crate::resource::{ResourceId, RESOURCE_ID_LEN};

/// Width of one ABI word.
pub const WORD_LEN: usize = 32;

/// Native account width on the destination chain. Only this prefix of the
/// recipient tail identifies the account; the rest is reserved.
pub const NATIVE_ADDRESS_LEN: usize = 20;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    #[error("payload truncated: need {needed} bytes at offset {offset}, {available} available")]
    Truncated {
        offset: usize,
        needed: usize,
        available: usize,
    },

    #[error("amount does not fit in 128 bits")]
    AmountOverflow,

    #[error("declared recipient length {declared} exceeds remaining {remaining} bytes")]
    RecipientOverrun { declared: Uint256, remaining: usize },

    #[error("recipient is {got} bytes, native address width is {expected}")]
    RecipientTooShort { got: usize, expected: usize },

    #[error("{extra} unexpected trailing bytes")]
    TrailingBytes { extra: usize },

    #[error("invalid resource id length: expected 32 bytes, got {got}")]
    InvalidResourceId { got: usize },
}

// ============================================================================
// Payload shapes
// ============================================================================

/// Payload carried by a deposit call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DepositPayload {
    pub amount: Uint128,
    /// Raw destination account bytes; empty when the caller only sent an amount.
    pub recipient: Vec<u8>,
}

impl DepositPayload {
    pub fn new(amount: Uint128) -> Self {
        Self {
            amount,
            recipient: vec![],
        }
    }

    pub fn with_recipient(amount: Uint128, recipient: impl Into<Vec<u8>>) -> Self {
        Self {
            amount,
            recipient: recipient.into(),
        }
    }

    pub fn encode(&self) -> Vec<u8> {
        if self.recipient.is_empty() {
            return encode_amount(self.amount).to_vec();
        }
        encode_amount_and_recipient(self.amount, &self.recipient)
    }

    pub fn decode(data: &[u8]) -> Result<Self, CodecError> {
        let mut reader = Reader::new(data);
        let amount = reader.amount()?;

        if reader.remaining() == 0 {
            return Ok(Self::new(amount));
        }

        let recipient = reader.length_prefixed()?.to_vec();
        reader.finish()?;

        Ok(Self { amount, recipient })
    }
}

/// Payload carried by an execution call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionPayload {
    pub amount: Uint128,
    pub recipient: Vec<u8>,
}

impl ExecutionPayload {
    pub fn new(amount: Uint128, recipient: impl Into<Vec<u8>>) -> Self {
        Self {
            amount,
            recipient: recipient.into(),
        }
    }

    pub fn encode(&self) -> Vec<u8> {
        encode_amount_and_recipient(self.amount, &self.recipient)
    }

    pub fn decode(data: &[u8]) -> Result<Self, CodecError> {
        let mut reader = Reader::new(data);
        let amount = reader.amount()?;
        let recipient = reader.length_prefixed()?;
        reader.finish()?;

        if recipient.len() < NATIVE_ADDRESS_LEN {
            return Err(CodecError::RecipientTooShort {
                got: recipient.len(),
                expected: NATIVE_ADDRESS_LEN,
            });
        }

        Ok(Self {
            amount,
            recipient: recipient.to_vec(),
        })
    }

    /// The account identifier on this chain: the first 20 recipient bytes.
    pub fn destination_account(&self) -> [u8; NATIVE_ADDRESS_LEN] {
        let mut account = [0u8; NATIVE_ADDRESS_LEN];
        // decode() guarantees the length; a hand-built short payload is zero-filled
        let n = self.recipient.len().min(NATIVE_ADDRESS_LEN);
        account[..n].copy_from_slice(&self.recipient[..n]);
        account
    }
}

// ============================================================================
// Resource envelope
// ============================================================================

/// Prefix `body` with the routing key.
pub fn encode_with_resource_id(resource_id: &ResourceId, body: &[u8]) -> Vec<u8> {
    let mut data = Vec::with_capacity(RESOURCE_ID_LEN + body.len());
    data.extend_from_slice(resource_id.as_slice());
    data.extend_from_slice(body);
    data
}

/// Split a routing key off the front of `data`.
pub fn split_resource_id(data: &[u8]) -> Result<(ResourceId, &[u8]), CodecError> {
    let mut reader = Reader::new(data);
    let resource_id = ResourceId::from_slice(reader.take(RESOURCE_ID_LEN)?)?;
    Ok((resource_id, reader.rest()))
}

// ============================================================================
// Encoding helpers
// ============================================================================

fn encode_amount(amount: Uint128) -> [u8; WORD_LEN] {
    let mut word = [0u8; WORD_LEN];
    word[16..].copy_from_slice(&amount.u128().to_be_bytes());
    word
}

fn encode_length(len: usize) -> [u8; WORD_LEN] {
    let mut word = [0u8; WORD_LEN];
    word[24..].copy_from_slice(&(len as u64).to_be_bytes());
    word
}

fn encode_amount_and_recipient(amount: Uint128, recipient: &[u8]) -> Vec<u8> {
    let mut data = Vec::with_capacity(2 * WORD_LEN + recipient.len());
    data.extend_from_slice(&encode_amount(amount));
    data.extend_from_slice(&encode_length(recipient.len()));
    data.extend_from_slice(recipient);
    data
}

// ============================================================================
// Bounded reader
// ============================================================================

struct Reader<'a> {
    buf: &'a [u8],
    offset: usize,
}

impl<'a> Reader<'a> {
    fn new(buf: &'a [u8]) -> Self {
        Self { buf, offset: 0 }
    }

    fn remaining(&self) -> usize {
        self.buf.len() - self.offset
    }

    fn take(&mut self, n: usize) -> Result<&'a [u8], CodecError> {
        let truncated = CodecError::Truncated {
            offset: self.offset,
            needed: n,
            available: self.remaining(),
        };
        let end = self.offset.checked_add(n).ok_or(truncated.clone())?;
        let bytes = self.buf.get(self.offset..end).ok_or(truncated)?;
        self.offset = end;
        Ok(bytes)
    }

    fn word(&mut self) -> Result<[u8; WORD_LEN], CodecError> {
        let mut word = [0u8; WORD_LEN];
        word.copy_from_slice(self.take(WORD_LEN)?);
        Ok(word)
    }

    fn amount(&mut self) -> Result<Uint128, CodecError> {
        let word = self.word()?;
        if word[..16].iter().any(|b| *b != 0) {
            return Err(CodecError::AmountOverflow);
        }
        let mut low = [0u8; 16];
        low.copy_from_slice(&word[16..]);
        Ok(Uint128::new(u128::from_be_bytes(low)))
    }

    /// Read a length word and then exactly that many bytes.
    fn length_prefixed(&mut self) -> Result<&'a [u8], CodecError> {
        let word = self.word()?;
        let remaining = self.remaining();
        let overrun = || CodecError::RecipientOverrun {
            declared: Uint256::from_be_bytes(word),
            remaining,
        };

        if word[..24].iter().any(|b| *b != 0) {
            return Err(overrun());
        }
        let mut low = [0u8; 8];
        low.copy_from_slice(&word[24..]);
        let declared = usize::try_from(u64::from_be_bytes(low)).map_err(|_| overrun())?;
        if declared > remaining {
            return Err(overrun());
        }

        self.take(declared)
    }

    fn rest(&mut self) -> &'a [u8] {
        let rest = &self.buf[self.offset..];
        self.offset = self.buf.len();
        rest
    }

    fn finish(self) -> Result<(), CodecError> {
        match self.remaining() {
            0 => Ok(()),
            extra => Err(CodecError::TrailingBytes { extra }),
        }
    }
}
