//! Local account encoding for transfer recipients
//!
//! Execution payloads name the recipient by its raw 20-byte account. On this
//! chain an account is a bech32 string, so the raw bytes are encoded with the
//! configured human-readable prefix before they are handed to a CW20
//! contract:
//!
//! ```text
//! [0xAB; 20] + "terra"  ->  terra14w4....
//! ```

use cosmwasm_std::{Addr, Api, StdError, StdResult};

/// Bech32 character set
const BECH32_CHARSET: &[u8] = b"qpzry9x8gf2tvdw0s3jn54khce6mua7l";

/// Checksum length in 5-bit groups
const CHECKSUM_LEN: usize = 6;

/// Longest bech32 string, separator and checksum included
const MAX_ADDRESS_LEN: usize = 90;

/// 5-bit groups needed for a 20-byte account
const ACCOUNT_DATA_LEN: usize = 32;

/// Longest prefix that still leaves room for a 20-byte account
const MAX_PREFIX_LEN: usize = MAX_ADDRESS_LEN - 1 - ACCOUNT_DATA_LEN - CHECKSUM_LEN;

// ============================================================================
// Recipient Resolution
// ============================================================================

/// Turn the raw destination account from an execution payload into a
/// validated local address.
pub fn recipient_address(api: &dyn Api, raw: &[u8; 20], prefix: &str) -> StdResult<Addr> {
    let encoded = encode_bech32_address(raw, prefix)?;
    api.addr_validate(&encoded)
}

/// Check a configured prefix: lowercase ASCII letters and digits only.
pub fn validate_prefix(prefix: &str) -> StdResult<()> {
    if prefix.is_empty() || prefix.len() > MAX_PREFIX_LEN {
        return Err(StdError::generic_err(format!(
            "Invalid address prefix length: {}",
            prefix.len()
        )));
    }
    if !prefix
        .bytes()
        .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit())
    {
        return Err(StdError::generic_err(format!(
            "Invalid address prefix: {}",
            prefix
        )));
    }
    Ok(())
}

// ============================================================================
// Bech32
// ============================================================================

/// Encode raw 20 bytes to a bech32 address with given prefix
pub fn encode_bech32_address(bytes: &[u8; 20], hrp: &str) -> StdResult<String> {
    validate_prefix(hrp)?;

    let data = regroup(bytes, 8, 5, true)?;
    let checksum = checksum(hrp, &data);

    let mut out = String::with_capacity(hrp.len() + 1 + data.len() + CHECKSUM_LEN);
    out.push_str(hrp);
    out.push('1');
    out.extend(data.iter().chain(checksum.iter()).map(|&v| to_char(v)));
    Ok(out)
}

fn to_char(value: u8) -> char {
    BECH32_CHARSET[(value & 31) as usize] as char
}

/// Convert bits between different group sizes
fn regroup(data: &[u8], from_bits: u32, to_bits: u32, pad: bool) -> StdResult<Vec<u8>> {
    let mut acc: u32 = 0;
    let mut bits: u32 = 0;
    let max_v = (1u32 << to_bits) - 1;
    let mut out = Vec::with_capacity(data.len() * from_bits as usize / to_bits as usize + 1);

    for &value in data {
        acc = (acc << from_bits) | value as u32;
        bits += from_bits;
        while bits >= to_bits {
            bits -= to_bits;
            out.push(((acc >> bits) & max_v) as u8);
        }
    }

    if pad {
        if bits > 0 {
            out.push(((acc << (to_bits - bits)) & max_v) as u8);
        }
    } else if bits >= from_bits || (acc << (to_bits - bits)) & max_v != 0 {
        return Err(StdError::generic_err("Invalid padding"));
    }

    Ok(out)
}

fn checksum(hrp: &str, data: &[u8]) -> [u8; CHECKSUM_LEN] {
    let mut values: Vec<u8> = hrp.bytes().map(|b| b >> 5).collect();
    values.push(0);
    values.extend(hrp.bytes().map(|b| b & 31));
    values.extend_from_slice(data);
    values.extend_from_slice(&[0; CHECKSUM_LEN]);

    let polymod = polymod(&values) ^ 1;
    let mut out = [0u8; CHECKSUM_LEN];
    for (i, slot) in out.iter_mut().enumerate() {
        *slot = ((polymod >> (5 * (5 - i))) & 31) as u8;
    }
    out
}

fn polymod(values: &[u8]) -> u32 {
    const GENERATOR: [u32; 5] = [
        0x3b6a_57b2,
        0x2650_8e6d,
        0x1ea1_19fa,
        0x3d42_33dd,
        0x2a14_62b3,
    ];

    let mut chk: u32 = 1;
    for &v in values {
        let top = chk >> 25;
        chk = ((chk & 0x01ff_ffff) << 5) ^ (v as u32);
        for (i, gen) in GENERATOR.iter().enumerate() {
            if (top >> i) & 1 == 1 {
                chk ^= gen;
            }
        }
    }
    chk
}
