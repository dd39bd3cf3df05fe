//! Common - Shared Wire Types for the CW20 Bridge Handler
//!
//! This package holds the byte-level codec for transfer instructions so that
//! the handler contract, the Bridge collaborator and off-chain relayers all
//! encode and decode payloads with the same code.

pub mod codec;
pub mod resource;

pub use codec::{
    encode_with_resource_id, split_resource_id, CodecError, DepositPayload, ExecutionPayload,
    NATIVE_ADDRESS_LEN, WORD_LEN,
};
pub use resource::ResourceId;
