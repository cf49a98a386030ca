//! Hash helpers for message identifiers
//!
//! Outbound instructions carry a message id computed by the sending mediator.
//! The receiving mediator uses it as the idempotency key for execution and
//! for the out-of-limit registry.
//!
//! # Message id byte layout (160 bytes, hashed with keccak256)
//! - Bytes 0-31:    keccak256(source mediator address)
//! - Bytes 32-63:   keccak256(destination mediator address)
//! - Bytes 64-95:   keccak256(recipient address)
//! - Bytes 96-127:  value (uint256, big-endian, left-padded)
//! - Bytes 128-159: nonce (uint256, big-endian, left-padded)

use cosmwasm_std::Binary;
use tiny_keccak::{Hasher, Keccak};

use crate::error::ContractError;
use crate::state::MEDIATOR_MODE_NAME;

/// Compute keccak256 hash of arbitrary data
pub fn keccak256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Keccak::v256();
    hasher.update(data);
    let mut output = [0u8; 32];
    hasher.finalize(&mut output);
    output
}

/// Compute the id of an outbound instruction.
pub fn compute_message_id(
    source: &str,
    destination: &str,
    recipient: &str,
    value: u128,
    nonce: u64,
) -> [u8; 32] {
    let mut data = [0u8; 160];

    data[0..32].copy_from_slice(&keccak256(source.as_bytes()));
    data[32..64].copy_from_slice(&keccak256(destination.as_bytes()));
    data[64..96].copy_from_slice(&keccak256(recipient.as_bytes()));

    // u128 (16 bytes) goes into bytes 112-127
    data[96 + 16..128].copy_from_slice(&value.to_be_bytes());

    // u64 (8 bytes) goes into bytes 152-159
    data[128 + 24..160].copy_from_slice(&nonce.to_be_bytes());

    keccak256(&data)
}

/// Four-byte identifier of this mediator flavor.
pub fn mediator_mode() -> [u8; 4] {
    let hash = keccak256(MEDIATOR_MODE_NAME.as_bytes());
    [hash[0], hash[1], hash[2], hash[3]]
}

/// Parse a 32-byte message id from Binary input.
pub fn parse_message_id(message_id: &Binary) -> Result<[u8; 32], ContractError> {
    message_id
        .to_vec()
        .try_into()
        .map_err(|_| ContractError::InvalidHashLength {
            got: message_id.len(),
        })
}

/// Convert bytes to a 0x-prefixed hex string
pub fn to_hex(bytes: &[u8]) -> String {
    format!("0x{}", hex::encode(bytes))
}
