//! Bitcoin address validation
//!
//! User statistics are looked up on disk by address, so the address is
//! checked with the canonical decoder before it is ever used as a path.

use bitcoin::{address::NetworkUnchecked, Address, Network};
use std::str::FromStr;

/// Shortest base58 mainnet address
pub const MIN_ADDRESS_LENGTH: usize = 26;

/// Longest bech32 string allowed by BIP-173
pub const MAX_ADDRESS_LENGTH: usize = 90;

/// Network user addresses must belong to
pub const SUPPORTED_NETWORK: Network = Network::Bitcoin;

/// Returns true if `candidate` is a valid mainnet Bitcoin address.
///
/// Accepts legacy (P2PKH, P2SH) and witness program (P2WPKH, P2WSH, P2TR)
/// encodings. Never panics.
pub fn is_valid_address(candidate: &str) -> bool {
    if candidate.len() < MIN_ADDRESS_LENGTH || candidate.len() > MAX_ADDRESS_LENGTH {
        return false;
    }

    match Address::<NetworkUnchecked>::from_str(candidate) {
        Ok(address) => address.is_valid_for_network(SUPPORTED_NETWORK),
        Err(_) => false,
    }
}
