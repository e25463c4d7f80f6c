//! Address normalization before upstream lookups.

use shared::{is_native_address, WRAPPED_NATIVE_ADDRESS};

/// Address to ask the price API about.
///
/// The native sentinel has no ERC-20 contract, so its wrapped token is priced instead.
/// Every other address passes through unchanged.
pub fn price_lookup_address(address: &str) -> &str {
    if is_native_address(address) {
        WRAPPED_NATIVE_ADDRESS
    } else {
        address
    }
}
