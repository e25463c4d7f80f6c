//! # Shared Utility Functions
//!
//! Common utility functions used by the proxy and the swap client.
//!
//! ## Address Formatting
//!
//! - [`format_address`] - Format address with ellipsis (first N and last M characters)
//! - [`short_address`] - The connected-account label shown by the client
//!
//! ## Usage
//!
//! ```rust
//! use shared::utils::format_address;
//!
//! let address = "0x71c7656ec7ab88b098defb751b7401b5f6d8976f";
//! assert_eq!(format_address(address, 4, 4), "0x71...976f");
//! ```

/// Format a wallet address by showing the first `prefix_len` and last `suffix_len` characters.
///
/// If the address is shorter than `prefix_len + suffix_len`, it is returned as-is.
///
/// # Examples
///
/// ```rust
/// use shared::utils::format_address;
///
/// let addr = "0x71c7656ec7ab88b098defb751b7401b5f6d8976f";
/// assert_eq!(format_address(addr, 6, 4), "0x71c7...976f");
/// assert_eq!(format_address("short", 4, 4), "short");
/// ```
pub fn format_address(address: &str, prefix_len: usize, suffix_len: usize) -> String {
    let address_len = address.len();

    if address_len <= prefix_len + suffix_len
        || prefix_len >= address_len
        || suffix_len >= address_len
    {
        return address.to_string();
    }

    // Hex addresses are ASCII-only, byte indexing is safe
    let prefix = &address[..prefix_len];
    let suffix = &address[address_len - suffix_len..];

    format!("{}...{}", prefix, suffix)
}

/// Label for a connected account: the first 6 characters, `...`, then
/// everything from index 38.
///
/// For a regular 42-character address this is `0x` plus 4 hex digits on each side.
///
/// ```rust
/// use shared::utils::short_address;
///
/// assert_eq!(short_address("0x71c7656ec7ab88b098defb751b7401b5f6d8976f"), "0x71c7...976f");
/// ```
pub fn short_address(account: &str) -> String {
    let prefix = account.get(..6).unwrap_or(account);
    let suffix = account.get(38..).unwrap_or("");
    format!("{}...{}", prefix, suffix)
}
