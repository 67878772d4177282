//! Shared helper utilities for factory methods.

/// Counter for generating unique IDs in tests.
static COUNTER: std::sync::atomic::AtomicU64 = std::sync::atomic::AtomicU64::new(1);

/// Gets the next unique counter value for test data.
///
/// # Returns
/// - `u64` - Next unique counter value
pub fn next_id() -> u64 {
    COUNTER.fetch_add(1, std::sync::atomic::Ordering::SeqCst)
}

/// Generates a unique, lower-cased, 20-byte hex wallet address.
///
/// # Returns
/// - `String` - Address of the form `0x000...0{id}`
pub fn next_wallet() -> String {
    format!("0x{:040x}", next_id())
}
