//! Chain alias mapping for the risk API.

/// Map a chain identifier (with known aliases, case-insensitive) to the
/// risk API's numeric chain id. `None` means the chain is not covered and
/// no lookup should be issued.
pub fn chain_to_numeric_id(chain: &str) -> Option<u64> {
    match chain.to_lowercase().as_str() {
        "ethereum" | "eth" => Some(1),
        "bsc" | "binance" | "bnb" => Some(56),
        "polygon" | "matic" => Some(137),
        "arbitrum" | "arb" => Some(42161),
        "base" => Some(8453),
        "optimism" | "op" => Some(10),
        "avalanche" | "avax" => Some(43114),
        "fantom" | "ftm" => Some(250),
        _ => None,
    }
}
