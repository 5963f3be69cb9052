//! Token candidates surfaced by the market data source.
//!
//! Candidates arrive as loosely shaped JSON objects whose field names vary
//! between the primary and fallback feeds. Extraction reconciles the known
//! aliases and keeps whatever survives; downstream filters decide what to do
//! with incomplete entries.

use serde_json::Value;

/// Placeholder chain segment for candidates whose source omitted the chain.
const UNKNOWN_CHAIN: &str = "unknown";

/// Placeholder address segment for candidates with no resolvable address.
const NO_ADDRESS: &str = "noaddress";

/// A token surfaced by the market data source as potentially new.
///
/// Ephemeral: lives for one poll cycle unless its id is remembered by the
/// dedup ledger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenCandidate {
    /// Lowercase chain identifier; empty when the source omitted it.
    pub chain: String,
    /// Token contract address, when the source provided one.
    pub token_address: Option<String>,
    /// Display name, when the source provided one.
    pub name: Option<String>,
    /// Thumbnail image URL, when the source provided one.
    pub image_url: Option<String>,
}

impl TokenCandidate {
    pub fn new(chain: impl Into<String>, token_address: impl Into<String>) -> Self {
        Self {
            chain: chain.into().to_lowercase(),
            token_address: Some(token_address.into()),
            name: None,
            image_url: None,
        }
    }

    /// Derived identity: `<chain>:<address>`, lowercased, with stable
    /// placeholders for missing parts so even partial candidates dedup.
    pub fn token_id(&self) -> String {
        let chain = if self.chain.is_empty() {
            UNKNOWN_CHAIN
        } else {
            self.chain.as_str()
        };
        let address = self.token_address.as_deref().unwrap_or(NO_ADDRESS);
        format!("{}:{}", chain.to_lowercase(), address.to_lowercase())
    }
}

/// Extract a candidate from one raw feed item.
///
/// Returns `None` only when the item is not a JSON object. Missing fields
/// are tolerated; chain and address are resolved through the alias chains
/// `chainId|chain|network` and `tokenAddress|address|token|id`.
pub fn candidate_from_value(value: &Value) -> Option<TokenCandidate> {
    let obj = value.as_object()?;

    let chain = first_string(value, &["chainId", "chain", "network"])
        .map(|c| c.to_lowercase())
        .unwrap_or_default();
    let token_address = first_string(value, &["tokenAddress", "address", "token", "id"]);
    let name = first_string(value, &["name"]);
    let image_url = obj
        .get("info")
        .and_then(|info| first_string(info, &["imageUrl", "image"]))
        .or_else(|| first_string(value, &["icon"]));

    Some(TokenCandidate {
        chain,
        token_address,
        name,
        image_url,
    })
}

fn first_string(value: &Value, keys: &[&str]) -> Option<String> {
    keys.iter().find_map(|key| {
        value
            .get(key)
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
            .map(str::to_owned)
    })
}
