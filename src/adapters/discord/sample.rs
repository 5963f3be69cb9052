//! Sample alert used to exercise the webhook and embed rendering.
//!
//! Sent at startup when `send_preview_on_start` is enabled and by the
//! `preview` command, so channel permissions and rendering can be checked
//! without waiting for a real token to pass the pipeline.

use serde_json::json;

use crate::domain::{derive_liquidity_lock, RiskVerdict, TokenCandidate, TokenTaxes, TradingPair};
use crate::ports::NewTokenAlert;

/// A realistic, fully populated alert built from fixture data.
pub fn sample_alert() -> NewTokenAlert {
    let candidate = TokenCandidate {
        chain: "bsc".to_string(),
        token_address: Some("0x1234567890abcdef1234567890abcdef12345678".to_string()),
        name: Some("MockToken".to_string()),
        image_url: Some("https://cryptologos.cc/logos/binance-coin-bnb-logo.png".to_string()),
    };

    let pair: TradingPair = serde_json::from_value(json!({
        "url": "https://dexscreener.com/bsc/mocktoken",
        "dexId": "pancakeswap",
        "chainId": "bsc",
        "pairAddress": "0xabcdefabcdefabcdefabcdefabcdefabcdefabcd",
        "baseToken": {
            "symbol": "MOCK",
            "name": "MockToken",
            "address": "0x1234567890abcdef1234567890abcdef12345678"
        },
        "quoteToken": { "symbol": "BUSD", "name": "BUSD" },
        "priceUsd": 0.0123,
        "priceNative": 0.00004,
        "liquidity": { "usd": 120000, "base": 9500000, "quote": 150000 },
        "volume": { "h24": 340000 },
        "fdv": 1200000,
        "txns": { "m5": { "buys": 12, "sells": 8 } },
        "labels": ["lock"]
    }))
    .expect("sample pair fixture is valid");

    let verdict = RiskVerdict {
        supported: true,
        ok: true,
        is_honeypot: false,
        risk_score: 25.0,
        taxes: TokenTaxes { buy: 5.0, sell: 7.0 },
        buy_failed: false,
        sell_failed: false,
        reason: None,
    };

    let lock = derive_liquidity_lock(&pair);
    NewTokenAlert {
        token_id: candidate.token_id(),
        candidate,
        pair,
        verdict,
        lock,
    }
}
