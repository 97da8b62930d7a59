//! Display helpers for amounts, keys and countdowns

pub const LAMPORTS_PER_SOL: u64 = 1_000_000_000;

pub fn sol(lamports: u64) -> f64 {
    lamports as f64 / LAMPORTS_PER_SOL as f64
}

/// First four characters of a key followed by an ellipsis.
pub fn shorten(key: &str) -> String {
    let head: String = key.chars().take(4).collect();
    format!("{head}…")
}

/// `m:ss`, rounding partial seconds up.
pub fn format_duration(ms: u64) -> String {
    let total = ms.div_ceil(1000);
    let minutes = total / 60;
    let seconds = total % 60;
    format!("{minutes}:{seconds:02}")
}

/// Token amount with two decimals, e.g. `0.50 SOL`.
pub fn format_amount(lamports: u64, symbol: &str) -> String {
    format!("{:.2} {}", sol(lamports), symbol)
}
