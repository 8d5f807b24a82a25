//! Fixed user-facing texts
//!
//! Prompts and re-prompt errors for every step, plus the static menu texts.
//! Formatted analytics output lives with the formatters in `vybe-analytics`.

use crate::error::ErrorKind;

pub const ALPHA_URL: &str = "https://vybe.fyi/";

/// Greeting for `/start`; `{}` is the user's first name
pub fn welcome(first_name: Option<&str>) -> String {
    format!(
        "👋 Hello {}\n\
         Welcome to *VybeBot* – your on-chain insights assistant.\n\
         Use the keyboard buttons below to explore analytics across NFTs, programs, tokens, and wallets.\n\
         📌 Press ❓ *Help* at any time to view the full feature guide.",
        first_name.unwrap_or("there")
    )
}

pub const ALPHA: &str = "🔍 *Want more alpha?*
Dive into powerful token analytics, wallet insights, and real-time market data on AlphaVybe:
🌐 https://vybe.fyi/
📊 Track trending tokens
🐋 Follow whales and top wallets
📈 Monitor live price action
💼 Break down PnL and portfolio flows
_Alpha starts here._";

pub const HELP: &str = "*VybeBot Help menu*
Welcome to *VybeBot* – your all-in-one assistant for on-chain analytics and insights across NFTs, tokens, wallets, and programs!
👇 Use the keyboard buttons to explore features:
*🎨 NFT*
• 👑 Collection Owners – See top holders of any NFT collection (up to 🔟).
• 💥 NFT (in Wallet Tracking) – View a wallet’s full NFT portfolio.
*📦 Programs*
• 📄 Details – Get stats, description & logo of any program.
• 💰 Top Wallets – View most active wallets in the past X days.
• 🔁 Transactions – Chart transaction counts over time.
• 👥 Active Users – Visualize DAU trends with charts.
• 📈 TVL – View historical Total Value Locked.
*📊 Token Analysis*
• 📋 Info – Fetch full token details by mint.
• 🕰 OHLCV – Get open/high/low/close/volume data with resolution options.
• 📊 Volume – Analyze transfer volumes (hour/day).
• 💼 Balances – View wallet token balances over time.
*👤 Holders*
• 📅 Daily Top Holders – Chart holder count growth.
• 🏆 Top Token Holders – Rank by balance, value, or supply %.
*🧾 Wallet Tracking*
• 💼 Portfolio – View total token + NFT value in a wallet.
• 📈 PnL – Track wallet profit/loss over 1, 7, or 30 days.
• 🪙 SPL – See token holdings, prices, and value changes.
*🅰️ Alpha Vybe*
🔗 Dashboards: [vybe.fyi](https://vybe.fyi)
*🔙 Back / 🏠 Main Menu*
Use these to navigate between menus.
Happy analyzing with VybeBot! 🚀📊";

pub const UNRECOGNIZED_INPUT: &str =
    "❌ I didn't understand that. Please use the menu below to navigate.";

// =============================================================================
// Prompts
// =============================================================================

pub const ENTER_COLLECTION_ADDRESS: &str =
    "📥 Please enter the *collection address* (alphanumeric only):";
pub const ENTER_PROGRAM_ADDRESS: &str = "📥 Send the *program address* :";
pub const ENTER_WALLET_ADDRESS: &str = "📥 Send the *wallet address* :";
pub const ENTER_MINT_ADDRESS: &str = "🔑 Send the *mint address* :";
pub const ENTER_RESOLUTION: &str = "🕒 Send the resolution (e.g. 1d, 1mo, 1h):  Possible values: 1s, 1m, 3m, 5m, 15m, 30m, 1h, 2h, 3h, 4h, 1d, 1w, 1mo, 1y.";
pub const ENTER_START_DATE: &str = "📅 Enter *start date* (YYYY-MM-DD):";
pub const ENTER_END_DATE: &str = "📅 Enter *end date* (YYYY-MM-DD):";
pub const ENTER_TIME_RANGE: &str = "⏱️ Enter time range like `12h`, `1d`, or `7d`:";
pub const ENTER_TRANSACTION_RANGE: &str = "⏱️ How much historical data would you like to see? (e.g., past 24 hours: 24h , 7 days: 7d , etc.)";
pub const ENTER_INTERVAL: &str = "⏱️ Choose interval: `hour` or `day`";
pub const ENTER_TVL_RESOLUTION: &str = "⏱️ Enter resolution (e.g., 1h, 1d, 1w):";
pub const ENTER_BALANCE_DAYS: &str =
    "📅 How many days of history? (Enter a number between 1 and 30):";
pub const TIMESPAN_1D_30D: &str = "📆 How many *previous days*? (1–30)";
pub const TIMESPAN_1D_7D_30D: &str = "📆 Choose number of days: `1`, `7`, or `30`";
pub const SORT_CRITERIA: &str = "📊 Choose a *sort criteria*:";
pub const SORT_ORDER: &str = "⬆️⬇️ Choose sort order:";
pub const TOP_HOLDERS_COUNT: &str = "🔢 How many top holders? (e.g., 10):";

// =============================================================================
// Re-prompt errors
// =============================================================================

pub const INVALID_COLLECTION_ADDRESS: &str = "❌ Invalid collection address! It must be alphanumeric and 42–46 characters long. Please try again:";
pub const INVALID_ADDRESS: &str =
    "❌ Invalid address! It must be alphanumeric and 42–46 characters long. Please try again:";
pub const INVALID_WALLET_ADDRESS: &str = "❌ Invalid wallet address! It must be alphanumeric and 42-46 characters long. Please try again:";
pub const INVALID_MINT_ADDRESS: &str =
    "❌ Invalid mint address! Only letters and digits allowed. Please try again:";
pub const INVALID_TIMESPAN_1D_30D: &str = "❌ Please enter a number between 1 and 30.";
pub const INVALID_TIMESPAN_1D_7D_30D: &str = "❌ Invalid input. Please enter 1, 7, or 30 only.";
pub const INVALID_RESOLUTION: &str = "❌ Invalid resolution. Try again (e.g. `1d`, `1mo`):";
pub const INVALID_START_DATE: &str =
    "❌ Invalid start date format. Use YYYY-MM-DD like (2025-01-01):";
pub const INVALID_END_DATE: &str = "❌ Invalid end date. It must be after the start date and in correct format (YYYY-MM-DD):";
pub const INVALID_TIME_RANGE: &str =
    "❌ Invalid range! Use formats like `1h`, `12h`, or `3d`. Please try again:";
pub const INVALID_TRANSACTION_RANGE: &str =
    "❌ Invalid range format. Use values like `1h`, `12h`, `3d` etc. Please try again:";
pub const INVALID_SORT_CRITERIA: &str = "❌ Invalid sort criteria. Please select from the keyboard.";
pub const INVALID_SORT_ORDER: &str = "❌ Invalid sort order. Please use the buttons provided.";
pub const INVALID_HOLDERS_COUNT: &str = "❌ Invalid number. Please enter a *positive integer*.";
pub const INVALID_INTERVAL: &str = "❌ Invalid interval! Please enter `hour` or `day`:";
pub const INVALID_TVL_RESOLUTION: &str =
    "❌ Invalid resolution format! Use values like `1h`, `1d`, `1w`. Please try again:";

// =============================================================================
// Terminal failures
// =============================================================================

pub const CHART_ERROR: &str = "⚠️ Error while generating or sending chart.";

/// Fallback text for a failure kind when the gateway supplies no better one
pub fn failure(kind: ErrorKind) -> &'static str {
    match kind {
        ErrorKind::Validation => "❌ Invalid input. Please start again from the menu.",
        ErrorKind::NotFound => "🔍 Not found. Please double-check the address.",
        ErrorKind::AccessDenied => "🚫 Access denied: this resource is not accessible.",
        ErrorKind::Network => "❌ Network error occurred. Please try again later.",
        ErrorKind::MalformedResponse => "❌ Failed to parse JSON response.",
        ErrorKind::NoData => "⚠️ No data found for this request.",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_welcome_uses_first_name() {
        assert!(welcome(Some("Ada")).starts_with("👋 Hello Ada\n"));
        assert!(welcome(None).starts_with("👋 Hello there\n"));
    }

    #[test]
    fn test_failure_texts_are_distinct() {
        let kinds = [
            ErrorKind::NotFound,
            ErrorKind::AccessDenied,
            ErrorKind::Network,
            ErrorKind::MalformedResponse,
        ];
        for a in kinds {
            for b in kinds {
                if a != b {
                    assert_ne!(failure(a), failure(b));
                }
            }
        }
    }
}
