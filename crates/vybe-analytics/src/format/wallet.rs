//! Wallet PnL, portfolio, token holdings, and balance history

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

use super::{DATE, SHORT_RULE, check, or_na, usd, usd_plain, utc};
use crate::model::{BalancePoint, Pnl, TokenBalances, TradeSide};

pub fn pnl(wallet: &str, days: u32, pnl: &Pnl) -> String {
    let summary = pnl.summary.clone().unwrap_or_default();
    let mut lines = vec![
        format!("💥 *PnL Summary ({days}d)*"),
        format!(
            "\n👛 Wallet: `{wallet}`\n\
             💵 *Realized PnL:* ${:.2}\n\
             📉 *Unrealized PnL:* ${:.2}\n\
             🔁 *Trade Volume:* ${:.2}\n\
             📊 *Total Trades:* {}\n\
             📦 *Avg. Trade Size:* ${:.2}\n\
             🏆 *Win Rate:* {:.2}%",
            summary.realized_pnl_usd.unwrap_or(0.0),
            summary.unrealized_pnl_usd.unwrap_or(0.0),
            summary.trades_volume_usd.unwrap_or(0.0),
            summary.trades_count.unwrap_or(0),
            summary.average_trade_usd.unwrap_or(0.0),
            summary.win_rate.unwrap_or(0.0) * 100.0,
        ),
    ];

    if !pnl.token_metrics.is_empty() {
        lines.push("\n📌 *Token Metrics:*".to_string());
        for metric in &pnl.token_metrics {
            let buys = metric.buys.clone().unwrap_or_default();
            let sells = metric.sells.clone().unwrap_or_default();
            lines.push(format!(
                "\n🪙 *{}*\n\
                 💰 Realized: ${:.2}\n\
                 📉 Unrealized: ${:.2}\n\
                 🛒 Buys: ${:.2} | {} txs\n\
                 🏷️ Sells: ${:.2} | {} txs",
                or_na(metric.token_symbol.as_deref()),
                metric.realized_pnl_usd.unwrap_or(0.0),
                metric.unrealized_pnl_usd.unwrap_or(0.0),
                side_volume(&buys),
                buys.transaction_count.unwrap_or(0),
                side_volume(&sells),
                sells.transaction_count.unwrap_or(0),
            ));
        }
    }
    lines.join("\n")
}

fn side_volume(side: &TradeSide) -> f64 {
    side.volume_usd.unwrap_or(0.0)
}

pub fn portfolio_summary(wallet: &str, token_usd: Decimal, nft_usd: Decimal) -> String {
    format!(
        "📊 *Portfolio Summary*\n\
         👛 Wallet: `{wallet}`\n\
         💼 *Token Value:* ${}\n\
         🎨 *NFT Value:* ${}\n\
         🧾 *Total Portfolio:* 💵 ${}",
        usd(token_usd),
        usd(nft_usd),
        usd(token_usd + nft_usd),
    )
}

fn trend_marker(change: Decimal) -> &'static str {
    if change > Decimal::ZERO {
        "🟢"
    } else if change < Decimal::ZERO {
        "🔴"
    } else {
        "⚪️"
    }
}

pub fn token_summary(balances: &TokenBalances) -> String {
    let mut lines = vec![format!(
        "🧾 *Wallet Token Summary*\n\
         👛 Wallet Address: `{}`\n\
         💰 Total Token Value (USD): ${}\n\
         🔒 Staked SOL Value (USD): ${}\n\
         🪙 Number of Tokens Held: {}\n\
         📊 *Tokens List:*",
        or_na(balances.owner_address.as_deref()),
        usd(balances.total_token_value_usd.unwrap_or(Decimal::ZERO)),
        usd(balances.staked_sol_balance_usd.unwrap_or(Decimal::ZERO)),
        balances.total_token_count.unwrap_or(0),
    )];

    for token in &balances.data {
        let value_change = token.value_usd_1d_change.unwrap_or(Decimal::ZERO);
        lines.push(format!(
            "\n{} *{}* ({})\n\
             🔗 Mint: `{}`\n\
             📈 24h Price Change: {:.2}%\n\
             💸 24h Value Change: ${}\n\
             📦 Amount: {}\n\
             💵 Value: ${}\n\
             ✔️ Verified: {}",
            trend_marker(value_change),
            or_na(token.symbol.as_deref()),
            or_na(token.name.as_deref()),
            or_na(token.mint_address.as_deref()),
            token.price_usd_1d_change.unwrap_or(0.0),
            usd_plain(value_change),
            token.amount.unwrap_or(0.0),
            usd(token.value_usd.unwrap_or(Decimal::ZERO)),
            check(token.verified),
        ));
    }
    lines.join("\n")
}

pub fn balance_history(wallet: &str, days: u32, points: &[BalancePoint]) -> String {
    let mut lines = vec![format!(
        "📊 *Token Balance History* (`{days}d`)\n👛 *Wallet:* `{wallet}`\n{SHORT_RULE}"
    )];
    for p in points {
        lines.push(format!(
            "\n📅 {}\n\
             💰 Token Value: ${}\n\
             🔒 Stake Value: ${}\n\
             🛠️ System Value: ${}\n\
             🧊 Stake (SOL): {:.2}\n\
             {SHORT_RULE}",
            utc(p.block_time, DATE),
            usd(p.token_value.unwrap_or(Decimal::ZERO)),
            usd(p.stake_value.unwrap_or(Decimal::ZERO)),
            usd(p.system_value.unwrap_or(Decimal::ZERO)),
            p.stake_value_sol.unwrap_or(0.0),
        ));
    }
    lines.join("\n")
}

/// Token value per day
pub fn balance_points(points: &[BalancePoint]) -> Vec<(String, f64)> {
    points
        .iter()
        .map(|p| {
            let value = p.token_value.and_then(|v| v.to_f64()).unwrap_or(0.0);
            (utc(p.block_time, DATE), value)
        })
        .collect()
}
