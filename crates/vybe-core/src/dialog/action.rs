//! Terminal actions: scratch in, one gateway call, [`FlowResult`] out

use tracing::warn;

use super::Flow;
use crate::error::ErrorKind;
use crate::gateway::{
    ActivityQuery, AnalyticsGateway, BalanceHistoryQuery, FlowResult, HoldersQuery, OhlcvQuery,
    PnlQuery, TopHoldersQuery, TopWalletsQuery, TvlQuery, VolumeQuery,
};
use crate::session::{Scratch, ScratchKey};

/// Run the analytic that ends `flow`.
///
/// A missing scratch slot means the step table and this dispatch disagree;
/// it surfaces as a validation failure rather than a panic.
pub async fn run(flow: Flow, scratch: &Scratch, gateway: &dyn AnalyticsGateway) -> FlowResult {
    match dispatch(flow, scratch, gateway).await {
        Some(result) => result,
        None => {
            warn!(%flow, slots = scratch.len(), "terminal action missing scratch values");
            FlowResult::failure(ErrorKind::Validation)
        }
    }
}

async fn dispatch(
    flow: Flow,
    scratch: &Scratch,
    gateway: &dyn AnalyticsGateway,
) -> Option<FlowResult> {
    let address = scratch.address()?.to_string();

    let result = match flow {
        Flow::CollectionOwners => gateway.collection_owners(&address).await,
        Flow::ProgramDetails => gateway.program_details(&address).await,
        Flow::TopWallets => {
            let query = TopWalletsQuery {
                program: address,
                days: scratch.days()?,
            };
            gateway.top_wallets(&query).await
        }
        Flow::WalletNft => gateway.wallet_nfts(&address).await,
        Flow::WalletPnl => {
            let query = PnlQuery {
                wallet: address,
                days: scratch.days()?,
            };
            gateway.wallet_pnl(&query).await
        }
        Flow::WalletPortfolio => gateway.portfolio_summary(&address).await,
        Flow::WalletSpl => gateway.wallet_tokens(&address).await,
        Flow::TokenInfo => gateway.token_info(&address).await,
        Flow::Ohlcv => {
            let query = OhlcvQuery {
                mint: address,
                resolution: scratch.resolution()?,
                start: scratch.date(ScratchKey::Start)?.clone(),
                end: scratch.date(ScratchKey::End)?.clone(),
            };
            gateway.token_ohlcv(&query).await
        }
        Flow::ActiveUsers => {
            let query = ActivityQuery {
                program: address,
                range: scratch.range()?,
            };
            gateway.active_users(&query).await
        }
        Flow::Transactions => {
            let query = ActivityQuery {
                program: address,
                range: scratch.range()?,
            };
            gateway.transactions(&query).await
        }
        Flow::Tvl => {
            let query = TvlQuery {
                program: address,
                resolution: scratch.resolution()?,
            };
            gateway.tvl(&query).await
        }
        Flow::DailyHolders => {
            let query = HoldersQuery {
                mint: address,
                start: scratch.date(ScratchKey::Start)?.clone(),
                end: scratch.date(ScratchKey::End)?.clone(),
            };
            gateway.daily_holders(&query).await
        }
        Flow::TopHolders => {
            let query = TopHoldersQuery {
                mint: address,
                sort: scratch.sort()?,
                order: scratch.order()?,
                limit: scratch.limit()?,
            };
            gateway.top_holders(&query).await
        }
        Flow::Volume => {
            let query = VolumeQuery {
                mint: address,
                start: scratch.date(ScratchKey::Start)?.clone(),
                end: scratch.date(ScratchKey::End)?.clone(),
                interval: scratch.interval()?,
            };
            gateway.transfer_volume(&query).await
        }
        Flow::Balances => {
            let query = BalanceHistoryQuery {
                wallet: address,
                days: scratch.days()?,
            };
            gateway.balance_history(&query).await
        }
    };

    Some(result)
}
