//! Flow catalogue: entry button, first step, and home menu of each flow

use serde::{Deserialize, Serialize};

use super::StepId;
use crate::menu::MenuId;

/// One complete multi-step dialog producing a single analytic
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Flow {
    CollectionOwners,
    ProgramDetails,
    TopWallets,
    WalletNft,
    WalletPnl,
    WalletPortfolio,
    WalletSpl,
    TokenInfo,
    Ohlcv,
    ActiveUsers,
    Transactions,
    Tvl,
    DailyHolders,
    TopHolders,
    Volume,
    Balances,
}

impl Flow {
    pub const ALL: [Flow; 16] = [
        Flow::CollectionOwners,
        Flow::ProgramDetails,
        Flow::TopWallets,
        Flow::WalletNft,
        Flow::WalletPnl,
        Flow::WalletPortfolio,
        Flow::WalletSpl,
        Flow::TokenInfo,
        Flow::Ohlcv,
        Flow::ActiveUsers,
        Flow::Transactions,
        Flow::Tvl,
        Flow::DailyHolders,
        Flow::TopHolders,
        Flow::Volume,
        Flow::Balances,
    ];

    /// Button that starts the flow
    pub fn label(self) -> &'static str {
        match self {
            Flow::CollectionOwners => "👑 NFT Collection Owners",
            Flow::ProgramDetails => "📄 Details",
            Flow::TopWallets => "💰 Top Wallets",
            Flow::WalletNft => "💥 NFT",
            Flow::WalletPnl => "📈 PnL",
            Flow::WalletPortfolio => "💼 Portfolio",
            Flow::WalletSpl => "🪙 SPL",
            Flow::TokenInfo => "📋 Info",
            Flow::Ohlcv => "🕰 OHLCV",
            Flow::ActiveUsers => "👥 Active Users",
            Flow::Transactions => "🔁 Transactions",
            Flow::Tvl => "📈 TVL",
            Flow::DailyHolders => "📅 Daily Top Holders",
            Flow::TopHolders => "🏆 Top Token Holders",
            Flow::Volume => "📊 Volume",
            Flow::Balances => "💼 Balances",
        }
    }

    pub fn entry(self) -> StepId {
        match self {
            Flow::CollectionOwners => StepId::AwaitingCollectionAddress,
            Flow::ProgramDetails => StepId::AwaitingProgramAddress,
            Flow::TopWallets => StepId::AwaitingTopWalletsProgram,
            Flow::WalletNft => StepId::AwaitingNftWallet,
            Flow::WalletPnl => StepId::AwaitingPnlWallet,
            Flow::WalletPortfolio => StepId::AwaitingPortfolioWallet,
            Flow::WalletSpl => StepId::AwaitingSplWallet,
            Flow::TokenInfo => StepId::AwaitingTokenInfoMint,
            Flow::Ohlcv => StepId::AwaitingOhlcvMint,
            Flow::ActiveUsers => StepId::AwaitingActiveUsersProgram,
            Flow::Transactions => StepId::AwaitingTransactionsProgram,
            Flow::Tvl => StepId::AwaitingTvlProgram,
            Flow::DailyHolders => StepId::AwaitingHoldersMint,
            Flow::TopHolders => StepId::AwaitingTopHoldersMint,
            Flow::Volume => StepId::AwaitingVolumeMint,
            Flow::Balances => StepId::AwaitingBalancesWallet,
        }
    }

    /// Menu whose keyboard carries the entry button
    pub fn menu(self) -> MenuId {
        match self {
            Flow::CollectionOwners => MenuId::Nft,
            Flow::ProgramDetails
            | Flow::TopWallets
            | Flow::ActiveUsers
            | Flow::Transactions
            | Flow::Tvl => MenuId::Programs,
            Flow::WalletNft | Flow::WalletPnl | Flow::WalletPortfolio | Flow::WalletSpl => {
                MenuId::Wallet
            }
            Flow::TokenInfo | Flow::Ohlcv | Flow::Volume | Flow::Balances => MenuId::Token,
            Flow::DailyHolders | Flow::TopHolders => MenuId::Holders,
        }
    }

    /// Menu re-shown once the flow completes, if any
    pub fn return_menu(self) -> Option<MenuId> {
        match self {
            Flow::TopHolders => Some(MenuId::Token),
            _ => None,
        }
    }
}

impl std::fmt::Display for Flow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}
