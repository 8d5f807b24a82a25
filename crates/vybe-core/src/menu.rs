//! Menus and the Command Table
//!
//! Button presses arrive as literal strings. Anything that exactly matches
//! an entry in [`Command::parse`] is a menu command and wins over whatever
//! step the session is waiting on.

use serde::{Deserialize, Serialize};

use crate::dialog::Flow;
use crate::messages;
use crate::reply::Keyboard;

pub const BACK: &str = "🔙 Back";
pub const MAIN_MENU: &str = "🏠 Main Menu";
pub const START: &str = "/start";

pub const NFT: &str = "🎨 NFT";
pub const PROGRAMS: &str = "📦 Programs";
pub const TOKEN_ANALYSIS: &str = "📊 Token Analysis";
pub const HOLDERS: &str = "👤 Holders";
pub const WALLET_TRACKING: &str = "🧾 Wallet Tracking";
pub const ALPHA_VYBE: &str = "🅰️ Alpha Vybe";
pub const HELP: &str = "❓ Help";

/// Menus the user can navigate between
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MenuId {
    #[default]
    Main,
    Nft,
    Programs,
    Token,
    Holders,
    Wallet,
}

impl MenuId {
    /// One level up. The hierarchy is fixed at two levels below `Main`.
    pub fn parent(self) -> MenuId {
        match self {
            MenuId::Holders => MenuId::Token,
            MenuId::Main
            | MenuId::Nft
            | MenuId::Programs
            | MenuId::Token
            | MenuId::Wallet => MenuId::Main,
        }
    }

    /// Heading sent when the menu is shown
    pub fn title(self) -> &'static str {
        match self {
            MenuId::Main => "🏠 *Main Menu*",
            MenuId::Nft => "🎨 *NFT Menu*",
            MenuId::Programs => "📦 *Programs Menu*",
            MenuId::Token => "📊 *Token Analysis Menu*",
            MenuId::Holders => "👤 *Holders Submenu*",
            MenuId::Wallet => "🧾 *Wallet Tracking Menu*",
        }
    }

    pub fn keyboard(self) -> Keyboard {
        let rows: Vec<Vec<&str>> = match self {
            MenuId::Main => vec![
                vec![NFT, PROGRAMS],
                vec![TOKEN_ANALYSIS, WALLET_TRACKING],
                vec![ALPHA_VYBE, HELP],
            ],
            MenuId::Nft => vec![vec![Flow::CollectionOwners.label()]],
            MenuId::Programs => vec![
                vec![Flow::ProgramDetails.label(), Flow::TopWallets.label()],
                vec![Flow::Transactions.label(), Flow::ActiveUsers.label()],
                vec![Flow::Tvl.label()],
            ],
            MenuId::Token => vec![
                vec![HOLDERS, Flow::TokenInfo.label()],
                vec![Flow::Balances.label(), Flow::Ohlcv.label()],
                vec![Flow::Volume.label()],
            ],
            MenuId::Holders => vec![
                vec![Flow::DailyHolders.label()],
                vec![Flow::TopHolders.label()],
            ],
            MenuId::Wallet => vec![
                vec![Flow::WalletNft.label(), Flow::WalletPnl.label()],
                vec![Flow::WalletPortfolio.label(), Flow::WalletSpl.label()],
            ],
        };

        let mut keyboard = Keyboard::from_rows(rows);
        if self != MenuId::Main {
            keyboard.push_row(vec![BACK, MAIN_MENU]);
        }
        keyboard
    }
}

/// Everything the command table recognises
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    Start,
    MainMenu,
    Back,
    Open(MenuId),
    AlphaVybe,
    Help,
    Begin(Flow),
}

impl Command {
    /// Exact-match lookup against the static command table
    pub fn parse(text: &str) -> Option<Command> {
        let command = match text {
            START => Command::Start,
            MAIN_MENU => Command::MainMenu,
            BACK => Command::Back,
            NFT => Command::Open(MenuId::Nft),
            PROGRAMS => Command::Open(MenuId::Programs),
            TOKEN_ANALYSIS => Command::Open(MenuId::Token),
            HOLDERS => Command::Open(MenuId::Holders),
            WALLET_TRACKING => Command::Open(MenuId::Wallet),
            ALPHA_VYBE => Command::AlphaVybe,
            HELP => Command::Help,
            other => return Flow::ALL.into_iter().find(|f| f.label() == other).map(Command::Begin),
        };
        Some(command)
    }
}

/// Link shown under the Alpha Vybe promo
pub fn alpha_link() -> crate::reply::LinkButton {
    crate::reply::LinkButton::new("🔗 Open AlphaVybe", messages::ALPHA_URL)
}
