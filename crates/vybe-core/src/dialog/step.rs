//! Step Table
//!
//! Every step of every flow, as data. A step names the scratch slot it
//! fills, its prompt and re-prompt texts, a validator, and what happens on
//! success: advance to the next step or terminate the flow.

use serde::{Deserialize, Serialize};

use super::Flow;
use crate::error::ErrorKind;
use crate::messages as msg;
use crate::reply::Keyboard;
use crate::session::{Scratch, ScratchKey, Value};
use crate::validate;

/// Identifier of a step awaiting input
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepId {
    AwaitingCollectionAddress,
    AwaitingProgramAddress,
    AwaitingTopWalletsProgram,
    AwaitingTopWalletsDays,
    AwaitingNftWallet,
    AwaitingPnlWallet,
    AwaitingPnlDays,
    AwaitingPortfolioWallet,
    AwaitingSplWallet,
    AwaitingTokenInfoMint,
    AwaitingOhlcvMint,
    AwaitingOhlcvResolution,
    AwaitingOhlcvStart,
    AwaitingOhlcvEnd,
    AwaitingActiveUsersProgram,
    AwaitingActiveUsersRange,
    AwaitingTransactionsProgram,
    AwaitingTransactionsRange,
    AwaitingTvlProgram,
    AwaitingTvlResolution,
    AwaitingHoldersMint,
    AwaitingHoldersStart,
    AwaitingHoldersEnd,
    AwaitingTopHoldersMint,
    AwaitingSortCriteria,
    AwaitingSortOrder,
    AwaitingHoldersLimit,
    AwaitingVolumeMint,
    AwaitingVolumeStart,
    AwaitingVolumeEnd,
    AwaitingVolumeInterval,
    AwaitingBalancesWallet,
    AwaitingBalancesDays,
}

impl StepId {
    pub const ALL: [StepId; 33] = [
        StepId::AwaitingCollectionAddress,
        StepId::AwaitingProgramAddress,
        StepId::AwaitingTopWalletsProgram,
        StepId::AwaitingTopWalletsDays,
        StepId::AwaitingNftWallet,
        StepId::AwaitingPnlWallet,
        StepId::AwaitingPnlDays,
        StepId::AwaitingPortfolioWallet,
        StepId::AwaitingSplWallet,
        StepId::AwaitingTokenInfoMint,
        StepId::AwaitingOhlcvMint,
        StepId::AwaitingOhlcvResolution,
        StepId::AwaitingOhlcvStart,
        StepId::AwaitingOhlcvEnd,
        StepId::AwaitingActiveUsersProgram,
        StepId::AwaitingActiveUsersRange,
        StepId::AwaitingTransactionsProgram,
        StepId::AwaitingTransactionsRange,
        StepId::AwaitingTvlProgram,
        StepId::AwaitingTvlResolution,
        StepId::AwaitingHoldersMint,
        StepId::AwaitingHoldersStart,
        StepId::AwaitingHoldersEnd,
        StepId::AwaitingTopHoldersMint,
        StepId::AwaitingSortCriteria,
        StepId::AwaitingSortOrder,
        StepId::AwaitingHoldersLimit,
        StepId::AwaitingVolumeMint,
        StepId::AwaitingVolumeStart,
        StepId::AwaitingVolumeEnd,
        StepId::AwaitingVolumeInterval,
        StepId::AwaitingBalancesWallet,
        StepId::AwaitingBalancesDays,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            StepId::AwaitingCollectionAddress => "awaiting_collection_address",
            StepId::AwaitingProgramAddress => "awaiting_program_address",
            StepId::AwaitingTopWalletsProgram => "awaiting_top_wallets_program",
            StepId::AwaitingTopWalletsDays => "awaiting_top_wallets_days",
            StepId::AwaitingNftWallet => "awaiting_nft_wallet",
            StepId::AwaitingPnlWallet => "awaiting_pnl_wallet",
            StepId::AwaitingPnlDays => "awaiting_pnl_days",
            StepId::AwaitingPortfolioWallet => "awaiting_portfolio_wallet",
            StepId::AwaitingSplWallet => "awaiting_spl_wallet",
            StepId::AwaitingTokenInfoMint => "awaiting_token_info_mint",
            StepId::AwaitingOhlcvMint => "awaiting_ohlcv_mint",
            StepId::AwaitingOhlcvResolution => "awaiting_ohlcv_resolution",
            StepId::AwaitingOhlcvStart => "awaiting_ohlcv_start",
            StepId::AwaitingOhlcvEnd => "awaiting_ohlcv_end",
            StepId::AwaitingActiveUsersProgram => "awaiting_active_users_program",
            StepId::AwaitingActiveUsersRange => "awaiting_active_users_range",
            StepId::AwaitingTransactionsProgram => "awaiting_transactions_program",
            StepId::AwaitingTransactionsRange => "awaiting_transactions_range",
            StepId::AwaitingTvlProgram => "awaiting_tvl_program",
            StepId::AwaitingTvlResolution => "awaiting_tvl_resolution",
            StepId::AwaitingHoldersMint => "awaiting_holders_mint",
            StepId::AwaitingHoldersStart => "awaiting_holders_start",
            StepId::AwaitingHoldersEnd => "awaiting_holders_end",
            StepId::AwaitingTopHoldersMint => "awaiting_top_holders_mint",
            StepId::AwaitingSortCriteria => "awaiting_sort_criteria",
            StepId::AwaitingSortOrder => "awaiting_sort_order",
            StepId::AwaitingHoldersLimit => "awaiting_holders_limit",
            StepId::AwaitingVolumeMint => "awaiting_volume_mint",
            StepId::AwaitingVolumeStart => "awaiting_volume_start",
            StepId::AwaitingVolumeEnd => "awaiting_volume_end",
            StepId::AwaitingVolumeInterval => "awaiting_volume_interval",
            StepId::AwaitingBalancesWallet => "awaiting_balances_wallet",
            StepId::AwaitingBalancesDays => "awaiting_balances_days",
        }
    }

    /// This step's row of the table
    pub fn definition(self) -> StepDefinition {
        definition(self)
    }
}

impl std::fmt::Display for StepId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What a successful answer leads to
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Transition {
    Advance(StepId),
    Terminate(Flow),
}

pub type Validator = fn(&str) -> Result<Value, ErrorKind>;

/// Extra acceptance rule that needs earlier answers
pub type CrossCheck = fn(&Scratch, &Value) -> bool;

/// One row of the step table
#[derive(Clone, Copy)]
pub struct StepDefinition {
    pub id: StepId,
    pub flow: Flow,

    /// Scratch slot the validated value is stored under
    pub key: ScratchKey,

    /// Shown when the step becomes current
    pub prompt: &'static str,

    /// Shown, unchanged, on every rejected answer
    pub error: &'static str,

    pub validator: Validator,
    pub cross_check: Option<CrossCheck>,

    /// Keyboard presented with the prompt
    pub keyboard: Option<fn() -> Keyboard>,

    pub on_success: Transition,
}

impl std::fmt::Debug for StepDefinition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StepDefinition")
            .field("id", &self.id)
            .field("flow", &self.flow)
            .field("key", &self.key)
            .field("on_success", &self.on_success)
            .finish_non_exhaustive()
    }
}

impl StepDefinition {
    /// Run the validator and any cross-check against earlier answers
    pub fn accept(&self, scratch: &Scratch, input: &str) -> Result<Value, ErrorKind> {
        let value = (self.validator)(input)?;
        match self.cross_check {
            Some(check) if !check(scratch, &value) => Err(ErrorKind::Validation),
            _ => Ok(value),
        }
    }
}

// =============================================================================
// Validators
// =============================================================================

fn address(input: &str) -> Result<Value, ErrorKind> {
    validate::parse_address(input)
        .map(Value::Address)
        .ok_or(ErrorKind::Validation)
}

fn date(input: &str) -> Result<Value, ErrorKind> {
    validate::parse_date(input)
        .map(Value::Date)
        .ok_or(ErrorKind::Validation)
}

fn days(input: &str) -> Result<Value, ErrorKind> {
    validate::parse_days(input)
        .map(Value::Days)
        .ok_or(ErrorKind::Validation)
}

fn pnl_days(input: &str) -> Result<Value, ErrorKind> {
    validate::parse_pnl_days(input)
        .map(Value::Days)
        .ok_or(ErrorKind::Validation)
}

fn range(input: &str) -> Result<Value, ErrorKind> {
    validate::parse_range(input)
        .map(Value::Range)
        .ok_or(ErrorKind::Validation)
}

fn ohlcv_resolution(input: &str) -> Result<Value, ErrorKind> {
    validate::parse_ohlcv_resolution(input)
        .map(Value::Resolution)
        .ok_or(ErrorKind::Validation)
}

fn tvl_resolution(input: &str) -> Result<Value, ErrorKind> {
    validate::parse_tvl_resolution(input)
        .map(Value::Resolution)
        .ok_or(ErrorKind::Validation)
}

fn sort(input: &str) -> Result<Value, ErrorKind> {
    validate::parse_sort_criteria(input)
        .map(Value::Sort)
        .ok_or(ErrorKind::Validation)
}

fn order(input: &str) -> Result<Value, ErrorKind> {
    validate::parse_sort_order(input)
        .map(Value::Order)
        .ok_or(ErrorKind::Validation)
}

fn limit(input: &str) -> Result<Value, ErrorKind> {
    validate::parse_limit(input)
        .map(Value::Limit)
        .ok_or(ErrorKind::Validation)
}

fn interval(input: &str) -> Result<Value, ErrorKind> {
    validate::parse_interval(input)
        .map(Value::Interval)
        .ok_or(ErrorKind::Validation)
}

/// End date strictly after the stored start date
fn end_after_start(scratch: &Scratch, value: &Value) -> bool {
    match (scratch.date(ScratchKey::Start), value) {
        (Some(start), Value::Date(end)) => end.timestamp > start.timestamp,
        _ => false,
    }
}

// =============================================================================
// Table
// =============================================================================

#[allow(clippy::too_many_lines)]
fn definition(id: StepId) -> StepDefinition {
    use ScratchKey as K;
    use StepId as S;
    use Transition::{Advance, Terminate};

    let row = |flow: Flow,
               key: ScratchKey,
               prompt: &'static str,
               error: &'static str,
               validator: Validator,
               on_success: Transition| StepDefinition {
        id,
        flow,
        key,
        prompt,
        error,
        validator,
        cross_check: None,
        keyboard: None,
        on_success,
    };

    match id {
        // NFT
        S::AwaitingCollectionAddress => row(
            Flow::CollectionOwners,
            K::Address,
            msg::ENTER_COLLECTION_ADDRESS,
            msg::INVALID_COLLECTION_ADDRESS,
            address,
            Terminate(Flow::CollectionOwners),
        ),

        // Programs
        S::AwaitingProgramAddress => row(
            Flow::ProgramDetails,
            K::Address,
            msg::ENTER_PROGRAM_ADDRESS,
            msg::INVALID_ADDRESS,
            address,
            Terminate(Flow::ProgramDetails),
        ),
        S::AwaitingTopWalletsProgram => row(
            Flow::TopWallets,
            K::Address,
            msg::ENTER_PROGRAM_ADDRESS,
            msg::INVALID_ADDRESS,
            address,
            Advance(S::AwaitingTopWalletsDays),
        ),
        S::AwaitingTopWalletsDays => row(
            Flow::TopWallets,
            K::Days,
            msg::TIMESPAN_1D_30D,
            msg::INVALID_TIMESPAN_1D_30D,
            days,
            Terminate(Flow::TopWallets),
        ),
        S::AwaitingActiveUsersProgram => row(
            Flow::ActiveUsers,
            K::Address,
            msg::ENTER_PROGRAM_ADDRESS,
            msg::INVALID_ADDRESS,
            address,
            Advance(S::AwaitingActiveUsersRange),
        ),
        S::AwaitingActiveUsersRange => row(
            Flow::ActiveUsers,
            K::Range,
            msg::ENTER_TIME_RANGE,
            msg::INVALID_TIME_RANGE,
            range,
            Terminate(Flow::ActiveUsers),
        ),
        S::AwaitingTransactionsProgram => row(
            Flow::Transactions,
            K::Address,
            msg::ENTER_PROGRAM_ADDRESS,
            msg::INVALID_ADDRESS,
            address,
            Advance(S::AwaitingTransactionsRange),
        ),
        S::AwaitingTransactionsRange => row(
            Flow::Transactions,
            K::Range,
            msg::ENTER_TRANSACTION_RANGE,
            msg::INVALID_TRANSACTION_RANGE,
            range,
            Terminate(Flow::Transactions),
        ),
        S::AwaitingTvlProgram => row(
            Flow::Tvl,
            K::Address,
            msg::ENTER_PROGRAM_ADDRESS,
            msg::INVALID_ADDRESS,
            address,
            Advance(S::AwaitingTvlResolution),
        ),
        S::AwaitingTvlResolution => row(
            Flow::Tvl,
            K::Resolution,
            msg::ENTER_TVL_RESOLUTION,
            msg::INVALID_TVL_RESOLUTION,
            tvl_resolution,
            Terminate(Flow::Tvl),
        ),

        // Wallet tracking
        S::AwaitingNftWallet => row(
            Flow::WalletNft,
            K::Address,
            msg::ENTER_WALLET_ADDRESS,
            msg::INVALID_WALLET_ADDRESS,
            address,
            Terminate(Flow::WalletNft),
        ),
        S::AwaitingPnlWallet => row(
            Flow::WalletPnl,
            K::Address,
            msg::ENTER_WALLET_ADDRESS,
            msg::INVALID_WALLET_ADDRESS,
            address,
            Advance(S::AwaitingPnlDays),
        ),
        S::AwaitingPnlDays => row(
            Flow::WalletPnl,
            K::Days,
            msg::TIMESPAN_1D_7D_30D,
            msg::INVALID_TIMESPAN_1D_7D_30D,
            pnl_days,
            Terminate(Flow::WalletPnl),
        ),
        S::AwaitingPortfolioWallet => row(
            Flow::WalletPortfolio,
            K::Address,
            msg::ENTER_WALLET_ADDRESS,
            msg::INVALID_WALLET_ADDRESS,
            address,
            Terminate(Flow::WalletPortfolio),
        ),
        S::AwaitingSplWallet => row(
            Flow::WalletSpl,
            K::Address,
            msg::ENTER_WALLET_ADDRESS,
            msg::INVALID_WALLET_ADDRESS,
            address,
            Terminate(Flow::WalletSpl),
        ),

        // Token analysis
        S::AwaitingTokenInfoMint => row(
            Flow::TokenInfo,
            K::Address,
            msg::ENTER_MINT_ADDRESS,
            msg::INVALID_MINT_ADDRESS,
            address,
            Terminate(Flow::TokenInfo),
        ),
        S::AwaitingOhlcvMint => row(
            Flow::Ohlcv,
            K::Address,
            msg::ENTER_MINT_ADDRESS,
            msg::INVALID_MINT_ADDRESS,
            address,
            Advance(S::AwaitingOhlcvResolution),
        ),
        S::AwaitingOhlcvResolution => row(
            Flow::Ohlcv,
            K::Resolution,
            msg::ENTER_RESOLUTION,
            msg::INVALID_RESOLUTION,
            ohlcv_resolution,
            Advance(S::AwaitingOhlcvStart),
        ),
        S::AwaitingOhlcvStart => row(
            Flow::Ohlcv,
            K::Start,
            msg::ENTER_START_DATE,
            msg::INVALID_START_DATE,
            date,
            Advance(S::AwaitingOhlcvEnd),
        ),
        S::AwaitingOhlcvEnd => StepDefinition {
            cross_check: Some(end_after_start),
            ..row(
                Flow::Ohlcv,
                K::End,
                msg::ENTER_END_DATE,
                msg::INVALID_END_DATE,
                date,
                Terminate(Flow::Ohlcv),
            )
        },
        S::AwaitingVolumeMint => row(
            Flow::Volume,
            K::Address,
            msg::ENTER_MINT_ADDRESS,
            msg::INVALID_MINT_ADDRESS,
            address,
            Advance(S::AwaitingVolumeStart),
        ),
        S::AwaitingVolumeStart => row(
            Flow::Volume,
            K::Start,
            msg::ENTER_START_DATE,
            msg::INVALID_START_DATE,
            date,
            Advance(S::AwaitingVolumeEnd),
        ),
        S::AwaitingVolumeEnd => StepDefinition {
            cross_check: Some(end_after_start),
            ..row(
                Flow::Volume,
                K::End,
                msg::ENTER_END_DATE,
                msg::INVALID_END_DATE,
                date,
                Advance(S::AwaitingVolumeInterval),
            )
        },
        S::AwaitingVolumeInterval => row(
            Flow::Volume,
            K::Interval,
            msg::ENTER_INTERVAL,
            msg::INVALID_INTERVAL,
            interval,
            Terminate(Flow::Volume),
        ),
        S::AwaitingBalancesWallet => row(
            Flow::Balances,
            K::Address,
            msg::ENTER_WALLET_ADDRESS,
            msg::INVALID_WALLET_ADDRESS,
            address,
            Advance(S::AwaitingBalancesDays),
        ),
        S::AwaitingBalancesDays => row(
            Flow::Balances,
            K::Days,
            msg::ENTER_BALANCE_DAYS,
            msg::INVALID_TIMESPAN_1D_30D,
            days,
            Terminate(Flow::Balances),
        ),

        // Holders
        S::AwaitingHoldersMint => row(
            Flow::DailyHolders,
            K::Address,
            msg::ENTER_MINT_ADDRESS,
            msg::INVALID_MINT_ADDRESS,
            address,
            Advance(S::AwaitingHoldersStart),
        ),
        S::AwaitingHoldersStart => row(
            Flow::DailyHolders,
            K::Start,
            msg::ENTER_START_DATE,
            msg::INVALID_START_DATE,
            date,
            Advance(S::AwaitingHoldersEnd),
        ),
        S::AwaitingHoldersEnd => StepDefinition {
            cross_check: Some(end_after_start),
            ..row(
                Flow::DailyHolders,
                K::End,
                msg::ENTER_END_DATE,
                msg::INVALID_END_DATE,
                date,
                Terminate(Flow::DailyHolders),
            )
        },
        S::AwaitingTopHoldersMint => row(
            Flow::TopHolders,
            K::Address,
            msg::ENTER_MINT_ADDRESS,
            msg::INVALID_MINT_ADDRESS,
            address,
            Advance(S::AwaitingSortCriteria),
        ),
        S::AwaitingSortCriteria => StepDefinition {
            keyboard: Some(Keyboard::sort_criteria),
            ..row(
                Flow::TopHolders,
                K::Sort,
                msg::SORT_CRITERIA,
                msg::INVALID_SORT_CRITERIA,
                sort,
                Advance(S::AwaitingSortOrder),
            )
        },
        S::AwaitingSortOrder => StepDefinition {
            keyboard: Some(Keyboard::sort_order),
            ..row(
                Flow::TopHolders,
                K::Order,
                msg::SORT_ORDER,
                msg::INVALID_SORT_ORDER,
                order,
                Advance(S::AwaitingHoldersLimit),
            )
        },
        S::AwaitingHoldersLimit => row(
            Flow::TopHolders,
            K::Limit,
            msg::TOP_HOLDERS_COUNT,
            msg::INVALID_HOLDERS_COUNT,
            limit,
            Terminate(Flow::TopHolders),
        ),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;
    use crate::params::DateInput;

    #[test]
    fn test_every_flow_reaches_exactly_one_terminate() {
        let mut seen = HashSet::new();
        for flow in Flow::ALL {
            let mut step = flow.entry();
            let mut visited = HashSet::new();
            loop {
                assert!(visited.insert(step), "{step} revisited in {flow}");
                assert!(seen.insert(step), "{step} shared between flows");
                let def = step.definition();
                assert_eq!(def.id, step);
                assert_eq!(def.flow, flow, "{step} belongs to the wrong flow");
                match def.on_success {
                    Transition::Advance(next) => step = next,
                    Transition::Terminate(done) => {
                        assert_eq!(done, flow);
                        break;
                    }
                }
            }
        }
        assert_eq!(seen.len(), StepId::ALL.len(), "unreachable steps in the table");
    }

    #[test]
    fn test_keys_are_unique_within_a_flow() {
        for flow in Flow::ALL {
            let mut keys = HashSet::new();
            let mut step = flow.entry();
            loop {
                let def = step.definition();
                assert!(keys.insert(def.key), "{flow} writes {:?} twice", def.key);
                match def.on_success {
                    Transition::Advance(next) => step = next,
                    Transition::Terminate(_) => break,
                }
            }
        }
    }

    #[test]
    fn test_step_ids_render_snake_case() {
        assert_eq!(
            StepId::AwaitingCollectionAddress.to_string(),
            "awaiting_collection_address"
        );
        let json = serde_json::to_string(&StepId::AwaitingHoldersLimit).unwrap();
        assert_eq!(json, "\"awaiting_holders_limit\"");
    }

    #[test]
    fn test_end_date_must_be_strictly_later() {
        let def = StepId::AwaitingHoldersEnd.definition();
        let mut scratch = Scratch::default();
        scratch.insert(
            ScratchKey::Start,
            Value::Date(DateInput {
                text: "2025-01-01".into(),
                timestamp: 1_735_689_600,
            }),
        );

        assert_eq!(def.accept(&scratch, "2025-01-01"), Err(ErrorKind::Validation));
        assert_eq!(def.accept(&scratch, "2024-12-31"), Err(ErrorKind::Validation));
        assert!(def.accept(&scratch, "2025-01-02").is_ok());
    }

    #[test]
    fn test_sort_steps_carry_keyboards() {
        assert!(StepId::AwaitingSortCriteria.definition().keyboard.is_some());
        assert!(StepId::AwaitingSortOrder.definition().keyboard.is_some());
        assert!(StepId::AwaitingHoldersLimit.definition().keyboard.is_none());
    }
}
