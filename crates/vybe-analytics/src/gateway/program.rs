use vybe_core::gateway::{ActivityQuery, TopWalletsQuery, TvlQuery};
use vybe_core::params::RangeUnit;
use vybe_core::{ChartSpec, FlowResult, LinkButton, messages};

use super::VybeGateway;
use crate::client::Endpoint;
use crate::format;
use crate::model::{ActiveWallet, DauPoint, Envelope, ProgramInfo, TvlPoint, TxPoint};

const PROGRAM_NOT_FOUND: &str = "🚫 Program not found or invalid.";
const INACCESSIBLE_PROGRAM: &str = "❌ Invalid or inaccessible program address.";
const NO_ACTIVE_USERS: &str = "⚠️ No active user data found.";
const NO_TRANSACTIONS: &str = "⚠️ No transaction data found for this range.";
const NO_TVL_DATA: &str = "⚠️ No TVL data found for this program.";

/// Wallets listed by the top-wallets analytic
pub const TOP_WALLETS_LIMIT: u32 = 10;

const LOGO_BUTTON: &str = "🖼️ View Logo";

fn logo_link(url: Option<&str>) -> Option<LinkButton> {
    url.filter(|u| u.starts_with("http://") || u.starts_with("https://"))
        .map(|u| LinkButton::new(LOGO_BUTTON, u))
}

impl VybeGateway {
    /// Display name for `program`, or the failure to report instead
    async fn program_name(&self, program: &str) -> Result<String, FlowResult> {
        let endpoint = Endpoint::program(program);
        let info: ProgramInfo = self
            .get(&endpoint)
            .await
            .map_err(|e| Self::failed(&endpoint, &e, PROGRAM_NOT_FOUND))?;
        Ok(info.display_name().unwrap_or(program).to_string())
    }

    pub(super) async fn program_overview(&self, program: &str) -> FlowResult {
        let endpoint = Endpoint::program(program);
        match self.get::<ProgramInfo>(&endpoint).await {
            Ok(info) => {
                let body = format::program::details(&info);
                match logo_link(info.logo_url.as_deref()) {
                    Some(link) => FlowResult::TextWithLink(body, link),
                    None => FlowResult::TextOnly(body),
                }
            }
            Err(e) => Self::failed(&endpoint, &e, INACCESSIBLE_PROGRAM),
        }
    }

    pub(super) async fn program_top_wallets(&self, query: &TopWalletsQuery) -> FlowResult {
        if !(1..=30).contains(&query.days) {
            return Self::invalid(messages::INVALID_TIMESPAN_1D_30D);
        }
        let name = match self.program_name(&query.program).await {
            Ok(name) => name,
            Err(failure) => return failure,
        };

        let endpoint = Endpoint::top_active_wallets(&query.program, query.days, TOP_WALLETS_LIMIT);
        match self.get::<Envelope<ActiveWallet>>(&endpoint).await {
            Ok(wallets) if wallets.data.is_empty() => Self::no_data(NO_ACTIVE_USERS),
            Ok(wallets) => FlowResult::TextOnly(format::program::top_wallets(
                &name,
                query.days,
                TOP_WALLETS_LIMIT,
                &wallets.data,
            )),
            Err(e) => Self::failed(&endpoint, &e, PROGRAM_NOT_FOUND),
        }
    }

    pub(super) async fn program_active_users(&self, query: &ActivityQuery) -> FlowResult {
        let name = match self.program_name(&query.program).await {
            Ok(name) => name,
            Err(failure) => return failure,
        };

        let endpoint = Endpoint::active_users_series(&query.program, query.range);
        let points = match self.get::<Envelope<DauPoint>>(&endpoint).await {
            Ok(series) if series.data.is_empty() => return Self::no_data(NO_ACTIVE_USERS),
            Ok(series) => series.data,
            Err(e) => return Self::failed(&endpoint, &e, PROGRAM_NOT_FOUND),
        };

        let range = query.range;
        let body = format::program::active_users(&name, range, &points);
        if range.at_most(RangeUnit::Hours, 2) || range.at_most(RangeUnit::Days, 2) {
            return FlowResult::TextOnly(body);
        }

        let spec = ChartSpec::bar(format!("Active Users Over {range} | {name}"), "Time", "Active Users")
            .with_points(format::program::active_users_points(range, &points));
        self.with_chart(body, spec, Some(format!("📊 Active Users Chart | {name}")))
            .await
    }

    pub(super) async fn program_transactions(&self, query: &ActivityQuery) -> FlowResult {
        let name = match self.program_name(&query.program).await {
            Ok(name) => name,
            Err(failure) => return failure,
        };

        let endpoint = Endpoint::transactions_series(&query.program, query.range);
        let points = match self.get::<Envelope<TxPoint>>(&endpoint).await {
            Ok(series) if series.data.is_empty() => return Self::no_data(NO_TRANSACTIONS),
            Ok(series) => series.data,
            Err(e) => return Self::failed(&endpoint, &e, PROGRAM_NOT_FOUND),
        };

        let range = query.range;
        let body = format::program::transactions(&name, range, &points);
        if range.at_most(RangeUnit::Hours, 2) {
            return FlowResult::TextOnly(body);
        }

        let spec = ChartSpec::bar(
            format!("Transactions Over {range} | {name}"),
            "Time",
            "Transaction Count",
        )
        .with_points(format::program::transactions_points(&points));
        self.with_chart(body, spec, Some(format!("📈 Transaction Chart | {name} ({range})")))
            .await
    }

    pub(super) async fn program_tvl(&self, query: &TvlQuery) -> FlowResult {
        let name = match self.program_name(&query.program).await {
            Ok(name) => name,
            Err(failure) => return failure,
        };

        let endpoint = Endpoint::program_tvl(&query.program, query.resolution);
        let points = match self.get::<Envelope<TvlPoint>>(&endpoint).await {
            Ok(series) if series.data.is_empty() => return Self::no_data(NO_TVL_DATA),
            Ok(series) => series.data,
            Err(e) => return Self::failed(&endpoint, &e, NO_TVL_DATA),
        };

        let resolution = query.resolution;
        let body = format::program::tvl(&name, resolution, &points);
        let spec = ChartSpec::line(
            format!("TVL Over Time • {name} • {resolution}"),
            "Time",
            "TVL (USD)",
            false,
        )
        .with_points(format::program::tvl_points(&points));
        self.with_chart(body, spec, Some(format!("📈 TVL Chart | {name}"))).await
    }
}
