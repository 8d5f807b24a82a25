use vybe_core::gateway::{HoldersQuery, OhlcvQuery, TopHoldersQuery, VolumeQuery};
use vybe_core::params::{DateInput, OHLCV_RESOLUTIONS};
use vybe_core::{ChartSpec, FlowResult, LinkButton};

use super::VybeGateway;
use crate::client::Endpoint;
use crate::format;
use crate::model::{Candle, Envelope, HoldersPoint, TokenDetails, TopHolder, VolumePoint};

const TOKEN_NOT_FOUND: &str = "❌ Token not found! Please check the mint address.";
const INVALID_DATE_RANGE: &str =
    "❌ Invalid date range. Ensure correct format (YYYY-MM-DD) and that end date is after start date.";
const INVALID_LIMIT: &str = "❌ Limit must be a positive number.";
const NO_OHLCV_FOUND: &str = "⚠️ No OHLCV data found in the selected range.";
const NO_HOLDER_COUNTS: &str = "⚠️ No holder count data found for this range.";
const NO_HOLDERS_FOUND: &str = "⚠️ No holders data found for this token.";
const NO_VOLUME_DATA_FOUND: &str = "⚠️ No transfer volume data found for this range.";

/// Holder-count series longer than this get a chart
const HOLDERS_CHART_MIN_SPAN_SECS: i64 = 2 * 86_400;

fn range_is_ordered(start: &DateInput, end: &DateInput) -> bool {
    end.timestamp > start.timestamp
}

impl VybeGateway {
    pub(super) async fn token_details(&self, mint: &str) -> FlowResult {
        let endpoint = Endpoint::token(mint);
        match self.get::<TokenDetails>(&endpoint).await {
            Ok(token) => {
                let body = format::token::info(&token);
                let logo = token
                    .logo_url
                    .as_deref()
                    .filter(|u| u.starts_with("http://") || u.starts_with("https://"));
                match logo {
                    Some(url) => FlowResult::TextWithLink(body, LinkButton::new("🖼️ View Logo", url)),
                    None => FlowResult::TextOnly(body),
                }
            }
            Err(e) => Self::failed(&endpoint, &e, TOKEN_NOT_FOUND),
        }
    }

    pub(super) async fn candles(&self, query: &OhlcvQuery) -> FlowResult {
        if !query.resolution.is_supported_for_ohlcv() {
            return Self::invalid(&format!(
                "❌ Invalid resolution! Choose from: {}",
                OHLCV_RESOLUTIONS.join(", ")
            ));
        }
        if !range_is_ordered(&query.start, &query.end) {
            return Self::invalid(INVALID_DATE_RANGE);
        }

        let endpoint = Endpoint::token_ohlcv(
            &query.mint,
            query.resolution,
            query.start.timestamp,
            query.end.timestamp,
        );
        match self.get::<Envelope<Candle>>(&endpoint).await {
            Ok(candles) if candles.data.is_empty() => Self::no_data(NO_OHLCV_FOUND),
            Ok(candles) => FlowResult::TextOnly(format::token::ohlcv(
                query.resolution,
                &query.start,
                &query.end,
                &candles.data,
            )),
            Err(e) => Self::failed(&endpoint, &e, TOKEN_NOT_FOUND),
        }
    }

    pub(super) async fn holders_series(&self, query: &HoldersQuery) -> FlowResult {
        if !range_is_ordered(&query.start, &query.end) {
            return Self::invalid(INVALID_DATE_RANGE);
        }

        let endpoint = Endpoint::holders_series(&query.mint, query.start.timestamp, query.end.timestamp);
        let points = match self.get::<Envelope<HoldersPoint>>(&endpoint).await {
            Ok(series) if series.data.is_empty() => return Self::no_data(NO_HOLDER_COUNTS),
            Ok(series) => series.data,
            Err(e) => return Self::failed(&endpoint, &e, TOKEN_NOT_FOUND),
        };

        let body = format::token::daily_holders(&query.mint, &query.start, &query.end, &points);
        if query.end.timestamp - query.start.timestamp <= HOLDERS_CHART_MIN_SPAN_SECS {
            return FlowResult::TextOnly(body);
        }

        let spec = ChartSpec::bar(
            format!(
                "Holders Count | {} ({} → {})",
                query.mint, query.start.text, query.end.text
            ),
            "Date",
            "Holders",
        )
        .with_points(format::token::holders_points(&points));
        self.with_chart(body, spec, None).await
    }

    pub(super) async fn ranked_holders(&self, query: &TopHoldersQuery) -> FlowResult {
        if query.limit == 0 {
            return Self::invalid(INVALID_LIMIT);
        }

        let endpoint = Endpoint::top_holders(&query.mint, query.limit, query.sort, query.order);
        match self.get::<Envelope<TopHolder>>(&endpoint).await {
            Ok(holders) if holders.data.is_empty() => Self::no_data(NO_HOLDERS_FOUND),
            Ok(holders) => FlowResult::TextOnly(format::token::top_holders(
                query.limit,
                query.sort,
                query.order,
                &holders.data,
            )),
            Err(e) => Self::failed(&endpoint, &e, TOKEN_NOT_FOUND),
        }
    }

    pub(super) async fn volume_series(&self, query: &VolumeQuery) -> FlowResult {
        if !range_is_ordered(&query.start, &query.end) {
            return Self::invalid(INVALID_DATE_RANGE);
        }

        let endpoint = Endpoint::transfer_volume(
            &query.mint,
            query.start.timestamp,
            query.end.timestamp,
            query.interval,
        );
        let points = match self.get::<Envelope<VolumePoint>>(&endpoint).await {
            Ok(series) if series.data.is_empty() => return Self::no_data(NO_VOLUME_DATA_FOUND),
            Ok(series) => series.data,
            Err(e) => return Self::failed(&endpoint, &e, TOKEN_NOT_FOUND),
        };

        let body = format::token::transfer_volume(
            &query.mint,
            &query.start,
            &query.end,
            query.interval,
            &points,
        );
        let spec = ChartSpec::line(
            format!(
                "Transfer Volume | {} ({} → {})",
                query.mint, query.start.text, query.end.text
            ),
            "Date",
            "Volume",
            true,
        )
        .with_points(format::token::volume_points(&points));
        self.with_chart(body, spec, None).await
    }
}
