use vybe_core::FlowResult;

use super::VybeGateway;
use crate::client::Endpoint;
use crate::format;
use crate::model::{CollectionOwner, Envelope, NftPortfolio};

const COLLECTION_NOT_FOUND: &str = "🔍 Not Found (404): No such collection found.";
const NO_OWNERS_FOUND: &str = "⚠️ No owners found for this collection.";
const WALLET_HAS_NO_NFTS: &str = "🚫 Wallet not found or has no NFT data.";

impl VybeGateway {
    pub(super) async fn nft_collection_owners(&self, collection: &str) -> FlowResult {
        let endpoint = Endpoint::collection_owners(collection);
        match self.get::<Envelope<CollectionOwner>>(&endpoint).await {
            Ok(owners) if owners.data.is_empty() => Self::no_data(NO_OWNERS_FOUND),
            Ok(owners) => FlowResult::TextOnly(format::nft::collection_owners(collection, &owners.data)),
            Err(e) => Self::failed(&endpoint, &e, COLLECTION_NOT_FOUND),
        }
    }

    pub(super) async fn nft_portfolio(&self, wallet: &str) -> FlowResult {
        let endpoint = Endpoint::nft_balance(wallet);
        match self.get::<NftPortfolio>(&endpoint).await {
            Ok(nfts) => FlowResult::TextOnly(format::nft::portfolio(&nfts)),
            Err(e) => Self::failed(&endpoint, &e, WALLET_HAS_NO_NFTS),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use vybe_core::{AnalyticsGateway, ErrorKind};

    use super::*;
    use crate::client::MockDataProvider;
    use crate::gateway::testing::{WALLET, gateway};

    const COLLECTION: &str = "COLLECTIONxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxx";

    #[tokio::test]
    async fn test_collection_owners() {
        let path = format!("/nft/collection-owners/{COLLECTION}");
        let provider = MockDataProvider::new().with_json(
            &path,
            json!({"data": [{"owner": "OWNERxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxx1", "amount": 12}]}),
        );
        let (gw, _, _) = gateway(provider);

        let FlowResult::TextOnly(text) = gw.collection_owners(COLLECTION).await else {
            panic!("expected text");
        };
        assert!(text.contains("🎁 *NFTs:* 12"));
    }

    #[tokio::test]
    async fn test_collection_not_found_and_empty() {
        let empty = format!("/nft/collection-owners/{COLLECTION}");
        let provider = MockDataProvider::new().with_json(&empty, json!({"data": []}));
        let (gw, _, _) = gateway(provider);
        assert_eq!(
            gw.collection_owners(COLLECTION).await,
            FlowResult::Failure(ErrorKind::NoData, NO_OWNERS_FOUND.into())
        );
        assert_eq!(
            gw.collection_owners("UNKNOWN").await,
            FlowResult::Failure(ErrorKind::NotFound, COLLECTION_NOT_FOUND.into())
        );
    }

    #[tokio::test]
    async fn test_wallet_nfts_forbidden() {
        let path = format!("/account/nft-balance/{WALLET}");
        let (gw, _, _) = gateway(MockDataProvider::new().with_status(&path, 403));
        assert_eq!(gw.wallet_nfts(WALLET).await.kind(), Some(ErrorKind::AccessDenied));
    }
}
