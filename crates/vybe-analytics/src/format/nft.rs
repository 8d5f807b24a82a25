//! NFT collection owners and wallet NFT portfolios

use rust_decimal::Decimal;

use super::{NA, or_na, rank_marker, short_address, usd};
use crate::model::{CollectionOwner, NftPortfolio};

/// Owners shown per collection
pub const TOP_OWNERS: usize = 10;

pub fn collection_owners(collection: &str, owners: &[CollectionOwner]) -> String {
    let mut lines = vec![format!("📦 *Top Owners of:* {}\n", short_address(collection))];
    for (i, owner) in owners.iter().take(TOP_OWNERS).enumerate() {
        lines.push(format!(
            "{}\n👤 *Owner:* {}\n🎁 *NFTs:* {}\n",
            rank_marker(i + 1),
            owner.owner.as_deref().map_or_else(|| NA.to_string(), short_address),
            owner.amount.unwrap_or(0),
        ));
    }
    lines.join("\n")
}

pub fn portfolio(nfts: &NftPortfolio) -> String {
    let mut lines = vec![format!(
        "💥 *NFT Portfolio*\n👛 *Wallet:* {}\n🪙 *Total SOL Value:* {:.2}\n💵 *Total USD Value:* ${}\n📚 *NFT Collections:* {}",
        or_na(nfts.owner_address.as_deref()),
        nfts.total_sol.unwrap_or(0.0),
        usd(nfts.total_usd.unwrap_or(Decimal::ZERO)),
        nfts.total_nft_collection_count.unwrap_or(0),
    )];

    if nfts.data.is_empty() {
        lines.push("\n⚠️ No NFT collections found.".to_string());
        return lines.join("\n");
    }

    lines.push("\n🧾 *Collections:*".to_string());
    for c in &nfts.data {
        lines.push(format!(
            "\n🎭 *{}*\n🔗 Collection: {}\n📦 Items: {}\n💰 Value: {:.2} ◎ / ${}\n🏷️ Price: {:.2} ◎ / ${}",
            or_na(c.name.as_deref()),
            or_na(c.collection_address.as_deref()),
            c.total_items.unwrap_or(0),
            c.value_sol.unwrap_or(0.0),
            usd(c.value_usd.unwrap_or(Decimal::ZERO)),
            c.price_sol.unwrap_or(0.0),
            usd(c.price_usd.unwrap_or(Decimal::ZERO)),
        ));
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_collection_owners_caps_at_ten() {
        let owners: Vec<CollectionOwner> = (0..12)
            .map(|i| CollectionOwner {
                owner: Some(format!("OWNER{i:02}XXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXX")),
                amount: Some(i),
            })
            .collect();
        let text = collection_owners("COLLECTIONADDRESS1234567890ABCDEFGHIJKLMNOP", &owners);

        assert!(text.starts_with("📦 *Top Owners of:* COLLEC...MNOP\n"));
        assert!(text.contains("1️⃣\n👤 *Owner:* OWNER0...XXXX\n🎁 *NFTs:* 0"));
        assert!(text.contains("🔟"));
        assert!(!text.contains("*11.*"));
        assert_eq!(text.matches("👤").count(), 10);
    }

    #[test]
    fn test_portfolio_with_and_without_collections() {
        let empty: NftPortfolio = serde_json::from_value(json!({
            "ownerAddress": "W", "totalSol": 0, "totalUsd": 0, "data": []
        }))
        .unwrap();
        assert!(portfolio(&empty).ends_with("⚠️ No NFT collections found."));

        let full: NftPortfolio = serde_json::from_value(json!({
            "ownerAddress": "W",
            "totalSol": "12.5",
            "totalUsd": 2500.5,
            "totalNftCollectionCount": 1,
            "data": [{"name": "Mad Lads", "collectionAddress": "C", "totalItems": 2,
                      "valueSol": 10, "valueUsd": 2000, "priceSol": 5, "priceUsd": 1000}]
        }))
        .unwrap();
        let text = portfolio(&full);
        assert!(text.contains("🪙 *Total SOL Value:* 12.50"));
        assert!(text.contains("💵 *Total USD Value:* $2,500.50"));
        assert!(text.contains("🎭 *Mad Lads*"));
        assert!(text.contains("💰 Value: 10.00 ◎ / $2,000.00"));
    }
}
