use std::collections::BTreeMap;

use common::error::Res;
use db::models::product::SupermarketProduct;
use sqlx::PgPool;

use crate::dtos::market::{Offer, PriceComparison};

fn normalize_country(country: &str) -> String {
    let country = country.trim();
    if country.is_empty() {
        crate::dtos::market::DEFAULT_COUNTRY.to_string()
    } else {
        country.to_uppercase()
    }
}

pub async fn search(pool: &PgPool, query: &str, country: &str) -> Res<Vec<SupermarketProduct>> {
    db::product::search_products(pool, query.trim(), &normalize_country(country)).await
}

pub async fn by_supermarket(
    pool: &PgPool,
    supermarket: &str,
    country: &str,
) -> Res<Vec<SupermarketProduct>> {
    db::product::get_products_by_supermarket(pool, supermarket.trim(), &normalize_country(country))
        .await
}

pub async fn compare(pool: &PgPool, query: &str, country: &str) -> Res<Vec<PriceComparison>> {
    Ok(compare_prices(search(pool, query, country).await?))
}

/// Groups products by name, ignoring case and surrounding whitespace.
/// Groups come back in name order with their offers cheapest first.
pub fn compare_prices(products: Vec<SupermarketProduct>) -> Vec<PriceComparison> {
    let mut groups: BTreeMap<String, PriceComparison> = BTreeMap::new();

    for product in products {
        let key = product.name.trim().to_lowercase();
        let group = groups.entry(key).or_insert_with(|| PriceComparison {
            name: product.name.trim().to_string(),
            offers: Vec::new(),
            spread: 0,
        });
        group.offers.push(Offer {
            supermarket: product.supermarket,
            price: product.price,
            unit: product.unit,
        });
    }

    groups
        .into_values()
        .map(|mut group| {
            group
                .offers
                .sort_by(|a, b| a.price.cmp(&b.price).then_with(|| a.supermarket.cmp(&b.supermarket)));
            let cheapest = group.offers.first().map(|o| o.price).unwrap_or_default();
            let dearest = group.offers.last().map(|o| o.price).unwrap_or_default();
            group.spread = dearest - cheapest;
            group
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;

    fn product(name: &str, supermarket: &str, price: i32) -> SupermarketProduct {
        SupermarketProduct {
            id: price,
            name: name.to_string(),
            supermarket: supermarket.to_string(),
            price,
            unit: Some("each".to_string()),
            category: None,
            image_url: None,
            country: "NZ".to_string(),
            last_updated: Utc::now(),
        }
    }

    #[test]
    fn offers_are_ordered_cheapest_first() {
        let compared = compare_prices(vec![
            product("Milk 2L", "New World", 479),
            product("Milk 2L", "Pak'nSave", 399),
            product("milk 2l ", "Countdown", 450),
            product("Bread", "Countdown", 350),
        ]);

        assert_eq!(compared.len(), 2);
        assert_eq!(compared[0].name, "Bread");
        assert_eq!(compared[0].spread, 0);

        let milk = &compared[1];
        let stores: Vec<&str> = milk.offers.iter().map(|o| o.supermarket.as_str()).collect();
        assert_eq!(stores, vec!["Pak'nSave", "Countdown", "New World"]);
        assert_eq!(milk.spread, 80);
    }

    #[test]
    fn nothing_to_compare_gives_empty_list() {
        assert!(compare_prices(Vec::new()).is_empty());
    }

    #[test]
    fn blank_country_falls_back_to_nz() {
        assert_eq!(normalize_country(" "), "NZ");
        assert_eq!(normalize_country("au"), "AU");
    }
}
