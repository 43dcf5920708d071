//! Per-site listing extraction
//!
//! One-shot catalog extractors, one per retail site. Each is a pure function
//! over the rendered markup. Rows missing a name, price, or link are dropped,
//! and duplicate product names keep the first row.

use scraper::{ElementRef, Html, Selector};
use serde::Serialize;
use std::collections::HashSet;

const TRENDYOL_BASE: &str = "https://www.trendyol.com/";
const MIGROS_BASE: &str = "https://www.migros.com.tr";
const HEPSIBURADA_BASE: &str = "https://www.hepsiburada.com";

/// One product row in the combined listings artifact
///
/// Keys are the Turkish column names the original artifacts published.
#[derive(Debug, Clone, Serialize)]
pub struct Listing {
    #[serde(rename = "Adı")]
    pub name: String,
    #[serde(rename = "Fiyatı")]
    pub price: f64,
    #[serde(rename = "Bağlantı")]
    pub link: String,
    #[serde(rename = "Category")]
    pub category: String,
    #[serde(rename = "Site")]
    pub site: String,
}

/// Extracts the men's-shorts grid from a rendered Trendyol category page
pub fn extract_trendyol(doc: &Html) -> Vec<Listing> {
    let (Some(link_sel), Some(price_sel), Some(name_sel)) = (
        sel("a.p-card-chldrn-cntnr"),
        sel("div[class*='discounted']"),
        sel("div.p-card-wrppr"),
    ) else {
        return Vec::new();
    };

    let links = doc
        .select(&link_sel)
        .filter_map(|a| a.value().attr("href"))
        .map(|href| format!("{}{}", TRENDYOL_BASE, href.trim_start_matches('/')));
    let prices = doc.select(&price_sel).filter_map(|p| parse_price(&text_of(p)));
    let names = doc
        .select(&name_sel)
        .filter_map(|n| n.value().attr("title").map(str::to_string));

    clean(
        names
            .zip(prices)
            .zip(links)
            .map(|((name, price), link)| Listing {
                name,
                price,
                link,
                category: "Erkek Şort".to_string(),
                site: "Trendyol".to_string(),
            })
            .collect(),
    )
}

/// Extracts the phones grid from a rendered Migros category page
///
/// The product anchor carries both the link and the display name; the price
/// block prefers the sale price over the regular one.
pub fn extract_migros(doc: &Html) -> Vec<Listing> {
    let (Some(name_sel), Some(price_sel), Some(sale_sel), Some(regular_sel)) = (
        sel("a.product-name"),
        sel("div.price-container"),
        sel("div.sale-price"),
        sel("div.price"),
    ) else {
        return Vec::new();
    };

    let mut names = Vec::new();
    let mut links = Vec::new();
    for anchor in doc.select(&name_sel) {
        let Some(href) = anchor.value().attr("href") else {
            continue;
        };
        links.push(format!("{}{}", MIGROS_BASE, href));
        names.push(text_of(anchor));
    }

    let prices: Vec<f64> = doc
        .select(&price_sel)
        .filter_map(|container| {
            let price_el = container
                .select(&sale_sel)
                .next()
                .or_else(|| container.select(&regular_sel).next())?;
            parse_price(&text_of(price_el))
        })
        .collect();

    clean(
        names
            .into_iter()
            .zip(prices)
            .zip(links)
            .map(|((name, price), link)| Listing {
                name,
                price,
                link,
                category: "Telefon".to_string(),
                site: "Migros".to_string(),
            })
            .collect(),
    )
}

/// Extracts the men's-shorts grid from a rendered Hepsiburada category page
pub fn extract_hepsiburada(doc: &Html) -> Vec<Listing> {
    let (Some(card_sel), Some(price_sel)) = (
        sel("a[class*='productCardLink']"),
        sel("div[class*='price-module_finalPrice']"),
    ) else {
        return Vec::new();
    };

    let mut names = Vec::new();
    let mut links = Vec::new();
    for card in doc.select(&card_sel) {
        let (Some(href), Some(title)) = (card.value().attr("href"), card.value().attr("title"))
        else {
            continue;
        };
        links.push(format!("{}{}", HEPSIBURADA_BASE, href));
        names.push(title.to_string());
    }

    let prices: Vec<f64> = doc.select(&price_sel).filter_map(|p| parse_price(&text_of(p))).collect();

    clean(
        names
            .into_iter()
            .zip(prices)
            .zip(links)
            .map(|((name, price), link)| Listing {
                name,
                price,
                link,
                category: "Erkek Şort".to_string(),
                site: "Hepsiburada".to_string(),
            })
            .collect(),
    )
}

/// Parses a Turkish-formatted price like "1.234,56 TL"
fn parse_price(text: &str) -> Option<f64> {
    text.replace("TL", "")
        .replace('.', "")
        .replace(',', ".")
        .trim()
        .parse()
        .ok()
}

/// Drops rows with an empty name or link, deduplicates by product name
fn clean(rows: Vec<Listing>) -> Vec<Listing> {
    let mut seen: HashSet<String> = HashSet::new();
    rows.into_iter()
        .filter(|row| !row.name.is_empty() && !row.link.is_empty())
        .filter(|row| seen.insert(row.name.clone()))
        .collect()
}

fn sel(css: &str) -> Option<Selector> {
    Selector::parse(css).ok()
}

fn text_of(el: ElementRef) -> String {
    el.text().collect::<String>().trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_price_turkish_format() {
        assert_eq!(parse_price("1.234,56 TL"), Some(1234.56));
        assert_eq!(parse_price("749,90 TL"), Some(749.9));
        assert_eq!(parse_price("12 TL"), Some(12.0));
    }

    #[test]
    fn test_parse_price_rejects_garbage() {
        assert_eq!(parse_price("fiyat yok"), None);
        assert_eq!(parse_price(""), None);
    }

    #[test]
    fn test_extract_trendyol_grid() {
        let html = r#"<html><body>
            <div class="p-card-wrppr" title="Basic Şort Lacivert">
                <a class="p-card-chldrn-cntnr" href="/marka/sort-p-1"></a>
                <div class="prc-box-discounted">299,99 TL</div>
            </div>
            <div class="p-card-wrppr" title="Kargo Şort Haki">
                <a class="p-card-chldrn-cntnr" href="/marka/sort-p-2"></a>
                <div class="prc-box-discounted">1.099,50 TL</div>
            </div>
        </body></html>"#;
        let doc = Html::parse_document(html);

        let rows = extract_trendyol(&doc);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].name, "Basic Şort Lacivert");
        assert_eq!(rows[0].price, 299.99);
        assert_eq!(rows[0].link, "https://www.trendyol.com/marka/sort-p-1");
        assert_eq!(rows[0].category, "Erkek Şort");
        assert_eq!(rows[0].site, "Trendyol");
        assert_eq!(rows[1].price, 1099.5);
    }

    #[test]
    fn test_extract_trendyol_dedups_by_name() {
        let html = r#"<html><body>
            <div class="p-card-wrppr" title="Aynı Şort">
                <a class="p-card-chldrn-cntnr" href="/p-1"></a>
                <div class="prc-box-discounted">100,00 TL</div>
            </div>
            <div class="p-card-wrppr" title="Aynı Şort">
                <a class="p-card-chldrn-cntnr" href="/p-2"></a>
                <div class="prc-box-discounted">200,00 TL</div>
            </div>
        </body></html>"#;
        let doc = Html::parse_document(html);

        let rows = extract_trendyol(&doc);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].price, 100.0);
    }

    #[test]
    fn test_extract_migros_prefers_sale_price() {
        let html = r#"<html><body>
            <a class="product-name" href="/telefon-x-p-100">Telefon X 128 GB</a>
            <div class="price-container">
                <div class="price">9.999,00 TL</div>
                <div class="sale-price">8.499,00 TL</div>
            </div>
            <a class="product-name" href="/telefon-y-p-200">Telefon Y 256 GB</a>
            <div class="price-container">
                <div class="price">12.000,00 TL</div>
            </div>
        </body></html>"#;
        let doc = Html::parse_document(html);

        let rows = extract_migros(&doc);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].name, "Telefon X 128 GB");
        assert_eq!(rows[0].price, 8499.0);
        assert_eq!(rows[0].link, "https://www.migros.com.tr/telefon-x-p-100");
        assert_eq!(rows[1].price, 12000.0);
        assert_eq!(rows[0].site, "Migros");
    }

    #[test]
    fn test_extract_migros_skips_priceless_container() {
        let html = r#"<html><body>
            <a class="product-name" href="/p-1">Bir Telefon</a>
            <div class="price-container"><div class="stock-info">tükendi</div></div>
        </body></html>"#;
        let doc = Html::parse_document(html);

        // No usable price, so the zip produces no row
        assert!(extract_migros(&doc).is_empty());
    }

    #[test]
    fn test_extract_hepsiburada_grid() {
        let html = r#"<html><body>
            <a class="productCardLink-module_z7bc" href="/sort-pm-1" title="Yazlık Şort"></a>
            <div class="price-module_finalPrice-ab12">459,00 TL</div>
        </body></html>"#;
        let doc = Html::parse_document(html);

        let rows = extract_hepsiburada(&doc);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].name, "Yazlık Şort");
        assert_eq!(rows[0].price, 459.0);
        assert_eq!(rows[0].link, "https://www.hepsiburada.com/sort-pm-1");
        assert_eq!(rows[0].site, "Hepsiburada");
    }

    #[test]
    fn test_listing_serializes_turkish_keys() {
        let row = Listing {
            name: "Şort".to_string(),
            price: 10.0,
            link: "https://example.com".to_string(),
            category: "Erkek Şort".to_string(),
            site: "Trendyol".to_string(),
        };
        let json = serde_json::to_string(&row).unwrap();
        assert!(json.contains("\"Adı\""));
        assert!(json.contains("\"Fiyatı\""));
        assert!(json.contains("\"Bağlantı\""));
    }
}
