//! Product page extraction
//!
//! A product record always carries the page URL; every other field is
//! extracted independently from its fixed markup location and simply stays
//! absent when the location is missing. Attribute rows yield dynamically
//! named fields, so the record is an open ordered map.

use crate::crawler::fetcher::fetch_page;
use crate::record::{
    ProductRecord, FIELD_BREADCRUMB, FIELD_DESCRIPTION, FIELD_DESCRIPTION_HTML, FIELD_IMAGE,
    FIELD_PRICE, FIELD_SKU, FIELD_TITLE, FIELD_URL,
};
use reqwest::Client;
use scraper::{Html, Selector};

/// Strips carriage returns and tabs from an extracted value
fn clean(value: &str) -> String {
    value.replace('\r', "").replace('\t', "")
}

/// Strips all control whitespace, for values that must stay single-line
fn clean_inline(value: &str) -> String {
    value.replace('\n', "").replace('\r', "").replace('\t', "")
}

fn select_first_text(document: &Html, selector: &str) -> Option<String> {
    let selector = Selector::parse(selector).ok()?;
    document
        .select(&selector)
        .next()
        .map(|element| element.text().collect::<String>())
}

fn select_first_attr(document: &Html, selector: &str, attr: &str) -> Option<String> {
    let selector = Selector::parse(selector).ok()?;
    document
        .select(&selector)
        .next()
        .and_then(|element| element.value().attr(attr))
        .map(str::to_string)
}

fn select_all_text(document: &Html, selector: &str) -> Vec<String> {
    let selector = match Selector::parse(selector) {
        Ok(s) => s,
        Err(_) => return Vec::new(),
    };
    document
        .select(&selector)
        .map(|element| element.text().collect::<String>())
        .collect()
}

/// Extracts a product record from a fetched product page
///
/// Fields extracted, all optional and independent:
/// - `image`: main photo link, made absolute with the site origin
/// - `title`: page heading
/// - `price`: the price block's `data-value` attribute (decimal-like string)
/// - `sku`: article number
/// - `description` / `description_html`: plain-text and verbatim-markup
///   renderings of the active description tab
/// - `breadcrumb`: all but the last crumb, joined with `" > "`
/// - one field per attribute row, named by the row itself; a name with no
///   value at the same index is dropped
pub fn parse_product(url: &str, origin: &str, html: &str) -> ProductRecord {
    let mut record = ProductRecord::new();
    record.insert(FIELD_URL.to_string(), url.to_string());

    let document = Html::parse_document(html);

    if let Some(href) = select_first_attr(&document, "li#photo-0 a", "href") {
        record.insert(
            FIELD_IMAGE.to_string(),
            format!("{}{}", origin, clean(&href)),
        );
    }

    if let Some(title) = select_first_text(&document, "h1#pagetitle") {
        record.insert(FIELD_TITLE.to_string(), clean(&title));
    }

    if let Some(price) = select_first_attr(&document, "div.price", "data-value") {
        record.insert(FIELD_PRICE.to_string(), clean(&price));
    }

    if let Some(sku) = select_first_text(&document, "div.article.iblock span.value") {
        record.insert(FIELD_SKU.to_string(), clean(&sku));
    }

    if let Ok(selector) = Selector::parse("div.tabs_section ul li.current div.detail_text") {
        if let Some(element) = document.select(&selector).next() {
            let markup = element.html();
            if let Ok(text) = htmd::convert(&markup) {
                record.insert(FIELD_DESCRIPTION.to_string(), clean(&text));
            }
            record.insert(FIELD_DESCRIPTION_HTML.to_string(), markup);
        }
    }

    let crumbs = select_all_text(&document, "div.breadcrumbs div a span[itemprop=\"name\"]");
    if !crumbs.is_empty() {
        let trail = crumbs[..crumbs.len() - 1].join(" > ");
        record.insert(FIELD_BREADCRUMB.to_string(), clean_inline(&trail));
    }

    let names = select_all_text(&document, "li table td.char_name span span");
    let values = select_all_text(&document, "li table td.char_value span");
    // zip pairs positionally and drops trailing unmatched names
    for (name, value) in names.iter().zip(values.iter()) {
        record.insert(clean(name), clean_inline(value));
    }

    record
}

/// Fetches and extracts a single product page
///
/// A fetch failure skips the product entirely: it is logged and yields no
/// record. Extraction itself cannot fail; an unexpected page shape just
/// produces a record with fewer fields.
pub async fn fetch_product(client: &Client, origin: &str, url: &str) -> Option<ProductRecord> {
    match fetch_page(client, url).await {
        Ok(html) => Some(parse_product(url, origin, &html)),
        Err(e) => {
            tracing::warn!("Skipping product {}: {}", url, e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ORIGIN: &str = "https://shop.example.com";
    const URL: &str = "https://shop.example.com/catalog/drills/item-1/";

    fn full_product_page() -> &'static str {
        r#"<html><body>
            <div class="breadcrumbs">
                <div><a href="/"><span itemprop="name">Home</span></a></div>
                <div><a href="/catalog/"><span itemprop="name">Catalog</span></a></div>
                <div><a href="/catalog/drills/"><span itemprop="name">Drills</span></a></div>
                <div><a href="/catalog/drills/item-1/"><span itemprop="name">Impact drill D-1</span></a></div>
            </div>
            <h1 id="pagetitle">Impact drill D-1</h1>
            <div class="article iblock">Art. <span class="value">D-1-4815</span></div>
            <div class="price" data-value="7590.00">7 590 rub.</div>
            <ul><li id="photo-0"><a href="/upload/photos/d1-big.jpg"><img src="/upload/photos/d1.jpg"></a></li></ul>
            <div class="tabs_section"><ul>
                <li class=" current"><div class="detail_text"><p>Compact drill with <b>impact</b> mode.</p></div></li>
            </ul></div>
            <ul><li><table>
                <tr><td class="char_name"><span><span>Power</span></span></td>
                    <td class="char_value"><span>750 W</span></td></tr>
                <tr><td class="char_name"><span><span>Weight</span></span></td>
                    <td class="char_value"><span>1.8 kg</span></td></tr>
            </table></li></ul>
        </body></html>"#
    }

    #[test]
    fn test_parse_full_product_page() {
        let record = parse_product(URL, ORIGIN, full_product_page());

        assert_eq!(record["url"], URL);
        assert_eq!(
            record["image"],
            "https://shop.example.com/upload/photos/d1-big.jpg"
        );
        assert_eq!(record["title"], "Impact drill D-1");
        assert_eq!(record["price"], "7590.00");
        assert_eq!(record["sku"], "D-1-4815");
        assert_eq!(record["breadcrumb"], "Home > Catalog > Drills");
        assert_eq!(record["Power"], "750 W");
        assert_eq!(record["Weight"], "1.8 kg");
    }

    #[test]
    fn test_url_is_always_first_field() {
        let record = parse_product(URL, ORIGIN, "<html><body>nothing here</body></html>");
        assert_eq!(record.len(), 1);
        assert_eq!(record.get_index(0).unwrap().0, "url");
    }

    #[test]
    fn test_description_has_plain_and_markup_forms() {
        let record = parse_product(URL, ORIGIN, full_product_page());

        let html = &record["description_html"];
        assert!(html.starts_with("<div class=\"detail_text\">"));
        assert!(html.contains("<b>impact</b>"));

        let text = &record["description"];
        assert!(text.contains("Compact drill"));
        assert!(!text.contains("<p>"));
        assert!(!text.contains('\t'));
    }

    #[test]
    fn test_trailing_attribute_names_without_values_are_dropped() {
        let html = r#"
            <ul><li><table>
                <tr><td class="char_name"><span><span>Power</span></span></td>
                    <td class="char_value"><span>750 W</span></td></tr>
                <tr><td class="char_name"><span><span>Weight</span></span></td>
                    <td class="char_value"><span>1.8 kg</span></td></tr>
                <tr><td class="char_name"><span><span>Voltage</span></span></td></tr>
            </table></li></ul>
        "#;
        let record = parse_product(URL, ORIGIN, html);
        assert_eq!(record["Power"], "750 W");
        assert_eq!(record["Weight"], "1.8 kg");
        assert!(!record.contains_key("Voltage"));
        // url + 2 paired attributes
        assert_eq!(record.len(), 3);
    }

    #[test]
    fn test_breadcrumb_drops_last_crumb_and_strips_control_whitespace() {
        let html = r#"
            <div class="breadcrumbs">
                <div><a href="/"><span itemprop="name">Home
</span></a></div>
                <div><a href="/catalog/"><span itemprop="name">	Catalog</span></a></div>
                <div><a href="/catalog/x/"><span itemprop="name">Item</span></a></div>
            </div>
        "#;
        let record = parse_product(URL, ORIGIN, html);
        assert_eq!(record["breadcrumb"], "Home > Catalog");
    }

    #[test]
    fn test_breadcrumb_absent_without_breadcrumbs_block() {
        let record = parse_product(URL, ORIGIN, "<html><body></body></html>");
        assert!(!record.contains_key("breadcrumb"));
    }

    #[test]
    fn test_extracted_values_lose_carriage_returns_and_tabs() {
        let html = "<h1 id=\"pagetitle\">Impact\tdrill\r D-1</h1>";
        let record = parse_product(URL, ORIGIN, html);
        assert_eq!(record["title"], "Impactdrill D-1");
    }

    #[test]
    fn test_attribute_values_are_single_line() {
        let html = r#"
            <ul><li><table>
                <tr><td class="char_name"><span><span>Notes</span></span></td>
                    <td class="char_value"><span>line one
line two</span></td></tr>
            </table></li></ul>
        "#;
        let record = parse_product(URL, ORIGIN, html);
        assert_eq!(record["Notes"], "line oneline two");
    }

    #[test]
    fn test_missing_optional_fields_stay_absent() {
        let html = r#"<h1 id="pagetitle">Bare item</h1>"#;
        let record = parse_product(URL, ORIGIN, html);
        assert_eq!(record["title"], "Bare item");
        assert!(!record.contains_key("price"));
        assert!(!record.contains_key("image"));
        assert!(!record.contains_key("sku"));
        assert!(!record.contains_key("description"));
    }
}
