use std::sync::LazyLock;

use regex::Regex;
use scraper::{Html, Node, Selector};
use tracing::warn;

use crate::config::{CURRENCY_SYMBOL, MAX_PRICE_CANDIDATES, MULTI_BOTTLE_MARKER};
use crate::models::{PriceQuote, ScrapedOffer};

static PRICE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d+(\.\d{1,2})?").unwrap());

/// Elements whose text never renders as page copy.
const HIDDEN_TEXT_ELEMENTS: [&str; 4] = ["script", "style", "noscript", "template"];

pub fn parse_product(html: &str) -> ScrapedOffer {
    let doc = Html::parse_document(html);

    ScrapedOffer {
        title: extract_title(&doc),
        prices: extract_prices(&doc),
    }
}

/// Convert European-formatted price text such as `€ 1.234,56` to `1234.56`.
pub fn parse_price(text: &str) -> Option<f64> {
    let cleaned = text.replace(CURRENCY_SYMBOL, "").replace('\u{a0}', "");
    let cleaned = cleaned.trim().replace('.', "").replace(',', ".");

    PRICE_RE
        .find(&cleaned)
        .and_then(|m| m.as_str().parse().ok())
}

pub fn extract_prices(doc: &Html) -> PriceQuote {
    let mut candidates: Vec<f64> = Vec::with_capacity(MAX_PRICE_CANDIDATES);

    for text in visible_text_nodes(doc) {
        if !text.contains(CURRENCY_SYMBOL) {
            continue;
        }
        if text.to_lowercase().contains(MULTI_BOTTLE_MARKER) {
            continue;
        }
        if let Some(value) = parse_price(text) {
            candidates.push(value);
            if candidates.len() == MAX_PRICE_CANDIDATES {
                break;
            }
        }
    }

    match candidates[..] {
        [] => {
            warn!("Could not find price on page");
            PriceQuote::default()
        }
        [price] => PriceQuote {
            price: Some(price),
            old_price: None,
        },
        [a, b, ..] => PriceQuote {
            price: Some(a.min(b)),
            old_price: Some(a.max(b)),
        },
    }
}

/// First non-empty `h1`, then `og:title`, then `<title>`.
pub fn extract_title(doc: &Html) -> Option<String> {
    let h1 = Selector::parse("h1").unwrap();
    let og_title = Selector::parse(r#"meta[property="og:title"]"#).unwrap();
    let title = Selector::parse("title").unwrap();

    doc.select(&h1)
        .map(|e| collapse_whitespace(&e.text().collect::<String>()))
        .find(|t| !t.is_empty())
        .or_else(|| {
            doc.select(&og_title)
                .filter_map(|e| e.value().attr("content"))
                .map(collapse_whitespace)
                .find(|t| !t.is_empty())
        })
        .or_else(|| {
            doc.select(&title)
                .map(|e| collapse_whitespace(&e.text().collect::<String>()))
                .find(|t| !t.is_empty())
        })
}

fn visible_text_nodes(doc: &Html) -> impl Iterator<Item = &str> {
    doc.root_element().descendants().filter_map(|node| {
        let Node::Text(text) = node.value() else {
            return None;
        };
        let hidden = node.ancestors().any(|a| {
            a.value()
                .as_element()
                .is_some_and(|e| HIDDEN_TEXT_ELEMENTS.contains(&e.name()))
        });
        if hidden { None } else { Some(&**text) }
    })
}

fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}
