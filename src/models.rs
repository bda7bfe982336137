use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One tracked product entry from `offers.json`.
///
/// Backed by the raw JSON object so keys this tool doesn't know about
/// survive a rewrite, in their original order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Offer(Map<String, Value>);

impl Offer {
    pub fn url(&self) -> Option<&str> {
        self.0
            .get("url")
            .and_then(Value::as_str)
            .filter(|u| !u.is_empty())
    }

    pub fn title(&self) -> Option<&str> {
        self.0.get("title").and_then(Value::as_str)
    }

    pub fn price(&self) -> Option<f64> {
        self.0.get("price").and_then(Value::as_f64)
    }

    pub fn old_price(&self) -> Option<f64> {
        self.0.get("oldPrice").and_then(Value::as_f64)
    }

    pub fn set_title(&mut self, title: &str) {
        self.0.insert("title".into(), Value::from(title));
    }

    pub fn set_price(&mut self, price: f64) {
        self.0.insert("price".into(), Value::from(price));
    }

    pub fn set_old_price(&mut self, old_price: f64) {
        self.0.insert("oldPrice".into(), Value::from(old_price));
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PriceQuote {
    pub price: Option<f64>,
    pub old_price: Option<f64>,
}

/// What a product page yielded on this run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScrapedOffer {
    pub title: Option<String>,
    pub prices: PriceQuote,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn offer(value: Value) -> Offer {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn accessors_read_known_fields() {
        let o = offer(json!({
            "url": "https://drankdozijn.nl/artikel/laphroaig-10-years",
            "title": "Laphroaig",
            "price": 42.5,
            "oldPrice": 45.85
        }));
        assert_eq!(o.url(), Some("https://drankdozijn.nl/artikel/laphroaig-10-years"));
        assert_eq!(o.title(), Some("Laphroaig"));
        assert_eq!(o.price(), Some(42.5));
        assert_eq!(o.old_price(), Some(45.85));
    }

    #[test]
    fn empty_or_missing_url_is_none() {
        assert_eq!(offer(json!({ "url": "" })).url(), None);
        assert_eq!(offer(json!({ "title": "x" })).url(), None);
        assert_eq!(offer(json!({ "url": 12 })).url(), None);
    }

    #[test]
    fn setters_keep_key_order_and_unknown_fields() {
        let mut o = offer(json!({
            "id": "laphroaig",
            "price": 42.5,
            "url": "https://drankdozijn.nl/x",
            "image": "laphroaig.png"
        }));
        o.set_price(40.6);
        o.set_old_price(45.85);

        let out = serde_json::to_string(&o).unwrap();
        assert_eq!(
            out,
            r#"{"id":"laphroaig","price":40.6,"url":"https://drankdozijn.nl/x","image":"laphroaig.png","oldPrice":45.85}"#
        );
    }
}
