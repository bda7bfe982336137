use std::time::Duration;

pub const OFFERS_PATH: &str = "offers.json";

pub const USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0 Safari/537.36";

pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(20);

pub const MAX_REDIRECTS: usize = 10;

/// Hosts equal to this domain, or any subdomain of it, are handled.
pub const RETAILER_DOMAIN: &str = "drankdozijn.nl";

pub const CURRENCY_SYMBOL: char = '€';

/// Lines carrying this token advertise a "buy several bottles" price.
pub const MULTI_BOTTLE_MARKER: &str = "flessen";

pub const MAX_PRICE_CANDIDATES: usize = 2;
