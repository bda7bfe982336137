use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};
use tracing::{debug, error, info, info_span};
use url::Url;

use crate::config::RETAILER_DOMAIN;
use crate::fetcher::PageFetcher;
use crate::models::{Offer, ScrapedOffer};
use crate::parser;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    Updated,
    Unchanged,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct UpdateSummary {
    pub checked: usize,
    pub updated: usize,
    pub failed: usize,
    pub skipped: usize,
}

impl UpdateSummary {
    pub fn changed(&self) -> bool {
        self.updated > 0
    }
}

pub fn load_offers(path: &Path) -> Result<Vec<Offer>> {
    if !path.exists() {
        bail!("{} not found", path.display());
    }
    let raw = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("parsing {}", path.display()))
}

pub fn save_offers(path: &Path, offers: &[Offer]) -> Result<()> {
    let mut json = serde_json::to_string_pretty(offers)?;
    json.push('\n');
    fs::write(path, json).with_context(|| format!("writing {}", path.display()))?;
    Ok(())
}

pub fn is_retailer_url(url: &str) -> bool {
    let Ok(parsed) = Url::parse(url) else {
        return false;
    };
    match parsed.host_str() {
        Some(host) => {
            host == RETAILER_DOMAIN
                || host
                    .strip_suffix(RETAILER_DOMAIN)
                    .is_some_and(|prefix| prefix.ends_with('.'))
        }
        None => false,
    }
}

/// Merge freshly scraped fields into `offer`. Returns whether anything changed.
pub fn apply_scrape(offer: &mut Offer, scraped: &ScrapedOffer) -> bool {
    let mut changed = false;

    if let Some(title) = scraped.title.as_deref().filter(|t| !t.is_empty()) {
        if offer.title() != Some(title) {
            info!(old = ?offer.title(), new = title, "Updating title");
            offer.set_title(title);
            changed = true;
        }
    }

    if let Some(price) = scraped.prices.price {
        if offer.price() != Some(price) {
            info!(old = ?offer.price(), new = price, "Updating price");
            offer.set_price(price);
            changed = true;
        }
    }

    if let Some(old_price) = scraped.prices.old_price {
        if offer.old_price() != Some(old_price) {
            info!(old = ?offer.old_price(), new = old_price, "Updating oldPrice");
            offer.set_old_price(old_price);
            changed = true;
        }
    }

    changed
}

pub fn update_offers(offers: &mut [Offer], fetcher: &dyn PageFetcher) -> UpdateSummary {
    let mut summary = UpdateSummary::default();

    for offer in offers.iter_mut() {
        let Some(url) = offer.url().map(str::to_owned) else {
            debug!("Skipping offer without url");
            summary.skipped += 1;
            continue;
        };
        if !is_retailer_url(&url) {
            debug!(%url, "Skipping offer from another retailer");
            summary.skipped += 1;
            continue;
        }

        let _span = info_span!("offer", %url).entered();
        info!("Fetching {url}");
        summary.checked += 1;

        let html = match fetcher.fetch_html(&url) {
            Ok(html) => html,
            Err(e) => {
                error!("Error fetching {url}: {e:#}");
                summary.failed += 1;
                continue;
            }
        };

        let scraped = parser::parse_product(&html);
        if apply_scrape(offer, &scraped) {
            summary.updated += 1;
        }
    }

    summary
}

pub fn run(path: &Path, fetcher: &dyn PageFetcher) -> Result<RunOutcome> {
    let mut offers = load_offers(path)?;
    let summary = update_offers(&mut offers, fetcher);

    info!(
        checked = summary.checked,
        updated = summary.updated,
        failed = summary.failed,
        skipped = summary.skipped,
        "Finished checking offers"
    );

    if !summary.changed() {
        info!("No changes detected.");
        return Ok(RunOutcome::Unchanged);
    }

    save_offers(path, &offers)?;
    info!("{} updated.", path.display());
    Ok(RunOutcome::Updated)
}
