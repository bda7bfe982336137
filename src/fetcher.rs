use anyhow::{Context, Result};
use reqwest::blocking::Client;
use reqwest::redirect;

use crate::config::{MAX_REDIRECTS, REQUEST_TIMEOUT, USER_AGENT};

pub trait PageFetcher {
    fn fetch_html(&self, url: &str) -> Result<String>;
}

pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new() -> Result<Self, reqwest::Error> {
        let redirect_policy = redirect::Policy::custom(|attempt| {
            if attempt.previous().len() > MAX_REDIRECTS {
                attempt.error(format!("Too many redirects (>{MAX_REDIRECTS})"))
            } else {
                attempt.follow()
            }
        });

        let client = Client::builder()
            .redirect(redirect_policy)
            .user_agent(USER_AGENT)
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(HttpFetcher { client })
    }
}

impl PageFetcher for HttpFetcher {
    fn fetch_html(&self, url: &str) -> Result<String> {
        let resp = self
            .client
            .get(url)
            .send()
            .with_context(|| format!("request to {url} failed"))?
            .error_for_status()?;

        resp.text()
            .with_context(|| format!("reading body of {url} failed"))
    }
}
