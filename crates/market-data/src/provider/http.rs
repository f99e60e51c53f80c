use std::time::Duration;

use log::warn;
use reqwest::Client;

/// Default HTTP request timeout for every provider.
pub(crate) const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// Browser user agent; some providers serve an empty page to unknown agents.
pub(crate) const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Build a client with the shared timeout and user agent.
pub(crate) fn build_client(provider: &str) -> Client {
    Client::builder()
        .timeout(REQUEST_TIMEOUT)
        .user_agent(BROWSER_USER_AGENT)
        .build()
        .unwrap_or_else(|e| {
            warn!("{}: failed to build HTTP client ({}), using defaults", provider, e);
            Client::new()
        })
}

/// Strip a trailing slash so paths can be appended with `/`.
pub(crate) fn normalize_base_url(base_url: &str) -> String {
    base_url.trim_end_matches('/').to_string()
}
