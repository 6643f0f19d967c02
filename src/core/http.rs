//! HTTP client construction for external lookups

use reqwest::Client;
use std::time::Duration;

use crate::Result;

/// Every external call gives up after this long.
pub const HTTP_TIMEOUT: Duration = Duration::from_secs(5);

/// Build the shared client used for one invocation.
pub fn build_http_client(timeout: Duration) -> Result<Client> {
    Ok(Client::builder()
        .user_agent(concat!("bragginrights/", env!("CARGO_PKG_VERSION")))
        .timeout(timeout)
        .connect_timeout(timeout)
        .build()?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_http_client() {
        assert!(build_http_client(HTTP_TIMEOUT).is_ok());
        assert!(build_http_client(Duration::from_millis(50)).is_ok());
    }
}
