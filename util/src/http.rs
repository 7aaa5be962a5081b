use reqwest::{Client, StatusCode};
use std::time::Duration;

/// Returns true if the URL appears reachable (2xx/3xx considered alive).
///  - HEAD first (fast), fall back to GET on 405/501.
///  - `timeout_secs` caps the whole request timeout.
///
/// Used by the health endpoint to report whether the remote runner answers.
pub async fn is_url_alive(url: &str, timeout_secs: u64) -> Result<bool, reqwest::Error> {
    let client = Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .redirect(reqwest::redirect::Policy::limited(5))
        .build()?;

    match client.head(url).send().await {
        Ok(resp) => {
            let code = resp.status();
            if code.is_success() || code.is_redirection() || code == StatusCode::NOT_MODIFIED {
                return Ok(true);
            }
            // Some hosts disallow HEAD
            if code != StatusCode::METHOD_NOT_ALLOWED && code != StatusCode::NOT_IMPLEMENTED {
                return Ok(false);
            }
        }
        Err(e) => {
            tracing::debug!("HEAD {url} failed, retrying with GET: {e}");
        }
    }

    let get = client.get(url).send().await?;
    let code = get.status();
    Ok(code.is_success() || code.is_redirection() || code == StatusCode::NOT_MODIFIED)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn unreachable_host_is_an_error_or_dead() {
        // Port 9 (discard) on localhost is closed in test environments.
        let alive = is_url_alive("http://127.0.0.1:9/", 1).await.unwrap_or(false);
        assert!(!alive);
    }
}
