//! Motivational quote fetched from a remote endpoint. Failures never reach the
//! user; they are logged and the quote is simply not shown.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::sync::mpsc::{self, Receiver};
use std::sync::Arc;
use std::thread;

pub(crate) const DEFAULT_QUOTE_URL: &str = "https://quotes-api-self.vercel.app/quote";

#[derive(Debug, Deserialize)]
struct QuoteResponse {
    quote: String,
}

pub(crate) trait QuoteSource: Send + Sync {
    fn fetch(&self) -> Result<String>;
}

pub(crate) struct HttpQuoteSource {
    url: String,
}

impl HttpQuoteSource {
    pub(crate) fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }
}

impl QuoteSource for HttpQuoteSource {
    fn fetch(&self) -> Result<String> {
        let response = ureq::get(&self.url)
            .call()
            .with_context(|| format!("GET {} failed", self.url))?;
        let body: QuoteResponse = response
            .into_json()
            .context("Quote response was not the expected JSON")?;
        Ok(body.quote)
    }
}

/// Fetch once and log any failure. `None` means "show nothing".
pub(crate) fn fetch_quietly(source: &dyn QuoteSource) -> Option<String> {
    match source.fetch() {
        Ok(quote) if !quote.trim().is_empty() => Some(quote.trim().to_string()),
        Ok(_) => {
            tracing::warn!("quote endpoint returned an empty quote");
            None
        }
        Err(e) => {
            tracing::warn!(error = %format!("{e:#}"), "quote fetch failed");
            None
        }
    }
}

/// Run the fetch on a background thread; the receiver yields exactly one value.
pub(crate) fn spawn_fetch(source: Arc<dyn QuoteSource>) -> Receiver<Option<String>> {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        let quote = fetch_quietly(source.as_ref());
        // The UI may have quit already; nothing to do then.
        let _ = tx.send(quote);
    });
    rx
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use std::time::Duration;

    struct Fixed(&'static str);

    impl QuoteSource for Fixed {
        fn fetch(&self) -> Result<String> {
            Ok(self.0.to_string())
        }
    }

    struct Failing;

    impl QuoteSource for Failing {
        fn fetch(&self) -> Result<String> {
            anyhow::bail!("network unreachable")
        }
    }

    #[test]
    fn test_fetch_quietly_trims() {
        assert_eq!(
            fetch_quietly(&Fixed("  Stay hungry. ")),
            Some("Stay hungry.".to_string())
        );
    }

    #[test]
    fn test_fetch_quietly_swallows_errors() {
        assert_eq!(fetch_quietly(&Failing), None);
    }

    #[test]
    fn test_empty_quote_is_dropped() {
        assert_eq!(fetch_quietly(&Fixed("   ")), None);
    }

    #[test]
    fn test_spawn_fetch_delivers_result() {
        let rx = spawn_fetch(Arc::new(Fixed("Keep going")));
        let quote = rx.recv_timeout(Duration::from_secs(5)).unwrap();
        assert_eq!(quote.as_deref(), Some("Keep going"));
    }

    #[test]
    fn test_spawn_fetch_delivers_none_on_failure() {
        let rx = spawn_fetch(Arc::new(Failing));
        assert_eq!(rx.recv_timeout(Duration::from_secs(5)).unwrap(), None);
    }

    #[test]
    fn test_quote_response_shape() {
        let parsed: QuoteResponse =
            serde_json::from_str(r#"{"quote":"Do it now.","author":"x"}"#).unwrap();
        assert_eq!(parsed.quote, "Do it now.");
    }
}
