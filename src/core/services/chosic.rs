//! Search orchestration against the chosic.com playlist generator.
//!
//! `ChosicClient` owns the whole acquisition flow: build the right target URL
//! for the search kind, deliver it through the relay chain, extract records
//! from whatever came back, and degrade to the embedded catalog when
//! acquisition or extraction yields nothing. From the caller's point of view
//! `search` and `suggest` are total: they never error, they only return
//! fresher or staler data.

use tracing::{debug, info, warn};
use url::Url;

use crate::core::pipeline::{extract, fallback, relay::RelayRouter};
use crate::core::types::{SearchKind, SearchRequest, Suggestion, Track};

pub const PLAYLIST_GENERATOR_URL: &str = "https://www.chosic.com/playlist-generator/";

/// Minimum suggestion prefix length before any network attempt is made.
pub const MIN_SUGGESTION_PREFIX: usize = 2;

/// Why a result set was degraded away from live data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DegradeReason {
    /// Every relay failed or timed out.
    Delivery,
    /// A response arrived but no extraction strategy matched it.
    Format,
}

impl DegradeReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            DegradeReason::Delivery => "delivery failed",
            DegradeReason::Format => "response format not recognized",
        }
    }
}

/// Internal three-tier result: live data, degraded-but-usable data, or
/// nothing at all. The public contract only exposes the record sequence, but
/// keeping the tier explicit preserves the degradation reason for logging and
/// for the CLI's source column.
#[derive(Debug)]
pub enum Outcome<T> {
    Live(Vec<T>),
    Degraded(DegradeReason, Vec<T>),
    Empty,
}

impl<T> Outcome<T> {
    pub fn into_records(self) -> Vec<T> {
        match self {
            Outcome::Live(records) | Outcome::Degraded(_, records) => records,
            Outcome::Empty => Vec::new(),
        }
    }

    pub fn degrade_reason(&self) -> Option<DegradeReason> {
        match self {
            Outcome::Degraded(reason, _) => Some(*reason),
            _ => None,
        }
    }
}

pub struct ChosicClient {
    router: RelayRouter,
    base_url: String,
    min_suggestion_prefix: usize,
}

impl ChosicClient {
    pub fn new(base_url: &str, router: RelayRouter) -> Self {
        Self {
            router,
            base_url: base_url.trim_end_matches('/').to_string() + "/",
            min_suggestion_prefix: MIN_SUGGESTION_PREFIX,
        }
    }

    pub fn with_min_suggestion_prefix(mut self, min: usize) -> Self {
        self.min_suggestion_prefix = min;
        self
    }

    /// Search for tracks. Total: delivery and format failures degrade to the
    /// embedded catalog, malformed input yields an empty list.
    pub async fn search(&self, request: &SearchRequest) -> Vec<Track> {
        self.search_outcome(request).await.into_records()
    }

    /// Autocomplete suggestions for a query prefix. Total, like [`search`].
    /// Prefixes shorter than two characters short-circuit to empty without
    /// any network attempt, to keep trivial keystrokes off the relays.
    pub async fn suggest(&self, query: &str, kind: SearchKind) -> Vec<Suggestion> {
        self.suggest_outcome(query, kind).await.into_records()
    }

    /// [`search`] with the degradation tier still visible.
    pub async fn search_outcome(&self, request: &SearchRequest) -> Outcome<Track> {
        let Some(target) = self.build_target_url(request) else {
            warn!(kind = ?request.kind, "search request is missing required input, returning nothing");
            return Outcome::Empty;
        };

        info!(kind = ?request.kind, "searching for tracks");

        match self.router.deliver(&target).await {
            Ok(body) => {
                let tracks = extract::extract_tracks(&body, &target);
                if tracks.is_empty() {
                    self.degraded_tracks(DegradeReason::Format, &request.query)
                } else {
                    info!(count = tracks.len(), "live track results");
                    Outcome::Live(tracks)
                }
            }
            Err(error) => {
                warn!(%error, "acquisition failed, degrading to catalog");
                self.degraded_tracks(DegradeReason::Delivery, &request.query)
            }
        }
    }

    /// [`suggest`] with the degradation tier still visible.
    pub async fn suggest_outcome(&self, query: &str, kind: SearchKind) -> Outcome<Suggestion> {
        if query.chars().count() < self.min_suggestion_prefix {
            debug!("suggestion prefix below minimum length, skipping network");
            return Outcome::Empty;
        }

        let Some(target) = self.suggestion_url(query, kind) else {
            warn!(kind = ?kind, "could not build suggestion URL, returning nothing");
            return Outcome::Empty;
        };

        match self.router.deliver(&target).await {
            Ok(body) => {
                let suggestions = extract::extract_suggestions(&body);
                if suggestions.is_empty() {
                    self.degraded_suggestions(DegradeReason::Format, query, kind)
                } else {
                    debug!(count = suggestions.len(), "live suggestions");
                    Outcome::Live(suggestions)
                }
            }
            Err(error) => {
                warn!(%error, "suggestion acquisition failed, degrading to catalog");
                self.degraded_suggestions(DegradeReason::Delivery, query, kind)
            }
        }
    }

    fn degraded_tracks(&self, reason: DegradeReason, query: &str) -> Outcome<Track> {
        warn!(reason = reason.as_str(), "serving fallback tracks");
        let records = fallback::lookup_tracks(query);
        if records.is_empty() {
            Outcome::Empty
        } else {
            Outcome::Degraded(reason, records)
        }
    }

    fn degraded_suggestions(
        &self,
        reason: DegradeReason,
        query: &str,
        kind: SearchKind,
    ) -> Outcome<Suggestion> {
        debug!(reason = reason.as_str(), "serving fallback suggestions");
        let records = fallback::lookup_suggestions(query, kind);
        if records.is_empty() {
            Outcome::Empty
        } else {
            Outcome::Degraded(reason, records)
        }
    }

    /// Target URL policy per search kind. Genre and category build from the
    /// genre qualifier (query text as a last resort); the URL kinds pass the
    /// query through as a direct link without validating it; everything else
    /// becomes a `q` + `type` search. Returns `None` for malformed input.
    fn build_target_url(&self, request: &SearchRequest) -> Option<String> {
        if request.kind.uses_genre() {
            let genre = request
                .genre
                .as_deref()
                .filter(|g| !g.trim().is_empty())
                .or_else(|| Some(request.query.as_str()).filter(|q| !q.trim().is_empty()))?;
            return Url::parse_with_params(&self.base_url, &[("genre", genre)])
                .ok()
                .map(String::from);
        }

        let query = request.query.trim();
        if query.is_empty() {
            return None;
        }

        if request.kind.is_direct_link() {
            return Some(query.to_string());
        }

        Url::parse_with_params(
            &self.base_url,
            &[("q", query), ("type", request.kind.as_query_param())],
        )
        .ok()
        .map(String::from)
    }

    fn suggestion_url(&self, query: &str, kind: SearchKind) -> Option<String> {
        Url::parse_with_params(
            &self.base_url,
            &[("q", query), ("type", kind.as_query_param())],
        )
        .ok()
        .map(String::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::pipeline::relay::{
        RelayEndpoint, Transport, TransportError, TransportResponse,
    };
    use crate::core::types::ResultSource;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    /// Transport that always fails, counting how often it was asked.
    struct DeadTransport {
        calls: AtomicUsize,
    }

    impl DeadTransport {
        fn new() -> Self {
            Self {
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl Transport for DeadTransport {
        async fn get(
            &self,
            _url: &str,
            _timeout: Duration,
        ) -> Result<TransportResponse, TransportError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Err(TransportError::Http("unreachable".to_string()))
        }
    }

    /// Transport that returns the same body for every request and records the
    /// relay URLs it saw.
    struct FixedTransport {
        body: String,
        seen: Mutex<Vec<String>>,
    }

    impl FixedTransport {
        fn new(body: &str) -> Self {
            Self {
                body: body.to_string(),
                seen: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl Transport for FixedTransport {
        async fn get(
            &self,
            url: &str,
            _timeout: Duration,
        ) -> Result<TransportResponse, TransportError> {
            self.seen.lock().unwrap().push(url.to_string());
            Ok(TransportResponse {
                status: 200,
                body: self.body.clone(),
            })
        }
    }

    fn client_with(transport: Arc<dyn Transport>) -> ChosicClient {
        let router = RelayRouter::new(
            vec![RelayEndpoint::new("test-relay", "https://relay.test/?u=")],
            Arc::new(AtomicUsize::new(0)),
            transport,
            Duration::from_secs(1),
        );
        ChosicClient::new(PLAYLIST_GENERATOR_URL, router)
    }

    const LIVE_PAGE: &str = r#"<html><body>
        <div class="pl-item">
            <div class="song-title">Take Five</div>
            <div class="artist-name">Dave Brubeck</div>
            <a href="https://www.youtube.com/watch?v=vmDDOFXSgAs">play</a>
        </div>
    </body></html>"#;

    #[tokio::test]
    async fn live_results_when_page_parses() {
        let client = client_with(Arc::new(FixedTransport::new(LIVE_PAGE)));
        let request = SearchRequest::new("take five", SearchKind::Song);

        let outcome = client.search_outcome(&request).await;
        assert!(matches!(outcome, Outcome::Live(_)));

        let tracks = outcome.into_records();
        assert_eq!(tracks.len(), 1);
        assert_eq!(tracks[0].title, "Take Five");
        assert_eq!(tracks[0].source, ResultSource::Live);
    }

    #[tokio::test]
    async fn delivery_failure_degrades_to_catalog_never_errors() {
        let client = client_with(Arc::new(DeadTransport::new()));
        let request = SearchRequest::new("imagine", SearchKind::Song);

        let outcome = client.search_outcome(&request).await;
        assert_eq!(outcome.degrade_reason(), Some(DegradeReason::Delivery));

        let tracks = outcome.into_records();
        assert_eq!(tracks.len(), 1);
        assert_eq!(tracks[0].title, "Imagine");
        assert_eq!(tracks[0].artist, "John Lennon");
        assert_eq!(tracks[0].source, ResultSource::Fallback);
        assert!(!tracks[0].youtube_url.is_empty());
    }

    #[tokio::test]
    async fn unrecognized_page_degrades_with_format_reason() {
        let client = client_with(Arc::new(FixedTransport::new(
            "<html><body><p>maintenance</p></body></html>",
        )));
        let request = SearchRequest::new("queen", SearchKind::Song);

        let outcome = client.search_outcome(&request).await;
        assert_eq!(outcome.degrade_reason(), Some(DegradeReason::Format));
        assert!(outcome
            .into_records()
            .iter()
            .any(|t| t.title == "Bohemian Rhapsody"));
    }

    #[tokio::test]
    async fn no_match_anywhere_yields_empty_suggestions_but_catalog_tracks() {
        let client = client_with(Arc::new(DeadTransport::new()));

        let request = SearchRequest::new("zzz-nonexistent", SearchKind::Song);
        let tracks = client.search(&request).await;
        assert!(tracks.is_empty());

        let suggestions = client.suggest("zzz-nonexistent", SearchKind::Song).await;
        assert!(suggestions.is_empty());
    }

    #[tokio::test]
    async fn short_suggestion_prefix_skips_network_entirely() {
        let transport = Arc::new(DeadTransport::new());
        let client = client_with(transport.clone());

        let suggestions = client.suggest("b", SearchKind::Song).await;
        assert!(suggestions.is_empty());
        assert_eq!(transport.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn suggestion_fallback_filters_by_prefix() {
        let client = client_with(Arc::new(DeadTransport::new()));

        let suggestions = client.suggest("queen", SearchKind::Artist).await;
        assert_eq!(suggestions.len(), 1);
        assert_eq!(suggestions[0].value, "Queen");
        assert_eq!(suggestions[0].source, ResultSource::Fallback);
    }

    #[tokio::test]
    async fn empty_query_for_query_kind_is_treated_as_empty_result() {
        let transport = Arc::new(DeadTransport::new());
        let client = client_with(transport.clone());

        let request = SearchRequest::new("   ", SearchKind::Song);
        let outcome = client.search_outcome(&request).await;
        assert!(matches!(outcome, Outcome::Empty));
        assert_eq!(transport.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn genre_search_builds_from_qualifier() {
        let transport = Arc::new(FixedTransport::new(LIVE_PAGE));
        let client = client_with(transport.clone());

        let request = SearchRequest::new("", SearchKind::Genre).with_genre("lo-fi");
        client.search(&request).await;

        let seen = transport.seen.lock().unwrap().clone();
        assert_eq!(seen.len(), 1);
        // Relay-encoded target carries the genre parameter, not q/type
        assert!(seen[0].contains("genre%3Dlo-fi"));
        assert!(!seen[0].contains("type%3D"));
    }

    #[tokio::test]
    async fn genre_kind_without_qualifier_falls_back_to_query_text() {
        let transport = Arc::new(FixedTransport::new(LIVE_PAGE));
        let client = client_with(transport.clone());

        let request = SearchRequest::new("jazz", SearchKind::Category);
        client.search(&request).await;

        let seen = transport.seen.lock().unwrap().clone();
        assert!(seen[0].contains("genre%3Djazz"));
    }

    #[tokio::test]
    async fn direct_link_kinds_pass_query_through_untouched() {
        let transport = Arc::new(FixedTransport::new(LIVE_PAGE));
        let client = client_with(transport.clone());

        let link = "https://www.chosic.com/playlist-generator/?song=123";
        let request = SearchRequest::new(link, SearchKind::SongUrl);
        client.search(&request).await;

        let seen = transport.seen.lock().unwrap().clone();
        let encoded: String = url::form_urlencoded::byte_serialize(link.as_bytes()).collect();
        assert_eq!(seen[0], format!("https://relay.test/?u={}", encoded));
    }
}
