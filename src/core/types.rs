use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Where a result set came from. Live results were scraped from the source
/// page; fallback results come from the embedded catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultSource {
    Live,
    Fallback,
}

impl ResultSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResultSource::Live => "LIVE",
            ResultSource::Fallback => "FALLBACK",
        }
    }
}

fn default_result_source() -> ResultSource {
    ResultSource::Live
}

/// A single playable track surfaced to the caller.
///
/// Invariant: `title` and `artist` are never empty. The `id` is unique within
/// one result set but not stable across searches.
#[derive(Deserialize, Serialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Track {
    pub id: String,
    pub title: String,
    pub artist: String,
    /// The source-page URL this track was scraped from (or the catalog origin).
    pub source_url: String,
    /// Direct YouTube link when the page carried one, otherwise a synthesized
    /// search-query link. Never empty for a surfaced track.
    pub youtube_url: String,
    /// Extracted video id, when the link was a watch/short/embed URL.
    pub youtube_id: Option<String>,
    #[serde(skip, default = "default_result_source")]
    pub source: ResultSource,
}

/// An autocomplete suggestion. `label` is the display form, usually the value
/// with an artist annotation when one is known.
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct Suggestion {
    pub value: String,
    pub label: String,
    #[serde(skip, default = "default_result_source")]
    pub source: ResultSource,
}

/// The enumerated mode of a search request.
#[derive(ValueEnum, Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum SearchKind {
    Song,
    Artist,
    Category,
    Genre,
    Playlist,
    /// A direct link to a song page, passed through as-is.
    #[value(alias = "song-link")]
    SongUrl,
    /// A direct link to an artist page, passed through as-is.
    #[value(alias = "artist-link")]
    ArtistUrl,
}

impl SearchKind {
    /// Value used for the `type` query parameter on the source page.
    pub fn as_query_param(&self) -> &'static str {
        match self {
            SearchKind::Song => "song",
            SearchKind::Artist => "artist",
            SearchKind::Category => "category",
            SearchKind::Genre => "genre",
            SearchKind::Playlist => "playlist",
            SearchKind::SongUrl => "songUrl",
            SearchKind::ArtistUrl => "artistUrl",
        }
    }

    /// Genre and category searches are driven by the genre qualifier, not the
    /// free-text query.
    pub fn uses_genre(&self) -> bool {
        matches!(self, SearchKind::Category | SearchKind::Genre)
    }

    /// The URL kinds carry a ready-made link in the query text.
    pub fn is_direct_link(&self) -> bool {
        matches!(self, SearchKind::SongUrl | SearchKind::ArtistUrl)
    }
}

/// A typed search request as received from the CLI (or any other caller).
#[derive(Debug, Clone)]
pub struct SearchRequest {
    pub query: String,
    pub kind: SearchKind,
    pub genre: Option<String>,
}

impl SearchRequest {
    pub fn new(query: impl Into<String>, kind: SearchKind) -> Self {
        Self {
            query: query.into(),
            kind,
            genre: None,
        }
    }

    pub fn with_genre(mut self, genre: impl Into<String>) -> Self {
        self.genre = Some(genre.into());
        self
    }
}
