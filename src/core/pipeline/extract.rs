//! Heuristic extraction of structured records from scraped markup.
//!
//! The source page has shipped several layouts over time, so extraction is an
//! ordered list of strategies tried in sequence: the first strategy that
//! yields at least one well-formed record wins and every later strategy is
//! skipped. A markup snapshot matches at most one known layout, so results
//! are never unioned across strategies. Alien or unparseable markup produces
//! an empty list, never an error; absence of data is the uniform failure
//! signal here.

use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use tracing::debug;

use crate::core::types::{ResultSource, Suggestion, Track};
use crate::utils::youtube;

/// Suggestion lists are truncated to this many records. Track lists are not
/// capped here; capping live track results is the orchestrator's call.
pub const SUGGESTION_LIMIT: usize = 8;

/// Item selectors for the page layouts we have seen, newest first.
const TRACK_ITEM_SELECTORS: [&str; 5] = [
    ".pl-item",
    ".playlist-item",
    ".song-item",
    ".track-item",
    "[data-song]",
];

const TRACK_TITLE_SELECTOR: &str = ".song-title, .title, h3, h4";
const TRACK_ARTIST_SELECTOR: &str = ".artist-name, .artist, .by";
const TRACK_LINK_SELECTOR: &str = r#"a[href*="youtube.com"], a[href*="youtu.be"]"#;

const SUGGESTION_SELECTORS: [&str; 4] = [
    "#form-suggestions .span-class",
    "#form-suggestions span",
    ".span-class",
    ".suggestion-item",
];

/// One fixed rule set for locating track records in markup.
enum TrackStrategy {
    /// DOM traversal with a per-layout item selector and shared field
    /// sub-selectors.
    Dom { item: &'static str },
    /// Raw-text scan for item blocks that the DOM pass cannot see, e.g.
    /// markup embedded in script strings.
    RegexScan,
}

impl TrackStrategy {
    fn name(&self) -> &'static str {
        match self {
            TrackStrategy::Dom { item } => item,
            TrackStrategy::RegexScan => "regex-scan",
        }
    }

    fn apply(&self, doc: &Html, raw: &str, source_url: &str) -> Vec<Track> {
        match self {
            TrackStrategy::Dom { item } => extract_tracks_dom(doc, item, source_url),
            TrackStrategy::RegexScan => extract_tracks_regex(raw, source_url),
        }
    }
}

fn track_strategies() -> Vec<TrackStrategy> {
    let mut strategies: Vec<TrackStrategy> = TRACK_ITEM_SELECTORS
        .into_iter()
        .map(|item| TrackStrategy::Dom { item })
        .collect();
    strategies.push(TrackStrategy::RegexScan);
    strategies
}

/// Extract tracks from raw markup. Returns the first strategy's non-empty
/// result set; records missing a title or artist are silently dropped.
pub fn extract_tracks(raw: &str, source_url: &str) -> Vec<Track> {
    let doc = Html::parse_document(raw);

    for strategy in track_strategies() {
        let tracks = strategy.apply(&doc, raw, source_url);
        if !tracks.is_empty() {
            debug!(
                strategy = strategy.name(),
                count = tracks.len(),
                "track extraction strategy matched"
            );
            return tracks;
        }
    }

    debug!("no track extraction strategy matched");
    Vec::new()
}

/// Extract autocomplete suggestions from raw markup, capped at
/// [`SUGGESTION_LIMIT`]. Records with an empty value are dropped.
pub fn extract_suggestions(raw: &str) -> Vec<Suggestion> {
    let doc = Html::parse_document(raw);

    for selector_str in SUGGESTION_SELECTORS {
        let selector = Selector::parse(selector_str).expect("valid suggestion selector");
        let suggestions: Vec<Suggestion> = doc
            .select(&selector)
            .filter_map(|el| {
                let text = collapse_whitespace(&el.text().collect::<String>());
                if text.is_empty() {
                    return None;
                }
                Some(build_suggestion(&text))
            })
            .take(SUGGESTION_LIMIT)
            .collect();

        if !suggestions.is_empty() {
            debug!(
                strategy = selector_str,
                count = suggestions.len(),
                "suggestion extraction strategy matched"
            );
            return suggestions;
        }
    }

    debug!("no suggestion extraction strategy matched");
    Vec::new()
}

fn extract_tracks_dom(doc: &Html, item_selector: &str, source_url: &str) -> Vec<Track> {
    let item_sel = Selector::parse(item_selector).expect("valid track item selector");
    let title_sel = Selector::parse(TRACK_TITLE_SELECTOR).expect("valid title selector");
    let artist_sel = Selector::parse(TRACK_ARTIST_SELECTOR).expect("valid artist selector");
    let link_sel = Selector::parse(TRACK_LINK_SELECTOR).expect("valid link selector");

    doc.select(&item_sel)
        .enumerate()
        .filter_map(|(index, element)| {
            let title = select_text(&element, &title_sel)?;
            let artist = select_text(&element, &artist_sel)?;
            let href = element
                .select(&link_sel)
                .next()
                .and_then(|a| a.value().attr("href"));
            Some(build_track(index, &title, &artist, href, source_url))
        })
        .collect()
}

fn extract_tracks_regex(raw: &str, source_url: &str) -> Vec<Track> {
    // Lazy up to the close of the artist block, so one match covers the
    // title/artist pair inside a single item.
    let item_re = Regex::new(
        r#"(?is)<div[^>]*class="[^"]*pl-item[^"]*"[^>]*>(.*?artist-name.*?</div>)"#,
    )
    .expect("valid item pattern");
    let title_re = Regex::new(r#"(?is)<div[^>]*class="[^"]*song-title[^"]*"[^>]*>(.*?)</div>"#)
        .expect("valid title pattern");
    let artist_re = Regex::new(r#"(?is)<div[^>]*class="[^"]*artist-name[^"]*"[^>]*>(.*?)</div>"#)
        .expect("valid artist pattern");
    let link_re = Regex::new(r#"(?i)href="([^"]*(?:youtube\.com|youtu\.be)[^"]*)""#)
        .expect("valid link pattern");

    item_re
        .captures_iter(raw)
        .enumerate()
        .filter_map(|(index, caps)| {
            let chunk = &caps[1];
            let title = strip_tags(title_re.captures(chunk)?.get(1)?.as_str());
            let artist = strip_tags(artist_re.captures(chunk)?.get(1)?.as_str());
            if title.is_empty() || artist.is_empty() {
                return None;
            }
            let href = link_re
                .captures(chunk)
                .and_then(|c| c.get(1))
                .map(|m| m.as_str().to_string());
            Some(build_track(
                index,
                &title,
                &artist,
                href.as_deref(),
                source_url,
            ))
        })
        .collect()
}

fn build_track(
    index: usize,
    title: &str,
    artist: &str,
    href: Option<&str>,
    source_url: &str,
) -> Track {
    let youtube_id = href.and_then(youtube::extract_video_id);
    let youtube_url = match href {
        Some(href) => href.to_string(),
        // No direct link on the page: synthesize a search-query reference so
        // the track is still resolvable.
        None => youtube::search_url(title, artist),
    };

    Track {
        id: format!("{}-{}", index, youtube_id.as_deref().unwrap_or("track")),
        title: title.to_string(),
        artist: artist.to_string(),
        source_url: source_url.to_string(),
        youtube_url,
        youtube_id,
        source: ResultSource::Live,
    }
}

fn build_suggestion(text: &str) -> Suggestion {
    // "Title - Artist" annotations become value/label pairs; anything else is
    // surfaced verbatim.
    let (value, label) = match text.split_once(" - ") {
        Some((title, artist)) if !title.trim().is_empty() && !artist.trim().is_empty() => {
            (title.trim().to_string(), text.to_string())
        }
        _ => (text.to_string(), text.to_string()),
    };

    Suggestion {
        value,
        label,
        source: ResultSource::Live,
    }
}

fn select_text(element: &ElementRef, selector: &Selector) -> Option<String> {
    let text = element
        .select(selector)
        .next()
        .map(|el| collapse_whitespace(&el.text().collect::<String>()))?;
    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn strip_tags(markup: &str) -> String {
    let tag_re = Regex::new(r"<[^>]*>").expect("valid tag pattern");
    collapse_whitespace(&tag_re.replace_all(markup, ""))
}
