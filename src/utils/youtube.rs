use regex::Regex;

/// Pull a video id out of a YouTube reference. Accepts watch, short and embed
/// URLs as well as a bare 11-character id.
pub fn extract_video_id(reference: &str) -> Option<String> {
    let patterns = [
        r"(?:youtube\.com/watch\?v=|youtu\.be/|youtube\.com/embed/)([^&\n?#]+)",
        r"^([A-Za-z0-9_-]{11})$",
    ];

    for pattern in patterns {
        let re = Regex::new(pattern).expect("valid video id pattern");
        if let Some(caps) = re.captures(reference) {
            return Some(caps[1].to_string());
        }
    }

    None
}

/// Embed-player URL for a video id (template substitution only).
pub fn embed_url(video_id: &str) -> String {
    format!(
        "https://www.youtube.com/embed/{}?autoplay=1&controls=1&rel=0&modestbranding=1&showinfo=0",
        video_id
    )
}

/// Best-effort search-query URL for a track without a direct link, so every
/// surfaced track stays resolvable to something playable.
pub fn search_url(title: &str, artist: &str) -> String {
    let query: String =
        url::form_urlencoded::byte_serialize(format!("{} {}", title, artist).as_bytes()).collect();
    format!("https://www.youtube.com/results?search_query={}", query)
}
