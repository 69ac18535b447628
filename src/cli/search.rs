use anyhow::Result;
use clap::Args;
use tracing::info;

use crate::core::services::chosic::Outcome;
use crate::core::types::{SearchKind, SearchRequest, Track};
use crate::services::SimpleServices;
use crate::utils::youtube;

#[derive(Args)]
pub struct SearchArgs {
    /// Search text (or a source-page link for the song-url/artist-url kinds)
    #[arg(value_name = "QUERY")]
    query: String,

    /// What the query describes
    #[arg(short, long, value_enum, default_value = "song")]
    kind: SearchKind,

    /// Genre qualifier, required for genre/category searches
    #[arg(short, long)]
    genre: Option<String>,

    /// Output format (table, json, detailed)
    #[arg(long, default_value = "table")]
    format: String,

    /// Limit number of results
    #[arg(long, default_value = "20")]
    limit: usize,
}

pub async fn execute(args: SearchArgs, services: &SimpleServices) -> Result<()> {
    let client = services.create_search_client();

    let mut request = SearchRequest::new(args.query.clone(), args.kind);
    if let Some(genre) = &args.genre {
        request = request.with_genre(genre.clone());
    }

    info!("Searching for tracks...");

    let outcome = client.search_outcome(&request).await;
    if let Some(reason) = outcome.degrade_reason() {
        println!("⚠️  Live search unavailable ({}), showing catalog matches", reason.as_str());
    }
    let from_live = matches!(outcome, Outcome::Live(_));

    let mut tracks = outcome.into_records();
    if tracks.len() > args.limit {
        tracks.truncate(args.limit);
    }

    if tracks.is_empty() {
        info!("No tracks found matching the given query");
        return Ok(());
    }

    info!("Found {} track(s){}", tracks.len(), if from_live { "" } else { " (fallback)" });

    match args.format.as_str() {
        "json" => output_json(&tracks)?,
        "detailed" => output_detailed(&tracks),
        _ => output_table(&tracks),
    }

    Ok(())
}

fn output_json(tracks: &[Track]) -> Result<()> {
    let json = serde_json::to_string_pretty(tracks)?;
    println!("{}", json);
    Ok(())
}

fn output_detailed(tracks: &[Track]) {
    for (i, track) in tracks.iter().enumerate() {
        println!("┌──────────────────────────────────────────────────────────────────────┐");
        println!("│ Result #{:<61} │", i + 1);
        println!("├──────────────────────────────────────────────────────────────────────┤");
        println!("│ Title:  {:<61} │", truncate_string(&track.title, 61));
        println!("│ Artist: {:<61} │", truncate_string(&track.artist, 61));
        println!("│ Source: {:<61} │", track.source.as_str());
        println!("│ Video:  {:<61} │", truncate_string(&track.youtube_url, 61));
        if let Some(id) = &track.youtube_id {
            println!("│ Embed:  {:<61} │", truncate_string(&youtube::embed_url(id), 61));
        }
        println!("└──────────────────────────────────────────────────────────────────────┘");
        println!();
    }
}

fn output_table(tracks: &[Track]) {
    use crossterm::{
        execute,
        style::{Color, ResetColor, SetForegroundColor},
    };
    use std::io;

    let _ = execute!(io::stdout(), SetForegroundColor(Color::Rgb { r: 255, g: 165, b: 0 }));
    println!();
    println!("┌────┬─────────────────────────┬─────────────────────┬─────────────┬──────────┐");
    println!("│ #  │ Title                   │ Artist              │ Video       │ Source   │");
    println!("├────┼─────────────────────────┼─────────────────────┼─────────────┼──────────┤");

    for (i, track) in tracks.iter().enumerate() {
        let title = truncate_string(&track.title, 23);
        let artist = truncate_string(&track.artist, 19);
        let video = truncate_string(track.youtube_id.as_deref().unwrap_or("search"), 11);
        let source = truncate_string(track.source.as_str(), 8);

        println!("│{:>3} │ {} │ {} │ {} │ {} │", i + 1, title, artist, video, source);
    }

    println!("└────┴─────────────────────────┴─────────────────────┴─────────────┴──────────┘");
    let _ = execute!(io::stdout(), ResetColor);

    println!();
    println!("Tips:");
    println!("  • Use --format detailed for full video and embed links");
    println!("  • Use --format json for machine-readable output");
    println!("  • Use --kind genre --genre <name> for genre playlists");
}

pub(crate) fn truncate_string(s: &str, max_len: usize) -> String {
    use unicode_width::UnicodeWidthStr;

    let visual_width = s.width();
    if visual_width <= max_len {
        let padding = max_len - visual_width;
        format!("{}{}", s, " ".repeat(padding))
    } else {
        let mut truncated = String::new();
        let mut current_width = 0;

        for ch in s.chars() {
            let ch_width = unicode_width::UnicodeWidthChar::width(ch).unwrap_or(0);
            if current_width + ch_width + 1 > max_len {
                break;
            }
            truncated.push(ch);
            current_width += ch_width;
        }

        truncated.push('…');
        current_width += 1;
        let padding = max_len.saturating_sub(current_width);
        format!("{}{}", truncated, " ".repeat(padding))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_pads_short_strings_to_width() {
        assert_eq!(truncate_string("abc", 5), "abc  ");
    }

    #[test]
    fn truncate_clips_long_strings_with_ellipsis() {
        let out = truncate_string("a very long track title", 10);
        assert!(out.ends_with('…') || out.trim_end().ends_with('…'));
        use unicode_width::UnicodeWidthStr;
        assert_eq!(out.width(), 10);
    }
}
