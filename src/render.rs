/// Plain-text rendering of backend answers for the terminal
use std::fmt::Write;

use crate::models::{
    profile_category_label, ChatTranscript, CinematicProfile, Movie, SongAnalysis,
};

const BAR_WIDTH: usize = 30;

/// The catalogue listing, or a hint when the filters matched nothing
pub fn movies(movies: &[Movie]) -> String {
    if movies.is_empty() {
        return "No movies found. Try different filters.\n".to_string();
    }

    let mut out = String::new();
    for (i, movie) in movies.iter().enumerate() {
        let _ = writeln!(out, "{:>3}. {}", i + 1, movie_line(movie));
        if !movie.description.is_empty() {
            let _ = writeln!(out, "     {}", movie.description);
        }
        let _ = writeln!(out, "     watch: {}", movie.watch_url());
    }
    out
}

fn movie_line(movie: &Movie) -> String {
    let year = movie
        .year
        .map(|y| y.to_string())
        .unwrap_or_else(|| "----".to_string());
    let rating = movie
        .imdb_rating
        .map(|r| format!("{:.1}", r))
        .unwrap_or_else(|| "n/a".to_string());

    format!(
        "{} ({}) [{}] ⭐ {} on {}",
        movie.title, year, movie.genre, rating, movie.ott_platform
    )
}

pub fn recommendations(for_title: &str, parallel: bool, movies: &[Movie]) -> String {
    let heading = if parallel {
        format!("🌌 Parallel universe picks for \"{}\"", for_title)
    } else {
        format!("Because you liked \"{}\"", for_title)
    };

    if movies.is_empty() {
        return format!("{}\nNo recommendations found.\n", heading);
    }

    let mut out = heading;
    out.push('\n');
    for movie in movies {
        let _ = writeln!(out, "  - {}", movie_line(movie));
    }
    out
}

pub fn song_analysis(analysis: &SongAnalysis) -> String {
    let mut out = format!(
        "🎵 Detected Mood: {} | Song: \"{}\"",
        analysis.detected_mood.to_uppercase(),
        analysis.song
    );
    if !analysis.keywords.is_empty() {
        let _ = write!(out, " | Keywords: {}", analysis.keywords.join(", "));
    }
    out.push('\n');

    if analysis.recommendations.is_empty() {
        out.push_str("No matching movies found for this vibe.\n");
    } else {
        for movie in &analysis.recommendations {
            let _ = writeln!(out, "  - {}", movie_line(movie));
        }
    }
    out
}

/// Horizontal bar per category, scaled to percent
pub fn profile(profile: &CinematicProfile) -> String {
    let mut out = String::from("Your Cinematic DNA\n");

    for (key, value) in &profile.profile {
        let pct = value.clamp(0.0, 100.0);
        let filled = ((pct / 100.0) * BAR_WIDTH as f64).round() as usize;
        let _ = writeln!(
            out,
            "  {:<18} {}{} {:>5.1}%",
            profile_category_label(key),
            "█".repeat(filled),
            "░".repeat(BAR_WIDTH - filled),
            pct
        );
    }

    let _ = writeln!(out, "{}", profile.description);
    let _ = writeln!(out, "Total interactions: {}", profile.total_interactions);
    out
}

pub fn transcript(transcript: &ChatTranscript) -> String {
    let mut out = String::new();
    for message in transcript.messages() {
        let _ = writeln!(out, "[{}] {}", message.role, message.text);
    }
    out
}
