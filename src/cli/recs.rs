use std::time::Duration;

use chrono::Utc;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use rand::{SeedableRng, rngs::StdRng};
use tabled::Table;

use crate::{
    config, error,
    error::Outcome,
    management::CredentialContext,
    recommend,
    spotify::SpotifyClient,
    success,
    types::{ContentBlock, RecommendationTableRow},
    warning,
};

/// Runs the engine once with a bearer token from the command line and prints one
/// table per seed album.
///
/// # Arguments
///
/// * `token` - Spotify access token with the `user-library-read` scope
/// * `expires_in` - Seconds until the token expires, capped at one year
///
/// # Exits
///
/// Exits the process with an error message when the configuration is invalid, the
/// token is missing or expired, Spotify rate limits the run, or a Web API call fails.
/// An empty library or an empty result only prints a warning.
pub async fn recs(token: String, expires_in: u64) {
    let timeout = match config::request_timeout_from_env() {
        Ok(timeout) => timeout,
        Err(e) => error!("Invalid configuration: {}", e),
    };
    let client = match SpotifyClient::new(&config::api_url_from_env(), timeout) {
        Ok(client) => client,
        Err(e) => error!("Cannot create HTTP client: {}", e),
    };

    // a year is plenty for a token given by hand
    let expires_in = expires_in.min(365 * 24 * 60 * 60) as i64;
    let expires_at = Utc::now() + chrono::Duration::seconds(expires_in);
    let credential = CredentialContext::new(token, expires_at);

    let pb = ProgressBar::new_spinner();
    pb.set_message("Looking for albums you might enjoy...");
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_style(
        ProgressStyle::with_template("{spinner:.blue} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
    );

    let mut rng = StdRng::from_os_rng();
    let result = recommend::discover(&client, &credential, &mut rng).await;
    pb.finish_and_clear();

    let content = match result {
        Ok(content) => content,
        Err(e) => match e.outcome() {
            Outcome::NeedsLogin => error!("No access token given."),
            Outcome::NeedsRefresh => error!("The access token has expired. Get a new one."),
            Outcome::EmptyLibrary => {
                warning!("Your library has no saved albums yet.");
                return;
            }
            Outcome::RateLimited {
                retry_after: Some(secs),
            } => error!("Rate limited by Spotify. Try again in {} seconds.", secs),
            Outcome::RateLimited { retry_after: None } => {
                error!("Rate limited by Spotify. Try again later.")
            }
            Outcome::GenericRemoteError => error!("Cannot fetch recommendations: {}", e),
        },
    };

    if content.is_empty() {
        warning!("No recommendations found for your recent saves.");
        return;
    }

    for (intro, rows) in to_sections(&content) {
        println!("{}\n{}\n", intro.bold(), Table::new(rows));
    }
    success!("Done.");
}

/// Splits the flat block list into (intro, album rows) per seed album.
pub fn to_sections(content: &[ContentBlock]) -> Vec<(String, Vec<RecommendationTableRow>)> {
    let mut sections: Vec<(String, Vec<RecommendationTableRow>)> = Vec::new();

    for block in content {
        match block {
            ContentBlock::Text { text } => sections.push((text.clone(), Vec::new())),
            ContentBlock::Album {
                title,
                artist,
                link,
                ..
            } => {
                let row = RecommendationTableRow {
                    album: title.clone(),
                    artist: artist.clone(),
                    link: link.clone().unwrap_or_default(),
                };
                match sections.last_mut() {
                    Some((_, rows)) => rows.push(row),
                    None => sections.push((String::new(), vec![row])),
                }
            }
        }
    }

    sections
}
