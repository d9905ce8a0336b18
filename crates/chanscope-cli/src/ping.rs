//! The `ping` command: a one-page API key check.

use chanscope_collector::{CollectorError, FeedSource, NeynarClient};
use chanscope_core::{truncate_text, AppConfig};

const PING_PAGE_SIZE: u32 = 5;
const PREVIEW_CHARS: usize = 100;

/// Fetches one small page from `channel_id` and prints the newest cast.
///
/// # Errors
///
/// Returns an error if the client cannot be built or the fetch fails. A
/// hint is printed first for rejected or unpaid API keys.
pub(crate) async fn run_ping(config: &AppConfig, channel_id: &str) -> anyhow::Result<()> {
    let client = NeynarClient::from_app_config(config)
        .map_err(|e| anyhow::anyhow!("failed to build Neynar client: {e}"))?;

    let page = match client.fetch_page(channel_id, PING_PAGE_SIZE, None).await {
        Ok(page) => page,
        Err(e) => {
            if let Some(hint) = failure_hint(&e) {
                eprintln!("hint: {hint}");
            }
            return Err(anyhow::anyhow!("ping /{channel_id} failed: {e}"));
        }
    };

    println!("API key OK: fetched {} casts from /{channel_id}", page.items.len());
    match page.items.iter().max_by_key(|p| p.timestamp) {
        Some(latest) => {
            println!("latest cast:  {}", latest.timestamp.to_rfc3339());
            println!(
                "author:       {} (@{})",
                latest.author.label(),
                latest.author.username
            );
            println!("text:         {}", truncate_text(&latest.text, PREVIEW_CHARS));
        }
        None => println!("the channel returned no casts"),
    }
    Ok(())
}

fn failure_hint(error: &CollectorError) -> Option<&'static str> {
    match error {
        CollectorError::Unauthorized { .. } => {
            Some("the API key was rejected; check NEYNAR_API_KEY")
        }
        CollectorError::PaymentRequired => {
            Some("channel feeds need a paid Neynar plan for this API key")
        }
        CollectorError::RateLimited { .. } => Some("rate limited; wait a minute and retry"),
        _ => None,
    }
}
