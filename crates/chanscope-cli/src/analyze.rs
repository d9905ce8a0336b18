//! The `analyze` command: collect, aggregate, report.

use chanscope_collector::{Collector, CollectorSettings, NeynarClient};
use chanscope_core::{aggregate, dedupe_by_id, AppConfig, CollectionWindow};
use chanscope_report::{write_reports, Report, ReportMetadata};
use chrono::Utc;

use crate::AnalyzeArgs;

/// Runs one analysis and prints a console summary.
///
/// Collection failures are not errors here: whatever was collected before
/// the failure is reported and flagged as incomplete.
///
/// # Errors
///
/// Returns an error if the window is inverted, the HTTP client cannot be
/// built, or the report files cannot be written.
pub(crate) async fn run_analyze(config: &AppConfig, args: AnalyzeArgs) -> anyhow::Result<()> {
    let window = resolve_window(&args)?;
    if window.start > Utc::now() {
        tracing::warn!(start = %window.start, "window start is in the future; expect no casts");
    }

    let client = NeynarClient::from_app_config(config)
        .map_err(|e| anyhow::anyhow!("failed to build Neynar client: {e}"))?;
    let collector = Collector::new(client, CollectorSettings::from_app_config(config));

    println!(
        "collecting /{} from {} to {}",
        window.channel_id,
        window.start.format("%Y-%m-%d %H:%M:%S"),
        window.end.format("%Y-%m-%d %H:%M:%S")
    );
    let collection = collector.collect(&window).await;
    if !collection.is_complete() {
        tracing::warn!(
            stop_reason = %collection.stop_reason,
            collected = collection.posts.len(),
            "collection incomplete; reporting partial results"
        );
    }

    let request_count = collection.request_count;
    let stop_reason = collection.stop_reason.to_string();
    let complete = collection.is_complete();
    let mut posts = collection.into_posts();

    let mut duplicates_removed = 0;
    if args.dedupe {
        (posts, duplicates_removed) = dedupe_by_id(posts);
        if duplicates_removed > 0 {
            tracing::info!(duplicates_removed, "dropped duplicate casts");
        }
    }

    if posts.is_empty() {
        println!(
            "no casts found in /{} for this window ({stop_reason}, {request_count} requests); no report written",
            window.channel_id
        );
        return Ok(());
    }

    let stats = aggregate(&posts);
    let metadata = ReportMetadata {
        channel_id: window.channel_id.clone(),
        start: window.start,
        end: window.end,
        day_span: window.day_span(),
        generated_at: Utc::now(),
        request_count,
        stop_reason,
        complete,
        duplicates_removed,
    };
    let report = Report::new(&stats, &posts, &metadata).with_top_n(args.top);

    let output_dir = args
        .output_dir
        .clone()
        .unwrap_or_else(|| config.output_dir.clone());
    let basename = args.name.clone().unwrap_or_else(|| default_basename(&window));
    let written = write_reports(&report, &output_dir, &basename)?;

    let summary = report.summary();
    println!();
    println!("channel:          /{}", metadata.channel_id);
    println!(
        "period:           {} to {} ({} days)",
        metadata.start.format("%Y-%m-%d"),
        metadata.end.format("%Y-%m-%d"),
        metadata.day_span
    );
    println!("casts:            {}", summary.total_posts);
    println!("unique authors:   {}", summary.unique_authors);
    println!("total engagement: {}", summary.total_engagement);
    println!("requests:         {request_count}");
    if let Some(top) = stats.first() {
        println!(
            "most active:      {} (@{}) with {} casts",
            top.profile.label(),
            top.profile.username,
            top.post_count
        );
    }
    if !metadata.complete {
        println!("note:             collection incomplete ({})", metadata.stop_reason);
    }
    println!("markdown report:  {}", written.markdown.display());
    println!("json export:      {}", written.json.display());

    Ok(())
}

/// Builds the collection window from `--month` or `--start`/`--end`.
///
/// # Errors
///
/// Returns an error if the bounds are missing or `start` is after `end`.
pub(crate) fn resolve_window(args: &AnalyzeArgs) -> anyhow::Result<CollectionWindow> {
    if let Some(ym) = args.month {
        return Ok(CollectionWindow::month(&args.channel, ym.year, ym.month)?);
    }
    match (args.start, args.end) {
        (Some(start), Some(end)) => Ok(CollectionWindow::new(&args.channel, start, end)?),
        _ => anyhow::bail!("either --month or both --start and --end are required"),
    }
}

/// `<channel>-analysis-<start>-to-<end>` using UTC dates.
pub(crate) fn default_basename(window: &CollectionWindow) -> String {
    format!(
        "{}-analysis-{}-to-{}",
        window.channel_id,
        window.start.format("%Y-%m-%d"),
        window.end.format("%Y-%m-%d")
    )
}
