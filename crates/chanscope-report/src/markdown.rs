//! Markdown rendering of a channel report.

use std::fmt;

use chanscope_core::AuthorStats;

use crate::metrics::{
    daily_activity, engagement_leaders, percent, rank_by_score, top_decile_share,
    ChannelSummary, LEADER_MIN_POSTS,
};
use crate::Report;

const COMPARISON_ROWS: usize = 30;
const LEADER_ROWS: usize = 10;
const ACTIVITY_DAYS: usize = 14;
const BLURBS_PER_AUTHOR: usize = 3;

/// Renders the full Markdown report.
#[must_use]
pub fn render_markdown(report: &Report<'_>) -> String {
    MarkdownReport {
        report,
        summary: report.summary(),
    }
    .to_string()
}

struct MarkdownReport<'r, 'a> {
    report: &'r Report<'a>,
    summary: ChannelSummary,
}

impl fmt::Display for MarkdownReport<'_, '_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.header(f)?;
        self.summary_section(f)?;
        self.contributors(f)?;
        self.comparison(f)?;
        self.leaders(f)?;
        self.activity(f)?;
        self.insights(f)?;
        self.methodology(f)
    }
}

impl MarkdownReport<'_, '_> {
    fn header(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let meta = self.report.metadata;
        writeln!(f, "# /{} Channel Report", meta.channel_id)?;
        writeln!(f)?;
        writeln!(
            f,
            "**Generated:** {}  ",
            meta.generated_at.format("%Y-%m-%d %H:%M UTC")
        )?;
        writeln!(f, "**Channel:** `{}`  ", meta.channel_id)?;
        writeln!(f, "**Analysis Period:** {}", period(self.report))?;
        writeln!(f)?;

        if !meta.complete {
            writeln!(
                f,
                "> **Incomplete collection:** paging stopped early ({}) after {} requests. \
                 Figures below cover only the posts that were collected.",
                meta.stop_reason, meta.request_count
            )?;
            writeln!(f)?;
        }
        writeln!(f, "---")?;
        writeln!(f)
    }

    fn summary_section(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = &self.summary;
        writeln!(f, "## Summary Statistics")?;
        writeln!(f)?;
        writeln!(f, "| Metric | Value |")?;
        writeln!(f, "|--------|-------|")?;
        writeln!(f, "| **Total Casts** | {} |", with_commas(s.total_posts as u64))?;
        writeln!(f, "| **Unique Authors** | {} |", with_commas(s.unique_authors as u64))?;
        writeln!(f, "| **Avg Casts/Author** | {:.2} |", s.avg_posts_per_author)?;
        writeln!(f, "| **Avg Casts/Day** | {:.1} |", s.avg_posts_per_day)?;
        writeln!(
            f,
            "| **Total Engagement** | {} interactions |",
            with_commas(s.total_engagement)
        )?;
        writeln!(
            f,
            "| **Avg Engagement/Cast** | {:.2} interactions |",
            s.avg_engagement_per_post
        )?;
        writeln!(f)?;

        writeln!(f, "## Channel Performance Score")?;
        writeln!(f)?;
        writeln!(f, "| Metric | Value | Weight | Score |")?;
        writeln!(f, "|--------|-------|--------|-------|")?;
        #[allow(clippy::cast_precision_loss)]
        let rows = [
            (
                "Total Casts",
                with_commas(s.total_posts as u64),
                "30%",
                s.total_posts as f64 * 0.3,
            ),
            (
                "Unique Authors",
                with_commas(s.unique_authors as u64),
                "20%",
                s.unique_authors as f64 * 0.2,
            ),
            (
                "Avg Engagement/Cast",
                format!("{:.2}", s.avg_engagement_per_post),
                "30%",
                s.avg_engagement_per_post * 0.3,
            ),
            (
                "Avg Casts/Day",
                format!("{:.1}", s.avg_posts_per_day),
                "20%",
                s.avg_posts_per_day * 0.2,
            ),
        ];
        for (name, value, weight, score) in rows {
            writeln!(f, "| {name} | {value} | {weight} | {score:.1} |")?;
        }
        writeln!(f, "| **Total Score** | - | 100% | **{:.1}** |", s.score)?;
        writeln!(f)?;
        writeln!(f, "---")?;
        writeln!(f)
    }

    fn contributors(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let top: Vec<&AuthorStats> = self.report.stats.iter().take(self.report.top_n).collect();
        writeln!(f, "## Top {} Most Active Contributors", top.len())?;
        writeln!(f)?;
        if top.is_empty() {
            writeln!(f, "_No casts were collected in this window._")?;
            writeln!(f)?;
        }

        for (i, author) in top.iter().enumerate() {
            self.contributor(f, i + 1, author)?;
        }
        Ok(())
    }

    #[allow(clippy::cast_precision_loss)]
    fn contributor(
        &self,
        f: &mut fmt::Formatter<'_>,
        rank: usize,
        author: &AuthorStats,
    ) -> fmt::Result {
        let profile = &author.profile;
        let posts = author.post_count as f64;
        let per_post = |total: u64| if posts > 0.0 { total as f64 / posts } else { 0.0 };

        writeln!(f, "### {rank}. {}", profile.label())?;
        writeln!(f)?;
        writeln!(f, "**Username:** @{}  ", profile.username)?;
        writeln!(f, "**FID:** {}  ", profile.author_id)?;
        writeln!(f, "**Followers:** {}  ", with_commas(profile.follower_count))?;
        writeln!(f, "**Following:** {}", with_commas(profile.following_count))?;
        writeln!(f)?;
        writeln!(f, "#### Activity Metrics")?;
        writeln!(
            f,
            "- **Casts Posted:** {} ({:.1}% of total)",
            author.post_count,
            percent(posts, self.summary.total_posts as f64)
        )?;
        writeln!(
            f,
            "- **Total Likes:** {} (avg: {:.1} per cast)",
            with_commas(author.total_likes),
            per_post(author.total_likes)
        )?;
        writeln!(
            f,
            "- **Total Replies:** {} (avg: {:.1} per cast)",
            with_commas(author.total_replies),
            per_post(author.total_replies)
        )?;
        writeln!(f, "- **Total Recasts:** {}", with_commas(author.total_recasts))?;
        writeln!(
            f,
            "- **Total Engagement:** {} interactions",
            with_commas(author.total_engagement())
        )?;
        if !profile.verified_addresses.is_empty() {
            writeln!(f)?;
            writeln!(f, "**Verified Addresses:** {}", profile.verified_addresses.len())?;
        }
        writeln!(f)?;

        let recent = author.recent_blurbs(BLURBS_PER_AUTHOR);
        if !recent.is_empty() {
            writeln!(f, "#### Recent Casts Preview")?;
            writeln!(f)?;
            for (i, blurb) in recent.iter().enumerate() {
                writeln!(
                    f,
                    "{}. *{}* - \"{}\" ({} likes, {} replies, {} recasts)",
                    i + 1,
                    blurb.timestamp.format("%Y-%m-%d"),
                    single_line(&blurb.text),
                    blurb.likes,
                    blurb.replies,
                    blurb.recasts
                )?;
            }
            writeln!(f)?;
        }
        writeln!(f, "---")?;
        writeln!(f)
    }

    #[allow(clippy::cast_precision_loss)]
    fn comparison(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ranked = rank_by_score(self.report.stats, COMPARISON_ROWS);
        writeln!(f, "## Top {} Authors Comparison", ranked.len())?;
        writeln!(f)?;
        writeln!(
            f,
            "| Rank | Author | Casts | % of Total | Total Engagement | Avg Engagement/Cast | Followers | Score |"
        )?;
        writeln!(
            f,
            "|------|--------|-------|------------|------------------|---------------------|-----------|-------|"
        )?;
        for (i, (author, score)) in ranked.iter().enumerate() {
            writeln!(
                f,
                "| {} | {} | {} | {:.1}% | {} | {:.1} | {} | **{:.1}** |",
                i + 1,
                table_cell(author.profile.label()),
                author.post_count,
                percent(author.post_count as f64, self.summary.total_posts as f64),
                with_commas(author.total_engagement()),
                author.engagement_per_post(),
                with_commas(author.profile.follower_count),
                score
            )?;
        }
        writeln!(f)?;
        writeln!(
            f,
            "*Author score weights: casts 30%, total engagement 30%, \
             engagement per cast 20%, followers scaled by 0.0002.*"
        )?;
        writeln!(f)
    }

    fn leaders(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "## Engagement Analysis")?;
        writeln!(f)?;
        writeln!(f, "### Top Performers by Engagement Rate")?;
        writeln!(f)?;

        let leaders = engagement_leaders(self.report.stats, LEADER_MIN_POSTS, LEADER_ROWS);
        if leaders.is_empty() {
            writeln!(f, "_No authors with at least {LEADER_MIN_POSTS} casts._")?;
            writeln!(f)?;
        }
        for (i, author) in leaders.iter().enumerate() {
            writeln!(
                f,
                "{}. **{}** (@{})  ",
                i + 1,
                author.profile.label(),
                author.profile.username
            )?;
            writeln!(
                f,
                "   - {:.1} avg interactions/cast ({} casts)  ",
                author.engagement_per_post(),
                author.post_count
            )?;
            writeln!(
                f,
                "   - {} likes, {} replies, {} recasts",
                author.total_likes, author.total_replies, author.total_recasts
            )?;
            writeln!(f)?;
        }
        Ok(())
    }

    #[allow(clippy::cast_precision_loss)]
    fn activity(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "## Activity Timeline")?;
        writeln!(f)?;
        writeln!(f, "### Daily Cast Distribution")?;
        writeln!(f)?;
        writeln!(f, "| Date | Casts | % of Total |")?;
        writeln!(f, "|------|-------|------------|")?;
        for (day, count) in daily_activity(self.report.posts, ACTIVITY_DAYS) {
            writeln!(
                f,
                "| {} | {count} | {:.1}% |",
                day.format("%a %b %d %Y"),
                percent(count as f64, self.summary.total_posts as f64)
            )?;
        }
        writeln!(f)?;
        writeln!(f, "---")?;
        writeln!(f)
    }

    #[allow(clippy::cast_precision_loss)]
    fn insights(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = &self.summary;
        writeln!(f, "## Channel Insights")?;
        writeln!(f)?;
        writeln!(f, "### Community Characteristics")?;
        writeln!(
            f,
            "- **Community Size:** {} active contributors",
            with_commas(s.unique_authors as u64)
        )?;
        writeln!(
            f,
            "- **Activity Level:** {:.1} casts per day on average",
            s.avg_posts_per_day
        )?;
        writeln!(
            f,
            "- **Engagement Health:** {:.2} interactions per cast indicates {} community engagement",
            s.avg_engagement_per_post,
            s.health()
        )?;
        writeln!(f)?;

        writeln!(f, "### Distribution Analysis")?;
        let (decile, share) = top_decile_share(self.report.stats, s.total_posts);
        writeln!(
            f,
            "- **Top 10% of authors** ({decile} people) contributed **{share:.1}%** of all casts"
        )?;
        if let Some(most_active) = self.report.stats.first() {
            writeln!(
                f,
                "- **Most active contributor** ({}) posted {} casts ({:.1}% of total activity)",
                most_active.profile.label(),
                most_active.post_count,
                percent(most_active.post_count as f64, s.total_posts as f64)
            )?;
        }
        writeln!(f)?;
        writeln!(f, "---")?;
        writeln!(f)
    }

    fn methodology(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let meta = self.report.metadata;
        writeln!(f, "## Methodology")?;
        writeln!(f)?;
        writeln!(f, "**Data Source:** Farcaster via Neynar API  ")?;
        writeln!(f, "**Channel:** {}  ", meta.channel_id)?;
        writeln!(f, "**Collection Period:** {}  ", period(self.report))?;
        writeln!(f, "**API Requests:** {}  ", meta.request_count)?;
        writeln!(f, "**Stopped Because:** {}  ", meta.stop_reason)?;
        if meta.duplicates_removed > 0 {
            writeln!(f, "**Duplicate Casts Removed:** {}  ", meta.duplicates_removed)?;
        }
        writeln!(f, "**Metrics Calculated:**")?;
        writeln!(f, "- Cast counts per author")?;
        writeln!(f, "- Engagement metrics (likes, replies, recasts)")?;
        writeln!(f, "- Follower and following counts")?;
        writeln!(f, "- Activity distribution over time")?;
        writeln!(f)?;
        writeln!(
            f,
            "**Note:** All timestamps are in UTC. Engagement metrics reflect the state at the time of collection."
        )?;
        writeln!(f)?;
        writeln!(f, "---")?;
        writeln!(f)?;
        writeln!(
            f,
            "*Report generated by chanscope at {}*",
            meta.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
        )
    }
}

fn period(report: &Report<'_>) -> String {
    let meta = report.metadata;
    format!(
        "{} - {} ({} days)",
        meta.start.format("%a %b %d %Y"),
        meta.end.format("%a %b %d %Y"),
        meta.day_span
    )
}

/// Formats `n` with `,` between groups of three digits.
fn with_commas(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

fn single_line(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn table_cell(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in single_line(text).chars() {
        if c == '|' {
            out.push_str("\\|");
        } else {
            out.push(c);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use chanscope_core::aggregate;

    use super::*;
    use crate::test_support::{metadata, post, profile, sample_posts};

    fn render(posts: &[chanscope_core::Post], complete: bool) -> String {
        let stats = aggregate(posts);
        let mut meta = metadata(31);
        meta.complete = complete;
        if !complete {
            meta.stop_reason = "request cap reached".to_string();
        }
        render_markdown(&Report::new(&stats, posts, &meta))
    }

    #[test]
    fn renders_every_section() {
        let md = render(&sample_posts(), true);

        for heading in [
            "# /celo Channel Report",
            "## Summary Statistics",
            "## Channel Performance Score",
            "## Top 2 Most Active Contributors",
            "## Top 2 Authors Comparison",
            "### Top Performers by Engagement Rate",
            "### Daily Cast Distribution",
            "## Channel Insights",
            "## Methodology",
        ] {
            assert!(md.contains(heading), "missing {heading:?} in:\n{md}");
        }
        assert!(md.contains("| **Total Casts** | 4 |"));
        assert!(md.contains("(31 days)"));
        assert!(md.contains("indicates high community engagement"));
        assert!(!md.contains("Incomplete collection"));
    }

    #[test]
    fn contributor_sections_follow_activity_order() {
        let md = render(&sample_posts(), true);
        let alice = md.find("### 1. Alice").expect("alice section");
        let bob = md.find("### 2. Bob").expect("bob section");
        assert!(alice < bob);
        assert!(md.contains("- **Casts Posted:** 3 (75.0% of total)"));
    }

    #[test]
    fn recent_blurbs_are_newest_first() {
        let md = render(&sample_posts(), true);
        let a1 = md.find("\"text of a1\"").expect("a1 blurb");
        let a2 = md.find("\"text of a2\"").expect("a2 blurb");
        let a3 = md.find("\"text of a3\"").expect("a3 blurb");
        assert!(a1 < a2 && a2 < a3);
    }

    #[test]
    fn only_three_blurbs_per_author() {
        let carol = profile(3, "Carol", 0);
        let posts: Vec<_> = (1..=5)
            .map(|d| post(&format!("c{d}"), &carol, &format!("2025-05-0{d}T00:00:00Z"), (0, 0, 0)))
            .collect();
        let md = render(&posts, true);
        assert!(md.contains("\"text of c5\""));
        assert!(md.contains("\"text of c3\""));
        assert!(!md.contains("\"text of c2\""));
    }

    #[test]
    fn incomplete_collection_is_flagged() {
        let md = render(&sample_posts(), false);
        assert!(md.contains(
            "> **Incomplete collection:** paging stopped early (request cap reached)"
        ));
    }

    #[test]
    fn empty_collection_renders_without_nan() {
        let md = render(&[], true);
        assert!(md.contains("_No casts were collected in this window._"));
        assert!(md.contains("| **Avg Casts/Author** | 0.00 |"));
        assert!(!md.contains("NaN"));
        assert!(!md.contains("Most active contributor"));
    }

    #[test]
    fn top_n_limits_contributor_sections() {
        let posts = sample_posts();
        let stats = aggregate(&posts);
        let meta = metadata(31);
        let md = render_markdown(&Report::new(&stats, &posts, &meta).with_top_n(1));
        assert!(md.contains("## Top 1 Most Active Contributors"));
        assert!(!md.contains("### 2. Bob"));
        // The comparison table is not limited by top_n.
        assert!(md.contains("## Top 2 Authors Comparison"));
    }

    #[test]
    fn commas_group_thousands() {
        assert_eq!(with_commas(0), "0");
        assert_eq!(with_commas(999), "999");
        assert_eq!(with_commas(1_000), "1,000");
        assert_eq!(with_commas(50_000), "50,000");
        assert_eq!(with_commas(1_234_567), "1,234,567");
    }

    #[test]
    fn table_cells_escape_pipes_and_newlines() {
        assert_eq!(table_cell("a|b\nc"), "a\\|b c");
    }
}
