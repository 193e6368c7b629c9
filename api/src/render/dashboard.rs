//! Dashboard renderer
//!
//! Renders the leaderboard dashboard to markdown.

use crate::app::{CategoryShare, DashboardView};
use crate::domain::entities::RankedEntity;

/// Render the dashboard to markdown
pub fn render_dashboard(view: &DashboardView) -> String {
    let mut buf = String::new();

    buf.push_str("# Agent Leaderboard\n\n");

    // Cards
    buf.push_str("## Top 3 Agents by Referral Earned\n\n");
    if view.top3.is_empty() {
        buf.push_str("_No agents ranked yet._\n\n");
    } else {
        for ranked in &view.top3 {
            buf.push_str(&render_card(ranked));
            buf.push('\n');
        }
    }

    // Table
    buf.push_str("## Top 25 Agents\n\n");
    if view.table.rows.is_empty() {
        buf.push_str("_No agents found._\n\n");
    } else {
        buf.push_str("| Rank | Name | Firm | Referral Earned |\n");
        buf.push_str("|------|------|------|-----------------|\n");
        for ranked in &view.table.rows {
            buf.push_str(&format!(
                "| {} | {} | {} | {} |\n",
                ranked.rank,
                escape_cell(&ranked.entity.name),
                escape_cell(&ranked.entity.category),
                money(ranked)
            ));
        }
        buf.push('\n');
    }

    buf.push_str(&format!(
        "Page {} of {}",
        view.table.page, view.table.total_pages
    ));
    if let Some(search) = &view.table.search {
        buf.push_str(&format!(" (search: \"{}\")", search));
    }
    buf.push_str("\n\n");

    // Distribution
    buf.push_str("## Referrer Origins\n\n");
    if view.distribution.is_empty() {
        buf.push_str("_No referrals yet._\n\n");
    } else {
        for share in &view.distribution {
            buf.push_str(&render_share(share));
        }
        buf.push('\n');
    }

    buf.push_str("---\n\n");
    buf.push_str(&format!(
        "Total agents: {} | Last updated: {}\n",
        view.total_agents,
        view.last_updated.format("%Y-%m-%d %H:%M UTC")
    ));

    buf
}

fn medal(rank: usize) -> String {
    match rank {
        1 => "🥇".to_string(),
        2 => "🥈".to_string(),
        3 => "🥉".to_string(),
        n => format!("#{}", n),
    }
}

fn money(ranked: &RankedEntity) -> String {
    format!("${}", ranked.entity.score)
}

fn render_card(ranked: &RankedEntity) -> String {
    let firm = if ranked.entity.category.is_empty() {
        "(no firm)".to_string()
    } else {
        single_line(&ranked.entity.category)
    };

    format!(
        "### {} {}\n{} | {}\n",
        medal(ranked.rank),
        single_line(&ranked.entity.name),
        firm,
        money(ranked)
    )
}

fn render_share(share: &CategoryShare) -> String {
    let category = if share.category.is_empty() {
        "(none)".to_string()
    } else {
        single_line(&share.category)
    };

    format!(
        "- {}: {} ({:.1}%)\n",
        category, share.count, share.percentage
    )
}

/// Fold line breaks so a value cannot end its heading or row early
fn single_line(s: &str) -> String {
    s.replace(['\r', '\n'], " ")
}

/// Keep table rows well-formed when a value contains a pipe or newline
fn escape_cell(s: &str) -> String {
    single_line(s).replace('|', "\\|")
}
