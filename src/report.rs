//! Terminal rendering of QR code statistics.
//!
//! Functions return strings so the binary decides where they go. Styling uses
//! `colored`, which honours `NO_COLOR` and non-terminal outputs.

use crate::application::services::{StatsReport, Termination};
use crate::domain::entities::{AggregateResult, QrCode};
use crate::error::FetchError;
use colored::*;

/// Per-code panel.
///
/// ```text
/// ── My URL ──
///   ID:          42
///   Created:     2023-08-11 13:13:29
///   Short URL:   https://qr.codes/abc
///   Target URL:  https://example.com
///   Type:        Dynamic - URL
///   Total Scans: 10
///   Unique Scans: 4
/// ```
pub fn render_code(code: &QrCode) -> String {
    let short_url = if code.short_url.is_empty() {
        "No Short URL - Static".red().to_string()
    } else {
        code.short_url.cyan().to_string()
    };
    let target_url = match &code.target_url {
        Some(url) => url.cyan().to_string(),
        None => format!("No Target URL - {}", code.type_name).red().to_string(),
    };

    let mut lines = vec![
        format!("── {} ──", code.title.bold()),
        format!("  {} {}", "ID:".bold(), code.id),
        format!("  {} {}", "Created:".bold(), code.created),
        format!("  {} {}", "Short URL:".bold(), short_url),
        format!("  {} {}", "Target URL:".bold(), target_url),
        format!("  {} {}", "Type:".bold(), code.type_display()),
    ];

    if code.is_dynamic {
        lines.push(format!("  {} {}", "Total Scans:".bold(), code.total_scans));
        lines.push(format!("  {} {}", "Unique Scans:".bold(), code.unique_scans));
    }

    lines.join("\n")
}

/// Summary counters.
pub fn render_summary(aggregate: &AggregateResult) -> String {
    [
        format!(
            "{} {}",
            "Total number of Static QR Codes:".bright_magenta().bold(),
            aggregate.static_count.to_string().cyan()
        ),
        format!(
            "{} {}",
            "Total number of Dynamic QR Codes:".bright_magenta().bold(),
            aggregate.dynamic_count.to_string().cyan()
        ),
        format!(
            "{} {}",
            "Aggregate Total Scans for all Dynamic QR Codes:"
                .bright_magenta()
                .bold(),
            aggregate.total_scans_all_time.to_string().cyan()
        ),
    ]
    .join("\n")
}

/// Panel shown when pagination stopped on an error.
pub fn render_fetch_failure(err: &FetchError) -> String {
    let mut lines = vec!["Failed to fetch QR codes".red().bold().to_string()];

    match err {
        FetchError::Status { status, body, .. } => {
            lines.push(format!("  {} {}", "Status Code:".bold(), status));
            lines.push(format!("  {} {}", "Response:".bold(), body));
        }
        other => lines.push(format!("  {} {}", "Error:".bold(), other)),
    }

    lines.push(format!("  {} {}", "Page:".bold(), err.page()));
    lines.join("\n")
}

/// Full report: one panel per included code, then the summary.
pub fn render_report(report: &StatsReport) -> String {
    let mut sections: Vec<String> = report.aggregate.records.iter().map(render_code).collect();

    match &report.termination {
        Termination::Empty => sections.push("No QR codes found.".yellow().to_string()),
        Termination::PageLimitReached => sections.push(
            format!(
                "Stopped after {} pages; later pages were not fetched.",
                report.pages_fetched
            )
            .yellow()
            .to_string(),
        ),
        Termination::Failed(err) => {
            sections.push(render_fetch_failure(err));
            sections.push(
                "Results below cover only the pages fetched before the failure."
                    .yellow()
                    .to_string(),
            );
        }
        Termination::Completed => {}
    }

    if report.excluded() > 0 {
        sections.push(format!(
            "{} QR codes outside the date range were skipped.",
            report.excluded()
        ));
    }

    sections.push(render_summary(&report.aggregate));
    sections.join("\n\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::ScanCount;

    fn code(is_dynamic: bool) -> QrCode {
        QrCode {
            id: "42".to_string(),
            created: "2023-08-11 13:13:29".to_string(),
            created_at: None,
            title: "Spring flyer".to_string(),
            short_url: if is_dynamic {
                "https://qr.codes/abc".to_string()
            } else {
                String::new()
            },
            target_url: None,
            type_name: "PDF".to_string(),
            is_dynamic,
            total_scans: ScanCount::Count(10),
            unique_scans: ScanCount::Count(4),
        }
    }

    fn report(termination: Termination, codes: Vec<QrCode>, fetched: usize) -> StatsReport {
        StatsReport {
            aggregate: codes.into_iter().collect(),
            fetched,
            pages_fetched: 1,
            termination,
        }
    }

    #[test]
    fn test_render_static_code_hides_scans() {
        let text = render_code(&code(false));
        assert!(text.contains("No Short URL - Static"));
        assert!(text.contains("No Target URL - PDF"));
        assert!(text.contains("Static - PDF"));
        assert!(!text.contains("Total Scans"));
    }

    #[test]
    fn test_render_dynamic_code_shows_scans() {
        let text = render_code(&code(true));
        assert!(text.contains("https://qr.codes/abc"));
        assert!(text.contains("Dynamic - PDF"));
        assert!(text.contains("Total Scans"));
        assert!(text.contains("Unique Scans"));
    }

    #[test]
    fn test_render_fetch_failure_status() {
        let text = render_fetch_failure(&FetchError::Status {
            page: 2,
            status: 401,
            body: "invalid access token".to_string(),
        });
        assert!(text.contains("401"));
        assert!(text.contains("invalid access token"));
    }

    #[test]
    fn test_render_report_sections() {
        let text = render_report(&report(Termination::Completed, vec![code(true)], 3));
        assert!(text.contains("Spring flyer"));
        assert!(text.contains("2 QR codes outside the date range were skipped."));
        assert!(text.contains("Aggregate Total Scans for all Dynamic QR Codes:"));
    }

    #[test]
    fn test_render_report_empty() {
        let text = render_report(&report(Termination::Empty, vec![], 0));
        assert!(text.contains("No QR codes found."));
        assert!(!text.contains("skipped"));
    }
}
