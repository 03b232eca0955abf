//! Plain-text tables.

use std::fmt::Write;

use super::{PolicyReport, SummaryRow};
use crate::models::RawProcess;

/// Renders rows as left-aligned columns separated by two spaces.
fn render(headers: &[&str], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.len()).collect();
    for row in rows {
        for (w, cell) in widths.iter_mut().zip(row) {
            *w = (*w).max(cell.len());
        }
    }

    let mut out = String::new();
    push_line(&mut out, &widths, headers.iter().copied());
    for row in rows {
        push_line(&mut out, &widths, row.iter().map(String::as_str));
    }
    out
}

fn push_line<'a>(out: &mut String, widths: &[usize], cells: impl Iterator<Item = &'a str>) {
    let text: Vec<String> = cells
        .zip(widths)
        .map(|(c, &w)| format!("{c:<w$}"))
        .collect();
    out.push_str(text.join("  ").trim_end());
    out.push('\n');
}

/// Per-job metrics of one policy, followed by its averages.
pub fn render_policy_table(report: &PolicyReport) -> String {
    let rows: Vec<Vec<String>> = report
        .metrics
        .jobs
        .iter()
        .map(|m| {
            vec![
                m.pid.to_string(),
                m.name.clone(),
                m.burst.to_string(),
                m.start.to_string(),
                m.completion.to_string(),
                m.waiting.to_string(),
                m.turnaround.to_string(),
                m.priority.to_string(),
            ]
        })
        .collect();

    let mut out = format!("{} Scheduling Results:\n", report.policy);
    out.push_str(&render(
        &[
            "PID",
            "Name",
            "Burst",
            "Start",
            "Completion",
            "Waiting",
            "Turnaround",
            "Priority",
        ],
        &rows,
    ));
    // Writing to a String cannot fail.
    let _ = writeln!(
        out,
        "Avg Waiting = {:.2}, Avg Turnaround = {:.2}",
        report.metrics.avg_waiting, report.metrics.avg_turnaround
    );
    out
}

/// One line per policy with its averages.
pub fn render_summary_table(rows: &[SummaryRow]) -> String {
    let rows: Vec<Vec<String>> = rows
        .iter()
        .map(|r| {
            vec![
                r.policy.clone(),
                format!("{:.2}", r.avg_waiting),
                format!("{:.2}", r.avg_turnaround),
            ]
        })
        .collect();
    render(&["Algorithm", "Avg Waiting", "Avg Turnaround"], &rows)
}

/// The raw process records a simulation was built from.
pub fn render_process_table(processes: &[RawProcess]) -> String {
    let rows: Vec<Vec<String>> = processes
        .iter()
        .map(|p| {
            vec![
                p.pid.to_string(),
                p.command.clone(),
                p.elapsed_seconds.to_string(),
                p.priority.to_string(),
                p.nice.to_string(),
                format!("{:.1}", p.cpu_percent),
            ]
        })
        .collect();
    render(&["PID", "Command", "Elapsed", "Priority", "Nice", "CPU%"], &rows)
}
