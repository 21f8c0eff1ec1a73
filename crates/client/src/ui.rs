//! # Text Rendering
//!
//! Renders the derived view, the summary line, and status messages as plain
//! text for the terminal.

use crate::{
    state::{ClientState, Notice},
    view::ViewSummary,
};
use roster::Student;
use std::fmt::Write;

const HEADERS: [&str; 4] = ["ID", "NAME", "AGE", "CLASS"];

fn width(value: &str) -> usize {
    value.chars().count()
}

fn pad(value: &str, to: usize) -> String {
    let mut cell = value.to_string();
    cell.extend(std::iter::repeat(' ').take(to.saturating_sub(width(value))));
    cell
}

/// Renders the rows as an aligned table. An empty view renders a single notice line.
pub fn render_table(rows: &[&Student]) -> String {
    if rows.is_empty() {
        return "No students to show.\n".to_string();
    }

    let cells: Vec<[String; 4]> = rows
        .iter()
        .map(|s| [s.id.clone(), s.name.clone(), s.age.to_string(), s.class.clone()])
        .collect();

    let mut widths = HEADERS.map(width);
    for row in &cells {
        for (w, cell) in widths.iter_mut().zip(row) {
            *w = (*w).max(width(cell));
        }
    }

    let mut out = String::new();
    let line = |values: [&str; 4]| -> String {
        values
            .iter()
            .zip(widths)
            .map(|(v, w)| pad(v, w))
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };
    let _ = writeln!(out, "{}", line(HEADERS));
    for row in &cells {
        let _ = writeln!(out, "{}", line([row[0].as_str(), row[1].as_str(), row[2].as_str(), row[3].as_str()]));
    }
    out
}

pub fn render_summary(summary: &ViewSummary) -> String {
    let mut line = format!(
        "Showing {} of {} student(s), sorted {}",
        summary.shown,
        summary.total,
        summary.direction.label()
    );
    if let Some(keyword) = &summary.keyword {
        let _ = write!(line, ", matching \"{keyword}\"");
    }
    line
}

pub fn render_student(student: &Student) -> String {
    format!(
        "ID:      {}\nName:    {}\nAge:     {}\nClass:   {}\nCreated: {}\nUpdated: {}\n",
        student.id,
        student.name,
        student.age,
        student.class,
        student.created_at.to_rfc3339(),
        student.updated_at.to_rfc3339()
    )
}

pub fn render_notice(notice: &Notice) -> String {
    if notice.is_error {
        format!("Error: {}", notice.text)
    } else {
        notice.text.clone()
    }
}

/// The load error, if any, followed by the current notice.
pub fn status_lines(state: &ClientState) -> Vec<String> {
    state
        .load_error
        .iter()
        .map(|e| format!("Error: {e}"))
        .chain(state.notice.iter().map(render_notice))
        .collect()
}
