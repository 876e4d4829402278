use crate::models::{SeatState, SeatView};
use crate::services::{StatusTone, SubmissionStatus};

/// Раскладывает места по рядам по `columns` штук.
///
/// Свободное место - `[ 12]`, выбранное - `[*12]`, занятое - `[ xx]`.
pub fn render_grid(views: &[SeatView], columns: u32) -> String {
    let columns = columns.max(1) as usize;
    let width = views.last().map(|v| v.id.to_string().len()).unwrap_or(1);

    let mut out = String::new();
    for row in views.chunks(columns) {
        let cells: Vec<String> = row.iter().map(|view| cell(view, width)).collect();
        out.push_str(&cells.join(" "));
        out.push('\n');
    }
    out
}

fn cell(view: &SeatView, width: usize) -> String {
    match view.state {
        SeatState::Free => format!("[ {:>width$}]", view.id),
        SeatState::Selected => format!("[*{:>width$}]", view.id),
        SeatState::Booked => format!("[ {}]", "x".repeat(width)),
    }
}

/// Строка статуса с ANSI-цветом по тону.
pub fn render_status(status: &SubmissionStatus) -> String {
    let text = status.message();
    if text.is_empty() {
        return text;
    }
    match status.tone() {
        StatusTone::Neutral => text,
        StatusTone::Positive => format!("\x1b[32m{}\x1b[0m", text),
        StatusTone::Negative => format!("\x1b[38;5;161m{}\x1b[0m", text),
    }
}
