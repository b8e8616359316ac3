use colored::{Color, Colorize};

/// Colour used for a claim or policy status.
#[must_use]
pub fn status_color(status: &str) -> Color {
    let status = status.to_ascii_lowercase();
    if status.contains("approved") || status == "active" {
        Color::Green
    } else if status.contains("rejected") || status == "expired" {
        Color::Red
    } else if status.contains("pending") {
        Color::Yellow
    } else if status.contains("processing") || status.contains("review") {
        Color::Blue
    } else if status == "draft" {
        Color::White
    } else {
        Color::BrightBlack
    }
}

/// Status label with its badge colour applied.
#[must_use]
pub fn status(status: &str) -> String {
    status
        .replace('_', " ")
        .color(status_color(status))
        .bold()
        .to_string()
}
