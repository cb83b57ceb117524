use crate::notice::{Notice, NoticeLevel};
use owo_colors::OwoColorize;

/// One-line notice with a level marker.
pub fn format_notice(notice: &Notice, color: bool) -> String {
    let (marker, message) = match notice.level {
        NoticeLevel::Success => ("✓", &notice.message),
        NoticeLevel::Info => ("•", &notice.message),
        NoticeLevel::Error => ("✗", &notice.message),
    };
    if !color {
        return format!("{} {}", marker, message);
    }
    match notice.level {
        NoticeLevel::Success => format!("{} {}", marker.green().bold(), message),
        NoticeLevel::Info => format!("{} {}", marker.yellow().bold(), message),
        NoticeLevel::Error => format!("{} {}", marker.red().bold(), message.red()),
    }
}
