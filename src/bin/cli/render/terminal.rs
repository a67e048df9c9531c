use carnet_lib::review::format_interval;
use carnet_lib::vocab::VocabEntry;

/// ANSI color codes
pub struct Color;

impl Color {
    pub const RESET: &'static str = "\x1b[0m";
    pub const BOLD: &'static str = "\x1b[1m";
    pub const DIM: &'static str = "\x1b[2m";
    pub const ITALIC: &'static str = "\x1b[3m";
    pub const RED: &'static str = "\x1b[31m";
    pub const GREEN: &'static str = "\x1b[32m";
    pub const YELLOW: &'static str = "\x1b[33m";
    pub const CYAN: &'static str = "\x1b[36m";
}

/// Wrap `text` in the given style when colors are enabled
pub fn paint(text: &str, style: &str, use_color: bool) -> String {
    if use_color {
        format!("{}{}{}", style, text, Color::RESET)
    } else {
        text.to_string()
    }
}

/// Text progress bar, e.g. `[#####-----] 5/10`
pub fn progress_bar(done: usize, total: usize, width: usize) -> String {
    let filled = if total == 0 {
        width
    } else {
        (done * width / total).min(width)
    };
    format!(
        "[{}{}] {}/{}",
        "#".repeat(filled),
        "-".repeat(width - filled),
        done,
        total
    )
}

/// Front side of a card: the word only
pub fn render_question(entry: &VocabEntry, use_color: bool) -> String {
    let mut lines = Vec::new();
    lines.push(String::new());
    lines.push(format!("    {}", paint(&entry.word, Color::BOLD, use_color)));
    lines.push(String::new());
    lines.join("\n")
}

/// Back side of a card: word, grammatical tag, meaning and example
pub fn render_answer(entry: &VocabEntry, use_color: bool) -> String {
    let mut lines = Vec::new();

    let mut heading = format!("    {}", paint(&entry.word, Color::BOLD, use_color));
    if !entry.gender.is_empty() {
        heading.push_str(&format!("  {}", paint(&entry.gender, Color::ITALIC, use_color)));
    }
    lines.push(heading);
    lines.push(format!("    {}", "\u{2500}".repeat(entry.word.chars().count().max(8))));
    lines.push(format!("    {}", paint(&entry.meaning, Color::CYAN, use_color)));

    if !entry.example.is_empty() {
        lines.push(format!("    {}", paint(&entry.example, Color::DIM, use_color)));
    }

    lines.join("\n")
}

/// Schedule summary for listings
pub fn render_schedule(entry: &VocabEntry) -> String {
    let last = entry
        .last_review
        .map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| "never".to_string());
    format!(
        "last {}, next {}, every {}",
        last,
        entry.next_review.format("%Y-%m-%d"),
        format_interval(entry.interval)
    )
}
