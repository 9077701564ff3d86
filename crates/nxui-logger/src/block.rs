use owo_colors::OwoColorize;
use unicode_width::UnicodeWidthStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockColor {
    Blue,
    Cyan,
    Green,
    Magenta,
    Yellow,
}

impl BlockColor {
    pub fn paint(self, text: &str) -> String {
        match self {
            Self::Blue => text.bright_blue().bold().to_string(),
            Self::Cyan => text.bright_cyan().bold().to_string(),
            Self::Green => text.bright_green().bold().to_string(),
            Self::Magenta => text.bright_magenta().bold().to_string(),
            Self::Yellow => text.bright_yellow().bold().to_string(),
        }
    }
}

/// Terminal column width of `text` with escape sequences removed.
#[must_use]
pub fn visible_width(text: &str) -> usize {
    strip_ansi_escapes::strip_str(text).width()
}

/// Draws `body` inside a rounded border with `label` embedded in the top edge.
///
/// Widths are measured on the visible text, so bodies that already carry
/// color codes still line up with the border.
#[must_use]
pub fn render_block(label: &str, color: Option<BlockColor>, body: &str) -> String {
    let content_width = body.lines().map(visible_width).max().unwrap_or(0);
    let label_width = label.width();
    let inner = (content_width + 2).max(label_width + 3);

    let painted_label = color.map_or_else(|| label.to_string(), |c| c.paint(label));

    let mut out = Vec::with_capacity(body.lines().count() + 4);
    out.push(format!(
        "╭─ {painted_label} {}╮",
        "─".repeat(inner - label_width - 3)
    ));
    out.push(format!("│{}│", " ".repeat(inner)));
    for line in body.lines() {
        let pad = inner - 2 - visible_width(line);
        out.push(format!("│ {line}{} │", " ".repeat(pad)));
    }
    out.push(format!("│{}│", " ".repeat(inner)));
    out.push(format!("╰{}╯", "─".repeat(inner)));

    out.join("\n")
}
