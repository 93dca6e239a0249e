//! Visual styling utilities for the CLI.
//!
//! Band colors come from [`Band::hex_color`] so the terminal palette
//! matches the chart palette.

use owo_colors::OwoColorize;

use airmask_types::Band;

use crate::cli::StyleMode;

// ============================================================================
// Band Colors
// ============================================================================

/// Parse a `#rrggbb` string. Malformed input yields mid-grey.
pub fn hex_rgb(hex: &str) -> (u8, u8, u8) {
    let hex = hex.trim_start_matches('#');
    let channel = |i: usize| {
        hex.get(i..i + 2)
            .and_then(|s| u8::from_str_radix(s, 16).ok())
            .unwrap_or(128)
    };
    if hex.len() != 6 {
        return (128, 128, 128);
    }
    (channel(0), channel(2), channel(4))
}

/// Paint `text` in the band's color.
pub fn paint_band(text: &str, band: Band, no_color: bool) -> String {
    if no_color {
        return text.to_string();
    }
    let (r, g, b) = hex_rgb(band.hex_color());
    if band >= Band::VeryUnhealthy {
        format!("{}", text.truecolor(r, g, b).bold())
    } else {
        format!("{}", text.truecolor(r, g, b))
    }
}

/// Band label in its color.
pub fn format_band_colored(band: Band, no_color: bool) -> String {
    paint_band(band.label(), band, no_color)
}

/// Severity bar: one filled cell per rank, six cells total.
pub fn format_severity_bar(band: Band, style: StyleMode, no_color: bool) -> String {
    let filled = usize::from(band.severity_rank()) + 1;
    let (on, off) = if style == StyleMode::Plain {
        ("#", ".")
    } else {
        ("█", "░")
    };
    let bar = format!("{}{}", on.repeat(filled), off.repeat(Band::ALL.len() - filled));
    paint_band(&bar, band, no_color)
}

/// Horizontal share bar, `width` cells for 100%.
pub fn format_share_bar(percent: u8, width: usize, style: StyleMode) -> String {
    let filled = (usize::from(percent.min(100)) * width + 50) / 100;
    let cell = if style == StyleMode::Plain { "#" } else { "▇" };
    cell.repeat(filled)
}

/// 1-5 rating as stars, or `n/5` in plain mode.
pub fn format_rating(rating: u8, style: StyleMode) -> String {
    let rating = rating.min(5) as usize;
    if style == StyleMode::Plain {
        format!("{}/5", rating)
    } else {
        format!("{}{}", "★".repeat(rating), "☆".repeat(5 - rating))
    }
}

/// Protection percentage colored by strength.
pub fn format_protection_colored(percent: u8, no_color: bool) -> String {
    let text = format!("{}%", percent);
    if no_color {
        text
    } else if percent >= 95 {
        format!("{}", text.green().bold())
    } else if percent >= 70 {
        format!("{}", text.yellow())
    } else {
        format!("{}", text.red())
    }
}

// ============================================================================
// Messages
// ============================================================================

/// Format a success message.
pub fn format_success(message: &str, no_color: bool) -> String {
    if no_color {
        format!("[OK] {}", message)
    } else {
        format!("{} {}", "[OK]".green(), message)
    }
}

/// Format a warning message.
pub fn format_warning(message: &str, no_color: bool) -> String {
    if no_color {
        format!("[!!] {}", message)
    } else {
        format!("{} {}", "[!!]".yellow(), message)
    }
}

/// Format a title header.
pub fn format_title(title: &str, style: StyleMode, no_color: bool) -> String {
    let rule = if style == StyleMode::Plain { "=" } else { "━" };
    let underline = rule.repeat(title.chars().count());
    if no_color {
        format!("{}\n{}", title, underline)
    } else {
        format!("{}\n{}", title.bold(), underline.dimmed())
    }
}

/// Format a dimmed key for key-value lines.
pub fn format_key(key: &str, no_color: bool) -> String {
    if no_color {
        key.to_string()
    } else {
        format!("{}", key.dimmed())
    }
}

/// Apply table style based on StyleMode.
pub fn apply_table_style(table: &mut tabled::Table, style: StyleMode) {
    use tabled::settings::Style;
    match style {
        StyleMode::Rich => {
            table.with(Style::rounded());
        }
        StyleMode::Minimal => {
            table.with(Style::psql());
        }
        StyleMode::Plain => {
            table.with(Style::blank());
        }
    }
}
