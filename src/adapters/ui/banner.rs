//! WIKIQUIZ banner printed once at TUI startup.
//!
//! The figlet art is split into four vertical bands, one per answer letter,
//! and a legend of the letters sits under it.

use crossterm::ExecutableCommand;
use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};
use figlet_rs::FIGfont;
use std::io::{Write, stdout};

/// Colour per answer letter, in A..D order.
const ANSWER_COLORS: [(char, Color); 4] = [
    ('A', Color::Rgb { r: 0x33, g: 0x66, b: 0xcc }),
    ('B', Color::Rgb { r: 0x00, g: 0xaf, b: 0x89 }),
    ('C', Color::Rgb { r: 0xfc, g: 0x3f, b: 0x4d }),
    ('D', Color::Rgb { r: 0xed, g: 0xab, b: 0x00 }),
];

/// Figlet art for `text` in the standard font, falling back to plain text.
fn render_art(text: &str) -> String {
    FIGfont::standard()
        .ok()
        .and_then(|font| font.convert(text).map(|figure| figure.to_string()))
        .unwrap_or_else(|| text.to_string())
}

/// Index of the band that column `col` falls in, for art `width` columns wide.
fn band_of(col: usize, width: usize) -> usize {
    if width == 0 {
        return 0;
    }
    (col * ANSWER_COLORS.len() / width).min(ANSWER_COLORS.len() - 1)
}

/// Split a line into runs of (band, text).
fn banded(line: &str, width: usize) -> Vec<(usize, String)> {
    let mut runs: Vec<(usize, String)> = Vec::new();
    for (col, ch) in line.chars().enumerate() {
        let band = band_of(col, width);
        match runs.last_mut() {
            Some((last, text)) if *last == band => text.push(ch),
            _ => runs.push((band, ch.to_string())),
        }
    }
    runs
}

/// Prints "WIKIQUIZ" in four answer-coloured bands, the A-D legend and the version.
pub fn print_welcome() {
    let mut out = stdout();
    let art = render_art("WIKIQUIZ");
    let width = art.lines().map(|l| l.chars().count()).max().unwrap_or(0);

    for line in art.lines() {
        for (band, text) in banded(line, width) {
            let _ = out.execute(SetForegroundColor(ANSWER_COLORS[band].1));
            let _ = out.execute(Print(text));
        }
        let _ = out.execute(ResetColor);
        let _ = out.execute(Print("\r\n"));
    }

    for (letter, color) in ANSWER_COLORS {
        let _ = out.execute(SetForegroundColor(color));
        let _ = out.execute(Print(format!(" [{}]", letter)));
    }
    let _ = out.execute(ResetColor);
    let _ = out.execute(Print(format!(
        "  v{} · quizzes from Wikipedia articles\r\n",
        env!("CARGO_PKG_VERSION")
    )));
    let _ = out.flush();
}
