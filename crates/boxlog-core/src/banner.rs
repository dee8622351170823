//! Startup logo.

use std::io::{self, Write};

use crossterm::style::Color;

use crate::frame::Painter;

const LOGO: [&str; 6] = [
    r" _                _             ",
    r"| |__   _____  __| | ___   __ _ ",
    r"| '_ \ / _ \ \/ /| |/ _ \ / _` |",
    r"| |_) | (_) >  < | | (_) | (_| |",
    r"|_.__/ \___/_/\_\|_|\___/ \__, |",
    r"                          |___/ ",
];

const PLATE_TOP: &str = "open source";
const PLATE_BOTTOM: &str = "free logger";

const LOGO_WIDTH: usize = 57;
const PLATE_WIDTH: usize = 29;

fn centered(text: &str, width: usize) -> String {
    let len = text.chars().count();
    let left = width.saturating_sub(len) / 2;
    let right = width.saturating_sub(len + left);
    format!("{}{}{}", " ".repeat(left), text, " ".repeat(right))
}

/// Print the boxed logo and the description plate.
pub fn show(out: &mut dyn Write, painter: &Painter<'_>) -> io::Result<()> {
    let frame = |s: &str| painter.paint_color(Color::DarkBlue, s);
    let plate = |s: &str| painter.paint_color(Color::DarkYellow, s);
    let text = |s: &str| painter.paint_color(Color::White, s);

    let indent = " ".repeat(8);
    writeln!(out)?;
    writeln!(out, "{}{}", indent, frame(&format!("╔{}╗", "═".repeat(LOGO_WIDTH))))?;
    writeln!(out, "{}{}", indent, frame(&format!("║{}║", " ".repeat(LOGO_WIDTH))))?;
    for line in LOGO {
        writeln!(
            out,
            "{}{}{}{}",
            indent,
            frame("║"),
            text(&centered(line, LOGO_WIDTH)),
            frame("║")
        )?;
    }
    writeln!(out, "{}{}", indent, frame(&format!("║{}║", " ".repeat(LOGO_WIDTH))))?;
    writeln!(out, "{}{}", indent, frame(&format!("╚{}╝", "═".repeat(LOGO_WIDTH))))?;

    let indent = " ".repeat(8 + (LOGO_WIDTH - PLATE_WIDTH) / 2);
    writeln!(out)?;
    writeln!(out, "{}{}", indent, plate(&format!("╔{}╗", "═".repeat(PLATE_WIDTH))))?;
    writeln!(
        out,
        "{}{}{}{}",
        indent,
        plate("║"),
        text(&centered(PLATE_TOP, PLATE_WIDTH)),
        plate("║")
    )?;
    writeln!(out, "{}{}", indent, plate(&format!("╠{}╣", "═".repeat(PLATE_WIDTH))))?;
    writeln!(
        out,
        "{}{}{}{}",
        indent,
        plate("║"),
        text(&centered(PLATE_BOTTOM, PLATE_WIDTH)),
        plate("║")
    )?;
    writeln!(out, "{}{}", indent, plate(&format!("╚{}╝", "═".repeat(PLATE_WIDTH))))?;
    writeln!(out)?;
    out.flush()
}
