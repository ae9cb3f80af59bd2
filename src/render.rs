// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Terminal display of braids and knots.
//!
//! Display only: nothing here feeds back into generation. The glyphs drawn by
//! the mobile end can be coloured, and steps can be paced
//! with a delay to animate the tumble.

use std::io::{self, Write};
use std::str::FromStr;
use std::thread;
use std::time::Duration;

use colored::{Color, Colorize};
use rand::seq::IteratorRandom;
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter, EnumString};

use crate::geometry::{Diagram, Row};
use crate::invariants::Invariants;
use crate::tumble::Step;

/// Foreground colours for the mobile end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum TermColor {
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    White,
}

impl From<TermColor> for Color {
    fn from(color: TermColor) -> Self {
        match color {
            TermColor::Red => Color::Red,
            TermColor::Green => Color::Green,
            TermColor::Yellow => Color::Yellow,
            TermColor::Blue => Color::Blue,
            TermColor::Magenta => Color::Magenta,
            TermColor::Cyan => Color::Cyan,
            TermColor::White => Color::White,
        }
    }
}

impl TermColor {
    /// A colour picked at random, independently of any run's draws.
    pub fn random() -> Self {
        TermColor::iter()
            .choose(&mut rand::thread_rng())
            .unwrap_or(TermColor::White)
    }
}

/// The `--color` setting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorChoice {
    #[default]
    Plain,
    Fixed(TermColor),
    /// A fresh colour for each run.
    Random,
}

impl ColorChoice {
    /// The colour to use for one run.
    pub fn pick(self) -> Option<TermColor> {
        match self {
            ColorChoice::Plain => None,
            ColorChoice::Fixed(color) => Some(color),
            ColorChoice::Random => Some(TermColor::random()),
        }
    }
}

impl FromStr for ColorChoice {
    type Err = String;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        match text.to_ascii_lowercase().as_str() {
            "none" | "plain" => Ok(ColorChoice::Plain),
            "random" => Ok(ColorChoice::Random),
            other => other.parse::<TermColor>().map(ColorChoice::Fixed).map_err(|_| {
                let names: Vec<String> = TermColor::iter().map(|c| c.to_string()).collect();
                format!(
                    "unknown colour {:?}; expected one of {}, random or none",
                    text,
                    names.join(", ")
                )
            }),
        }
    }
}

/// Display settings shared by every run.
#[derive(Debug, Clone, Default)]
pub struct RenderConfig {
    pub color: ColorChoice,
    /// Pause after each displayed step.
    pub delay: Option<Duration>,
    pub quiet: bool,
}

impl RenderConfig {
    /// A renderer for one run, with its colour fixed.
    pub fn renderer(&self) -> Renderer {
        Renderer {
            color: self.color.pick(),
            delay: self.delay,
            quiet: self.quiet,
        }
    }
}

/// Prints rows to stdout.
#[derive(Debug, Clone, Default)]
pub struct Renderer {
    color: Option<TermColor>,
    delay: Option<Duration>,
    quiet: bool,
}

impl Renderer {
    pub fn color(&self) -> Option<TermColor> {
        self.color
    }

    pub fn is_quiet(&self) -> bool {
        self.quiet
    }

    /// `row` as text, with mobile glyphs coloured.
    pub fn paint(&self, row: &Row) -> String {
        let Some(color) = self.color else {
            return row.to_string();
        };
        let color = Color::from(color);
        row.iter()
            .map(|cell| {
                let glyph = cell.glyph().to_string();
                if cell.is_mobile() {
                    glyph.color(color).to_string()
                } else {
                    glyph
                }
            })
            .collect()
    }

    pub fn rows(&self, rows: &[Row]) {
        if self.quiet {
            return;
        }
        let stdout = io::stdout();
        let mut out = stdout.lock();
        for row in rows {
            // Display only: write errors are ignored.
            let _ = writeln!(out, "{}", self.paint(row));
        }
    }

    /// Show one step, then pause if a delay is set.
    pub fn step(&self, step: &Step) {
        if self.quiet {
            return;
        }
        self.rows(&[step.crossing.clone(), step.next.clone()]);
        if let Some(delay) = self.delay {
            thread::sleep(delay);
        }
    }

    /// A whole diagram, uncoloured, followed by a blank line.
    pub fn diagram(&self, diagram: &Diagram) {
        if self.quiet {
            return;
        }
        let _ = writeln!(io::stdout().lock(), "{}", diagram);
    }

    pub fn invariants(&self, invariants: &Invariants) {
        if self.quiet {
            return;
        }
        let _ = writeln!(io::stdout().lock(), "{}", invariants);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_choice_parsing() {
        assert_eq!("random".parse::<ColorChoice>(), Ok(ColorChoice::Random));
        assert_eq!(
            "Cyan".parse::<ColorChoice>(),
            Ok(ColorChoice::Fixed(TermColor::Cyan))
        );
        assert_eq!("none".parse::<ColorChoice>(), Ok(ColorChoice::Plain));
        assert!("black".parse::<ColorChoice>().is_err());
    }

    #[test]
    fn test_paint_only_mobile_glyphs() {
        let renderer = RenderConfig {
            color: ColorChoice::Fixed(TermColor::Red),
            ..RenderConfig::default()
        }
        .renderer();
        let row: Row = " │┏━┛".parse().unwrap();
        colored::control::set_override(true);
        let red = |glyph: &str| glyph.red().to_string();
        assert_eq!(
            renderer.paint(&row),
            format!(" │{}{}{}", red("┏"), red("━"), red("┛"))
        );
        assert!(renderer.paint(&row).contains("\x1b[31m"));
    }

    #[test]
    fn test_plain_paint_is_text() {
        let row: Row = " │ │┃".parse().unwrap();
        assert_eq!(Renderer::default().paint(&row), " │ │┃");
    }

    #[test]
    fn test_random_pick_is_a_colour() {
        let picked = RenderConfig {
            color: ColorChoice::Random,
            ..RenderConfig::default()
        }
        .renderer()
        .color();
        assert!(picked.is_some());
    }
}
