// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Sseqed-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Sseqed and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::env;

use ratatui::style::{Color, Modifier, Style};
use thiserror::Error;

use crate::render::Rgba;

const PALETTE_ENV: &str = "SSEQED_TUI_PALETTE";

/// Canvas colors darker than this are drawn in the terminal's foreground color instead.
const DARK_LUMA_THRESHOLD: u32 = 0x50;

#[derive(Debug, Clone, Default)]
pub(crate) struct TuiTheme {
    palette: Option<TuiPalette>,
}

impl TuiTheme {
    pub(crate) fn from_env() -> Result<Self, ThemeError> {
        let palette = palette_override_from_env()?;
        Ok(Self { palette })
    }

    pub(crate) fn base_style(&self) -> Style {
        match &self.palette {
            Some(palette) => Style::default().fg(palette.fg).bg(palette.bg),
            None => Style::default(),
        }
    }

    fn ansi_color(&self, color: Ansi16) -> Color {
        match &self.palette {
            Some(palette) => palette.ansi_color(color.idx()),
            None => color.into(),
        }
    }

    pub(crate) fn panel_border_style(&self, focused: bool) -> Style {
        if focused {
            self.base_style().fg(self.ansi_color(Ansi16::BrightGreen))
        } else {
            self.base_style().fg(self.ansi_color(Ansi16::BrightBlack))
        }
    }

    pub(crate) fn footer_label_style(&self) -> Style {
        self.base_style().fg(self.ansi_color(Ansi16::White))
    }

    pub(crate) fn footer_value_style(&self, enabled: bool) -> Style {
        let color = if enabled { Ansi16::Cyan } else { Ansi16::BrightBlack };
        self.base_style()
            .fg(self.ansi_color(color))
            .add_modifier(Modifier::BOLD)
    }

    pub(crate) fn selection_style(&self) -> Style {
        self.base_style()
            .fg(self.ansi_color(Ansi16::BrightYellow))
            .add_modifier(Modifier::BOLD)
    }

    pub(crate) fn label_style(&self) -> Style {
        self.base_style().add_modifier(Modifier::BOLD)
    }

    pub(crate) fn error_style(&self) -> Style {
        self.base_style().fg(self.ansi_color(Ansi16::Red))
    }

    /// Maps a canvas color onto the terminal.
    ///
    /// Translucent fills become dim gray and near-black strokes take the foreground color, so the
    /// chart stays readable on dark backgrounds.
    pub(crate) fn canvas_color(&self, color: Rgba) -> Color {
        if color.a < 0xff {
            return self.ansi_color(Ansi16::BrightBlack);
        }
        let luma = (u32::from(color.r) * 299 + u32::from(color.g) * 587 + u32::from(color.b) * 114)
            / 1000;
        if luma < DARK_LUMA_THRESHOLD {
            return match &self.palette {
                Some(palette) => palette.fg,
                None => Color::Reset,
            };
        }
        Color::Rgb(color.r, color.g, color.b)
    }
}

#[derive(Debug, Clone)]
struct TuiPalette {
    fg: Color,
    bg: Color,
    ansi: [Color; 16],
}

impl TuiPalette {
    const CSV_LEN: usize = 18;

    fn parse_csv(value: &str) -> Result<Self, String> {
        let parts: Vec<&str> = value.split(',').map(str::trim).collect();
        if parts.len() != Self::CSV_LEN {
            return Err(format!(
                "expected {} comma-separated colors (fg,bg, then the 16 ansi colors), got {}",
                Self::CSV_LEN,
                parts.len()
            ));
        }

        let fg = parse_palette_color(parts[0])?;
        let bg = parse_palette_color(parts[1])?;

        let mut ansi = [Color::Reset; 16];
        for (slot, part) in ansi.iter_mut().zip(&parts[2..]) {
            *slot = parse_palette_color(part)?;
        }

        Ok(Self { fg, bg, ansi })
    }

    fn ansi_color(&self, idx: usize) -> Color {
        self.ansi[idx]
    }
}

fn palette_override_from_env() -> Result<Option<TuiPalette>, ThemeError> {
    let value = match env::var(PALETTE_ENV) {
        Ok(value) => value,
        Err(env::VarError::NotPresent) => return Ok(None),
        Err(env::VarError::NotUnicode(_)) => {
            return Err(ThemeError::InvalidEnv {
                name: PALETTE_ENV.to_owned(),
                value: "<non-unicode>".to_owned(),
            });
        }
    };

    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    let parsed = TuiPalette::parse_csv(trimmed).map_err(|error| ThemeError::InvalidEnv {
        name: PALETTE_ENV.to_owned(),
        value: format!("{trimmed} ({error})"),
    })?;
    Ok(Some(parsed))
}

fn parse_palette_color(value: &str) -> Result<Color, String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err("empty color".to_owned());
    }

    let hex = trimmed
        .strip_prefix('#')
        .or_else(|| trimmed.strip_prefix("0x"))
        .unwrap_or(trimmed);
    if hex.len() != 6 || !hex.chars().all(|ch| ch.is_ascii_hexdigit()) {
        return Err(format!("invalid hex color: {trimmed} (expected #RRGGBB)"));
    }

    let rgb = u32::from_str_radix(hex, 16).map_err(|_| format!("invalid hex color: {trimmed}"))?;
    Ok(Color::Rgb((rgb >> 16) as u8, (rgb >> 8) as u8, rgb as u8))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Ansi16 {
    Red,
    Cyan,
    White,
    BrightBlack,
    BrightGreen,
    BrightYellow,
}

impl Ansi16 {
    const fn idx(self) -> usize {
        match self {
            Self::Red => 1,
            Self::Cyan => 6,
            Self::White => 7,
            Self::BrightBlack => 8,
            Self::BrightGreen => 10,
            Self::BrightYellow => 11,
        }
    }
}

impl From<Ansi16> for Color {
    fn from(value: Ansi16) -> Self {
        match value {
            Ansi16::Red => Color::Red,
            Ansi16::Cyan => Color::Cyan,
            Ansi16::White => Color::Gray,
            Ansi16::BrightBlack => Color::DarkGray,
            Ansi16::BrightGreen => Color::LightGreen,
            Ansi16::BrightYellow => Color::LightYellow,
        }
    }
}

#[derive(Debug, Clone, Error)]
pub(crate) enum ThemeError {
    #[error("invalid env {name}={value}")]
    InvalidEnv { name: String, value: String },
}
