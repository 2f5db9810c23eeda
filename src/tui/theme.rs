// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Pathgrid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Pathgrid and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::{env, error::Error, fmt};

use ratatui::style::{Color, Modifier, Style};

use crate::model::{Cell, CellType};

const PALETTE_ENV: &str = "PATHGRID_PALETTE";
const ROLE_COUNT: usize = 8;

/// Colors for grid cells and chrome, optionally overridden from `PATHGRID_PALETTE`.
#[derive(Debug, Clone, Default)]
pub(crate) struct TuiTheme {
    palette: Option<TuiPalette>,
}

impl TuiTheme {
    pub(crate) fn from_env() -> Result<Self, ThemeError> {
        let palette = palette_from_env()?;
        Ok(Self { palette })
    }

    fn color(&self, role: PaletteRole, fallback: Color) -> Color {
        match &self.palette {
            Some(palette) => palette.get(role),
            None => fallback,
        }
    }

    pub(crate) fn base_style(&self) -> Style {
        Style::default()
            .fg(self.color(PaletteRole::Fg, Color::Gray))
            .bg(self.color(PaletteRole::Bg, Color::Reset))
    }

    /// Style of a grid cell. Base type wins over marks, on-path wins over visited.
    pub(crate) fn cell_style(&self, cell: &Cell) -> Style {
        let base = self.base_style();
        match cell.cell_type {
            CellType::Source => {
                return base
                    .fg(Color::Black)
                    .bg(self.color(PaletteRole::Source, Color::Green))
                    .add_modifier(Modifier::BOLD);
            }
            CellType::Target => {
                return base
                    .fg(Color::Black)
                    .bg(self.color(PaletteRole::Target, Color::Red))
                    .add_modifier(Modifier::BOLD);
            }
            CellType::Wall => return base.fg(self.color(PaletteRole::Wall, Color::White)),
            CellType::Weight | CellType::Empty => {}
        }

        let style = if cell.cell_type == CellType::Weight {
            base.fg(self.color(PaletteRole::Weight, Color::Magenta)).add_modifier(Modifier::BOLD)
        } else {
            base.fg(Color::DarkGray)
        };
        if cell.on_path {
            style.fg(Color::Black).bg(self.color(PaletteRole::Path, Color::Yellow))
        } else if cell.visited {
            style.fg(Color::Black).bg(self.color(PaletteRole::Visited, Color::Cyan))
        } else {
            style
        }
    }

    pub(crate) fn cursor_style(&self, style: Style) -> Style {
        style.add_modifier(Modifier::REVERSED)
    }

    pub(crate) fn warning_style(&self) -> Style {
        self.base_style()
            .fg(self.color(PaletteRole::Target, Color::LightRed))
            .add_modifier(Modifier::BOLD)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PaletteRole {
    Fg,
    Bg,
    Source,
    Target,
    Wall,
    Weight,
    Visited,
    Path,
}

impl PaletteRole {
    const fn idx(self) -> usize {
        match self {
            Self::Fg => 0,
            Self::Bg => 1,
            Self::Source => 2,
            Self::Target => 3,
            Self::Wall => 4,
            Self::Weight => 5,
            Self::Visited => 6,
            Self::Path => 7,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct TuiPalette {
    colors: [Color; ROLE_COUNT],
}

impl TuiPalette {
    fn parse_csv(value: &str) -> Result<Self, String> {
        let parts: Vec<&str> = value.split(',').map(str::trim).collect();
        if parts.len() != ROLE_COUNT {
            return Err(format!(
                "expected {} comma-separated colors (fg,bg,source,target,wall,weight,visited,path), got {}",
                ROLE_COUNT,
                parts.len()
            ));
        }

        let mut colors = [Color::Reset; ROLE_COUNT];
        for (slot, part) in colors.iter_mut().zip(parts) {
            *slot = parse_palette_color(part)?;
        }
        Ok(Self { colors })
    }

    fn get(&self, role: PaletteRole) -> Color {
        self.colors[role.idx()]
    }
}

fn palette_from_env() -> Result<Option<TuiPalette>, ThemeError> {
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
    TuiPalette::parse_csv(trimmed).map(Some).map_err(|error| ThemeError::InvalidEnv {
        name: PALETTE_ENV.to_owned(),
        value: format!("{trimmed} ({error})"),
    })
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

#[derive(Debug, Clone)]
pub(crate) enum ThemeError {
    InvalidEnv { name: String, value: String },
}

impl fmt::Display for ThemeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidEnv { name, value } => write!(f, "invalid env {name}={value}"),
        }
    }
}

impl Error for ThemeError {}
