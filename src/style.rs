use ratatui::style::{Color, Modifier, Style as RatStyle};
use serde::{Deserialize, Serialize};

use crate::mode::Mode;
use crate::theme::ThemeMode;

/// Color that can be serialized/deserialized
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ThemeColor {
    /// Named color: "red", "blue", "cyan", etc.
    Named(NamedColor),
    /// RGB color: [255, 128, 0]
    Rgb([u8; 3]),
    /// 256-color index: 42
    Indexed(u8),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NamedColor {
    Black,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    Gray,
    DarkGray,
    LightRed,
    LightGreen,
    LightYellow,
    LightBlue,
    LightMagenta,
    LightCyan,
    White,
    Reset,
}

impl From<ThemeColor> for Color {
    fn from(tc: ThemeColor) -> Color {
        match tc {
            ThemeColor::Named(n) => match n {
                NamedColor::Black => Color::Black,
                NamedColor::Red => Color::Red,
                NamedColor::Green => Color::Green,
                NamedColor::Yellow => Color::Yellow,
                NamedColor::Blue => Color::Blue,
                NamedColor::Magenta => Color::Magenta,
                NamedColor::Cyan => Color::Cyan,
                NamedColor::Gray => Color::Gray,
                NamedColor::DarkGray => Color::DarkGray,
                NamedColor::LightRed => Color::LightRed,
                NamedColor::LightGreen => Color::LightGreen,
                NamedColor::LightYellow => Color::LightYellow,
                NamedColor::LightBlue => Color::LightBlue,
                NamedColor::LightMagenta => Color::LightMagenta,
                NamedColor::LightCyan => Color::LightCyan,
                NamedColor::White => Color::White,
                NamedColor::Reset => Color::Reset,
            },
            ThemeColor::Rgb([r, g, b]) => Color::Rgb(r, g, b),
            ThemeColor::Indexed(i) => Color::Indexed(i),
        }
    }
}

/// Style definition for a single element
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElementStyle {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fg: Option<ThemeColor>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bg: Option<ThemeColor>,
    #[serde(default)]
    pub bold: bool,
    #[serde(default)]
    pub underline: bool,
    #[serde(default)]
    pub dim: bool,
}

impl ElementStyle {
    pub fn fg(color: NamedColor) -> Self {
        Self { fg: Some(ThemeColor::Named(color)), ..Default::default() }
    }

    pub fn with_bg(mut self, color: NamedColor) -> Self {
        self.bg = Some(ThemeColor::Named(color));
        self
    }

    pub fn with_bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub fn with_dim(mut self) -> Self {
        self.dim = true;
        self
    }

    pub fn to_ratatui(&self) -> RatStyle {
        let mut style = RatStyle::default();
        if let Some(fg) = self.fg {
            style = style.fg(fg.into());
        }
        if let Some(bg) = self.bg {
            style = style.bg(bg.into());
        }
        if self.bold {
            style = style.add_modifier(Modifier::BOLD);
        }
        if self.underline {
            style = style.add_modifier(Modifier::UNDERLINED);
        }
        if self.dim {
            style = style.add_modifier(Modifier::DIM);
        }
        style
    }
}

/// Colors for one theme mode
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Palette {
    #[serde(default)]
    pub background: Option<ThemeColor>,

    #[serde(default)]
    pub cell: ElementStyle,
    #[serde(default)]
    pub cell_cursor: ElementStyle,
    #[serde(default)]
    pub header: ElementStyle,
    #[serde(default)]
    pub header_sorted: ElementStyle,
    #[serde(default)]
    pub header_cursor: ElementStyle,
    #[serde(default)]
    pub column_hidden: ElementStyle,

    #[serde(default)]
    pub status_bar: ElementStyle,
    #[serde(default)]
    pub status_mode_normal: ElementStyle,
    #[serde(default)]
    pub status_mode_filter: ElementStyle,
    #[serde(default)]
    pub filter_status: ElementStyle,
    #[serde(default)]
    pub message_info: ElementStyle,
    #[serde(default)]
    pub message_warning: ElementStyle,
    #[serde(default)]
    pub command_line: ElementStyle,
}

impl Palette {
    pub fn dark() -> Self {
        use NamedColor::*;
        Self {
            background: Some(ThemeColor::Named(Black)),
            cell: ElementStyle::fg(White),
            cell_cursor: ElementStyle::fg(Black).with_bg(LightCyan).with_bold(),
            header: ElementStyle::fg(LightGreen).with_bold(),
            header_sorted: ElementStyle::fg(LightYellow).with_bold(),
            header_cursor: ElementStyle::fg(Black).with_bg(LightGreen).with_bold(),
            column_hidden: ElementStyle::fg(DarkGray).with_dim(),
            status_bar: ElementStyle::fg(White).with_bg(DarkGray),
            status_mode_normal: ElementStyle::fg(Black).with_bg(LightBlue).with_bold(),
            status_mode_filter: ElementStyle::fg(Black).with_bg(LightYellow).with_bold(),
            filter_status: ElementStyle::fg(LightBlue).with_bold(),
            message_info: ElementStyle::fg(White),
            message_warning: ElementStyle::fg(LightYellow),
            command_line: ElementStyle::fg(White),
        }
    }

    pub fn light() -> Self {
        use NamedColor::*;
        Self {
            background: None, // Use terminal default
            cell: ElementStyle::fg(Black),
            cell_cursor: ElementStyle::fg(White).with_bg(Blue).with_bold(),
            header: ElementStyle::fg(Blue).with_bold(),
            header_sorted: ElementStyle::fg(Magenta).with_bold(),
            header_cursor: ElementStyle::fg(White).with_bg(Blue).with_bold(),
            column_hidden: ElementStyle::fg(Gray).with_dim(),
            status_bar: ElementStyle::fg(Black).with_bg(Gray),
            status_mode_normal: ElementStyle::fg(White).with_bg(Blue).with_bold(),
            status_mode_filter: ElementStyle::fg(Black).with_bg(Yellow).with_bold(),
            filter_status: ElementStyle::fg(Blue).with_bold(),
            message_info: ElementStyle::fg(Black),
            message_warning: ElementStyle::fg(Red),
            command_line: ElementStyle::fg(Black),
        }
    }
}

/// Palettes for both modes, with user overrides applied
#[derive(Clone, Debug, Default, Deserialize)]
pub struct PaletteOverrides {
    #[serde(default)]
    pub dark: Option<Palette>,
    #[serde(default)]
    pub light: Option<Palette>,
}

/// Runtime style manager
pub struct Style {
    dark: Palette,
    light: Palette,
    mode: ThemeMode,
}

impl Style {
    pub fn new(mode: ThemeMode, overrides: &PaletteOverrides) -> Self {
        Self {
            dark: overrides.dark.clone().unwrap_or_else(Palette::dark),
            light: overrides.light.clone().unwrap_or_else(Palette::light),
            mode,
        }
    }

    pub fn set_mode(&mut self, mode: ThemeMode) {
        self.mode = mode;
    }

    pub fn palette(&self) -> &Palette {
        match self.mode {
            ThemeMode::Dark => &self.dark,
            ThemeMode::Light => &self.light,
        }
    }

    // Convenience accessors that return ratatui styles
    pub fn cell(&self) -> RatStyle {
        self.palette().cell.to_ratatui()
    }

    pub fn cell_cursor(&self) -> RatStyle {
        self.palette().cell_cursor.to_ratatui()
    }

    pub fn header(&self, sorted: bool, cursor: bool) -> RatStyle {
        let p = self.palette();
        match (cursor, sorted) {
            (true, _) => p.header_cursor.to_ratatui(),
            (false, true) => p.header_sorted.to_ratatui(),
            (false, false) => p.header.to_ratatui(),
        }
    }

    pub fn column_hidden(&self) -> RatStyle {
        self.palette().column_hidden.to_ratatui()
    }

    pub fn status_bar(&self) -> RatStyle {
        self.palette().status_bar.to_ratatui()
    }

    pub fn status_mode(&self, mode: Mode) -> RatStyle {
        match mode {
            Mode::Normal => self.palette().status_mode_normal.to_ratatui(),
            Mode::Filter => self.palette().status_mode_filter.to_ratatui(),
        }
    }

    pub fn filter_status(&self) -> RatStyle {
        self.palette().filter_status.to_ratatui()
    }

    pub fn message_info(&self) -> RatStyle {
        self.palette().message_info.to_ratatui()
    }

    pub fn message_warning(&self) -> RatStyle {
        self.palette().message_warning.to_ratatui()
    }

    pub fn command_line(&self) -> RatStyle {
        self.palette().command_line.to_ratatui()
    }

    pub fn background(&self) -> Option<Color> {
        self.palette().background.map(|c| c.into())
    }
}
