//! Midnight theme and palette helpers.

use colloquy_core::{ColorScheme, TurnRole};
use ratatui::style::Color;

#[derive(Debug, Clone, Copy)]
pub struct MidnightTheme {
    pub primary: Color,
    pub secondary: Color,
    pub accent: Color,
    pub error: Color,
    pub success: Color,
    pub muted: Color,
}

impl MidnightTheme {
    pub fn midnight() -> Self {
        Self {
            primary: Color::Cyan,
            secondary: Color::Blue,
            accent: Color::Magenta,
            error: Color::Red,
            success: Color::Green,
            muted: Color::DarkGray,
        }
    }
}

/// Terminal color for an agent's catalog palette tag.
pub fn scheme_color(scheme: ColorScheme) -> Color {
    match scheme {
        ColorScheme::Emerald => Color::Green,
        ColorScheme::Purple => Color::Magenta,
        ColorScheme::Blue => Color::Blue,
        ColorScheme::Orange => Color::Yellow,
        ColorScheme::Cyan => Color::Cyan,
        ColorScheme::Rose => Color::LightRed,
    }
}

pub fn turn_role_color(role: TurnRole, theme: &MidnightTheme) -> Color {
    match role {
        TurnRole::User => theme.primary,
        TurnRole::Assistant => theme.success,
    }
}
