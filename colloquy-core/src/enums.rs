//! Enumerated tags shared across the client.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Visual palette tag attached to an agent row.
///
/// The catalog stores these as lowercase strings. Unknown tags fall back to
/// [`ColorScheme::Blue`], matching the hosted catalog's default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ColorScheme {
    Emerald,
    Purple,
    #[default]
    Blue,
    Orange,
    Cyan,
    Rose,
}

impl ColorScheme {
    /// Convert to database string representation.
    pub fn as_db_str(&self) -> &'static str {
        match self {
            ColorScheme::Emerald => "emerald",
            ColorScheme::Purple => "purple",
            ColorScheme::Blue => "blue",
            ColorScheme::Orange => "orange",
            ColorScheme::Cyan => "cyan",
            ColorScheme::Rose => "rose",
        }
    }

    /// Parse a database string, defaulting to blue for unrecognized tags.
    pub fn from_db_str_or_default(s: &str) -> Self {
        match s {
            "emerald" => ColorScheme::Emerald,
            "purple" => ColorScheme::Purple,
            "blue" => ColorScheme::Blue,
            "orange" => ColorScheme::Orange,
            "cyan" => ColorScheme::Cyan,
            "rose" => ColorScheme::Rose,
            _ => ColorScheme::default(),
        }
    }
}

impl fmt::Display for ColorScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_db_str())
    }
}

/// Glyph tag selecting the icon shown on an agent card.
///
/// Unknown tags fall back to [`IconGlyph::Stethoscope`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum IconGlyph {
    #[default]
    Stethoscope,
    Sparkles,
    Lightbulb,
    GraduationCap,
    TrendingUp,
    Palette,
}

impl IconGlyph {
    /// Convert to database string representation.
    pub fn as_db_str(&self) -> &'static str {
        match self {
            IconGlyph::Stethoscope => "Stethoscope",
            IconGlyph::Sparkles => "Sparkles",
            IconGlyph::Lightbulb => "Lightbulb",
            IconGlyph::GraduationCap => "GraduationCap",
            IconGlyph::TrendingUp => "TrendingUp",
            IconGlyph::Palette => "Palette",
        }
    }

    /// Parse a database string, defaulting to the stethoscope glyph.
    pub fn from_db_str_or_default(s: &str) -> Self {
        match s {
            "Stethoscope" => IconGlyph::Stethoscope,
            "Sparkles" => IconGlyph::Sparkles,
            "Lightbulb" => IconGlyph::Lightbulb,
            "GraduationCap" => IconGlyph::GraduationCap,
            "TrendingUp" => IconGlyph::TrendingUp,
            "Palette" => IconGlyph::Palette,
            _ => IconGlyph::default(),
        }
    }

    /// Terminal-friendly symbol for the glyph.
    pub fn symbol(&self) -> &'static str {
        match self {
            IconGlyph::Stethoscope => "⚕",
            IconGlyph::Sparkles => "✦",
            IconGlyph::Lightbulb => "💡",
            IconGlyph::GraduationCap => "🎓",
            IconGlyph::TrendingUp => "📈",
            IconGlyph::Palette => "🎨",
        }
    }
}

impl fmt::Display for IconGlyph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_db_str())
    }
}

/// Attribution of a transcript turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TurnRole {
    User,
    Assistant,
}

impl TurnRole {
    /// Convert to database string representation.
    pub fn as_db_str(&self) -> &'static str {
        match self {
            TurnRole::User => "user",
            TurnRole::Assistant => "assistant",
        }
    }

    /// Parse from database string representation.
    pub fn from_db_str(s: &str) -> Result<Self, TurnRoleParseError> {
        match s {
            "user" => Ok(TurnRole::User),
            "assistant" => Ok(TurnRole::Assistant),
            _ => Err(TurnRoleParseError(s.to_string())),
        }
    }
}

impl fmt::Display for TurnRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_db_str())
    }
}

impl FromStr for TurnRole {
    type Err = TurnRoleParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_db_str(s)
    }
}

/// Error when parsing an invalid turn role string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid turn role: {0}")]
pub struct TurnRoleParseError(pub String);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn color_scheme_round_trips() {
        for scheme in [
            ColorScheme::Emerald,
            ColorScheme::Purple,
            ColorScheme::Blue,
            ColorScheme::Orange,
            ColorScheme::Cyan,
            ColorScheme::Rose,
        ] {
            assert_eq!(
                ColorScheme::from_db_str_or_default(scheme.as_db_str()),
                scheme
            );
        }
    }

    #[test]
    fn unknown_color_scheme_defaults_to_blue() {
        assert_eq!(
            ColorScheme::from_db_str_or_default("chartreuse"),
            ColorScheme::Blue
        );
    }

    #[test]
    fn icon_glyph_round_trips() {
        for glyph in [
            IconGlyph::Stethoscope,
            IconGlyph::Sparkles,
            IconGlyph::Lightbulb,
            IconGlyph::GraduationCap,
            IconGlyph::TrendingUp,
            IconGlyph::Palette,
        ] {
            assert_eq!(IconGlyph::from_db_str_or_default(glyph.as_db_str()), glyph);
        }
    }

    #[test]
    fn unknown_icon_defaults_to_stethoscope() {
        assert_eq!(
            IconGlyph::from_db_str_or_default("Abacus"),
            IconGlyph::Stethoscope
        );
    }

    #[test]
    fn turn_role_rejects_unknown_strings() {
        assert_eq!(TurnRole::from_db_str("user"), Ok(TurnRole::User));
        assert_eq!(TurnRole::from_db_str("assistant"), Ok(TurnRole::Assistant));
        assert!(TurnRole::from_db_str("system").is_err());
    }
}
