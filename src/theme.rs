//! # Theme Labels
//!
//! The closed set of playlist themes Skymuse can choose from. Every theme maps
//! to exactly one music directory (see [`crate::config::ThemeDirectoryMap`]).
//!
//! Theme names are kebab-case everywhere they leave the program: in the
//! config file and in printed output. Parsing ignores case.

use std::fmt;
use std::str::FromStr;

/// A playlist theme.
///
/// The discriminants are dense and start at zero so a theme can index a
/// fixed-size table directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ThemeLabel {
    Morning,
    Evening,
    FullMoon,
    HeatWave,
    ColdWave,
    RainyDay,
    Spring,
    Summer,
    Autumn,
    Winter,
}

impl ThemeLabel {
    /// Number of themes.
    pub const COUNT: usize = 10;

    /// Every theme, in declaration order.
    pub const ALL: [ThemeLabel; Self::COUNT] = [
        ThemeLabel::Morning,
        ThemeLabel::Evening,
        ThemeLabel::FullMoon,
        ThemeLabel::HeatWave,
        ThemeLabel::ColdWave,
        ThemeLabel::RainyDay,
        ThemeLabel::Spring,
        ThemeLabel::Summer,
        ThemeLabel::Autumn,
        ThemeLabel::Winter,
    ];

    /// Config and command-line name, e.g. `rainy-day`.
    pub fn as_str(self) -> &'static str {
        match self {
            ThemeLabel::Morning => "morning",
            ThemeLabel::Evening => "evening",
            ThemeLabel::FullMoon => "full-moon",
            ThemeLabel::HeatWave => "heat-wave",
            ThemeLabel::ColdWave => "cold-wave",
            ThemeLabel::RainyDay => "rainy-day",
            ThemeLabel::Spring => "spring",
            ThemeLabel::Summer => "summer",
            ThemeLabel::Autumn => "autumn",
            ThemeLabel::Winter => "winter",
        }
    }

    /// Human readable name, e.g. `Rainy Day`.
    pub fn display_name(self) -> String {
        title_case(self.as_str(), '-')
    }

    /// Position in [`ThemeLabel::ALL`].
    pub fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for ThemeLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ThemeLabel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        ThemeLabel::ALL
            .into_iter()
            .find(|theme| theme.as_str() == wanted)
            .ok_or_else(|| format!("unknown theme `{s}`"))
    }
}

/// Turn `separator`-joined words into capitalized, space-joined words.
///
/// `"waning_gibbous"` with `'_'` becomes `"Waning Gibbous"`.
pub fn title_case(text: &str, separator: char) -> String {
    text.split(separator)
        .filter(|word| !word.is_empty())
        .map(|word| {
            let lower = word.to_lowercase();
            let mut chars = lower.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_is_indexed_by_discriminant() {
        for (i, theme) in ThemeLabel::ALL.iter().enumerate() {
            assert_eq!(theme.index(), i);
        }
    }

    #[test]
    fn test_names_round_trip_through_from_str() {
        for theme in ThemeLabel::ALL {
            assert_eq!(theme.as_str().parse::<ThemeLabel>(), Ok(theme));
        }
        assert_eq!("Full-Moon".parse::<ThemeLabel>(), Ok(ThemeLabel::FullMoon));
        assert!("monsoon".parse::<ThemeLabel>().is_err());
    }

    #[test]
    fn test_display_name() {
        assert_eq!(ThemeLabel::RainyDay.display_name(), "Rainy Day");
        assert_eq!(ThemeLabel::Winter.display_name(), "Winter");
    }

    #[test]
    fn test_title_case_moon_phase() {
        assert_eq!(title_case("WANING_GIBBOUS", '_'), "Waning Gibbous");
        assert_eq!(title_case("full_moon", '_'), "Full Moon");
        assert_eq!(title_case("", '_'), "");
    }
}
