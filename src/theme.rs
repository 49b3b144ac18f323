use std::fmt;

use anyhow::{bail, Result};

/// Visual style variant of an icon family. Each theme gets its own output directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Theme {
    Filled,
    Outlined,
    Rounded,
    TwoTone,
    Sharp,
}

impl Theme {
    pub const ALL: [Theme; 5] = [
        Theme::Filled,
        Theme::Outlined,
        Theme::Rounded,
        Theme::TwoTone,
        Theme::Sharp,
    ];

    pub fn dir_name(self) -> &'static str {
        match self {
            Theme::Filled => "filled",
            Theme::Outlined => "outlined",
            Theme::Rounded => "rounded",
            Theme::TwoTone => "twotone",
            Theme::Sharp => "sharp",
        }
    }

    /// Normalized family name this theme is published under.
    pub fn family(self) -> &'static str {
        match self {
            Theme::Filled => "materialicons",
            Theme::Outlined => "materialiconsoutlined",
            Theme::Rounded => "materialiconsround",
            Theme::TwoTone => "materialiconstwotone",
            Theme::Sharp => "materialiconssharp",
        }
    }

    /// Looks up the theme for an already normalized family name.
    pub fn from_family(normalized: &str) -> Result<Self> {
        match Self::ALL.into_iter().find(|theme| theme.family() == normalized) {
            Some(theme) => Ok(theme),
            None => bail!("No theme known for icon family '{normalized}'"),
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.dir_name())
    }
}

/// "Material Icons Two Tone" -> "materialiconstwotone"
pub fn normalize_family(family: &str) -> String {
    family
        .chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}
