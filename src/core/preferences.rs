//! Display preferences kept next to the transaction snapshot.

use std::fmt;
use tracing::debug;

use crate::{errors::Result, storage::KeyValueStore};

/// Key holding the theme preference.
pub const THEME_KEY: &str = "ft_theme";

/// Colour theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    /// Light background (default)
    #[default]
    Light,
    /// Dark background
    Dark,
}

impl Theme {
    /// Stored value.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    /// The other theme.
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Reads the stored theme. Missing or unknown values mean light.
pub async fn load_theme<S: KeyValueStore>(backend: &S) -> Result<Theme> {
    let theme = match backend.get(THEME_KEY).await?.as_deref() {
        Some("dark") => Theme::Dark,
        Some("light") | None => Theme::Light,
        Some(other) => {
            debug!("Unknown theme '{}', using light", other);
            Theme::Light
        }
    };
    Ok(theme)
}

/// Stores `theme`.
pub async fn save_theme<S: KeyValueStore>(backend: &mut S, theme: Theme) -> Result<()> {
    backend.set(THEME_KEY, theme.as_str()).await
}
