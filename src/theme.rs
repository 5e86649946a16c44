use leptos::logging::warn;

use crate::config::THEME_KEY;
use crate::store::KeyValueStore;

/// Body class carried while the light theme is active.
pub const LIGHT_BODY_CLASS: &str = "light-theme";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Theme {
    Dark,
    Light,
}

impl Theme {
    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Dark => "dark",
            Theme::Light => "light",
        }
    }

    pub fn is_light(self) -> bool {
        self == Theme::Light
    }

    /// Anything other than `"light"` renders dark.
    fn from_stored(value: &str) -> Self {
        if value == Theme::Light.as_str() {
            Theme::Light
        } else {
            Theme::Dark
        }
    }
}

pub fn load_theme(store: &impl KeyValueStore, default: Theme) -> Theme {
    match store.get_item(THEME_KEY) {
        Ok(Some(value)) if !value.is_empty() => Theme::from_stored(&value),
        _ => default,
    }
}

pub fn persist_theme(store: &impl KeyValueStore, theme: Theme) {
    if let Err(err) = store.set_item(THEME_KEY, theme.as_str()) {
        warn!("failed to persist theme: {err}");
    }
}
