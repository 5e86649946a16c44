use crate::keys::trim_page;
use crate::shortcuts::{Modifiers, Shortcut, ShortcutBinding};
use crate::theme::Theme;

pub const NOTE_KEY_PREFIX: &str = "tabnotes-data-";
pub const THEME_KEY: &str = "tabnotes-theme";
pub const DEFAULT_SLUG: &str = "default";

const DEFAULT_SHORTCUTS: &[ShortcutBinding] = &[
    ShortcutBinding {
        key: "s",
        modifiers: Some(Modifiers::ALT),
        shortcut: Shortcut::Save,
    },
    ShortcutBinding {
        key: "n",
        modifiers: Some(Modifiers::ALT),
        shortcut: Shortcut::NewNote,
    },
    ShortcutBinding {
        key: "Escape",
        modifiers: None,
        shortcut: Shortcut::Escape,
    },
];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AppConfig {
    pub default_title: &'static str,
    pub default_favicon: &'static str,
    pub default_theme: Theme,
    /// Lower bound for the auto-growing notes textarea, in pixels.
    pub min_editor_height: i32,
    pub shortcuts: &'static [ShortcutBinding],
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            default_title: "Untitle Tab Note",
            default_favicon: "assets/bluefolder.png",
            default_theme: Theme::Dark,
            min_editor_height: 400,
            shortcuts: DEFAULT_SHORTCUTS,
        }
    }
}

impl AppConfig {
    pub fn page_title<'a>(&self, title: &'a str) -> &'a str {
        let title = trim_page(title);
        if title.is_empty() {
            self.default_title
        } else {
            title
        }
    }

    pub fn page_icon<'a>(&self, icon: &'a str) -> &'a str {
        let icon = trim_page(icon);
        if icon.is_empty() {
            self.default_favicon
        } else {
            icon
        }
    }

    pub fn editor_height(&self, scroll_height: i32) -> i32 {
        scroll_height.max(self.min_editor_height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn falls_back_to_defaults_for_empty_fields() {
        let config = AppConfig::default();
        assert_eq!(config.page_title(""), "Untitle Tab Note");
        assert_eq!(config.page_title("Groceries"), "Groceries");
        assert_eq!(config.page_icon(""), "assets/bluefolder.png");
        assert_eq!(config.page_icon("/cat.png"), "/cat.png");
        assert_eq!(config.page_title("   "), "Untitle Tab Note");
        assert_eq!(config.page_title(" Groceries\n"), "Groceries");
        assert_eq!(config.page_icon("  "), "assets/bluefolder.png");
        assert_eq!(config.page_icon("\t/cat.png "), "/cat.png");
    }

    #[test]
    fn editor_height_has_a_floor() {
        let config = AppConfig::default();
        assert_eq!(config.editor_height(120), 400);
        assert_eq!(config.editor_height(812), 812);
    }
}
