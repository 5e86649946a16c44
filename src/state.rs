use leptos::logging::log;

use crate::config::AppConfig;
use crate::keys::{
    is_page_whitespace, new_note_fragment, slug_for_fragment, slug_for_title, storage_key,
    trim_page,
};
use crate::store::{KeyValueStore, Note, NoteStore};
use crate::theme::{load_theme, persist_theme, Theme};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Field {
    Title,
    Icon,
    Content,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Action {
    /// The URL fragment changed, or the page just booted.
    Open { fragment: String },
    Edit { field: Field, value: String },
    Save,
    SetTheme(Theme),
    NewNote { stamp_ms: u64 },
    Blur,
}

/// Browser-side work an action asks the shell to perform.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SideEffect {
    /// Rewrite the fragment in place, without navigation or a `hashchange`.
    ReplaceFragment(String),
    /// Navigate to the fragment and reload the page.
    OpenFresh(String),
    BlurActive,
}

/// Title and icon last shown on the browser tab. Only load and save move it.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TabFace {
    pub title: String,
    pub icon: String,
}

impl TabFace {
    fn of(note: &Note) -> Self {
        Self {
            title: note.title.clone(),
            icon: note.icon.clone(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppState {
    pub slug: String,
    pub note: Note,
    pub tab: TabFace,
    pub dirty: bool,
    pub theme: Theme,
}

impl AppState {
    pub fn boot(fragment: &str, store: &impl KeyValueStore, config: &AppConfig) -> Self {
        let theme = load_theme(store, config.default_theme);
        persist_theme(store, theme);
        let mut state = Self {
            slug: String::new(),
            note: Note::default(),
            tab: TabFace::default(),
            dirty: false,
            theme,
        };
        state.open(fragment, store);
        state
    }

    pub fn storage_key(&self) -> String {
        storage_key(&self.slug)
    }

    pub fn word_count(&self) -> usize {
        word_count(&self.note.content)
    }

    pub fn status_label(&self) -> &'static str {
        if self.dirty {
            "Unsaved"
        } else {
            "Saved"
        }
    }

    pub fn apply(&mut self, action: Action, store: &impl KeyValueStore) -> Option<SideEffect> {
        match action {
            Action::Open { fragment } => {
                self.open(&fragment, store);
                None
            }
            Action::Edit { field, value } => {
                let slot = match field {
                    Field::Title => &mut self.note.title,
                    Field::Icon => &mut self.note.icon,
                    Field::Content => &mut self.note.content,
                };
                *slot = value;
                self.dirty = true;
                None
            }
            Action::Save => self.save(store),
            Action::SetTheme(theme) => {
                self.set_theme(theme, store);
                None
            }
            Action::NewNote { stamp_ms } => {
                Some(SideEffect::OpenFresh(new_note_fragment(stamp_ms)))
            }
            Action::Blur => Some(SideEffect::BlurActive),
        }
    }

    fn open(&mut self, fragment: &str, store: &impl KeyValueStore) {
        self.slug = slug_for_fragment(fragment).to_string();
        self.note = NoteStore::new(store)
            .load(&self.storage_key())
            .unwrap_or_default();
        self.tab = TabFace::of(&self.note);
        self.dirty = false;
    }

    fn save(&mut self, store: &impl KeyValueStore) -> Option<SideEffect> {
        let record = Note {
            title: trim_page(&self.note.title).to_string(),
            icon: trim_page(&self.note.icon).to_string(),
            content: self.note.content.clone(),
        };

        let slug = slug_for_title(&record.title);
        let effect = if slug != self.slug {
            log!("note moved from {} to {}", self.slug, slug);
            self.slug = slug;
            Some(SideEffect::ReplaceFragment(self.slug.clone()))
        } else {
            None
        };

        // A failed write has already been logged; the note still reads as saved.
        let _ = NoteStore::new(store).save(&self.storage_key(), &record);
        self.tab = TabFace::of(&record);
        self.dirty = false;
        effect
    }

    fn set_theme(&mut self, theme: Theme, store: &impl KeyValueStore) {
        self.theme = theme;
        persist_theme(store, theme);
    }
}

/// Whitespace-delimited, non-empty tokens in `content`.
pub fn word_count(content: &str) -> usize {
    content
        .split(is_page_whitespace)
        .filter(|token| !token.is_empty())
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::THEME_KEY;
    use crate::store::{MemoryStorage, StoreError};

    struct ReadOnlyStorage(MemoryStorage);

    impl KeyValueStore for ReadOnlyStorage {
        fn get_item(&self, key: &str) -> Result<Option<String>, StoreError> {
            self.0.get_item(key)
        }

        fn set_item(&self, key: &str, _value: &str) -> Result<(), StoreError> {
            Err(StoreError::Write {
                key: key.to_string(),
                reason: "QuotaExceededError".to_string(),
            })
        }
    }

    fn edit(state: &mut AppState, store: &MemoryStorage, field: Field, value: &str) {
        state.apply(
            Action::Edit {
                field,
                value: value.to_string(),
            },
            store,
        );
    }

    #[test]
    fn counts_words() {
        assert_eq!(word_count(""), 0);
        assert_eq!(word_count("a b  c"), 3);
        assert_eq!(word_count("  \n\t one\ntwo  "), 2);
        assert_eq!(word_count("one\u{FEFF}two"), 2);
        assert_eq!(word_count("one\u{85}two"), 1);
    }

    #[test]
    fn tab_face_moves_only_on_load_and_save() {
        let store = MemoryStorage::default();
        let config = AppConfig::default();
        let mut state = AppState::boot("", &store, &config);
        edit(&mut state, &store, Field::Title, "Draft title");
        edit(&mut state, &store, Field::Icon, "/draft.png");
        assert_eq!(state.tab, TabFace::default());
        assert_eq!(config.page_title(&state.tab.title), "Untitle Tab Note");

        edit(&mut state, &store, Field::Title, "   ");
        edit(&mut state, &store, Field::Icon, "  ");
        state.apply(Action::Save, &store);
        assert_eq!(config.page_title(&state.tab.title), "Untitle Tab Note");
        assert_eq!(config.page_icon(&state.tab.icon), "assets/bluefolder.png");

        edit(&mut state, &store, Field::Title, " Shown ");
        state.apply(Action::Save, &store);
        assert_eq!(state.tab.title, "Shown");

        state.apply(Action::Open { fragment: "elsewhere".to_string() }, &store);
        assert_eq!(state.tab, TabFace::default());
    }

    #[test]
    fn boots_blank_when_nothing_stored() {
        let store = MemoryStorage::default();
        let state = AppState::boot("", &store, &AppConfig::default());
        assert_eq!(state.slug, "default");
        assert_eq!(state.note, Note::default());
        assert!(!state.dirty);
        assert_eq!(state.status_label(), "Saved");
        assert_eq!(state.theme, Theme::Dark);
        assert_eq!(store.get_item(THEME_KEY).unwrap().as_deref(), Some("dark"));
    }

    #[test]
    fn edits_mark_dirty_and_save_clears_it() {
        let store = MemoryStorage::default();
        let mut state = AppState::boot("", &store, &AppConfig::default());
        edit(&mut state, &store, Field::Content, "first draft");
        assert!(state.dirty);
        assert_eq!(state.status_label(), "Unsaved");
        assert_eq!(state.word_count(), 2);

        assert_eq!(state.apply(Action::Save, &store), None);
        assert!(!state.dirty);
        let saved = NoteStore::new(&store).load("tabnotes-data-default").unwrap();
        assert_eq!(saved.content, "first draft");
    }

    #[test]
    fn save_rekeys_note_by_title() {
        let store = MemoryStorage::default();
        let mut state = AppState::boot("new-note-17", &store, &AppConfig::default());
        edit(&mut state, &store, Field::Title, "  Trip Plans ");
        edit(&mut state, &store, Field::Icon, " /plane.png ");
        edit(&mut state, &store, Field::Content, " pack light ");

        let effect = state.apply(Action::Save, &store);
        assert_eq!(
            effect,
            Some(SideEffect::ReplaceFragment("trip-plans".to_string()))
        );
        assert_eq!(state.slug, "trip-plans");

        let saved = NoteStore::new(&store).load("tabnotes-data-trip-plans").unwrap();
        assert_eq!(saved.title, "Trip Plans");
        assert_eq!(saved.icon, "/plane.png");
        assert_eq!(saved.content, " pack light ");
        assert_eq!(NoteStore::new(&store).load("tabnotes-data-new-note-17"), None);
    }

    #[test]
    fn resaving_under_same_slug_keeps_fragment() {
        let store = MemoryStorage::default();
        let mut state = AppState::boot("todo", &store, &AppConfig::default());
        edit(&mut state, &store, Field::Title, "Todo");
        assert_eq!(state.apply(Action::Save, &store), None);
    }

    #[test]
    fn renaming_leaves_old_record_behind() {
        let store = MemoryStorage::default();
        let mut state = AppState::boot("", &store, &AppConfig::default());
        edit(&mut state, &store, Field::Title, "Alpha");
        state.apply(Action::Save, &store);
        edit(&mut state, &store, Field::Title, "Beta");
        state.apply(Action::Save, &store);

        let notes = NoteStore::new(&store);
        assert_eq!(notes.load("tabnotes-data-alpha").unwrap().title, "Alpha");
        assert_eq!(notes.load("tabnotes-data-beta").unwrap().title, "Beta");
    }

    #[test]
    fn empty_title_saves_as_default() {
        let store = MemoryStorage::default();
        let mut state = AppState::boot("scratch", &store, &AppConfig::default());
        edit(&mut state, &store, Field::Content, "x");
        let effect = state.apply(Action::Save, &store);
        assert_eq!(effect, Some(SideEffect::ReplaceFragment("default".to_string())));
        assert!(NoteStore::new(&store).load("tabnotes-data-default").is_some());
    }

    #[test]
    fn opening_other_fragment_loads_or_blanks() {
        let store = MemoryStorage::default();
        let mut state = AppState::boot("", &store, &AppConfig::default());
        edit(&mut state, &store, Field::Title, "Kept");
        edit(&mut state, &store, Field::Content, "body text");
        state.apply(Action::Save, &store);

        state.apply(Action::Open { fragment: "elsewhere".to_string() }, &store);
        assert_eq!(state.slug, "elsewhere");
        assert_eq!(state.note, Note::default());

        edit(&mut state, &store, Field::Content, "unsaved");
        state.apply(Action::Open { fragment: "kept".to_string() }, &store);
        assert!(!state.dirty);
        assert_eq!(state.note.content, "body text");
        assert_eq!(state.word_count(), 2);
    }

    #[test]
    fn failed_write_still_reads_as_saved() {
        let store = ReadOnlyStorage(MemoryStorage::default());
        let mut state = AppState::boot("", &store, &AppConfig::default());
        state.apply(
            Action::Edit {
                field: Field::Content,
                value: "lost".to_string(),
            },
            &store,
        );
        state.apply(Action::Save, &store);
        assert!(!state.dirty);
        assert_eq!(state.status_label(), "Saved");
        assert_eq!(NoteStore::new(&store).load("tabnotes-data-default"), None);
    }

    #[test]
    fn theme_changes_persist() {
        let store = MemoryStorage::default();
        let mut state = AppState::boot("", &store, &AppConfig::default());
        state.apply(Action::SetTheme(Theme::Light), &store);
        assert_eq!(state.theme, Theme::Light);
        assert_eq!(store.get_item(THEME_KEY).unwrap().as_deref(), Some("light"));

        state.apply(Action::SetTheme(Theme::Dark), &store);
        let rebooted = AppState::boot("", &store, &AppConfig::default());
        assert_eq!(rebooted.theme, Theme::Dark);
    }

    #[test]
    fn navigation_actions_become_effects() {
        let store = MemoryStorage::default();
        let mut state = AppState::boot("", &store, &AppConfig::default());
        assert_eq!(
            state.apply(Action::NewNote { stamp_ms: 42 }, &store),
            Some(SideEffect::OpenFresh("new-note-42".to_string()))
        );
        assert_eq!(state.apply(Action::Blur, &store), Some(SideEffect::BlurActive));
    }
}
