#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub alt: bool,
    pub ctrl: bool,
    pub meta: bool,
    pub shift: bool,
}

impl Modifiers {
    pub const NONE: Self = Self {
        alt: false,
        ctrl: false,
        meta: false,
        shift: false,
    };
    pub const ALT: Self = Self {
        alt: true,
        ..Self::NONE
    };
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Shortcut {
    Save,
    NewNote,
    Escape,
}

impl Shortcut {
    /// Whether the browser's own handling of the chord should be suppressed.
    pub fn prevents_default(self) -> bool {
        matches!(self, Shortcut::Save | Shortcut::NewNote)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ShortcutBinding {
    pub key: &'static str,
    /// `None` accepts any modifier state.
    pub modifiers: Option<Modifiers>,
    pub shortcut: Shortcut,
}

impl ShortcutBinding {
    pub fn matches(&self, press: &KeyPress) -> bool {
        if !press.key.eq_ignore_ascii_case(self.key) {
            return false;
        }
        self.modifiers
            .map_or(true, |required| required == press.modifiers)
    }
}

/// The parts of a `keydown` event the dispatcher looks at.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KeyPress {
    pub key: String,
    pub modifiers: Modifiers,
}

impl KeyPress {
    pub fn new(key: impl Into<String>, modifiers: Modifiers) -> Self {
        Self {
            key: key.into(),
            modifiers,
        }
    }

    pub fn from_event(ev: &leptos::web_sys::KeyboardEvent) -> Self {
        Self::new(
            ev.key(),
            Modifiers {
                alt: ev.alt_key(),
                ctrl: ev.ctrl_key(),
                meta: ev.meta_key(),
                shift: ev.shift_key(),
            },
        )
    }
}

pub fn resolve(bindings: &[ShortcutBinding], press: &KeyPress) -> Option<Shortcut> {
    bindings
        .iter()
        .find(|binding| binding.matches(press))
        .map(|binding| binding.shortcut)
}
