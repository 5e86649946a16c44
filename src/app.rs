use leptos::prelude::*;
use leptos::web_sys::{HtmlElement, KeyboardEvent};
use wasm_bindgen::prelude::*;

use crate::config::AppConfig;
use crate::keys::fragment_from_hash;
use crate::shortcuts::{resolve, KeyPress, Shortcut};
use crate::state::{Action, AppState, Field, SideEffect};
use crate::store::BrowserStorage;
use crate::theme::{Theme, LIGHT_BODY_CLASS};

fn current_fragment() -> String {
    let hash = window().location().hash().unwrap_or_default();
    fragment_from_hash(&hash).to_string()
}

fn run_effect(effect: SideEffect) {
    match effect {
        SideEffect::ReplaceFragment(slug) => {
            let url = format!("#{slug}");
            if let Ok(history) = window().history() {
                let _ = history.replace_state_with_url(&JsValue::NULL, "", Some(&url));
            }
        }
        SideEffect::OpenFresh(fragment) => {
            let location = window().location();
            let _ = location.set_hash(&fragment);
            let _ = location.reload();
        }
        SideEffect::BlurActive => {
            if let Some(active) = document().active_element() {
                if let Ok(el) = active.dyn_into::<HtmlElement>() {
                    let _ = el.blur();
                }
            }
        }
    }
}

#[component]
pub fn App() -> impl IntoView {
    let config = AppConfig::default();
    let state = RwSignal::new(AppState::boot(&current_fragment(), &BrowserStorage, &config));

    let dispatch = move |action: Action| {
        let mut next = state.get_untracked();
        let effect = next.apply(action, &BrowserStorage);
        state.set(next);
        if let Some(effect) = effect {
            run_effect(effect);
        }
    };

    // Document title, favicon and body theme follow the state.
    Effect::new(move |_| {
        let (title, icon, theme) =
            state.with(|s| (s.tab.title.clone(), s.tab.icon.clone(), s.theme));
        let doc = document();
        doc.set_title(config.page_title(&title));
        if let Some(favicon) = doc.get_element_by_id("favicon") {
            let _ = favicon.set_attribute("href", config.page_icon(&icon));
        }
        if let Some(body) = doc.body() {
            let _ = body
                .class_list()
                .toggle_with_force(LIGHT_BODY_CLASS, theme.is_light());
        }
    });

    let on_hash_change = Closure::<dyn FnMut(leptos::web_sys::Event)>::new(move |_| {
        dispatch(Action::Open {
            fragment: current_fragment(),
        });
    });
    let _ = window()
        .add_event_listener_with_callback("hashchange", on_hash_change.as_ref().unchecked_ref());
    on_hash_change.forget();

    let on_key_down = Closure::<dyn FnMut(KeyboardEvent)>::new(move |ev: KeyboardEvent| {
        let Some(shortcut) = resolve(config.shortcuts, &KeyPress::from_event(&ev)) else {
            return;
        };
        if shortcut.prevents_default() {
            ev.prevent_default();
        }
        dispatch(match shortcut {
            Shortcut::Save => Action::Save,
            Shortcut::NewNote => Action::NewNote {
                stamp_ms: js_sys::Date::now() as u64,
            },
            Shortcut::Escape => Action::Blur,
        });
    });
    let _ = document()
        .add_event_listener_with_callback("keydown", on_key_down.as_ref().unchecked_ref());
    on_key_down.forget();

    let edit = move |field: Field, value: String| dispatch(Action::Edit { field, value });

    let grow_notes = move |notes: &HtmlElement| {
        let style = notes.style();
        let _ = style.set_property("height", "auto");
        let height = config.editor_height(notes.scroll_height());
        let _ = style.set_property("height", &format!("{height}px"));
    };

    let is_theme = move |theme: Theme| move || state.with(|s| s.theme == theme);

    view! {
        <main class="container">
            <header class="toolbar">
                <div class="note-meta">
                    <span class="note-id-label">"Note: "</span>
                    <span id="noteId">{move || state.with(|s| s.slug.clone())}</span>
                </div>
                <div
                    id="statusIndicator"
                    class="status-indicator"
                    class:unsaved=move || state.with(|s| s.dirty)
                >
                    <span class="status-dot"></span>
                    <span id="statusText">{move || state.with(|s| s.status_label())}</span>
                </div>
                <div class="theme-toggle">
                    <button
                        id="darkBtn"
                        class:active=is_theme(Theme::Dark)
                        on:click=move |_| dispatch(Action::SetTheme(Theme::Dark))
                    >
                        "Dark"
                    </button>
                    <button
                        id="lightBtn"
                        class:active=is_theme(Theme::Light)
                        on:click=move |_| dispatch(Action::SetTheme(Theme::Light))
                    >
                        "Light"
                    </button>
                </div>
            </header>

            <section class="form-section">
                <label for="tabNoteTitle">"Title"</label>
                <input
                    id="tabNoteTitle"
                    type="text"
                    placeholder=config.default_title
                    prop:value=move || state.with(|s| s.note.title.clone())
                    on:input=move |ev| edit(Field::Title, event_target_value(&ev))
                />
            </section>

            <section class="form-section">
                <label for="tabNoteIcon">"Icon URL"</label>
                <input
                    id="tabNoteIcon"
                    type="text"
                    placeholder=config.default_favicon
                    prop:value=move || state.with(|s| s.note.icon.clone())
                    on:input=move |ev| edit(Field::Icon, event_target_value(&ev))
                />
            </section>

            <section class="form-section">
                <label for="tabNoteNotes">"Notes"</label>
                <textarea
                    id="tabNoteNotes"
                    placeholder="Start writing..."
                    prop:value=move || state.with(|s| s.note.content.clone())
                    on:input=move |ev| {
                        grow_notes(&event_target::<HtmlElement>(&ev));
                        edit(Field::Content, event_target_value(&ev));
                    }
                ></textarea>
                <div id="wordCount" class="word-count">
                    {move || format!("{} words", state.with(|s| s.word_count()))}
                </div>
            </section>

            <footer class="actions">
                <button id="saveBtn" on:click=move |_| dispatch(Action::Save)>
                    "Save"
                </button>
                <span class="hint">"Alt+S save · Alt+N new note · Esc leave field"</span>
            </footer>
        </main>
    }
}
