mod app;
mod config;
mod keys;
mod shortcuts;
mod state;
mod store;
mod theme;

use app::*;
use leptos::prelude::*;

fn main() {
    console_error_panic_hook::set_once();
    mount_to_body(|| {
        view! { <App/> }
    })
}
