use leptos::prelude::*;
use leptos_ui::clx;

mod components {
    use super::*;
    clx! {Alert, div, "w-full rounded-md border border-red-200 bg-red-50 px-3 py-2 text-left"}
    clx! {AlertDescription, p, "text-sm text-red-500"}
}

pub use components::*;
