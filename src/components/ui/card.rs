use leptos::prelude::*;
use leptos_ui::clx;

mod components {
    use super::*;
    clx! {Card, div, "flex flex-col rounded-lg bg-white p-4 shadow transition duration-200 hover:shadow-lg"}
    clx! {CardTitle, h3, "mb-2 text-center text-lg font-semibold"}
    clx! {CardDescription, p, "text-sm text-gray-600"}
    clx! {CardContent, div, "flex flex-col gap-4"}
    // Responsive grid used by every collection section.
    clx! {CardGrid, div, "grid grid-cols-1 gap-4 sm:grid-cols-2 md:grid-cols-3 md:gap-6 lg:grid-cols-4"}
    clx! {AddTile, div, "flex items-center justify-center rounded-lg border-2 border-dashed border-gray-300 bg-gray-100 p-4 transition-colors duration-200 hover:border-gray-400"}
}

pub use components::*;
