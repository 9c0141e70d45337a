use leptos::prelude::*;
use leptos_ui::variants;

variants! {
    Button {
        base: "inline-flex items-center justify-center gap-2 whitespace-nowrap rounded-md text-base font-medium shadow-sm transition-colors duration-200 disabled:pointer-events-none disabled:opacity-50 [&_svg]:pointer-events-none [&_svg:not([class*='size-'])]:size-4 [&_svg]:shrink-0 focus:outline-none focus-visible:ring-2 hover:cursor-pointer",
        variants: {
            variant: {
                Default: "bg-blue-500 text-white hover:bg-blue-700 focus-visible:ring-blue-500",
                Brand: "bg-orange-500 text-white hover:bg-orange-600 focus-visible:ring-orange-500",
                Secondary: "bg-gray-200 text-gray-700 hover:bg-gray-300 focus-visible:ring-gray-500",
                Ghost: "shadow-none bg-transparent text-gray-600 hover:bg-gray-100",
                Link: "shadow-none bg-transparent text-blue-600 hover:text-blue-800",
            },
            size: {
                Default: "px-4 py-2",
                Sm: "px-3 py-1.5 text-sm",
                Block: "w-full px-4 py-2",
                Icon: "size-9 p-0",
            }
        },
        component: {
            element: button,
            support_href: true,
            support_aria_current: true
        }
    }
}
