use super::FOOTER_MENU;
use leptos::prelude::*;

const SOCIAL_LINKS: [(&str, &str); 5] = [
    ("facebook", "https://www.facebook.com"),
    ("linkedin", "https://www.linkedin.com"),
    ("twitter", "https://twitter.com"),
    ("instagram", "https://www.instagram.com"),
    ("youtube", "https://www.youtube.com"),
];

#[component]
pub(crate) fn Footer() -> impl IntoView {
    view! {
        <footer class="mt-12 bg-gray-900 text-gray-300">
            <div class="mx-auto grid max-w-7xl gap-8 px-4 py-10 md:grid-cols-3">
                <nav>
                    <ul class="space-y-2 text-sm">
                        {FOOTER_MENU
                            .iter()
                            .map(|m| view! {
                                <li><a href=m.href class="hover:text-white">{m.label}</a></li>
                            })
                            .collect_view()}
                    </ul>
                </nav>

                <div class="space-y-2 text-sm">
                    <p>"Royal University Of Phnom Penh, Faculty Engineering, Department ITE"</p>
                    <p>"(855) 456-7890"</p>
                </div>

                <div class="flex gap-4 text-sm">
                    {SOCIAL_LINKS
                        .iter()
                        .map(|(name, href)| view! {
                            <a href=*href target="_blank" rel="noopener noreferrer" class="capitalize hover:text-white">
                                {*name}
                            </a>
                        })
                        .collect_view()}
                </div>
            </div>
        </footer>
    }
}
