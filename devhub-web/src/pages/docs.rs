use crate::routes::MainRoute;
use i18nrs::yew::use_translation;
use yew::prelude::*;
use yew_router::prelude::*;

/// A documentation article bundled with the app.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DocEntry {
    pub slug: &'static str,
    pub title: &'static str,
    pub summary: &'static str,
    pub body: &'static str,
}

pub static DOCS: [DocEntry; 3] = [
    DocEntry {
        slug: "getting-started",
        title: "Getting started",
        summary: "Create an account and find your way around.",
        body: "Register with a username, an email address and a password, then sign in. \
               The header links to every area your role can open.",
    },
    DocEntry {
        slug: "points",
        title: "Points and activity",
        summary: "How contributions earn points.",
        body: "Answers, articles and reviews earn points. Your activity level is derived \
               from how recently and how often you contribute.",
    },
    DocEntry {
        slug: "moderation",
        title: "Moderation guidelines",
        summary: "What moderators look for.",
        body: "Moderators review flagged content and may hide posts that break the \
               community rules. Administrators can also disable accounts.",
    },
];

#[must_use]
pub fn find_doc(slug: &str) -> Option<&'static DocEntry> {
    DOCS.iter().find(|entry| entry.slug == slug)
}

#[derive(Properties, PartialEq)]
pub struct DocsPageProps {
    #[prop_or_default]
    pub slug: Option<String>,
}

#[function_component(DocsPage)]
pub fn docs_page(props: &DocsPageProps) -> Html {
    let (i18n, _) = use_translation();

    let index = DOCS
        .iter()
        .map(|entry| {
            let active = props.slug.as_deref() == Some(entry.slug);
            html! {
                <li>
                    <Link<MainRoute>
                        to={MainRoute::DocsPage { slug: entry.slug.to_string() }}
                        classes={classes!(active.then_some("menu-active"))}
                    >
                        { entry.title }
                    </Link<MainRoute>>
                </li>
            }
        })
        .collect::<Html>();

    let content = match props.slug.as_deref() {
        None => html! {
            <div class="space-y-4">
                <h1 class="text-2xl font-bold">{ i18n.t("docs.title") }</h1>
                { for DOCS.iter().map(|entry| html! {
                    <div class="card bg-base-200">
                        <div class="card-body">
                            <h2 class="card-title">{ entry.title }</h2>
                            <p>{ entry.summary }</p>
                        </div>
                    </div>
                }) }
            </div>
        },
        Some(slug) => match find_doc(slug) {
            Some(entry) => html! {
                <article class="prose max-w-none">
                    <h1>{ entry.title }</h1>
                    <p>{ entry.body }</p>
                </article>
            },
            None => html! {
                <div class="alert alert-warning">
                    <span>{ i18n.t("docs.missing") }</span>
                </div>
            },
        },
    };

    html! {
        <div class="flex gap-6 p-4">
            <aside class="w-56 shrink-0">
                <ul class="menu bg-base-200 rounded-box">
                    <li class="menu-title">{ i18n.t("docs.index") }</li>
                    { index }
                </ul>
            </aside>
            <section class="flex-grow">{ content }</section>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slugs_are_unique_and_resolvable() {
        for entry in &DOCS {
            assert_eq!(find_doc(entry.slug), Some(entry));
        }
        assert_eq!(find_doc("missing"), None);
    }
}
