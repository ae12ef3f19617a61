use std::cell::{Cell, RefCell};
use std::rc::Rc;

use gloo_events::EventListener;
use gloo_render::{request_animation_frame, AnimationFrame};
use js_sys::{Function, Reflect};
use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use web_sys::{
    window, Document, HtmlElement, MouseEvent, Node, ScrollBehavior, ScrollToOptions, Storage,
};
use yew::prelude::*;

use crate::menu::{MenuEvent, MenuState};
use crate::observe;
use crate::sync::{self, SectionBounds};
use crate::theme::Theme;

const THEME_KEY: &str = "theme";
const DARK_MODE_CLASS: &str = "dark-mode";

struct Section {
    id: &'static str,
    label: &'static str,
}

const SECTIONS: &[Section] = &[
    Section { id: "home", label: "Home" },
    Section { id: "about", label: "About" },
    Section { id: "skills", label: "Skills" },
    Section { id: "projects", label: "Projects" },
    Section { id: "contact", label: "Contact" },
];

struct Skill {
    name: &'static str,
    percentage: u32,
}

const SKILLS: &[Skill] = &[
    Skill { name: "Rust", percentage: 92 },
    Skill { name: "WebAssembly", percentage: 84 },
    Skill { name: "TypeScript", percentage: 78 },
    Skill { name: "PostgreSQL", percentage: 70 },
];

struct Project {
    title: &'static str,
    summary: &'static str,
    image: &'static str,
}

const PROJECTS: &[Project] = &[
    Project {
        title: "Ledgerline",
        summary: "Double-entry bookkeeping engine with an append-only event log.",
        image: "/images/ledgerline.jpg",
    },
    Project {
        title: "Driftwatch",
        summary: "Schema drift detector for Postgres migrations, run in CI.",
        image: "/images/driftwatch.jpg",
    },
    Project {
        title: "Tidemark",
        summary: "Self-hosted uptime dashboard with webhook alerting.",
        image: "/images/tidemark.jpg",
    },
];

impl Reducible for MenuState {
    type Action = MenuEvent;

    fn reduce(self: Rc<Self>, action: MenuEvent) -> Rc<Self> {
        Rc::new(self.apply(action))
    }
}

fn local_storage() -> Option<Storage> {
    window()?.local_storage().ok().flatten()
}

fn read_stored_theme() -> Option<Theme> {
    let value = local_storage()?.get_item(THEME_KEY).ok().flatten()?;
    Theme::from_str(&value)
}

fn resolve_theme() -> Theme {
    read_stored_theme().unwrap_or(Theme::Light)
}

fn persist_theme(theme: Theme) {
    if let Some(storage) = local_storage() {
        let _ = storage.set_item(THEME_KEY, theme.as_str());
    }
}

fn apply_theme(theme: Theme) {
    if let Some(body) = window().and_then(|w| w.document()).and_then(|d| d.body()) {
        let class_list = body.class_list();
        let _ = match theme {
            Theme::Dark => class_list.add_1(DARK_MODE_CLASS),
            Theme::Light => class_list.remove_1(DARK_MODE_CLASS),
        };
    }
}

fn prefers_reduced_motion() -> bool {
    window()
        .and_then(|w| {
            w.match_media("(prefers-reduced-motion: reduce)")
                .ok()
                .flatten()
        })
        .map(|mq| mq.matches())
        .unwrap_or(false)
}

fn apply_theme_with_transition(theme: Theme) {
    if prefers_reduced_motion() {
        apply_theme(theme);
        return;
    }

    let Some(document) = window().and_then(|w| w.document()) else {
        apply_theme(theme);
        return;
    };

    let document_js: JsValue = document.into();
    let Ok(start_view_transition) =
        Reflect::get(&document_js, &JsValue::from_str("startViewTransition"))
    else {
        apply_theme(theme);
        return;
    };

    let Some(start_view_transition) = start_view_transition.dyn_ref::<Function>() else {
        apply_theme(theme);
        return;
    };

    let callback = Closure::<dyn FnMut()>::new(move || {
        apply_theme(theme);
    });

    if start_view_transition
        .call1(&document_js, callback.as_ref().unchecked_ref())
        .is_err()
    {
        apply_theme(theme);
    }
}

fn document() -> Option<Document> {
    window().and_then(|w| w.document())
}

fn viewport_width() -> f64 {
    window()
        .and_then(|w| w.inner_width().ok())
        .and_then(|value| value.as_f64())
        .unwrap_or(1280.0)
}

fn navbar_offset_height(navbar_ref: &NodeRef) -> f64 {
    navbar_ref
        .cast::<HtmlElement>()
        .map(|navbar| f64::from(navbar.offset_height()))
        .unwrap_or(0.0)
}

fn measure_sections(document: &Document) -> Vec<SectionBounds> {
    SECTIONS
        .iter()
        .filter_map(|section| {
            let element: HtmlElement = document.get_element_by_id(section.id)?.dyn_into().ok()?;
            Some(SectionBounds::new(
                section.id,
                f64::from(element.offset_top()),
                f64::from(element.offset_height()),
            ))
        })
        .collect()
}

// Missing target is a no-op: the id may simply not be on this page variant.
fn scroll_to_section(id: &str, navbar_height: f64) {
    let Some(document) = document() else {
        return;
    };
    let Some(section) = document.get_element_by_id(id) else {
        return;
    };
    let Ok(section) = section.dyn_into::<HtmlElement>() else {
        return;
    };

    let top = sync::scroll_target(f64::from(section.offset_top()), navbar_height);
    if let Some(win) = window() {
        let options = ScrollToOptions::new();
        options.set_top(top);
        options.set_behavior(ScrollBehavior::Smooth);
        win.scroll_to_with_scroll_to_options(&options);
    }
}

fn sync_scroll_state(
    document: &Document,
    active_section: &UseStateHandle<Option<String>>,
    navbar_scrolled: &UseStateHandle<bool>,
) {
    let Some(win) = window() else {
        return;
    };
    let scroll_y = win.scroll_y().unwrap_or(0.0);
    let bounds = measure_sections(document);

    active_section.set(sync::active_section(scroll_y, &bounds).map(str::to_string));
    navbar_scrolled.set(sync::navbar_scrolled(scroll_y));
}

fn node_contains(node_ref: &NodeRef, target: Option<&Node>) -> bool {
    match (node_ref.cast::<HtmlElement>(), target) {
        (Some(element), Some(node)) => element.contains(Some(node)),
        _ => false,
    }
}

#[function_component(App)]
fn app() -> Html {
    let theme = use_state(resolve_theme);
    let menu = use_reducer_eq(MenuState::default);
    let active_section = use_state_eq(|| None::<String>);
    let navbar_scrolled = use_state_eq(|| false);
    let navbar_ref = use_node_ref();
    let menu_ref = use_node_ref();
    let toggle_ref = use_node_ref();

    {
        let current = *theme;
        use_effect_with((), move |_| {
            apply_theme(current);
            || ()
        });
    }

    // One sync pass right after mount, then scroll events coalesced to at
    // most one update per animation frame.
    {
        let active_section = active_section.clone();
        let navbar_scrolled = navbar_scrolled.clone();
        use_effect_with((), move |_| {
            if let Some(document) = document() {
                sync_scroll_state(&document, &active_section, &navbar_scrolled);
            }

            let pending = Rc::new(Cell::new(false));
            let frame = Rc::new(RefCell::new(None::<AnimationFrame>));
            let listener = window().map(|win| {
                EventListener::new(&win, "scroll", move |_event| {
                    if pending.replace(true) {
                        return;
                    }
                    let pending = Rc::clone(&pending);
                    let frame_slot = Rc::clone(&frame);
                    let active_section = active_section.clone();
                    let navbar_scrolled = navbar_scrolled.clone();
                    let handle = request_animation_frame(move |_timestamp| {
                        frame_slot.borrow_mut().take();
                        pending.set(false);
                        if let Some(document) = document() {
                            sync_scroll_state(&document, &active_section, &navbar_scrolled);
                        }
                    });
                    *frame.borrow_mut() = Some(handle);
                })
            });

            move || drop(listener)
        });
    }

    {
        let menu = menu.dispatcher();
        let menu_ref = menu_ref.clone();
        let toggle_ref = toggle_ref.clone();
        use_effect_with((), move |_| {
            let listener = document().map(|doc| {
                EventListener::new(&doc, "click", move |event| {
                    let target = event.target().and_then(|t| t.dyn_into::<Node>().ok());
                    menu.dispatch(MenuEvent::OutsideClick {
                        viewport_width: viewport_width(),
                        inside_menu: node_contains(&menu_ref, target.as_ref()),
                        inside_toggle: node_contains(&toggle_ref, target.as_ref()),
                    });
                })
            });

            move || drop(listener)
        });
    }

    {
        use_effect_with((), move |_| {
            let handles = document().map(|doc| {
                let section_ids: Vec<&str> = SECTIONS.iter().map(|section| section.id).collect();
                let mut handles = Vec::new();
                if let Some(handle) = observe::reveal_sections(&doc, &section_ids) {
                    handles.push(handle);
                }
                if let Some(handle) = observe::skill_bars(&doc, "skills") {
                    handles.push(handle);
                }
                if let Some(handle) = observe::lazy_images(&doc) {
                    handles.push(handle);
                }
                handles
            });

            move || drop(handles)
        });
    }

    let on_theme_toggle = {
        let theme = theme.clone();
        Callback::from(move |_| {
            let next = (*theme).toggled();
            persist_theme(next);
            apply_theme_with_transition(next);
            theme.set(next);
        })
    };

    let on_menu_toggle = {
        let menu = menu.dispatcher();
        Callback::from(move |_: MouseEvent| {
            menu.dispatch(MenuEvent::ToggleClicked);
        })
    };

    let nav_links = SECTIONS
        .iter()
        .map(|section| {
            let navbar_ref = navbar_ref.clone();
            let menu = menu.dispatcher();
            let onclick = Callback::from(move |event: MouseEvent| {
                event.prevent_default();
                scroll_to_section(section.id, navbar_offset_height(&navbar_ref));
                menu.dispatch(MenuEvent::LinkSelected {
                    viewport_width: viewport_width(),
                });
            });
            let is_active = active_section.as_deref() == Some(section.id);

            html! {
                <li>
                    <a
                        class={classes!("nav-link", is_active.then_some("active"))}
                        href={format!("#{}", section.id)}
                        data-section={section.id}
                        onclick={onclick}
                    >
                        {section.label}
                    </a>
                </li>
            }
        })
        .collect::<Html>();

    let nav_dots = SECTIONS
        .iter()
        .map(|section| {
            let navbar_ref = navbar_ref.clone();
            let onclick = Callback::from(move |_: MouseEvent| {
                scroll_to_section(section.id, navbar_offset_height(&navbar_ref));
            });
            let is_active = active_section.as_deref() == Some(section.id);

            html! {
                <button
                    type="button"
                    class={classes!("nav-dot", is_active.then_some("active"))}
                    data-section={section.id}
                    aria-label={format!("Scroll to {}", section.label)}
                    onclick={onclick}
                />
            }
        })
        .collect::<Html>();

    let skill_rows = SKILLS
        .iter()
        .map(|skill| {
            html! {
                <div class="skill">
                    <div class="skill-header">
                        <span class="skill-name">{skill.name}</span>
                        <span class="skill-percentage">{format!("{}%", skill.percentage)}</span>
                    </div>
                    <div class="skill-bar">
                        <div
                            class="skill-bar-fill"
                            data-percentage={skill.percentage.to_string()}
                        ></div>
                    </div>
                </div>
            }
        })
        .collect::<Html>();

    let project_cards = PROJECTS
        .iter()
        .enumerate()
        .map(|(index, project)| {
            let on_view = Callback::from(move |event: MouseEvent| {
                event.stop_propagation();
                log::info!("viewing details for project {}", index + 1);
            });
            let on_card = Callback::from(move |_: MouseEvent| {
                log::info!("viewing details for project {}", index + 1);
            });

            html! {
                <article class="project-card" onclick={on_card}>
                    <img class="project-image" data-src={project.image} alt={project.title} />
                    <div class="project-body">
                        <h3>{project.title}</h3>
                        <p>{project.summary}</p>
                        <button type="button" class="project-button" onclick={on_view}>
                            {"View details"}
                        </button>
                    </div>
                </article>
            }
        })
        .collect::<Html>();

    html! {
        <>
            <nav
                id="topNavbar"
                ref={navbar_ref.clone()}
                class={classes!("top-navbar", (*navbar_scrolled).then_some("scrolled"))}
            >
                <div class="nav-inner">
                    <a class="nav-brand" href="#home">{"Noa Berg"}</a>
                    <button
                        ref={toggle_ref.clone()}
                        type="button"
                        class={classes!("nav-toggle", menu.is_open().then_some("active"))}
                        aria-label="Toggle navigation menu"
                        aria-expanded={menu.is_open().to_string()}
                        onclick={on_menu_toggle}
                    >
                        <span class="nav-toggle-bar"></span>
                        <span class="nav-toggle-bar"></span>
                        <span class="nav-toggle-bar"></span>
                    </button>
                    <ul
                        id="navMenu"
                        ref={menu_ref.clone()}
                        class={classes!("nav-menu", menu.is_open().then_some("active"))}
                    >
                        {nav_links}
                    </ul>
                    <button
                        class="theme-toggle"
                        type="button"
                        aria-label={(*theme).toggle_label()}
                        aria-pressed={(*theme).pressed().to_string()}
                        onclick={on_theme_toggle}
                    >
                        <span class="theme-icon" aria-hidden="true">{(*theme).icon()}</span>
                    </button>
                </div>
            </nav>

            <aside class="nav-dots" aria-label="Section navigation">
                {nav_dots}
            </aside>

            <main>
                <section id="home" class="section hero">
                    <h1>{"Noa Berg"}</h1>
                    <p class="hero-tagline">
                        {"Systems and web developer. I build small, dependable tools."}
                    </p>
                </section>

                <section id="about" class="section">
                    <h2>{"About"}</h2>
                    <p>
                        {"I spend most of my time in Rust, with detours into frontend work \
                          whenever a project needs a face. Previously infrastructure at a \
                          logistics startup, now freelancing."}
                    </p>
                </section>

                <section id="skills" class="section">
                    <h2>{"Skills"}</h2>
                    <div class="skill-list">
                        {skill_rows}
                    </div>
                </section>

                <section id="projects" class="section">
                    <h2>{"Projects"}</h2>
                    <div class="project-grid">
                        {project_cards}
                    </div>
                </section>

                <section id="contact" class="section">
                    <h2>{"Contact"}</h2>
                    <p>
                        {"The fastest way to reach me is "}
                        <a class="contact-link" href="mailto:hello@noaberg.dev">
                            {"hello@noaberg.dev"}
                        </a>
                        {"."}
                    </p>
                </section>
            </main>
        </>
    }
}

pub fn run() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);

    yew::Renderer::<App>::with_root(
        window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id("app"))
            .expect("missing #app mount point"),
    )
    .render();
}
