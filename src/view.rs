use std::rc::Rc;

use yew::prelude::*;

use crate::{
    ambient::{ambient_shapes, AmbientShape, CursorFollower, Viewport},
    config::PageConfig,
    content::StaticContentStore,
    controller::{PageController, PageSources},
    observable::Subscription,
    pointer::PointerPosition,
    scroll::ScrollProgress,
    section::SectionId,
    theme,
};

#[derive(Properties, Clone)]
pub struct AppProps {
    #[prop_or_default]
    pub config: PageConfig,
    #[prop_or_else(default_content)]
    pub content: Rc<StaticContentStore>,
    #[prop_or_default]
    pub sources: Option<PageSources>,
    #[prop_or_default]
    pub viewport: Option<Viewport>,
}

fn default_content() -> Rc<StaticContentStore> {
    Rc::new(StaticContentStore::portfolio())
}

impl PartialEq for AppProps {
    fn eq(&self, other: &Self) -> bool {
        self.config == other.config
            && Rc::ptr_eq(&self.content, &other.content)
            && self.sources == other.sources
            && self.viewport == other.viewport
    }
}

// Field order matters: the handles detach before the controller unmounts.
struct ControllerBinding {
    _subscriptions: Vec<Subscription>,
    _controller: PageController,
}

fn bind_controller(
    threshold: f64,
    sources: PageSources,
    active: UseStateHandle<SectionId>,
    pointer: UseStateHandle<PointerPosition>,
    progress: UseStateHandle<ScrollProgress>,
) -> ControllerBinding {
    let mut controller = PageController::new(threshold, sources);

    let subscriptions = vec![
        {
            let active = active.clone();
            controller
                .active_section()
                .subscribe(move |section| active.set(*section))
        },
        {
            let pointer = pointer.clone();
            controller
                .pointer()
                .subscribe(move |position| pointer.set(*position))
        },
        {
            let progress = progress.clone();
            controller
                .scroll_progress()
                .subscribe(move |value| progress.set(*value))
        },
    ];

    controller.mount();

    ControllerBinding {
        _subscriptions: subscriptions,
        _controller: controller,
    }
}

#[function_component(App)]
pub fn app(props: &AppProps) -> Html {
    let active = use_state_eq(SectionId::default);
    let pointer = use_state_eq(PointerPosition::default);
    let progress = use_state_eq(ScrollProgress::default);
    let live = use_state_eq(|| false);

    {
        let active = active.clone();
        let pointer = pointer.clone();
        let progress = progress.clone();
        let live = live.clone();
        let threshold = props.config.visibility_threshold;

        // Effects never run in a server render, so without a viewport nothing subscribes.
        use_effect_with(props.sources.clone(), move |sources| {
            let binding = sources.clone().map(|sources| {
                let binding = bind_controller(threshold, sources, active, pointer, progress);
                live.set(true);
                binding
            });

            move || drop(binding)
        });
    }

    let shapes = use_memo(
        (props.config.ambient_seed, props.config.ambient_shape_count),
        |(seed, count)| ambient_shapes(*seed, *count),
    );

    let decorative_viewport = props.viewport.filter(|_| *live);
    let tracked_pointer = props
        .sources
        .as_ref()
        .and_then(|sources| sources.pointer.as_ref())
        .map(|_| *pointer);

    html! {
        <div class="min-h-screen bg-black overflow-hidden">
            <Backdrop
                shapes={shapes}
                viewport={decorative_viewport}
                pointer={tracked_pointer}
                follower={CursorFollower { radius_px: props.config.follower_radius_px }}
            />
            <NavBar active={*active} brand={props.content.profile.name} />
            <ProgressBar progress={*progress} />
            <HeroSection content={props.content.clone()} />
            <AboutSection content={props.content.clone()} />
            <ExperienceSection content={props.content.clone()} />
            <ProjectsSection content={props.content.clone()} />
            <SkillsSection content={props.content.clone()} />
            <ContactSection content={props.content.clone()} />
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct BackdropProps {
    pub shapes: Rc<Vec<AmbientShape>>,
    #[prop_or_default]
    pub viewport: Option<Viewport>,
    #[prop_or_default]
    pub pointer: Option<PointerPosition>,
    #[prop_or_default]
    pub follower: CursorFollower,
}

#[function_component(Backdrop)]
pub fn backdrop(props: &BackdropProps) -> Html {
    let decorations = match props.viewport {
        Some(viewport) => html! {
            <>
                { for props.shapes.iter().map(|shape| html! {
                    <div
                        class="ambient-shape absolute rounded-full border border-cyan-500"
                        style={shape.style(viewport)}
                    />
                }) }
                {
                    match props.pointer {
                        Some(pointer) => html! {
                            <div
                                class="cursor-follower absolute top-0 left-0 rounded-full pointer-events-none"
                                style={props.follower.style(pointer)}
                            />
                        },
                        None => html! {},
                    }
                }
            </>
        },
        None => html! {},
    };

    html! {
        <div class="backdrop fixed inset-0 pointer-events-none" style={theme::grid_style()} aria-hidden="true">
            { decorations }
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct NavBarProps {
    pub active: SectionId,
    pub brand: AttrValue,
}

fn nav_link(section: SectionId, active: bool) -> Html {
    let class = classes!(
        "nav-link",
        "px-4",
        "py-2",
        "rounded-md",
        "text-sm",
        "font-medium",
        "relative",
        "overflow-hidden",
        if active {
            classes!("nav-link-active", "text-cyan-400")
        } else {
            classes!("text-gray-400", "hover:text-cyan-400")
        }
    );

    html! {
        <a
            key={section.as_str()}
            href={section.anchor()}
            data-section={section.as_str()}
            class={class}
            aria-current={active.then_some("page")}
        >
            { section.label() }
            if active {
                <span class="nav-link-underline absolute bottom-0 left-0 right-0 h-0.5 bg-cyan-500" />
            }
        </a>
    }
}

#[function_component(NavBar)]
pub fn nav_bar(props: &NavBarProps) -> Html {
    html! {
        <nav class="nav-enter fixed top-0 w-full z-50 bg-black bg-opacity-80 backdrop-blur-lg border-b border-cyan-900">
            <div class="max-w-7xl mx-auto px-4">
                <div class="flex items-center justify-between h-16">
                    <a href={SectionId::Home.anchor()} class="brand text-2xl font-bold text-cyan-500">
                        { code_icon() }
                        { props.brand.clone() }
                    </a>
                    <div class="hidden md:flex space-x-1">
                        { for SectionId::ALL.into_iter().map(|section| nav_link(section, section == props.active)) }
                    </div>
                </div>
            </div>
        </nav>
    }
}

#[derive(Properties, PartialEq)]
pub struct ProgressBarProps {
    pub progress: ScrollProgress,
}

#[function_component(ProgressBar)]
pub fn progress_bar(props: &ProgressBarProps) -> Html {
    let ratio = props.progress.ratio();

    html! {
        <div
            class="progress-bar fixed top-0 left-0 right-0 h-1 bg-cyan-500 origin-left z-50"
            style={format!("transform: scaleX({ratio:.4});")}
            role="progressbar"
            aria-label="Reading progress"
            aria-valuemin="0"
            aria-valuemax="100"
            aria-valuenow={format!("{:.0}", ratio * 100.0)}
        />
    }
}

#[derive(Properties, PartialEq)]
pub struct SectionProps {
    pub content: Rc<StaticContentStore>,
}

#[derive(Properties, PartialEq)]
struct ExternalLinkProps {
    href: AttrValue,
    label: AttrValue,
    #[prop_or_else(default_link_class)]
    class: AttrValue,
}

fn default_link_class() -> AttrValue {
    AttrValue::from("text-cyan-400")
}

#[function_component(ExternalLink)]
fn external_link(props: &ExternalLinkProps) -> Html {
    html! {
        <a class={props.class.clone()} href={props.href.clone()} target="_blank" rel="noopener noreferrer">
            { props.label.clone() }
            <span class="sr-only">{ " (opens in a new tab)" }</span>
        </a>
    }
}

fn section_heading(title: &'static str) -> Html {
    html! {
        <h2 class="reveal text-4xl font-bold text-center mb-16 text-cyan-500">{ title }</h2>
    }
}

#[function_component(HeroSection)]
pub fn hero_section(props: &SectionProps) -> Html {
    let profile = &props.content.profile;

    html! {
        <section id={SectionId::Home.as_str()} class="min-h-screen pt-20 flex items-center justify-center relative">
            <div class="text-center">
                <h1 class="reveal text-6xl md:text-8xl font-bold mb-6 text-white">
                    <span class="text-cyan-500">{ profile.headline_accent }</span>
                    { " " }
                    { profile.headline_rest }
                </h1>
                <div class="text-xl text-gray-400 mb-8">
                    { profile.tagline }
                    <div class="mt-6 space-x-4">
                        <a href={format!("mailto:{}", profile.email)} class="text-cyan-400">{ "Email" }</a>
                        <ExternalLink href={profile.linkedin} label="LinkedIn" />
                    </div>
                </div>
            </div>
        </section>
    }
}

fn checklist(items: &[&'static str]) -> Html {
    html! {
        <ul class="space-y-2 text-gray-400">
            { for items.iter().map(|item| html! { <li>{ format!("✓ {item}") }</li> }) }
        </ul>
    }
}

#[function_component(AboutSection)]
pub fn about_section(props: &SectionProps) -> Html {
    let profile = &props.content.profile;

    html! {
        <section id={SectionId::About.as_str()} class="min-h-screen py-20 px-4">
            { section_heading("About Me") }
            <div class="max-w-4xl mx-auto">
                <div class="reveal bg-gray-900 p-8 rounded-2xl border border-cyan-900">
                    <p class="text-gray-300 mb-6">{ profile.about }</p>
                    <div class="grid grid-cols-1 md:grid-cols-2 gap-8">
                        <div>
                            <h3 class="text-xl font-bold text-cyan-400 mb-4">{ "What I Do" }</h3>
                            { checklist(&profile.what_i_do) }
                        </div>
                        <div>
                            <h3 class="text-xl font-bold text-cyan-400 mb-4">{ "Tech Stack" }</h3>
                            { checklist(&profile.tech_stack) }
                        </div>
                    </div>
                </div>
            </div>
        </section>
    }
}

fn bullet_list(items: &[&'static str]) -> Html {
    html! {
        <ul class="space-y-2">
            { for items.iter().map(|item| html! {
                <li class="text-gray-400 flex items-start">
                    { chevron_icon() }
                    { *item }
                </li>
            }) }
        </ul>
    }
}

#[function_component(ExperienceSection)]
pub fn experience_section(props: &SectionProps) -> Html {
    let content = &props.content;

    html! {
        <section id={SectionId::Experience.as_str()} class="min-h-screen py-20 px-4">
            { section_heading("Experience & Education") }
            <div class="max-w-6xl mx-auto grid grid-cols-1 md:grid-cols-2 gap-8">
                <div class="space-y-8">
                    <h3 class="text-2xl font-bold text-cyan-400 mb-8">{ "Work Experience" }</h3>
                    { for content.experience.iter().map(|entry| html! {
                        <article class="experience-card lift bg-gray-900 p-6 rounded-xl border border-cyan-900">
                            <h4 class="text-xl font-bold text-white mb-2">{ entry.role }</h4>
                            <p class="text-cyan-400 mb-2">{ format!("{} | {}", entry.company, entry.period) }</p>
                            <p class="text-gray-400 mb-4">{ entry.description }</p>
                            { bullet_list(&entry.achievements) }
                        </article>
                    }) }
                </div>
                <div class="space-y-8">
                    <h3 class="text-2xl font-bold text-cyan-400 mb-8">{ "Education" }</h3>
                    { for content.education.iter().map(|entry| html! {
                        <article class="education-card lift bg-gray-900 p-6 rounded-xl border border-cyan-900">
                            <h4 class="text-xl font-bold text-white mb-2">{ entry.degree }</h4>
                            <p class="text-cyan-400 mb-2">{ format!("{} | {}", entry.school, entry.period) }</p>
                            { bullet_list(&entry.highlights) }
                        </article>
                    }) }
                </div>
            </div>
        </section>
    }
}

#[function_component(ProjectsSection)]
pub fn projects_section(props: &SectionProps) -> Html {
    html! {
        <section id={SectionId::Projects.as_str()} class="py-20 text-white">
            <h2 class="text-4xl font-bold text-center text-cyan-500 mb-8">{ "Projects" }</h2>
            <div class="max-w-4xl mx-auto grid grid-cols-1 md:grid-cols-2 gap-8">
                { for props.content.projects.iter().map(|project| html! {
                    <article class="project-card p-6 bg-gray-800 rounded-xl">
                        <h3 class="text-xl font-bold text-cyan-400">{ project.name }</h3>
                        <p>{ project.description }</p>
                        <p class="text-sm text-gray-400">{ format!("Tech: {}", project.tech) }</p>
                        if let Some(live_link) = project.live_link {
                            <ExternalLink href={live_link} label="View Project" class="text-cyan-400 pr-8" />
                        }
                        <ExternalLink href={project.source_link} label="View Source Code" />
                    </article>
                }) }
            </div>
        </section>
    }
}

#[function_component(SkillsSection)]
pub fn skills_section(props: &SectionProps) -> Html {
    html! {
        <section id={SectionId::Skills.as_str()} class="py-20 text-center text-gray-300">
            <h2 class="text-4xl font-bold text-cyan-500 mb-6">{ "Skills" }</h2>
            <div class="flex flex-wrap justify-center gap-4">
                { for props.content.skills.iter().map(|skill| html! {
                    <span class="skill-chip px-4 py-2 bg-gray-800 rounded-full text-cyan-400">{ *skill }</span>
                }) }
            </div>
        </section>
    }
}

#[function_component(ContactSection)]
pub fn contact_section(props: &SectionProps) -> Html {
    let contact = &props.content.contact;

    html! {
        <section id={SectionId::Contact.as_str()} class="py-20 text-center text-gray-300">
            <h2 class="text-4xl font-bold text-cyan-500 mb-4">{ "Contact" }</h2>
            <p>
                { "Email: " }
                <a href={format!("mailto:{}", contact.email)} class="text-cyan-400">{ contact.email }</a>
            </p>
            if let Some(phone) = contact.phone {
                <p class="contact-phone">
                    { "Phone: " }
                    <a href={format!("tel:{}", phone.replace(' ', ""))} class="text-cyan-400">{ phone }</a>
                </p>
            }
            <p>
                { "Github: " }
                <ExternalLink href={contact.github_link} label={contact.github_handle} />
            </p>
            <p>
                { "LinkedIn: " }
                <ExternalLink href={contact.linkedin_link} label={contact.linkedin_handle} />
            </p>
            if let Some(address) = contact.address {
                <p class="contact-address">{ format!("Address: {address}") }</p>
            }
        </section>
    }
}

fn code_icon() -> Html {
    html! {
        <svg class="inline-block mr-2 h-6 w-6" xmlns="http://www.w3.org/2000/svg" viewBox="0 0 24 24"
            fill="none" stroke="currentColor" stroke-width="2" stroke-linecap="round" stroke-linejoin="round"
            aria-hidden="true">
            <polyline points="16 18 22 12 16 6" />
            <polyline points="8 6 2 12 8 18" />
        </svg>
    }
}

fn chevron_icon() -> Html {
    html! {
        <svg class="text-cyan-500 mr-2 h-5 w-5 mt-1 shrink-0" xmlns="http://www.w3.org/2000/svg" viewBox="0 0 24 24"
            fill="none" stroke="currentColor" stroke-width="2" stroke-linecap="round" stroke-linejoin="round"
            aria-hidden="true">
            <path d="m9 18 6-6-6-6" />
        </svg>
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use super::*;
    use crate::content::ContactDetails;

    async fn render<C>(props: impl FnOnce() -> C::Properties + Send + 'static) -> String
    where
        C: BaseComponent,
    {
        yew::ServerRenderer::<C>::with_props(props)
            .hydratable(false)
            .render()
            .await
    }

    /// The opening tag that contains `needle`.
    fn tag_with<'a>(html: &'a str, needle: &str) -> &'a str {
        let at = html.find(needle).unwrap_or_else(|| panic!("`{needle}` not rendered"));
        let start = html[..at].rfind('<').expect("tag start");
        let end = at + html[at..].find('>').expect("tag end");
        &html[start..=end]
    }

    fn store_with(edit: impl FnOnce(&mut StaticContentStore)) -> Rc<StaticContentStore> {
        let mut store = StaticContentStore::portfolio();
        edit(&mut store);
        Rc::new(store)
    }

    #[tokio::test]
    async fn server_render_has_every_nav_target_and_no_decorations() {
        let html = render::<App>(|| AppProps {
            config: PageConfig::default(),
            content: default_content(),
            sources: None,
            viewport: None,
        })
        .await;

        for section in SectionId::ALL {
            assert!(html.contains(&format!("id=\"{}\"", section.as_str())), "{section}");
            assert!(html.contains(&format!("href=\"{}\"", section.anchor())), "{section}");
        }
        assert!(!html.contains("ambient-shape"));
        assert!(!html.contains("cursor-follower"));
        assert!(html.contains("backdrop"));
    }

    #[tokio::test]
    async fn server_render_highlights_home_and_starts_progress_at_zero() {
        let html = render::<App>(|| AppProps {
            config: PageConfig::default(),
            content: default_content(),
            sources: None,
            viewport: Some(Viewport { width: 1280.0, height: 720.0 }),
        })
        .await;

        assert!(tag_with(&html, "data-section=\"home\"").contains("nav-link-active"));
        assert!(tag_with(&html, "role=\"progressbar\"").contains("scaleX(0.0000)"));
        assert!(!html.contains("ambient-shape"), "decorations wait for mount");
    }

    #[tokio::test]
    async fn active_projects_link_is_styled_active() {
        let html = render::<NavBar>(|| NavBarProps {
            active: SectionId::Projects,
            brand: AttrValue::from("Baljeet Singh"),
        })
        .await;

        let projects = tag_with(&html, "data-section=\"projects\"");
        assert!(projects.contains("nav-link-active"));
        assert!(projects.contains("text-cyan-400"));
        assert!(projects.contains("aria-current=\"page\""));

        for other in SectionId::ALL.into_iter().filter(|s| *s != SectionId::Projects) {
            let tag = tag_with(&html, &format!("data-section=\"{other}\""));
            assert!(!tag.contains("nav-link-active"), "{other}");
            assert!(!tag.contains("aria-current"), "{other}");
        }
        assert_eq!(html.matches("nav-link-underline").count(), 1);
    }

    #[tokio::test]
    async fn projects_batch_from_a_source_highlights_the_projects_link() {
        use crate::events::{EventChannel, ScrollMetrics, VisibilityBatch, VisibilityEntry};

        let visibility = Rc::new(EventChannel::<VisibilityBatch>::new());
        let mut controller = PageController::new(
            0.5,
            PageSources {
                pointer: None,
                visibility: visibility.clone(),
                scroll: Rc::new(EventChannel::<ScrollMetrics>::new()),
            },
        );
        controller.mount();

        visibility.emit(&vec![
            VisibilityEntry::new("home", 0.1),
            VisibilityEntry::new("about", 0.2),
            VisibilityEntry::new("experience", 0.3),
            VisibilityEntry::new("projects", 0.6),
            VisibilityEntry::new("skills", 0.4),
            VisibilityEntry::new("contact", 0.0),
        ]);
        let active = controller.active_section().get();
        assert_eq!(active, SectionId::Projects);

        let html = render::<NavBar>(move || NavBarProps {
            active,
            brand: AttrValue::from("Baljeet Singh"),
        })
        .await;

        assert!(tag_with(&html, "data-section=\"projects\"").contains("nav-link-active"));
        assert!(!tag_with(&html, "data-section=\"home\"").contains("nav-link-active"));
    }

    #[tokio::test]
    async fn zero_projects_render_only_the_heading() {
        let html = render::<ProjectsSection>(|| SectionProps {
            content: store_with(|store| store.projects.clear()),
        })
        .await;

        assert!(html.contains("id=\"projects\""));
        assert!(html.contains("Projects"));
        assert!(!html.contains("project-card"));
    }

    #[tokio::test]
    async fn live_link_is_rendered_only_when_present() {
        let html = render::<ProjectsSection>(|| SectionProps {
            content: default_content(),
        })
        .await;

        assert_eq!(html.matches("project-card").count(), 2);
        assert_eq!(html.matches("View Project").count(), 1);
        assert_eq!(html.matches("View Source Code").count(), 2);
        assert!(html.contains("href=\"https://tech-media-platform-ui.onrender.com\""));
    }

    #[tokio::test]
    async fn optional_contact_fields_are_omitted() {
        let html = render::<ContactSection>(|| SectionProps {
            content: default_content(),
        })
        .await;
        assert!(!html.contains("contact-phone"));
        assert!(!html.contains("contact-address"));

        let html = render::<ContactSection>(|| SectionProps {
            content: store_with(|store| {
                store.contact = ContactDetails {
                    phone: Some("+91 00000 00000"),
                    address: Some("Somewhere 1"),
                    ..store.contact.clone()
                }
            }),
        })
        .await;
        assert!(html.contains("href=\"tel:+910000000000\""));
        assert!(html.contains("Address: Somewhere 1"));
    }

    #[tokio::test]
    async fn experience_cards_follow_content() {
        let html = render::<ExperienceSection>(|| SectionProps {
            content: default_content(),
        })
        .await;

        assert_eq!(html.matches("experience-card").count(), 2);
        assert_eq!(html.matches("education-card").count(), 2);
        assert!(html.contains("Assetplus, Chennai | January 2022 - Present"));
    }

    #[tokio::test]
    async fn backdrop_draws_shapes_and_follower_with_a_viewport() {
        let html = render::<Backdrop>(|| BackdropProps {
            shapes: Rc::new(ambient_shapes(3, 15)),
            viewport: Some(Viewport { width: 1024.0, height: 768.0 }),
            pointer: Some(PointerPosition { x: 500.0, y: 300.0 }),
            follower: CursorFollower::default(),
        })
        .await;

        assert_eq!(html.matches("ambient-shape").count(), 15);
        assert!(tag_with(&html, "cursor-follower").contains("translate(308.00px, 108.00px)"));
    }

    #[tokio::test]
    async fn backdrop_without_viewport_is_just_the_grid() {
        let html = render::<Backdrop>(|| BackdropProps {
            shapes: Rc::new(ambient_shapes(3, 15)),
            viewport: None,
            pointer: Some(PointerPosition::default()),
            follower: CursorFollower::default(),
        })
        .await;

        assert!(html.contains("background-size: 50px 50px;"));
        assert!(!html.contains("ambient-shape"));
        assert!(!html.contains("cursor-follower"));
    }
}
