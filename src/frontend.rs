use std::{io, rc::Rc};

use cyan_portfolio::{
    ambient::Viewport,
    config::{PageConfig, PAGE_CONFIG_ATTRIBUTE},
    content::StaticContentStore,
    controller::PageSources,
    events::{EventSource, PointerMove, ScrollMetrics, VisibilityBatch, VisibilityEntry},
    observable::Subscription,
    view::{App, AppProps},
    MOUNT_POINT_ID,
};
use js_sys::Array;
use tracing::{debug, info, warn};
use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use web_sys::{
    window, AddEventListenerOptions, Document, Element, Event, IntersectionObserver,
    IntersectionObserverEntry, IntersectionObserverInit, MouseEvent, Window,
};

#[derive(Debug, thiserror::Error)]
pub enum MountError {
    #[error("no browser window available")]
    NoWindow,
    #[error("window has no document")]
    NoDocument,
    #[error("missing #{0} mount point")]
    MissingMountPoint(&'static str),
}

#[derive(Default)]
struct ConsoleWriter {
    buffer: Vec<u8>,
}

impl io::Write for ConsoleWriter {
    fn write(&mut self, bytes: &[u8]) -> io::Result<usize> {
        self.buffer.extend_from_slice(bytes);
        Ok(bytes.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

// One formatted event per writer; emit it as one console line.
impl Drop for ConsoleWriter {
    fn drop(&mut self) {
        if self.buffer.is_empty() {
            return;
        }

        let line = String::from_utf8_lossy(&self.buffer);
        web_sys::console::log_1(&JsValue::from_str(line.trim_end()));
    }
}

fn init_logging() {
    let level = if cfg!(debug_assertions) {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };

    let _ = tracing_subscriber::fmt()
        .with_writer(ConsoleWriter::default)
        .with_ansi(false)
        .without_time()
        .with_max_level(level)
        .try_init();
}

fn prefers_reduced_motion(window: &Window) -> bool {
    window
        .match_media("(prefers-reduced-motion: reduce)")
        .ok()
        .flatten()
        .map(|mq| mq.matches())
        .unwrap_or(false)
}

fn viewport_size(window: &Window) -> Option<Viewport> {
    let width = window.inner_width().ok()?.as_f64()?;
    let height = window.inner_height().ok()?.as_f64()?;
    Viewport::new(width, height)
}

fn decorative_viewport(window: &Window) -> Option<Viewport> {
    if prefers_reduced_motion(window) {
        debug!("reduced motion requested, skipping backdrop animation");
        return None;
    }

    viewport_size(window)
}

fn window_listener(
    window: &Window,
    kinds: &'static [&'static str],
    handler: impl FnMut(Event) + 'static,
) -> Subscription {
    let callback = Closure::<dyn FnMut(Event)>::new(handler);
    let options = AddEventListenerOptions::new();
    options.set_passive(true);

    for kind in kinds {
        if let Err(error) = window.add_event_listener_with_callback_and_add_event_listener_options(
            kind,
            callback.as_ref().unchecked_ref(),
            &options,
        ) {
            warn!(kind = *kind, ?error, "failed to add window listener");
        }
    }

    let window = window.clone();
    Subscription::new(move || {
        for kind in kinds {
            let _ = window.remove_event_listener_with_callback(kind, callback.as_ref().unchecked_ref());
        }
        drop(callback);
    })
}

struct WindowPointerSource {
    window: Window,
}

impl EventSource<PointerMove> for WindowPointerSource {
    fn listen(&self, handler: Rc<dyn Fn(&PointerMove)>) -> Subscription {
        window_listener(&self.window, &["mousemove"], move |event| {
            if let Some(event) = event.dyn_ref::<MouseEvent>() {
                handler(&PointerMove {
                    x: f64::from(event.client_x()),
                    y: f64::from(event.client_y()),
                });
            }
        })
    }
}

struct WindowScrollSource {
    window: Window,
}

fn scroll_metrics(window: &Window) -> Option<ScrollMetrics> {
    let root = window.document()?.document_element()?;

    Some(ScrollMetrics {
        scroll_top: window.scroll_y().ok()?,
        scroll_height: f64::from(root.scroll_height()),
        viewport_height: window.inner_height().ok()?.as_f64()?,
    })
}

impl EventSource<ScrollMetrics> for WindowScrollSource {
    fn listen(&self, handler: Rc<dyn Fn(&ScrollMetrics)>) -> Subscription {
        if let Some(metrics) = scroll_metrics(&self.window) {
            handler(&metrics);
        }

        let window = self.window.clone();
        window_listener(&self.window, &["scroll", "resize"], move |_| {
            if let Some(metrics) = scroll_metrics(&window) {
                handler(&metrics);
            }
        })
    }
}

struct SectionIntersectionSource {
    document: Document,
    threshold: f64,
}

impl EventSource<VisibilityBatch> for SectionIntersectionSource {
    fn listen(&self, handler: Rc<dyn Fn(&VisibilityBatch)>) -> Subscription {
        let callback = Closure::<dyn FnMut(Array, IntersectionObserver)>::new(
            move |entries: Array, _observer: IntersectionObserver| {
                let batch: VisibilityBatch = entries
                    .iter()
                    .filter_map(|value| value.dyn_into::<IntersectionObserverEntry>().ok())
                    .map(|entry| VisibilityEntry::new(entry.target().id(), entry.intersection_ratio()))
                    .collect();

                if !batch.is_empty() {
                    handler(&batch);
                }
            },
        );

        let init = IntersectionObserverInit::new();
        init.set_threshold(&JsValue::from_f64(self.threshold));

        let observer =
            match IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &init) {
                Ok(observer) => observer,
                Err(error) => {
                    warn!(?error, "intersection observer unavailable, nav highlight disabled");
                    return Subscription::noop();
                }
            };

        let mut observed = 0_u32;
        if let Ok(sections) = self.document.query_selector_all("section") {
            for index in 0..sections.length() {
                if let Some(section) = sections.item(index).and_then(|node| node.dyn_into::<Element>().ok()) {
                    observer.observe(&section);
                    observed += 1;
                }
            }
        }
        debug!(observed, threshold = self.threshold, "observing sections");

        Subscription::new(move || {
            observer.disconnect();
            drop(callback);
        })
    }
}

pub fn run() -> Result<(), MountError> {
    init_logging();

    let window = window().ok_or(MountError::NoWindow)?;
    let document = window.document().ok_or(MountError::NoDocument)?;
    let root = document
        .get_element_by_id(MOUNT_POINT_ID)
        .ok_or(MountError::MissingMountPoint(MOUNT_POINT_ID))?;

    let config =
        PageConfig::from_json_or_default(root.get_attribute(PAGE_CONFIG_ATTRIBUTE).as_deref());

    let sources = PageSources {
        pointer: Some(Rc::new(WindowPointerSource {
            window: window.clone(),
        })),
        visibility: Rc::new(SectionIntersectionSource {
            document,
            threshold: config.visibility_threshold,
        }),
        scroll: Rc::new(WindowScrollSource {
            window: window.clone(),
        }),
    };

    let props = AppProps {
        config,
        content: Rc::new(StaticContentStore::portfolio()),
        sources: Some(sources),
        viewport: decorative_viewport(&window),
    };

    let prerendered = root.child_element_count() > 0;
    let renderer = yew::Renderer::<App>::with_root_and_props(root, props);
    if prerendered {
        renderer.hydrate();
    } else {
        renderer.render();
    }

    info!(prerendered, "portfolio mounted");
    Ok(())
}
