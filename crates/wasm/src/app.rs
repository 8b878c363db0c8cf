use std::cell::RefCell;
use std::rc::Rc;

use gloo::events::{EventListener, EventListenerOptions};
use gloo::timers::callback::Interval;
use portfolio_fx_core::config::{ConfigError, PageConfig};
use portfolio_fx_core::effects::navigation::{self, ScrollIndicator};
use portfolio_fx_core::effects::{CursorEffect, ScrollCoordinator, Typewriter, particles, reveal};
use portfolio_fx_core::monitor::{PerformanceMonitor, load_time};
use portfolio_fx_core::{HostEnvironment, plan};
use portfolio_fx_protocol::{DomCommand, SharedStr, Target};
use rand::SeedableRng;
use rand::rngs::SmallRng;
use wasm_bindgen::prelude::*;
use web_sys::{
    Document, Element, ErrorEvent, MouseEvent, PageTransitionEvent,
    Performance, PerformanceNavigationTiming, PromiseRejectionEvent, Window,
};

use crate::dom::{Page, query_all};
use crate::observers;
use crate::timers::{self, CancelToken};

/// Id of the optional `<script type="application/json">` holding a
/// [`PageConfig`] override.
pub const CONFIG_ELEMENT_ID: &str = "portfolio-fx-config";

/// Read the embedded config block. Falls back to defaults (and returns the
/// reason) when it is missing or invalid.
pub fn load_config(document: &Document) -> (PageConfig, Option<ConfigError>) {
    let Some(text) = document
        .get_element_by_id(CONFIG_ELEMENT_ID)
        .and_then(|el| el.text_content())
    else {
        return (PageConfig::default(), None);
    };
    match PageConfig::from_json(&text) {
        Ok(config) => (config, None),
        Err(err) => (PageConfig::default(), Some(err)),
    }
}

/// Log uncaught errors and unhandled promise rejections.
pub fn install_fault_reporting(window: &Window) {
    EventListener::new(window, "error", |event| {
        let detail = event
            .dyn_ref::<ErrorEvent>()
            .map(|e| format!("{} ({:?})", e.message(), e.error()))
            .unwrap_or_default();
        tracing::error!("JavaScript error: {detail}");
    })
    .forget();

    EventListener::new(window, "unhandledrejection", |event| {
        let reason = event
            .dyn_ref::<PromiseRejectionEvent>()
            .map(|e| format!("{:?}", e.reason()))
            .unwrap_or_default();
        tracing::error!("Unhandled promise rejection: {reason}");
    })
    .forget();
}

/// Start every component. Components fail independently: an error in one
/// is logged and the rest still start.
pub fn boot(window: Window, document: Document, config: &PageConfig) {
    let hostname = window.location().hostname().unwrap_or_default();
    let page = Rc::new(Page::query(window, document, config.selectors.clone()));
    let env = HostEnvironment {
        viewport_width: page.viewport_width(),
        hostname,
    };
    let components = plan(config, &env);
    tracing::debug!(?components, ?env, "booting page effects");

    let token = CancelToken::default();
    let cancel = token.clone();
    EventListener::new(page.window(), "pagehide", move |event| {
        let persisted = event
            .dyn_ref::<PageTransitionEvent>()
            .is_some_and(PageTransitionEvent::persisted);
        cancel.on_pagehide(persisted);
    })
    .forget();

    let particle_count = start_particles(&page, config);
    start_visibility_pause(&page, particle_count);
    start_scroll_coordinator(&page, config);
    start_navigation(&page, config);
    report(
        "entrance observer",
        observers::observe_entrances(&page, &config.reveal),
    );
    page.apply(&reveal::stagger_cards(
        page.project_card_count(),
        config.reveal.card_stagger_secs,
    ));
    report("typewriter", start_typewriter(&page, config, token.clone()));
    start_scroll_indicator(&page, config);
    report("lazy images", observers::observe_lazy_images(&page));
    page.apply(&reveal::hero_entrance(page.hero_item_count()));

    if components.cursor {
        start_cursor(&page, config);
    }
    if components.monitor {
        start_monitor(&page, config, token);
    }
}

fn report(component: &str, result: Result<(), JsValue>) {
    if let Err(err) = result {
        tracing::error!(component, ?err, "component failed to start");
    }
}

fn start_particles(page: &Rc<Page>, config: &PageConfig) -> usize {
    if !page.has_particle_field() {
        return 0;
    }
    let seed = (js_sys::Math::random() * u64::MAX as f64) as u64;
    let specs = particles::generate(&config.particles, &mut SmallRng::seed_from_u64(seed));
    page.apply(&particles::field_commands(&specs));
    specs.len()
}

fn start_visibility_pause(page: &Rc<Page>, particle_count: usize) {
    let listener_page = Rc::clone(page);
    EventListener::new(page.document(), "visibilitychange", move |_| {
        let hidden = listener_page.document().hidden();
        listener_page.apply(&particles::play_state(particle_count, hidden));
    })
    .forget();
}

/// Feeds scroll events to the coordinator, one refresh per frame.
struct ScrollDriver {
    page: Rc<Page>,
    coordinator: RefCell<ScrollCoordinator>,
    frame: RefCell<Option<gloo::render::AnimationFrame>>,
}

impl ScrollDriver {
    fn on_scroll(self: &Rc<Self>) {
        if !self.coordinator.borrow_mut().on_scroll() {
            return;
        }
        let driver = Rc::clone(self);
        let handle = gloo::render::request_animation_frame(move |_| {
            driver.frame.borrow_mut().take();
            let snapshot = driver.page.scroll_snapshot();
            let commands = driver.coordinator.borrow_mut().refresh(&snapshot);
            driver.page.apply(&commands);
        });
        *self.frame.borrow_mut() = Some(handle);
    }
}

fn start_scroll_coordinator(page: &Rc<Page>, config: &PageConfig) {
    let links = page
        .nav_links()
        .iter()
        .map(|link| SharedStr::from(link.get_attribute("href").unwrap_or_default()))
        .collect();
    let driver = Rc::new(ScrollDriver {
        page: Rc::clone(page),
        coordinator: RefCell::new(ScrollCoordinator::new(config.scroll.clone(), links)),
        frame: RefCell::new(None),
    });
    EventListener::new(page.window(), "scroll", move |_| driver.on_scroll()).forget();
}

fn start_navigation(page: &Rc<Page>, config: &PageConfig) {
    let clearance = config.navigation.scroll_offset;
    for link in page.nav_links() {
        let Some(href) = link.get_attribute("href") else {
            continue;
        };
        let Some(id) = navigation::section_id(&href).map(str::to_owned) else {
            continue;
        };
        let listener_page = Rc::clone(page);
        EventListener::new_with_options(
            link,
            "click",
            EventListenerOptions::enable_prevent_default(),
            move |event| {
                event.prevent_default();
                if let Some(command) =
                    navigation::scroll_target(listener_page.offset_top_of(&id), clearance)
                {
                    listener_page.apply(&[command]);
                }
            },
        )
        .forget();
    }
}

fn start_typewriter(
    page: &Rc<Page>,
    config: &PageConfig,
    token: CancelToken,
) -> Result<(), JsValue> {
    if !page.has_subtitle() {
        return Ok(());
    }
    let mut typewriter =
        Typewriter::new(&config.typewriter).map_err(|e| JsValue::from_str(&e.to_string()))?;
    let page = Rc::clone(page);
    timers::timeout_chain(typewriter.start_delay_ms(), token, move || {
        let tick = typewriter.step();
        if let Some(text) = tick.text {
            page.apply(&[DomCommand::SetText {
                target: Target::Subtitle,
                text,
            }]);
        }
        Some(tick.delay_ms)
    });
    Ok(())
}

fn start_scroll_indicator(page: &Rc<Page>, config: &PageConfig) {
    let Some(element) = page.scroll_indicator() else {
        return;
    };
    let indicator = Rc::new(RefCell::new(ScrollIndicator::new(
        config.scroll.indicator_hide_after,
    )));

    let click_page = Rc::clone(page);
    let click_indicator = Rc::clone(&indicator);
    let section = config.navigation.indicator_section.clone();
    EventListener::new(element, "click", move |_| {
        let index = click_page.section_index(&section);
        if let Some(command) = click_indicator.borrow().on_click(index) {
            click_page.apply(&[command]);
        }
    })
    .forget();

    let scroll_page = Rc::clone(page);
    EventListener::new(page.window(), "scroll", move |_| {
        let command = indicator.borrow_mut().on_scroll(scroll_page.scroll_top());
        scroll_page.apply(&[command]);
    })
    .forget();
}

fn start_cursor(page: &Rc<Page>, config: &PageConfig) {
    let cursor = Rc::new(RefCell::new(CursorEffect::new(config.cursor.clone())));
    page.apply(&cursor.borrow().spawn_commands());

    let move_page = Rc::clone(page);
    let move_cursor = Rc::clone(&cursor);
    EventListener::new(page.document(), "mousemove", move |event| {
        let Some(event) = event.dyn_ref::<MouseEvent>() else {
            return;
        };
        let commands = move_cursor
            .borrow_mut()
            .on_pointer_move(f64::from(event.client_x()), f64::from(event.client_y()));
        move_page.apply(&commands);
    })
    .forget();

    let targets: Vec<Element> = query_all(page.document(), &config.selectors.hover_targets);
    for target in &targets {
        for (event_type, hovering) in [("mouseenter", true), ("mouseleave", false)] {
            let hover_page = Rc::clone(page);
            let hover_cursor = Rc::clone(&cursor);
            EventListener::new(target, event_type, move |_| {
                let commands = hover_cursor.borrow_mut().set_hover(hovering);
                hover_page.apply(&commands);
            })
            .forget();
        }
    }
}

fn start_monitor(page: &Rc<Page>, config: &PageConfig, token: CancelToken) {
    let monitor = Rc::new(RefCell::new(PerformanceMonitor::new(
        &config.monitor,
        timers::now(),
    )));

    let load_monitor = Rc::clone(&monitor);
    let load_performance = page.window().performance();
    let record_load = move || {
        let load_event_start = load_performance.as_ref().and_then(load_event_start);
        let line = load_monitor
            .borrow_mut()
            .record_load(load_time(load_event_start, timers::now()));
        tracing::info!("{line}");
    };
    if page.document().ready_state() == "complete" {
        record_load();
    } else {
        EventListener::once(page.window(), "load", move |_| record_load()).forget();
    }

    let frame_monitor = Rc::clone(&monitor);
    timers::frame_loop(token.clone(), move |timestamp| {
        frame_monitor.borrow_mut().record_frame(timestamp);
        true
    });

    // `performance.memory` is non-standard and Chromium-only.
    let Some(performance) = page.window().performance() else {
        return;
    };
    if used_heap_bytes(&performance).is_none() {
        return;
    }
    Interval::new(config.monitor.memory_interval_ms, move || {
        if token.is_cancelled() {
            return;
        }
        if let Some(used) = used_heap_bytes(&performance) {
            monitor.borrow_mut().record_memory(used);
        }
    })
    .forget();
}

/// `loadEventStart` of the navigation timing entry, when the browser has one.
fn load_event_start(performance: &Performance) -> Option<f64> {
    performance
        .get_entries_by_type("navigation")
        .get(0)
        .dyn_into::<PerformanceNavigationTiming>()
        .ok()
        .map(|entry| entry.load_event_start())
}

fn used_heap_bytes(performance: &Performance) -> Option<f64> {
    let memory = js_sys::Reflect::get(performance, &JsValue::from_str("memory")).ok()?;
    if memory.is_undefined() {
        return None;
    }
    js_sys::Reflect::get(&memory, &JsValue::from_str("usedJSHeapSize"))
        .ok()?
        .as_f64()
}
