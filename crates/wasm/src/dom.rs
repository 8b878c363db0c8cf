use std::cell::RefCell;
use std::collections::HashMap;

use portfolio_fx_core::config::Selectors;
use portfolio_fx_core::model::{RevealCandidate, ScrollSnapshot, SectionBounds};
use portfolio_fx_protocol::{DomCommand, ScrollBehavior, Target};
use thiserror::Error;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{
    Document, Element, HtmlElement, HtmlImageElement, IntersectionObserver, ScrollIntoViewOptions,
    ScrollToOptions, Window,
};

#[derive(Debug, Error)]
pub enum DomError {
    #[error("javascript exception: {0}")]
    Js(String),
    #[error("no document body")]
    NoBody,
}

impl From<JsValue> for DomError {
    fn from(value: JsValue) -> Self {
        DomError::Js(value.as_string().unwrap_or_else(|| format!("{value:?}")))
    }
}

/// The document hooks resolved once at boot, plus every node the effects
/// spawn later. [`Target`]s are looked up here when commands are applied.
pub struct Page {
    window: Window,
    document: Document,
    selectors: Selectors,
    header: Option<Element>,
    nav_links: Vec<Element>,
    sections: Vec<HtmlElement>,
    particle_field: Option<Element>,
    scroll_indicator: Option<Element>,
    subtitle: Option<Element>,
    entrance_reveals: Vec<Element>,
    lazy_images: Vec<HtmlImageElement>,
    project_cards: Vec<HtmlElement>,
    hero_items: Vec<Element>,
    /// Every scroll-reveal element seen so far. An element's position here
    /// is its reveal key; entries are only ever appended.
    scroll_reveals: RefCell<Vec<Element>>,
    spawned: RefCell<HashMap<Target, HtmlElement>>,
    lazy_observer: RefCell<Option<IntersectionObserver>>,
}

impl Page {
    pub fn query(window: Window, document: Document, selectors: Selectors) -> Self {
        let one = |selector: &str| document.query_selector(selector).ok().flatten();
        Self {
            header: one(&selectors.header),
            nav_links: query_all(&document, &selectors.nav_links),
            sections: query_all(&document, &selectors.sections),
            particle_field: one(&selectors.particle_field),
            scroll_indicator: one(&selectors.scroll_indicator),
            subtitle: one(&selectors.subtitle),
            entrance_reveals: query_all(&document, &selectors.entrance_reveal),
            lazy_images: query_all(&document, &selectors.lazy_images),
            project_cards: query_all(&document, &selectors.project_cards),
            hero_items: query_all(&document, &selectors.hero_items),
            scroll_reveals: RefCell::new(Vec::new()),
            spawned: RefCell::new(HashMap::new()),
            lazy_observer: RefCell::new(None),
            window,
            document,
            selectors,
        }
    }

    pub fn window(&self) -> &Window {
        &self.window
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn nav_links(&self) -> &[Element] {
        &self.nav_links
    }

    pub fn entrance_reveals(&self) -> &[Element] {
        &self.entrance_reveals
    }

    pub fn lazy_images(&self) -> &[HtmlImageElement] {
        &self.lazy_images
    }

    pub fn project_card_count(&self) -> usize {
        self.project_cards.len()
    }

    pub fn hero_item_count(&self) -> usize {
        self.hero_items.len()
    }

    pub fn has_subtitle(&self) -> bool {
        self.subtitle.is_some()
    }

    pub fn has_particle_field(&self) -> bool {
        self.particle_field.is_some()
    }

    pub fn scroll_indicator(&self) -> Option<&Element> {
        self.scroll_indicator.as_ref()
    }

    /// Index of the `section[id]` with the given id.
    pub fn section_index(&self, id: &str) -> Option<usize> {
        self.sections.iter().position(|s| s.id() == id)
    }

    /// `offsetTop` of any element with the given id.
    pub fn offset_top_of(&self, id: &str) -> Option<f64> {
        let element = self.document.get_element_by_id(id)?;
        let element = element.dyn_ref::<HtmlElement>()?;
        Some(f64::from(element.offset_top()))
    }

    pub fn set_lazy_observer(&self, observer: IntersectionObserver) {
        *self.lazy_observer.borrow_mut() = Some(observer);
    }

    pub fn scroll_top(&self) -> f64 {
        self.window.scroll_y().unwrap_or(0.0).max(0.0)
    }

    pub fn viewport_width(&self) -> f64 {
        self.window
            .inner_width()
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or(0.0)
    }

    fn viewport_height(&self) -> f64 {
        self.window
            .inner_height()
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or(0.0)
    }

    /// Sample the page for one scroll refresh. Scroll-reveal elements are
    /// re-queried so ones added after boot are picked up.
    pub fn scroll_snapshot(&self) -> ScrollSnapshot {
        let current: Vec<Element> = query_all(&self.document, &self.selectors.scroll_reveal);
        let reveals = current
            .iter()
            .map(|el| {
                RevealCandidate::new(self.reveal_key(el), el.get_bounding_client_rect().top())
            })
            .collect();

        ScrollSnapshot {
            sections: self
                .sections
                .iter()
                .map(|s| {
                    SectionBounds::new(
                        s.id(),
                        f64::from(s.offset_top()),
                        f64::from(s.offset_height()),
                    )
                })
                .collect(),
            reveals,
            ..ScrollSnapshot::at(self.scroll_top(), self.viewport_height())
        }
    }

    fn reveal_key(&self, element: &Element) -> usize {
        let mut known = self.scroll_reveals.borrow_mut();
        if let Some(key) = known.iter().position(|el| el == element) {
            return key;
        }
        known.push(element.clone());
        known.len() - 1
    }

    /// Apply commands in order. Missing targets are skipped; a failing
    /// command is logged and does not stop the rest.
    pub fn apply(&self, commands: &[DomCommand]) {
        for command in commands {
            if let Err(err) = self.apply_one(command) {
                tracing::warn!(?command, %err, "DOM command failed");
            }
        }
    }

    fn apply_one(&self, command: &DomCommand) -> Result<(), DomError> {
        match command {
            DomCommand::SetClass {
                target,
                class,
                enabled,
            } => {
                let Some(el) = self.resolve(*target) else {
                    return Ok(());
                };
                let name = class.class_name();
                if *enabled {
                    el.class_list().add_1(&name)?;
                } else {
                    el.class_list().remove_1(&name)?;
                }
            }
            DomCommand::SetStyle {
                target,
                property,
                value,
            } => {
                let Some(el) = self.resolve(*target) else {
                    return Ok(());
                };
                if let Some(el) = el.dyn_ref::<HtmlElement>() {
                    el.style().set_property(property.css_name(), value)?;
                }
            }
            DomCommand::SetText { target, text } => {
                if let Some(el) = self.resolve(*target) {
                    el.set_text_content(Some(text.as_str()));
                }
            }
            DomCommand::Spawn {
                target,
                class,
                parent,
            } => self.spawn(*target, &class.class_name(), *parent)?,
            DomCommand::LoadImage { target } => {
                if let Target::LazyImage(i) = target
                    && let Some(img) = self.lazy_images.get(*i)
                    && let Some(src) = img.get_attribute("data-src")
                {
                    img.set_src(&src);
                }
            }
            DomCommand::Unobserve { target } => {
                let observer = self.lazy_observer.borrow();
                if let (Some(el), Some(observer)) = (self.resolve(*target), observer.as_ref()) {
                    observer.unobserve(&el);
                }
            }
            DomCommand::ScrollTo { top, behavior } => {
                let options = ScrollToOptions::new();
                options.set_top(*top);
                options.set_behavior(scroll_behavior(*behavior));
                self.window.scroll_to_with_scroll_to_options(&options);
            }
            DomCommand::ScrollIntoView { target, behavior } => {
                if let Some(el) = self.resolve(*target) {
                    let options = ScrollIntoViewOptions::new();
                    options.set_behavior(scroll_behavior(*behavior));
                    el.scroll_into_view_with_scroll_into_view_options(&options);
                }
            }
        }
        Ok(())
    }

    fn spawn(&self, target: Target, class: &str, parent: Option<Target>) -> Result<(), DomError> {
        let parent: Element = match parent {
            Some(parent) => match self.resolve(parent) {
                Some(el) => el,
                None => return Ok(()),
            },
            None => self.document.body().ok_or(DomError::NoBody)?.into(),
        };
        let node: HtmlElement = self.document.create_element("div")?.unchecked_into();
        node.set_class_name(class);
        parent.append_child(&node)?;
        self.spawned.borrow_mut().insert(target, node);
        Ok(())
    }

    fn resolve(&self, target: Target) -> Option<Element> {
        match target {
            Target::Header => self.header.clone(),
            Target::NavLink(i) => self.nav_links.get(i).cloned(),
            Target::Section(i) => self.sections.get(i).map(|s| s.clone().into()),
            Target::ScrollIndicator => self.scroll_indicator.clone(),
            Target::Subtitle => self.subtitle.clone(),
            Target::ParticleField => self.particle_field.clone(),
            Target::ScrollReveal(key) => self.scroll_reveals.borrow().get(key).cloned(),
            Target::EntranceReveal(i) => self.entrance_reveals.get(i).cloned(),
            Target::LazyImage(i) => self.lazy_images.get(i).map(|img| img.clone().into()),
            Target::ProjectCard(i) => self.project_cards.get(i).map(|c| c.clone().into()),
            Target::HeroItem(i) => self.hero_items.get(i).cloned(),
            Target::Particle(_) | Target::Cursor | Target::CursorTrail => self
                .spawned
                .borrow()
                .get(&target)
                .map(|el| el.clone().into()),
        }
    }
}

/// Every match of `selector` that casts to `T`. An invalid selector yields
/// nothing.
pub fn query_all<T: JsCast>(document: &Document, selector: &str) -> Vec<T> {
    let list = match document.query_selector_all(selector) {
        Ok(list) => list,
        Err(err) => {
            tracing::warn!(selector, ?err, "invalid selector");
            return Vec::new();
        }
    };
    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<T>().ok())
        .collect()
}

fn scroll_behavior(behavior: ScrollBehavior) -> web_sys::ScrollBehavior {
    match behavior {
        ScrollBehavior::Smooth => web_sys::ScrollBehavior::Smooth,
        ScrollBehavior::Instant => web_sys::ScrollBehavior::Instant,
    }
}
