use std::rc::Rc;

use portfolio_fx_core::config::RevealConfig;
use portfolio_fx_core::effects::{EntranceReveal, LazyImages};
use wasm_bindgen::prelude::*;
use web_sys::{Element, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit};

use crate::dom::Page;

type EntryCallback = Closure<dyn FnMut(js_sys::Array, IntersectionObserver)>;

/// Watch `[data-aos]` elements; each gains `aos-animate` on first entry.
pub fn observe_entrances(page: &Rc<Page>, config: &RevealConfig) -> Result<(), JsValue> {
    if page.entrance_reveals().is_empty() {
        return Ok(());
    }
    let mut reveal = EntranceReveal::default();
    let callback_page = Rc::clone(page);
    let callback: EntryCallback =
        Closure::new(move |entries: js_sys::Array, _observer: IntersectionObserver| {
            let commands: Vec<_> = for_each_entry(&entries, callback_page.entrance_reveals())
                .filter_map(|(index, intersecting)| reveal.on_intersect(index, intersecting))
                .collect();
            callback_page.apply(&commands);
        });

    let init = IntersectionObserverInit::new();
    init.set_threshold(&JsValue::from_f64(config.threshold));
    init.set_root_margin(&config.root_margin);
    let observer =
        IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &init)?;
    for el in page.entrance_reveals() {
        observer.observe(el);
    }
    // Lives as long as the page.
    callback.forget();
    Ok(())
}

/// Watch `img[data-src]`; each image gets its real source once and is then
/// unobserved.
pub fn observe_lazy_images(page: &Rc<Page>) -> Result<(), JsValue> {
    if page.lazy_images().is_empty() {
        return Ok(());
    }
    let mut images = LazyImages::default();
    let callback_page = Rc::clone(page);
    let callback: EntryCallback =
        Closure::new(move |entries: js_sys::Array, _observer: IntersectionObserver| {
            let elements: Vec<Element> = callback_page
                .lazy_images()
                .iter()
                .map(|img| img.clone().into())
                .collect();
            let commands: Vec<_> = for_each_entry(&entries, &elements)
                .flat_map(|(index, intersecting)| images.on_intersect(index, intersecting))
                .collect();
            callback_page.apply(&commands);
        });

    let observer = IntersectionObserver::new(callback.as_ref().unchecked_ref())?;
    for img in page.lazy_images() {
        observer.observe(img);
    }
    page.set_lazy_observer(observer);
    callback.forget();
    Ok(())
}

/// Map observer entries to `(index into watched, is_intersecting)`.
fn for_each_entry<'a>(
    entries: &'a js_sys::Array,
    watched: &'a [Element],
) -> impl Iterator<Item = (usize, bool)> + 'a {
    entries.iter().filter_map(move |value| {
        let entry: IntersectionObserverEntry = value.unchecked_into();
        let target = entry.target();
        let index = watched.iter().position(|el| *el == target)?;
        Some((index, entry.is_intersecting()))
    })
}
