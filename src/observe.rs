use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use web_sys::{
    Document, Element, HtmlElement, HtmlImageElement, IntersectionObserver,
    IntersectionObserverEntry, IntersectionObserverInit,
};

const REVEAL_THRESHOLD: f64 = 0.2;
const REVEAL_ROOT_MARGIN: &str = "0px 0px -100px 0px";
const SKILLS_THRESHOLD: f64 = 0.3;

type EntryCallback = Closure<dyn FnMut(js_sys::Array, IntersectionObserver)>;

/// Keeps an observer and its callback alive; disconnects when dropped.
pub struct ObserverHandle {
    observer: IntersectionObserver,
    _callback: EntryCallback,
}

impl ObserverHandle {
    fn with_options(
        options: &IntersectionObserverInit,
        mut on_entry: impl FnMut(&IntersectionObserverEntry, &IntersectionObserver) + 'static,
    ) -> Option<Self> {
        let callback: EntryCallback = Closure::new(
            move |entries: js_sys::Array, observer: IntersectionObserver| {
                for entry in entries.iter() {
                    let entry: IntersectionObserverEntry = entry.unchecked_into();
                    on_entry(&entry, &observer);
                }
            },
        );

        match IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), options) {
            Ok(observer) => Some(Self {
                observer,
                _callback: callback,
            }),
            Err(error) => {
                log::warn!("intersection observer unavailable: {error:?}");
                None
            }
        }
    }

    fn observe(&self, element: &Element) {
        self.observer.observe(element);
    }
}

impl Drop for ObserverHandle {
    fn drop(&mut self) {
        self.observer.disconnect();
    }
}

/// Adds the `visible` class to a section the first time it intersects.
/// The class is never removed; later entries are effectively no-ops.
pub fn reveal_sections(document: &Document, section_ids: &[&str]) -> Option<ObserverHandle> {
    let options = IntersectionObserverInit::new();
    options.set_threshold(&JsValue::from_f64(REVEAL_THRESHOLD));
    options.set_root_margin(REVEAL_ROOT_MARGIN);

    let handle = ObserverHandle::with_options(&options, |entry, _observer| {
        if entry.is_intersecting() {
            let _ = entry.target().class_list().add_1("visible");
        }
    })?;

    for id in section_ids {
        if let Some(section) = document.get_element_by_id(id) {
            handle.observe(&section);
        }
    }

    Some(handle)
}

/// Watches the skills section; the first intersection fills every bar and
/// the container is unobserved so the animation runs once per page load.
pub fn skill_bars(document: &Document, container_id: &str) -> Option<ObserverHandle> {
    let container = document.get_element_by_id(container_id)?;

    let options = IntersectionObserverInit::new();
    options.set_threshold(&JsValue::from_f64(SKILLS_THRESHOLD));

    let document = document.clone();
    let handle = ObserverHandle::with_options(&options, move |entry, observer| {
        if entry.is_intersecting() {
            fill_skill_bars(&document);
            observer.unobserve(&entry.target());
        }
    })?;

    handle.observe(&container);
    Some(handle)
}

fn fill_skill_bars(document: &Document) {
    let Ok(bars) = document.query_selector_all(".skill-bar-fill") else {
        return;
    };

    for index in 0..bars.length() {
        let Some(bar) = bars
            .item(index)
            .and_then(|node| node.dyn_into::<HtmlElement>().ok())
        else {
            continue;
        };
        let Some(percentage) = bar.get_attribute("data-percentage") else {
            continue;
        };
        if bar.class_list().contains("animated") {
            continue;
        }
        let _ = bar.style().set_property("width", &format!("{percentage}%"));
        let _ = bar.class_list().add_1("animated");
    }
}

/// Swaps `data-src` into `src` the first time an image intersects, then
/// stops observing it. The deferred attribute is consumed so a second
/// entry cannot re-trigger the load.
pub fn lazy_images(document: &Document) -> Option<ObserverHandle> {
    let Ok(images) = document.query_selector_all("img[data-src]") else {
        return None;
    };

    let options = IntersectionObserverInit::new();
    let handle = ObserverHandle::with_options(&options, |entry, observer| {
        if !entry.is_intersecting() {
            return;
        }
        let Ok(image) = entry.target().dyn_into::<HtmlImageElement>() else {
            return;
        };
        if let Some(src) = image.get_attribute("data-src") {
            image.set_src(&src);
            let _ = image.remove_attribute("data-src");
        }
        observer.unobserve(&image);
    })?;

    for index in 0..images.length() {
        if let Some(image) = images
            .item(index)
            .and_then(|node| node.dyn_into::<Element>().ok())
        {
            handle.observe(&image);
        }
    }

    Some(handle)
}
