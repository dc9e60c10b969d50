use web_sys::{Document, HtmlElement, Window};
use wasm_bindgen::JsCast;

pub fn content_fits(viewport_height: f64, content_height: f64) -> bool {
    viewport_height >= content_height
}

pub fn pin_to_bottom(element: &HtmlElement) {
    let style = element.style();
    let _ = style.set_property("position", "fixed");
    let _ = style.set_property("bottom", "0");
}

/// Returns whether the links region was pinned.
pub fn pin_links_if_content_fits(window: &Window, document: &Document, links_id: &str) -> bool {
    let Some(viewport_height) = window.inner_height().ok().and_then(|h| h.as_f64()) else {
        return false;
    };
    let Some(body) = document.body() else {
        return false;
    };
    if !content_fits(viewport_height, f64::from(body.client_height())) {
        return false;
    }
    match document
        .get_element_by_id(links_id)
        .and_then(|el| el.dyn_into::<HtmlElement>().ok())
    {
        Some(links) => {
            pin_to_bottom(&links);
            true
        }
        None => false,
    }
}
