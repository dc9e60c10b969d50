//! Page initialization: bind element roles once, wire the listeners, then run
//! the one-shot passes.
//!
//! Subsystems are bound independently. A page without the editor form still
//! gets its static markdown rendered and its footer laid out.

use std::rc::Rc;

use leptos::logging::{log, warn};
use wasm_bindgen::prelude::*;
use web_sys::{Document, Event, EventTarget, Window};

use crate::config::{DeviceProfile, PageConfig};
use crate::error::PageError;
use crate::layout::pin_links_if_content_fits;
use crate::render::{CmarkRenderer, MarkdownRenderer};
use crate::scheduler::{LoadAction, PreviewScheduler, PreviewTargets};
use crate::static_blocks::render_document_blocks;
use crate::submit::{PasswordFields, SubmitFields, SubmitPreparer};
use crate::surface::{field, optional_field, region, FormField, TextField};
use crate::timer::BrowserTimers;

fn listen(
    target: &EventTarget,
    event: &'static str,
    closure: Closure<dyn FnMut(Event)>,
) -> Result<(), PageError> {
    target
        .add_event_listener_with_callback(event, closure.as_ref().unchecked_ref::<js_sys::Function>())
        .map_err(|err| PageError::listener(event, err))?;
    // Listeners live as long as the page.
    closure.forget();
    Ok(())
}

/// Initializes now if the document already finished loading, otherwise on
/// the window's `load` event.
pub fn run_when_loaded() -> Result<(), PageError> {
    let window = web_sys::window().ok_or(PageError::NoWindow)?;
    let document = window.document().ok_or(PageError::NoDocument)?;
    if document.ready_state() == "complete" {
        return init_page();
    }

    let on_load = Closure::<dyn FnMut(Event)>::new(move |_: Event| {
        if let Err(err) = init_page() {
            warn!("note-preview: initialization failed: {err}");
        }
    });
    listen(&window, "load", on_load)
}

pub fn init_page() -> Result<(), PageError> {
    let window = web_sys::window().ok_or(PageError::NoWindow)?;
    let document = window.document().ok_or(PageError::NoDocument)?;
    init_document(&window, &document);
    Ok(())
}

/// Binds and runs every subsystem against `document`.
pub fn init_document(window: &Window, document: &Document) {
    let config = PageConfig::load(document);
    let user_agent = window.navigator().user_agent().unwrap_or_default();
    let device = DeviceProfile::resolve(&config, &user_agent);
    let renderer: Rc<dyn MarkdownRenderer> = Rc::new(CmarkRenderer::default());
    log!(
        "note-preview: touch_device={} base_delay={:?} hash={}",
        device.touch_device,
        device.base_delay(&config.delays),
        config.hash.name()
    );

    if let Some(load_action) = optional_field(document, &config.ids.load_action) {
        wire_editor(document, &config, device, &renderer, &load_action);
    }

    let rendered = render_document_blocks(document, &config.markdown_class, renderer.as_ref());
    let pinned = pin_links_if_content_fits(window, document, &config.ids.links);
    log!("note-preview: rendered {rendered} static block(s), links pinned: {pinned}");
}

fn wire_editor(
    document: &Document,
    config: &PageConfig,
    device: DeviceProfile,
    renderer: &Rc<dyn MarkdownRenderer>,
    load_action: &FormField,
) {
    let note = match field(document, "noteText", &config.ids.note) {
        Ok(note) => note,
        Err(err) => {
            warn!("note-preview: editor not wired: {err}");
            return;
        }
    };
    let action = LoadAction::parse(&load_action.value());

    match bind_scheduler(document, config, device, renderer) {
        Ok(scheduler) => {
            let scheduler = Rc::new(scheduler);
            scheduler.prime(action, &note);
            let source = note.clone();
            let on_keyup = Closure::<dyn FnMut(Event)>::new(move |_: Event| {
                scheduler.on_text_changed(&source.value());
            });
            if let Err(err) = listen(note.html_element(), "keyup", on_keyup) {
                warn!("note-preview: live preview disabled: {err}");
            }
        }
        Err(err) => {
            warn!("note-preview: live preview disabled: {err}");
            if action == LoadAction::Other {
                note.set_value("");
            }
        }
    }

    match bind_submit(document, config, &note) {
        Ok((button, preparer)) => {
            let on_click = Closure::<dyn FnMut(Event)>::new(move |_: Event| {
                preparer.on_submit();
            });
            if let Err(err) = listen(&button, "click", on_click) {
                warn!("note-preview: submit preparation disabled: {err}");
            }
        }
        Err(err) => warn!("note-preview: submit preparation disabled: {err}"),
    }

    let note_element = note.html_element();
    if device.touch_device {
        let _ = note_element.class_list().add_1(&config.touch_class);
    } else {
        let _ = note_element.focus();
    }
}

fn bind_scheduler(
    document: &Document,
    config: &PageConfig,
    device: DeviceProfile,
    renderer: &Rc<dyn MarkdownRenderer>,
) -> Result<PreviewScheduler<BrowserTimers>, PageError> {
    let ids = &config.ids;
    let targets = PreviewTargets {
        separator: Box::new(region(document, "separator", &ids.separator)?),
        controls: Box::new(region(document, "inputControls", &ids.controls)?),
        preview: Box::new(region(document, "preview", &ids.preview)?),
        renderer: Rc::clone(renderer),
    };
    Ok(PreviewScheduler::new(
        BrowserTimers,
        device.base_delay(&config.delays),
        config.length_scale,
        targets,
    ))
}

fn bind_submit(
    document: &Document,
    config: &PageConfig,
    note: &FormField,
) -> Result<(EventTarget, SubmitPreparer), PageError> {
    let ids = &config.ids;
    let button = document
        .get_element_by_id(&ids.publish_button)
        .ok_or_else(|| PageError::MissingElement {
            role: "publishButton",
            id: ids.publish_button.clone(),
        })?;
    let session = field(document, "sessionId", &ids.session)?;
    let signature = field(document, "signature", &ids.signature)?;
    let password = match (
        optional_field(document, &ids.password_plain),
        optional_field(document, &ids.password_digest),
    ) {
        (Some(plain), Some(digest)) => Some(PasswordFields {
            plain: Rc::new(plain),
            digest: Rc::new(digest),
        }),
        _ => None,
    };

    let fields = SubmitFields {
        note: Rc::new(note.clone()),
        session: Rc::new(session),
        signature: Rc::new(signature),
        password,
    };
    Ok((button.into(), SubmitPreparer::new(fields, config.hash.hasher())))
}
