use leptos::logging::warn;
use wasm_bindgen::prelude::*;

pub mod config;
pub mod digest;
pub mod error;
pub mod layout;
pub mod page;
pub mod render;
pub mod scheduler;
pub mod static_blocks;
pub mod submit;
pub mod surface;
pub mod timer;

pub use config::{DelayProfile, DeviceProfile, ElementIds, PageConfig};
pub use digest::{ContentHasher, HashAlgorithm, Md5Hasher, Sha256Hasher};
pub use error::PageError;
pub use render::{CmarkRenderer, MarkdownRenderer};
pub use scheduler::{debounce_delay, LoadAction, PreviewScheduler, PreviewTargets};
pub use submit::{SubmissionPayload, SubmitPreparer};
pub use timer::{BrowserTimers, DeferredTasks};

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    if let Err(err) = page::run_when_loaded() {
        warn!("note-preview: {err}");
    }
}
