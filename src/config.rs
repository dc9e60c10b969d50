use std::sync::OnceLock;
use std::time::Duration;

use leptos::logging::warn;
use regex::Regex;
use serde::{Deserialize, Serialize};
use web_sys::Document;

use crate::digest::HashAlgorithm;
use crate::error::PageError;

/// Id of the optional `<script type="application/json">` carrying overrides.
pub const CONFIG_SCRIPT_ID: &str = "note-preview-config";

/// Element ids for every role the page binds.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(default)]
pub struct ElementIds {
    pub note: String,
    pub load_action: String,
    pub preview: String,
    pub separator: String,
    pub controls: String,
    pub publish_button: String,
    pub session: String,
    pub signature: String,
    pub password_plain: String,
    pub password_digest: String,
    pub links: String,
}

impl Default for ElementIds {
    fn default() -> Self {
        Self {
            note: "note".to_string(),
            load_action: "action".to_string(),
            preview: "preview".to_string(),
            separator: "dashed-line".to_string(),
            controls: "input-elems".to_string(),
            publish_button: "publish-button".to_string(),
            session: "session".to_string(),
            signature: "signature".to_string(),
            password_plain: "plain-password".to_string(),
            password_digest: "password".to_string(),
            links: "links".to_string(),
        }
    }
}

/// Debounce ceilings per input modality, in milliseconds.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(default)]
pub struct DelayProfile {
    pub touch_ms: u64,
    pub pointer_ms: u64,
}

impl Default for DelayProfile {
    fn default() -> Self {
        Self {
            touch_ms: 800,
            pointer_ms: 400,
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct PageConfig {
    pub ids: ElementIds,
    pub markdown_class: String,
    pub delays: DelayProfile,
    /// Text length (UTF-16 units) at which the debounce delay reaches its cap.
    pub length_scale: usize,
    pub hash: HashAlgorithm,
    pub touch_device: Option<bool>,
    pub touch_class: String,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            ids: ElementIds::default(),
            markdown_class: "markdown".to_string(),
            delays: DelayProfile::default(),
            length_scale: 400,
            hash: HashAlgorithm::default(),
            touch_device: None,
            touch_class: "ui-border".to_string(),
        }
    }
}

impl PageConfig {
    pub fn from_json(json: &str) -> Result<Self, PageError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads the config script from the page, falling back to defaults when
    /// it is absent, blank or malformed.
    pub fn load(document: &Document) -> Self {
        let Some(text) = document
            .get_element_by_id(CONFIG_SCRIPT_ID)
            .and_then(|el| el.text_content())
        else {
            return Self::default();
        };
        if text.trim().is_empty() {
            return Self::default();
        }
        match Self::from_json(&text) {
            Ok(config) => config,
            Err(err) => {
                warn!("note-preview: {err}; using defaults");
                Self::default()
            }
        }
    }
}

/// Input modality, resolved once per page.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DeviceProfile {
    pub touch_device: bool,
}

impl DeviceProfile {
    pub fn from_user_agent(user_agent: &str) -> Self {
        static RE_TOUCH: OnceLock<Regex> = OnceLock::new();
        let re_touch = RE_TOUCH.get_or_init(|| Regex::new(r"iPad|iPod|iPhone").unwrap());
        Self {
            touch_device: re_touch.is_match(user_agent),
        }
    }

    pub fn resolve(config: &PageConfig, user_agent: &str) -> Self {
        match config.touch_device {
            Some(touch_device) => Self { touch_device },
            None => Self::from_user_agent(user_agent),
        }
    }

    pub fn base_delay(self, delays: &DelayProfile) -> Duration {
        let ms = if self.touch_device {
            delays.touch_ms
        } else {
            delays.pointer_ms
        };
        Duration::from_millis(ms)
    }
}
