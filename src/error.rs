use thiserror::Error;
use wasm_bindgen::JsValue;

#[derive(Debug, Error)]
pub enum PageError {
    #[error("no global window")]
    NoWindow,

    #[error("window has no document")]
    NoDocument,

    #[error("missing #{id} ({role})")]
    MissingElement { role: &'static str, id: String },

    #[error("#{id} ({role}) is not a {expected}")]
    WrongElementType {
        role: &'static str,
        id: String,
        expected: &'static str,
    },

    #[error("failed to attach {event} listener: {message}")]
    Listener { event: &'static str, message: String },

    #[error("invalid page config: {0}")]
    Config(#[from] serde_json::Error),
}

impl PageError {
    pub(crate) fn listener(event: &'static str, err: JsValue) -> Self {
        Self::Listener {
            event,
            message: err.as_string().unwrap_or_else(|| format!("{err:?}")),
        }
    }
}

impl From<PageError> for JsValue {
    fn from(err: PageError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}
