//! Startup errors.
//!
//! Only acquiring the drawing surface and wiring the host callbacks can fail.
//! Once the frame loop is running nothing is surfaced as an error.

use thiserror::Error;
use wasm_bindgen::JsValue;

#[derive(Debug, Error)]
pub enum FieldError {
    #[error("no global `window` exists")]
    NoWindow,
    #[error("window has no document")]
    NoDocument,
    #[error("no element with id `{0}`")]
    MissingElement(String),
    #[error("element `{0}` is not a canvas")]
    NotACanvas(String),
    #[error("canvas `{0}` has no 2d context")]
    NoContext(String),
    #[error("{call} failed: {message}")]
    Host { call: &'static str, message: String },
}

impl FieldError {
    pub fn host(call: &'static str, err: JsValue) -> FieldError {
        FieldError::Host {
            call,
            message: format!("{:?}", err),
        }
    }
}

impl From<FieldError> for JsValue {
    fn from(err: FieldError) -> JsValue {
        JsValue::from_str(&err.to_string())
    }
}
