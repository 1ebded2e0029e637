//! Wire codecs for [`Delta`](crate::Delta).

pub mod json;

pub use json::{from_json, op_from_json, op_to_json, to_json};
