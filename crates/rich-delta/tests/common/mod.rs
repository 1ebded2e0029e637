#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use rich_delta::constants::DETECTION_ID;
use rich_delta::{codec, Delta};
use serde_json::Value;

pub fn fixtures_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests").join("fixtures")
}

pub fn read_fixture(name: &str) -> Value {
    let path = fixtures_dir().join(name);
    let data = fs::read_to_string(&path).expect("fixture readable");
    serde_json::from_str(&data).expect("fixture json")
}

/// Decode a wire-format fixture.
pub fn delta(v: Value) -> Delta {
    codec::from_json(&v).expect("fixture must decode")
}

pub fn compose(a: &Delta, b: &Delta) -> Delta {
    a.compose(b).expect("compose must succeed")
}

pub fn transform(a: &Delta, b: &Delta, priority: bool) -> Delta {
    a.transform(b, priority).expect("transform must succeed")
}

/// `(right.transform(left, true), left.transform(right, false))`.
pub fn transform_x(left: &Delta, right: &Delta) -> (Delta, Delta) {
    (transform(right, left, true), transform(left, right, false))
}

/// `delta` with every detection id removed, re-canonicalized.
pub fn without_detections(delta: &Delta) -> Delta {
    Delta::from_ops(delta.iter().cloned().map(|op| {
        let attrs = op.attributes().cloned().map(|mut attrs| {
            attrs.shift_remove(DETECTION_ID);
            attrs
        });
        op.with_attributes(attrs)
    }))
}
