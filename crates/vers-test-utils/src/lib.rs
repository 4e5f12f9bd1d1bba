//! Testing utilities for the Vers workspace
//!
//! Shared test helpers, fixtures, and recording converters.

#![allow(missing_docs)]

use parking_lot::Mutex;
use serde_json::{json, Value};
use std::sync::Arc;
use vers::{from_fn, Converter, Vers, Version, VersionField, Versioned};

/// Install a test-writer tracing subscriber, honouring `RUST_LOG`
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

pub fn version_json(version: &Version) -> Value {
    match version {
        Version::Int(n) => json!(n),
        Version::Text(s) => json!(s),
    }
}

/// Records the label of every converter it hands out, in call order
#[derive(Debug, Clone, Default)]
pub struct Recorder {
    log: Arc<Mutex<Vec<String>>>,
}

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Converter that stamps `to` into the `version` key and logs `"from->to"`
    pub fn hop(&self, from: impl Into<Version>, to: impl Into<Version>) -> impl Converter<Value> {
        self.labelled(from, to, "")
    }

    /// Like [`Recorder::hop`], with a suffix on the logged label
    pub fn labelled(
        &self,
        from: impl Into<Version>,
        to: impl Into<Version>,
        suffix: &str,
    ) -> impl Converter<Value> {
        let (from, to) = (from.into(), to.into());
        let label = format!("{from}->{to}{suffix}");
        let log = Arc::clone(&self.log);
        from_fn(move |obj: &mut Value| {
            log.lock().push(label.clone());
            obj["version"] = version_json(&to);
            None
        })
    }

    pub fn calls(&self) -> Vec<String> {
        self.log.lock().clone()
    }

    pub fn take(&self) -> Vec<String> {
        std::mem::take(&mut *self.log.lock())
    }
}

/// 1<->3, 2<->3, 3<->4 and the one-way 1->5
pub fn sample_vers(recorder: &Recorder) -> Vers<Value> {
    let vers = Vers::new();
    vers.add_converters(1, 3, recorder.hop(1, 3), recorder.hop(3, 1));
    vers.add_converters(2, 3, recorder.hop(2, 3), recorder.hop(3, 2));
    vers.add_converters(3, 4, recorder.hop(3, 4), recorder.hop(4, 3));
    vers.add_converter(1, 5, recorder.hop(1, 5));
    vers
}

/// Typed document for tests that do not use JSON
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Doc {
    pub version: Option<Version>,
    pub fields: Vec<String>,
}

impl Doc {
    pub fn at(version: impl Into<Version>) -> Self {
        Self {
            version: Some(version.into()),
            fields: Vec::new(),
        }
    }

    pub fn with_field(mut self, field: &str) -> Self {
        self.fields.push(field.to_string());
        self
    }
}

impl Versioned for Doc {
    fn version_field(&self) -> VersionField {
        self.version
            .clone()
            .map_or(VersionField::Absent, VersionField::Present)
    }
}
