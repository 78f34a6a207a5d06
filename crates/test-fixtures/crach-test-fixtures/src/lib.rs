//! Shared capture documents for tests and benches.
//!
//! `fixtures/manifest.json` maps a short name to a file path relative to the
//! `fixtures/` directory, split into documents the loader accepts
//! ([`CAPTURES`]) and documents it must reject ([`MALFORMED`]).

use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use once_cell::sync::Lazy;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct Manifest {
    captures: BTreeMap<String, String>,
    malformed: BTreeMap<String, String>,
}

static MANIFEST: Lazy<Manifest> = Lazy::new(|| {
    serde_json::from_str(include_str!("../../../../fixtures/manifest.json"))
        .expect("fixtures/manifest.json is valid")
});

/// Well-formed capture documents.
pub const CAPTURES: FixtureSet = FixtureSet::Captures;
/// Documents the capture loader must reject.
pub const MALFORMED: FixtureSet = FixtureSet::Malformed;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FixtureSet {
    Captures,
    Malformed,
}

impl FixtureSet {
    fn entries(self) -> &'static BTreeMap<String, String> {
        match self {
            FixtureSet::Captures => &MANIFEST.captures,
            FixtureSet::Malformed => &MANIFEST.malformed,
        }
    }

    /// Fixture names in sorted order.
    pub fn names(self) -> impl Iterator<Item = &'static str> {
        self.entries().keys().map(String::as_str)
    }

    /// Absolute path of fixture `name`.
    pub fn path(self, name: &str) -> Result<PathBuf> {
        let rel = self
            .entries()
            .get(name)
            .ok_or_else(|| anyhow!("no {self:?} fixture named '{name}'"))?;
        Ok(PathBuf::from(env!("CARGO_MANIFEST_DIR"))
            .join("../../../fixtures")
            .join(rel))
    }

    /// Raw JSON text of fixture `name`.
    pub fn json(self, name: &str) -> Result<String> {
        let path = self.path(name)?;
        fs::read_to_string(&path).with_context(|| format!("reading {}", path.display()))
    }

    /// Fixture `name` parsed into an untyped JSON document.
    pub fn value(self, name: &str) -> Result<serde_json::Value> {
        let text = self.json(name)?;
        serde_json::from_str(&text).with_context(|| format!("parsing {self:?} fixture '{name}'"))
    }
}
