//! Candidate names for emitted interfaces.
//!
//! A hint (usually the JSON key the value hung off) is cleaned into a
//! singular, capitalized candidate; the allocator then guarantees the
//! final name is unique for the whole run.

use std::collections::{HashMap, HashSet};

use once_cell::sync::Lazy;

/// Irregular plurals and words the suffix rules would mangle.
/// Checked against the lowercased hint before any generic rule runs.
static SYNONYMS: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("user", "User"),
        ("address", "Address"),
        ("settings", "Settings"),
        ("status", "Status"),
        ("data", "Data"),
        ("metadata", "Metadata"),
        ("media", "Media"),
        ("news", "News"),
        ("series", "Series"),
        ("analytics", "Analytics"),
        ("credentials", "Credentials"),
        ("people", "Person"),
        ("children", "Child"),
    ])
});

/// Context-dependent name used when a hint cleans down to nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fallback {
    /// Array-element context.
    Element,
    /// Anything else.
    Generic,
}

impl Fallback {
    fn name(self) -> &'static str {
        match self {
            Fallback::Element => "Item",
            Fallback::Generic => "Interface",
        }
    }
}

/// Turn a raw hint into a candidate interface name.
pub fn clean(hint: &str, fallback: Fallback) -> String {
    let mut s = hint.trim();
    if let Some(rest) = s.strip_prefix("Root") {
        s = rest;
    }
    loop {
        let trimmed = s
            .strip_suffix("Interface")
            .or_else(|| s.strip_suffix("Item"))
            .or_else(|| s.strip_suffix("Type"));
        match trimmed {
            Some(rest) => s = rest,
            None => break,
        }
    }

    let s = sanitize(s);
    if let Some(name) = SYNONYMS.get(s.to_ascii_lowercase().as_str()) {
        return (*name).to_string();
    }

    let s = capitalize(&singularize(&s));
    if s.is_empty() {
        fallback.name().to_string()
    } else {
        s
    }
}

/// JSON keys are arbitrary strings; emitted names are not.
fn sanitize(hint: &str) -> String {
    let kept: String = hint
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_')
        .collect();
    kept.trim_start_matches(|c: char| c.is_ascii_digit()).to_string()
}

fn singularize(word: &str) -> String {
    if let Some(stem) = word.strip_suffix("ies") {
        if !stem.is_empty() {
            return format!("{stem}y");
        }
    }
    // "houses"-style words lose only the final s; check before the es rules.
    if word.ends_with("ouses") {
        return word[..word.len() - 1].to_string();
    }
    for suffix in ["ses", "xes", "zes", "ches", "shes"] {
        if word.ends_with(suffix) && word.len() > suffix.len() {
            return word[..word.len() - 2].to_string();
        }
    }
    if word.ends_with('s') && !word.ends_with("ss") && word.len() > 1 {
        return word[..word.len() - 1].to_string();
    }
    word.to_string()
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
    }
}

/// Run-scoped uniqueness for emitted names.
#[derive(Debug)]
pub struct NameAllocator {
    taken: HashSet<String>,
}

impl NameAllocator {
    pub fn new() -> Self {
        Self { taken: HashSet::new() }
    }

    /// Claim `candidate`, appending an integer suffix (from 2) on collision.
    pub fn unique(&mut self, candidate: String) -> String {
        if self.taken.insert(candidate.clone()) {
            return candidate;
        }
        let mut n = 2usize;
        loop {
            let name = format!("{candidate}{n}");
            if self.taken.insert(name.clone()) {
                return name;
            }
            n += 1;
        }
    }
}
