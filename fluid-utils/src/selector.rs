//! Equality-based label selectors.
//!
//! A selector is a set of `key=value` requirements. A label set satisfies the
//! selector when it carries every required key with the required value.
//!
//! Every constructor enforces the same requirement rules, so the `Display`
//! form of any selector parses back to an equal selector:
//! - keys are non-empty and contain neither `=` nor `,`
//! - values contain no `,`
//! - neither keys nor values carry surrounding whitespace

use crate::error::{Error, Result};
use crate::map::{StringMap, key_value_matched, ordered_keys, union_maps_with_override};
use serde::de::{Deserializer, MapAccess, Visitor};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::debug;

/// A conjunction of `key=value` label requirements.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "RawLabelSelector")]
pub struct LabelSelector {
    match_labels: StringMap,
}

/// Wire form of a selector, before the requirement rules are checked.
///
/// Keeps every entry in document order so repeated keys can be rejected.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawLabelSelector {
    #[serde(default, deserialize_with = "deserialize_entries")]
    match_labels: Vec<(String, String)>,
}

impl TryFrom<RawLabelSelector> for LabelSelector {
    type Error = Error;

    fn try_from(raw: RawLabelSelector) -> Result<Self> {
        Self::from_entries(raw.match_labels)
    }
}

fn deserialize_entries<'de, D>(
    deserializer: D,
) -> std::result::Result<Vec<(String, String)>, D::Error>
where
    D: Deserializer<'de>,
{
    struct EntriesVisitor;

    impl<'de> Visitor<'de> for EntriesVisitor {
        type Value = Vec<(String, String)>;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a map of label keys to string values")
        }

        fn visit_map<A>(self, mut access: A) -> std::result::Result<Self::Value, A::Error>
        where
            A: MapAccess<'de>,
        {
            let mut entries = Vec::with_capacity(access.size_hint().unwrap_or(0));
            while let Some(entry) = access.next_entry::<String, String>()? {
                entries.push(entry);
            }
            Ok(entries)
        }
    }

    deserializer.deserialize_map(EntriesVisitor)
}

fn validate_requirement(key: &str, value: &str) -> Result<()> {
    if key.is_empty() || key.trim() != key || key.contains(['=', ',']) {
        return Err(Error::InvalidKey(key.to_string()));
    }
    if value.trim() != value || value.contains(',') {
        return Err(Error::InvalidValue {
            key: key.to_string(),
            value: value.to_string(),
        });
    }
    Ok(())
}

impl LabelSelector {
    /// Creates an empty selector, which matches every label set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a selector requiring exactly the given labels.
    ///
    /// Fails if any key or value breaks the requirement rules.
    pub fn from_labels(match_labels: StringMap) -> Result<Self> {
        for (key, value) in &match_labels {
            validate_requirement(key, value).inspect_err(|err| {
                debug!(error = %err, "rejected label selector");
            })?;
        }
        Ok(Self { match_labels })
    }

    fn from_entries(entries: Vec<(String, String)>) -> Result<Self> {
        let mut match_labels = StringMap::with_capacity(entries.len());
        for (key, value) in entries {
            validate_requirement(&key, &value)?;
            if match_labels.contains_key(&key) {
                return Err(Error::DuplicateKey(key));
            }
            match_labels.insert(key, value);
        }
        Ok(Self { match_labels })
    }

    /// Parses a selector of the form `key=value[,key=value...]`.
    ///
    /// Surrounding whitespace is trimmed from keys and values, empty segments
    /// are skipped and only the first `=` of a segment separates key from
    /// value.
    pub fn parse(input: &str) -> Result<Self> {
        Self::parse_requirements(input).inspect_err(|err| {
            debug!(error = %err, "rejected label selector");
        })
    }

    fn parse_requirements(input: &str) -> Result<Self> {
        let mut match_labels = StringMap::new();
        if input.trim().is_empty() {
            return Ok(Self { match_labels });
        }

        for (position, segment) in input.split(',').enumerate() {
            let segment = segment.trim();
            if segment.is_empty() {
                continue;
            }
            let (key, value) = segment
                .split_once('=')
                .ok_or_else(|| Error::MissingSeparator(segment.to_string()))?;
            let key = key.trim();
            if key.is_empty() {
                return Err(Error::EmptyKey { position });
            }
            if match_labels
                .insert(key.to_string(), value.trim().to_string())
                .is_some()
            {
                return Err(Error::DuplicateKey(key.to_string()));
            }
        }
        Ok(Self { match_labels })
    }

    /// Returns the required labels.
    #[must_use]
    pub fn match_labels(&self) -> &StringMap {
        &self.match_labels
    }

    /// Returns true if `labels` satisfies every requirement.
    ///
    /// An empty selector matches anything, absent labels included.
    #[must_use]
    pub fn matches(&self, labels: Option<&StringMap>) -> bool {
        self.match_labels
            .iter()
            .all(|(key, value)| key_value_matched(labels, key, value))
    }

    /// Returns the required keys in ascending order.
    #[must_use]
    pub fn required_keys(&self) -> Vec<String> {
        ordered_keys(Some(&self.match_labels))
    }

    /// Returns the number of requirements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.match_labels.len()
    }

    /// Returns true if the selector has no requirements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.match_labels.is_empty()
    }

    /// Creates a selector combining both requirement sets.
    ///
    /// Where both constrain the same key, `other` wins.
    #[must_use]
    pub fn merged(&self, other: &Self) -> Self {
        Self {
            match_labels: union_maps_with_override(
                Some(&self.match_labels),
                Some(&other.match_labels),
            ),
        }
    }

    /// Serializes the selector to JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Deserializes a selector from JSON.
    ///
    /// A key repeated inside `matchLabels` is rejected with
    /// [`Error::DuplicateKey`] rather than resolved to the last value.
    pub fn from_json(json: &str) -> Result<Self> {
        let raw: RawLabelSelector = serde_json::from_str(json)?;
        Self::from_entries(raw.match_labels).inspect_err(|err| {
            debug!(error = %err, "rejected label selector");
        })
    }
}

impl fmt::Display for LabelSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, key) in self.required_keys().iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{key}={}", self.match_labels[key])?;
        }
        Ok(())
    }
}

impl FromStr for LabelSelector {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}
