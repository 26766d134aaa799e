use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

use crate::graph::GraphDocument;

/// Messages exchanged with the embedding host.
///
/// The viewer asks for a history of a given size; the host answers with a
/// document of the same shape the viewer loads from files.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum HostMessage {
    #[serde(rename = "git-graph:request")]
    Request {
        #[serde(default)]
        limit: HistoryLimit,
    },
    #[serde(rename = "git-graph:data")]
    Data { payload: GraphDocument },
}

/// How many commits to fetch from the history source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct HistoryLimit(usize);

impl HistoryLimit {
    pub const DEFAULT: usize = 400;
    pub const MAX: usize = 2000;

    /// Clamp `value` into `1..=MAX`.
    pub fn new(value: usize) -> Self {
        Self(value.clamp(1, Self::MAX))
    }

    /// Interpret a loosely typed number. Zero and NaN fall back to the default.
    pub fn from_f64(value: f64) -> Self {
        if value.is_nan() || value.trunc() == 0.0 {
            return Self::default();
        }
        if value < 1.0 {
            return Self::new(1);
        }
        if value >= Self::MAX as f64 {
            return Self::new(Self::MAX);
        }
        Self::new(value.trunc() as usize)
    }

    /// Interpret free-form input; anything non-numeric yields the default.
    pub fn lenient(text: &str) -> Self {
        let text = text.trim();
        if text.is_empty() {
            return Self::default();
        }
        Self::from_f64(text.parse::<f64>().unwrap_or(f64::NAN))
    }

    pub fn get(self) -> usize {
        self.0
    }

    /// Adjust by `delta` commits, staying within bounds.
    pub fn step(self, delta: isize) -> Self {
        Self::new(self.0.saturating_add_signed(delta))
    }
}

impl Default for HistoryLimit {
    fn default() -> Self {
        Self(Self::DEFAULT)
    }
}

impl fmt::Display for HistoryLimit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("history limit must be a positive integer, got `{0}`")]
pub struct InvalidLimit(String);

impl FromStr for HistoryLimit {
    type Err = InvalidLimit;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().parse::<usize>() {
            Ok(0) | Err(_) => Err(InvalidLimit(s.to_owned())),
            Ok(value) => Ok(Self::new(value)),
        }
    }
}

impl Serialize for HistoryLimit {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(self.0 as u64)
    }
}

impl<'de> Deserialize<'de> for HistoryLimit {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawLimit {
            Number(f64),
            Text(String),
            Other(serde::de::IgnoredAny),
        }

        Ok(match RawLimit::deserialize(deserializer)? {
            RawLimit::Number(value) => Self::from_f64(value),
            RawLimit::Text(text) => Self::lenient(&text),
            RawLimit::Other(_) => Self::default(),
        })
    }
}
