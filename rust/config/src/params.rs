//! Named parameters and their `--name value` serialization.

use std::{ffi::OsString, fmt, path::PathBuf};

/// A single parameter value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ParamValue {
    Str(String),
    Int(u64),
    Path(PathBuf),
}

impl ParamValue {
    /// True for an empty string or an empty path.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Str(s) => s.is_empty(),
            Self::Int(_) => false,
            Self::Path(p) => p.as_os_str().is_empty(),
        }
    }

    /// The value as a process argument. Paths keep their exact bytes.
    #[must_use]
    pub fn to_os_string(&self) -> OsString {
        match self {
            Self::Path(p) => p.as_os_str().to_owned(),
            other => other.to_string().into(),
        }
    }
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Str(s) => f.write_str(s),
            Self::Int(n) => write!(f, "{n}"),
            Self::Path(p) => write!(f, "{}", p.display()),
        }
    }
}

impl From<&str> for ParamValue {
    fn from(s: &str) -> Self {
        Self::Str(s.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(s: String) -> Self {
        Self::Str(s)
    }
}

impl From<u64> for ParamValue {
    fn from(n: u64) -> Self {
        Self::Int(n)
    }
}

impl From<PathBuf> for ParamValue {
    fn from(p: PathBuf) -> Self {
        Self::Path(p)
    }
}

/// Ordered mapping from parameter name to value.
///
/// Iteration follows insertion order. Re-inserting an existing name replaces
/// the value in place without moving it.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ParameterSet {
    entries: Vec<(String, ParamValue)>,
}

impl ParameterSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a parameter.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<ParamValue>) {
        let name = name.into();
        let value = value.into();
        if let Some(slot) = self.entries.iter_mut().find(|(k, _)| *k == name) {
            slot.1 = value;
        } else {
            self.entries.push((name, value));
        }
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&ParamValue> {
        self.entries.iter().find(|(k, _)| k == name).map(|(_, v)| v)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParamValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Parameter names in insertion order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    /// Check that the set is non-empty and every value is present.
    pub fn validate(&self) -> Result<(), ParamError> {
        if self.entries.is_empty() {
            return Err(ParamError::EmptySet);
        }
        match self.entries.iter().find(|(_, v)| v.is_empty()) {
            Some((name, _)) => Err(ParamError::Empty(name.clone())),
            None => Ok(()),
        }
    }

    /// Convert to CLI arguments: `--name value` for each parameter, in order.
    #[must_use]
    pub fn to_cli_args(&self) -> Vec<OsString> {
        let mut args = Vec::with_capacity(self.entries.len() * 2);
        for (name, value) in &self.entries {
            args.push(format!("--{name}").into());
            args.push(value.to_os_string());
        }
        args
    }
}

impl<K: Into<String>, V: Into<ParamValue>> FromIterator<(K, V)> for ParameterSet {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut set = Self::new();
        for (k, v) in iter {
            set.insert(k, v);
        }
        set
    }
}

/// Errors raised when validating a parameter set.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ParamError {
    #[error("parameter set is empty")]
    EmptySet,
    #[error("parameter --{0} has an empty value")]
    Empty(String),
}
