use std::fmt;

/// One compiled, escaped SQL boolean expression for a single leaf condition
///
/// Only the compiler creates fragments, so the text never carries unescaped
/// condition values.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CompiledFragment(String);

impl CompiledFragment {
    pub(crate) fn new(sql: String) -> Self {
        Self(sql)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for CompiledFragment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for CompiledFragment {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Compiled fragments of one condition map, split by origin bucket
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PredicateSet {
    pub ordinary: Vec<CompiledFragment>,
    pub json: Vec<CompiledFragment>,
}

impl PredicateSet {
    pub fn len(&self) -> usize {
        self.ordinary.len() + self.json.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ordinary.is_empty() && self.json.is_empty()
    }

    /// Ordinary fragments first, then JSON fragments
    pub fn iter(&self) -> impl Iterator<Item = &CompiledFragment> {
        self.ordinary.iter().chain(self.json.iter())
    }
}
