use std::collections::HashMap;
use std::env;

use super::searchpath::SearchPath;

/// Explicit snapshot of a process environment, represented as a plain mapping
/// rather than ambient process state
/// The initializer operates on this type as a pure value; only the binary entry
/// point applies a result to the outside world (emitted exports or the
/// environment of a spawned child)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Environment {
    vars: HashMap<String, String>,
}

impl Environment {
    /// Snapshots the environment of the calling process
    pub fn from_process() -> Self {
        Self {
            vars: env::vars().collect(),
        }
    }

    /// Creates an empty environment, primarily for testing
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.vars.get(name).map(|value| value.as_str())
    }

    pub fn set(&mut self, name: &str, value: &str) {
        self.vars.insert(name.to_owned(), value.to_owned());
    }

    /// Appends a path entry to a colon-delimited search-path variable,
    /// treating an unset variable as an empty list
    pub fn append_search_path(&mut self, variable: &str, path: &str) {
        let mut list = SearchPath::from_value(self.get(variable));
        list.push(path);
        self.vars.insert(variable.to_owned(), list.to_string());
    }

    pub fn vars(&self) -> &HashMap<String, String> {
        &self.vars
    }
}
