use std::fmt::{Display, Formatter};

/// Ordered, colon-delimited list of search-path entries, as consumed by
/// interpreters resolving importable code
/// Earlier entries are searched first; duplicates are permitted and never
/// deduplicated; entries are never removed or reordered, only appended
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SearchPath {
    entries: Vec<String>,
}

impl Display for SearchPath {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.entries.join(":"))
    }
}

impl SearchPath {
    /// Parses the prior value of a search-path variable
    /// An unset or empty variable is treated as an empty list, so the first append
    /// produces no leading delimiter
    pub fn from_value(value: Option<&str>) -> Self {
        match value {
            None | Some("") => Self::default(),
            // * Interior empty entries are preserved so that parsing and re-rendering
            // * a prior value is byte-identical
            Some(value) => Self {
                entries: value.split(':').map(|entry| entry.to_owned()).collect(),
            },
        }
    }

    /// Appends an entry to the end of the list
    /// No existence check is performed on the path
    pub fn push(&mut self, entry: &str) {
        self.entries.push(entry.to_owned());
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn unset_value_parses_to_empty_list() {
        let list = SearchPath::from_value(None);
        assert!(list.is_empty());
        assert_eq!(list.to_string(), "");
    }

    #[test]
    fn empty_value_parses_to_empty_list() {
        let list = SearchPath::from_value(Some(""));
        assert!(list.is_empty());
    }

    #[test]
    fn first_append_has_no_leading_delimiter() {
        let mut list = SearchPath::from_value(None);
        list.push("/opt/tools/lib");
        assert_eq!(list.to_string(), "/opt/tools/lib");
    }

    #[test]
    fn appends_preserve_existing_order() {
        let mut list = SearchPath::from_value(Some("/usr/lib:/usr/local/lib"));
        list.push("/opt/tools/lib");
        assert_eq!(list.to_string(), "/usr/lib:/usr/local/lib:/opt/tools/lib");
    }

    #[test]
    fn duplicates_are_not_deduplicated() {
        let mut list = SearchPath::from_value(Some("/usr/lib"));
        list.push("/usr/lib");
        list.push("/usr/lib");
        assert_eq!(list.entries().len(), 3);
        assert_eq!(list.to_string(), "/usr/lib:/usr/lib:/usr/lib");
    }

    #[test]
    fn parse_and_render_round_trips_interior_empty_entries() {
        let value = "/usr/lib::/usr/local/lib";
        let list = SearchPath::from_value(Some(value));
        assert_eq!(list.to_string(), value);
    }
}
