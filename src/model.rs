/// A parsed `KEY=VALUE` entry from a `.env` buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    key: String,
    value: String,
    line: u32,
}

impl Entry {
    pub(crate) fn new(key: String, value: String, line: u32) -> Self {
        Self { key, value, line }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// The value with every quote character removed.
    pub fn value(&self) -> &str {
        &self.value
    }

    /// 1-based line the entry starts on.
    pub fn line(&self) -> u32 {
        self.line
    }

    pub fn into_pair(self) -> (String, String) {
        (self.key, self.value)
    }
}

/// Ordered entries from one parse, in the order they appear in the source.
///
/// Duplicate keys are all retained. Lookups scan from the front, so the first
/// occurrence of a key wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    entries: Vec<Entry>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, entry: Entry) {
        self.entries.push(entry);
    }

    /// Value of the first entry named `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.get_entry(key).map(Entry::value)
    }

    pub fn get_entry(&self, key: &str) -> Option<&Entry> {
        self.entries.iter().find(|entry| entry.key == key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get_entry(key).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Entry> {
        self.entries.iter()
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn into_entries(self) -> Vec<Entry> {
        self.entries
    }
}

impl FromIterator<Entry> for Document {
    fn from_iter<I: IntoIterator<Item = Entry>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for Document {
    type Item = Entry;
    type IntoIter = std::vec::IntoIter<Entry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<'a> IntoIterator for &'a Document {
    type Item = &'a Entry;
    type IntoIter = std::slice::Iter<'a, Entry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(pairs: &[(&str, &str)]) -> Document {
        pairs
            .iter()
            .enumerate()
            .map(|(idx, (key, value))| {
                Entry::new((*key).to_owned(), (*value).to_owned(), idx as u32 + 1)
            })
            .collect()
    }

    #[test]
    fn lookup_returns_first_duplicate() {
        let document = doc(&[("A", "1"), ("B", "2"), ("A", "3")]);

        assert_eq!(document.len(), 3);
        assert_eq!(document.get("A"), Some("1"));
        assert_eq!(document.get_entry("A").map(Entry::line), Some(1));
        assert_eq!(document.get("B"), Some("2"));
    }

    #[test]
    fn lookup_is_case_sensitive() {
        let document = doc(&[("user", "root")]);

        assert!(document.contains_key("user"));
        assert!(!document.contains_key("USER"));
        assert_eq!(document.get("other"), None);
    }

    #[test]
    fn iteration_keeps_source_order() {
        let document = doc(&[("Z", "1"), ("A", "2"), ("M", "3")]);
        let keys: Vec<&str> = document.iter().map(Entry::key).collect();
        assert_eq!(keys, ["Z", "A", "M"]);

        let pairs: Vec<(String, String)> = document.into_iter().map(Entry::into_pair).collect();
        assert_eq!(pairs[1], ("A".to_owned(), "2".to_owned()));
    }

    #[test]
    fn default_document_is_empty() {
        let document = Document::new();
        assert!(document.is_empty());
        assert!(document.entries().is_empty());
    }
}
