// ---------------------------------------------------------------------------
// CallMetadata — case-insensitive call metadata supplied by the framework
// ---------------------------------------------------------------------------

/// Conventional metadata key under which the caller's credential travels.
pub const AUTHORIZATION_KEY: &str = "authorization";

/// Case-insensitive multimap of call metadata.
///
/// Keys are normalized to lowercase on insert. Lookup order matches
/// insertion order, so [`CallMetadata::get_first`] returns the first
/// value supplied for a key.
#[derive(Debug, Clone, Default)]
pub struct CallMetadata {
    entries: Vec<(String, String)>,
}

impl CallMetadata {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl AsRef<str>, value: impl Into<String>) {
        self.entries
            .push((key.as_ref().to_ascii_lowercase(), value.into()));
    }

    /// First value recorded under `key`, compared case-insensitively.
    pub fn get_first(&self, key: &str) -> Option<&str> {
        let key = key.to_ascii_lowercase();
        self.entries
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
