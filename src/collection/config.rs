/// Collection store configuration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StoreConfig {
    /// Storage key holding the serialized collection.
    pub storage_key: String,

    /// Whether a fresh store starts with the built-in sample shelf.
    /// When false, a fresh store starts (and persists) empty.
    pub seed_when_empty: bool,

    /// How many generated ids to try before giving up on `add`.
    pub max_id_attempts: usize,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            storage_key: "books".to_string(),
            seed_when_empty: true,
            max_id_attempts: 8,
        }
    }
}

impl StoreConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_storage_key(mut self, key: impl Into<String>) -> Self {
        self.storage_key = key.into();
        self
    }

    pub fn with_seed_when_empty(mut self, seed: bool) -> Self {
        self.seed_when_empty = seed;
        self
    }

    /// At least one attempt is always made.
    pub fn with_max_id_attempts(mut self, attempts: usize) -> Self {
        self.max_id_attempts = attempts.max(1);
        self
    }
}
