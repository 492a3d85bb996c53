/// Configuration for the Postgres metadata index.
pub struct PostgresIndexConfig {
    /// Postgres connection URL.
    pub url: String,
    /// Table name prefix (e.g. "pictor_").
    pub prefix: String,
}

impl PostgresIndexConfig {
    /// Create a new configuration with the given URL and defaults.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            prefix: "pictor_".to_owned(),
        }
    }

    /// Set the table prefix.
    #[must_use]
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }
}
