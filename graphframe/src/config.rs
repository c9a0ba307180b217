use graphframe_core::RelUniquenessPolicy;

/// Connection and policy configuration for a [`crate::Graph`]: connection
/// URI, credentials, target database name, and the one core-visible flag
/// the specification names, the relationship-uniqueness policy (§6).
///
/// Built the way `usql-lexer`'s `LexerConfig`/`LexerConfigBuilder` is: a
/// `Default`-able struct plus a `builder()` entry point with chained
/// setters.
#[derive(Clone, Debug)]
pub struct GraphConfig {
    uri: String,
    username: Option<String>,
    password: Option<String>,
    database: Option<String>,
    rel_uniqueness_policy: RelUniquenessPolicy,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            uri: String::new(),
            username: None,
            password: None,
            database: None,
            rel_uniqueness_policy: RelUniquenessPolicy::default(),
        }
    }
}

impl GraphConfig {
    /// A config pointing at `uri`, with no credentials, default database,
    /// and the default (`Single`) uniqueness policy.
    pub fn new(uri: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            ..Self::default()
        }
    }

    /// Starts a [`GraphConfigBuilder`] for `uri`.
    pub fn builder(uri: impl Into<String>) -> GraphConfigBuilder {
        GraphConfigBuilder::new(uri)
    }

    /// The connection URI.
    pub fn uri(&self) -> &str {
        &self.uri
    }

    /// The configured username, if any.
    pub fn username(&self) -> Option<&str> {
        self.username.as_deref()
    }

    /// The configured password, if any.
    pub fn password(&self) -> Option<&str> {
        self.password.as_deref()
    }

    /// The target database name, if any.
    pub fn database(&self) -> Option<&str> {
        self.database.as_deref()
    }

    /// The relationship-uniqueness policy `RelUpsert` consults when a
    /// description carries no `rel_key_fields`.
    pub fn rel_uniqueness_policy(&self) -> RelUniquenessPolicy {
        self.rel_uniqueness_policy
    }
}

/// Builder for [`GraphConfig`].
#[derive(Clone, Debug)]
pub struct GraphConfigBuilder {
    uri: String,
    username: Option<String>,
    password: Option<String>,
    database: Option<String>,
    rel_uniqueness_policy: RelUniquenessPolicy,
}

impl GraphConfigBuilder {
    /// Starts a builder for `uri`.
    pub fn new(uri: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            username: None,
            password: None,
            database: None,
            rel_uniqueness_policy: RelUniquenessPolicy::default(),
        }
    }

    /// Sets the connection credentials.
    pub fn credentials(mut self, username: impl Into<String>, password: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self.password = Some(password.into());
        self
    }

    /// Sets the target database name.
    pub fn database(mut self, database: impl Into<String>) -> Self {
        self.database = Some(database.into());
        self
    }

    /// Sets the relationship-uniqueness policy.
    pub fn rel_uniqueness_policy(mut self, policy: RelUniquenessPolicy) -> Self {
        self.rel_uniqueness_policy = policy;
        self
    }

    /// Builds the [`GraphConfig`].
    pub fn build(self) -> GraphConfig {
        GraphConfig {
            uri: self.uri,
            username: self.username,
            password: self.password,
            database: self.database,
            rel_uniqueness_policy: self.rel_uniqueness_policy,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_chains_into_a_config() {
        let config = GraphConfig::builder("bolt://localhost:7687")
            .credentials("neo4j", "secret")
            .database("graphframe")
            .rel_uniqueness_policy(RelUniquenessPolicy::Keyed)
            .build();
        assert_eq!(config.uri(), "bolt://localhost:7687");
        assert_eq!(config.username(), Some("neo4j"));
        assert_eq!(config.database(), Some("graphframe"));
        assert_eq!(config.rel_uniqueness_policy(), RelUniquenessPolicy::Keyed);
    }

    #[test]
    fn default_config_has_single_uniqueness_policy() {
        let config = GraphConfig::new("bolt://localhost:7687");
        assert_eq!(config.rel_uniqueness_policy(), RelUniquenessPolicy::Single);
    }
}
