//! Configuration keys for the parser, registry, and resolver (§6).

/// Options passed to `compile()`.
#[derive(Debug, Clone, Copy)]
pub struct ParserOptions {
    /// `parser.includeComments` — retain comment trivia on symbols. Default `false`.
    pub include_comments: bool,
    /// `parser.enableReferenceCorrection` — run the reference collector's
    /// chained-expression argument attachment pass. Default `true`.
    pub enable_reference_correction: bool,
}

impl Default for ParserOptions {
    fn default() -> Self {
        Self {
            include_comments: false,
            enable_reference_correction: true,
        }
    }
}

/// Options controlling the global symbol registry's memory policy.
#[derive(Debug, Clone, Copy)]
pub struct RegistryOptions {
    /// `registry.maxFiles` — soft cap triggering LRU eviction. `None` means unbounded.
    pub max_files: Option<usize>,
    /// Seed the built-in Apex namespace/type names (`System`, `String`, ...)
    /// as ambiguous-by-construction candidates when the registry is created,
    /// so namespace-ambiguity scoring has real built-in candidates from the
    /// first file registered rather than only once a user file shadows one.
    /// Default `true`.
    pub seed_builtins: bool,
}

impl Default for RegistryOptions {
    fn default() -> Self {
        Self {
            max_files: None,
            seed_builtins: true,
        }
    }
}

/// `resolver.namespaceStrategy` — how the lazy resolver disambiguates
/// candidates sharing a simple name.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum NamespaceStrategy {
    /// Only resolve when the caller supplies an explicit namespace.
    ExplicitOnly,
    /// Prefer built-in (`System`) candidates over user/managed ones.
    BuiltInPreferred,
    /// Score candidates using the full context (namespace match, usage
    /// recency, common-operation heuristics). The default.
    #[default]
    ContextAware,
    /// Defer to the caller (e.g. surface an LSP quick-pick) instead of
    /// picking automatically.
    UserDisambiguation,
}

/// Options controlling the lazy resolver.
#[derive(Debug, Clone, Copy, Default)]
pub struct ResolverOptions {
    pub namespace_strategy: NamespaceStrategy,
}
