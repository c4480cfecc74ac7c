//! Global Symbol Registry (§4.7): federates per-file `SymbolTable`s into a
//! `fqn → symbol` map, a simple-name ambiguity index, and the bidirectional
//! file↔name maps I6 requires.
//!
//! Only declarations a qualified name or a simple name could plausibly
//! target are registered — type-like symbols, callables, and
//! fields/properties/enum values. `BlockScope`s carry no name a caller would
//! ever resolve, and `Parameter`/local `Variable`s have no meaning outside
//! the file that declares them, so neither crosses into this registry.

use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use rustc_hash::{FxHashMap, FxHashSet};

use apex_common::diagnostics::rules;
use apex_common::type_descriptor::PRIMITIVES;
use apex_common::{ErrorReporter, RegistryOptions};
use apex_symbols::{Symbol, SymbolId, SymbolKind, SymbolTable};

use crate::fqn::fqn;

/// Which kind of namespace a candidate's owning file belongs to. Apex source
/// never states its own managed-package namespace, so this is supplied by
/// the caller of [`GlobalSymbolRegistry::register_file`], not derived from
/// the parse tree.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NamespaceTier {
    BuiltIn,
    Managed,
    User,
}

/// One registered occurrence of a name, tracked for ambiguity scoring.
#[derive(Clone, Debug)]
pub struct Candidate {
    pub file_path: Arc<str>,
    pub symbol_id: SymbolId,
    pub tier: NamespaceTier,
    pub namespace: Option<String>,
    pub usage_count: u32,
    pub last_used_millis: Option<u64>,
    base_confidence: f32,
    registration_seq: u64,
}

/// `simpleName → AmbiguousEntry` (§3): an ordered candidate list plus the
/// index of the default (most-recently-scored-highest) candidate.
#[derive(Clone, Debug, Default)]
pub struct AmbiguousEntry {
    pub candidates: Vec<Candidate>,
    pub default_candidate: usize,
}

#[derive(Clone, Debug)]
struct UnambiguousEntry {
    file_path: Arc<str>,
    symbol_id: SymbolId,
}

/// Disambiguation context for [`GlobalSymbolRegistry::resolve_by_name`].
#[derive(Clone, Debug, Default)]
pub struct ResolveContext {
    pub expected_namespace: Option<String>,
    pub is_common_operation: bool,
    pub current_file: Option<Arc<str>>,
    pub usage_pattern: Option<UsagePattern>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UsagePattern {
    MethodCall,
    FieldAccess,
    TypeReference,
}

/// `name → AmbiguousEntry` plus `fqn → symbol`, federated from per-file
/// `SymbolTable`s.
pub struct GlobalSymbolRegistry {
    tables: FxHashMap<Arc<str>, Arc<SymbolTable>>,
    unambiguous: FxHashMap<String, UnambiguousEntry>,
    ambiguous: FxHashMap<String, AmbiguousEntry>,
    /// I6: `filePath → names` — the simple names of symbols that file
    /// contributed, regardless of which map they landed in.
    file_to_names: FxHashMap<Arc<str>, FxHashSet<String>>,
    /// I6, symmetric: `name → files`.
    names_to_files: FxHashMap<String, FxHashSet<Arc<str>>>,
    last_resolved_millis: FxHashMap<Arc<str>, u64>,
    options: RegistryOptions,
    next_registration_seq: u64,
}

fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

fn is_registrable(kind: SymbolKind) -> bool {
    kind.is_type_like() || kind.is_callable() || matches!(kind, SymbolKind::Property | SymbolKind::EnumValue)
}

impl GlobalSymbolRegistry {
    #[must_use]
    pub fn new(options: RegistryOptions) -> Self {
        let mut registry = Self {
            tables: FxHashMap::default(),
            unambiguous: FxHashMap::default(),
            ambiguous: FxHashMap::default(),
            file_to_names: FxHashMap::default(),
            names_to_files: FxHashMap::default(),
            last_resolved_millis: FxHashMap::default(),
            options,
            next_registration_seq: 0,
        };
        if options.seed_builtins {
            registry.seed_builtins();
        }
        registry
    }

    /// Registers `System` plus the closed set of primitive type names as
    /// ambiguous-by-construction built-in candidates, so tier-2 scoring has
    /// real built-ins to weigh from the first user file onward (the
    /// `seed_builtins` supplement to §4.7).
    fn seed_builtins(&mut self) {
        for name in std::iter::once("System").chain(PRIMITIVES.iter().copied()) {
            let title_cased = titlecase(name);
            self.ambiguous.entry(title_cased).or_default();
        }
    }

    /// `registerFile(path, table)`: idempotent. Iterates `table` in
    /// declaration order, computing each registrable symbol's fqn and
    /// routing it into the unambiguous or ambiguous map. Returns the file
    /// paths evicted to honor `RegistryOptions::max_files`, if any.
    pub fn register_file(
        &mut self,
        path: &str,
        table: Arc<SymbolTable>,
        tier: NamespaceTier,
        namespace: Option<String>,
        reporter: &mut impl ErrorReporter,
    ) -> Vec<Arc<str>> {
        if self.tables.contains_key(path) {
            self.unregister(path);
        }

        let path: Arc<str> = Arc::from(path);
        let mut names = FxHashSet::default();

        for symbol in table.get_all_symbols() {
            if !is_registrable(symbol.kind) {
                continue;
            }
            self.register_symbol(&path, symbol, tier, namespace.clone(), reporter);
            names.insert(symbol.name.clone());
        }

        for name in &names {
            self.names_to_files
                .entry(name.clone())
                .or_default()
                .insert(Arc::clone(&path));
        }
        self.file_to_names.insert(Arc::clone(&path), names);
        self.last_resolved_millis.insert(Arc::clone(&path), now_millis());
        self.tables.insert(Arc::clone(&path), table);

        self.enforce_capacity(&path)
    }

    fn register_symbol(
        &mut self,
        path: &Arc<str>,
        symbol: &Symbol,
        tier: NamespaceTier,
        namespace: Option<String>,
        reporter: &mut impl ErrorReporter,
    ) {
        let key = fqn(symbol);
        let candidate = Candidate {
            file_path: Arc::clone(path),
            symbol_id: symbol.id,
            tier,
            namespace,
            usage_count: 0,
            last_used_millis: None,
            base_confidence: if tier == NamespaceTier::BuiltIn { 0.6 } else { 0.5 },
            registration_seq: self.next_registration_seq,
        };
        self.next_registration_seq += 1;

        let conflicts_builtin = self
            .ambiguous
            .get(&key)
            .is_some_and(|e| e.candidates.iter().any(|c| c.tier == NamespaceTier::BuiltIn));
        let conflicts_existing = self.unambiguous.contains_key(&key) || self.ambiguous.contains_key(&key);

        if conflicts_existing {
            if conflicts_builtin && tier != NamespaceTier::BuiltIn {
                reporter.add_rule_warning(
                    rules::BUILTIN_SHADOW,
                    &format!("{key} shadows a built-in name"),
                    symbol.location.start_line(),
                    symbol.location.start_column(),
                    path,
                );
            }
            if let Some(prev) = self.unambiguous.remove(&key) {
                let prev_candidate = Candidate {
                    file_path: prev.file_path,
                    symbol_id: prev.symbol_id,
                    tier: NamespaceTier::User,
                    namespace: None,
                    usage_count: 0,
                    last_used_millis: None,
                    base_confidence: 0.5,
                    registration_seq: 0,
                };
                self.ambiguous.entry(key.clone()).or_default().candidates.push(prev_candidate);
            }
            self.ambiguous.entry(key).or_default().candidates.push(candidate);
        } else {
            self.unambiguous.insert(
                key,
                UnambiguousEntry {
                    file_path: Arc::clone(path),
                    symbol_id: symbol.id,
                },
            );
        }
    }

    /// `unregister(path)` (I6, I8): removes every registration owned by
    /// `path`, cleaning ambiguous entries down to zero remaining candidates
    /// and both halves of the file↔name map.
    pub fn unregister(&mut self, path: &str) {
        let Some(names) = self.file_to_names.remove(path) else {
            return;
        };

        for name in &names {
            if let Some(files) = self.names_to_files.get_mut(name.as_str()) {
                files.remove(path);
                if files.is_empty() {
                    self.names_to_files.remove(name.as_str());
                }
            }
        }

        self.unambiguous.retain(|_, entry| entry.file_path.as_ref() != path);
        self.ambiguous.retain(|_, entry| {
            entry.candidates.retain(|c| c.file_path.as_ref() != path);
            if entry.default_candidate >= entry.candidates.len() {
                entry.default_candidate = entry.candidates.len().saturating_sub(1);
            }
            !entry.candidates.is_empty()
        });

        self.tables.remove(path);
        self.last_resolved_millis.remove(path);
    }

    /// `resolveByFqn(fqn)`: O(1) unambiguous lookup only; an fqn that
    /// collided into the ambiguous map is not resolved here (use
    /// `resolve_by_name`).
    #[must_use]
    pub fn resolve_by_fqn(&mut self, fqn: &str) -> Option<&Symbol> {
        let entry = self.unambiguous.get(fqn)?;
        let path = Arc::clone(&entry.file_path);
        let symbol_id = entry.symbol_id;
        self.last_resolved_millis.insert(Arc::clone(&path), now_millis());
        self.tables.get(&path)?.get(symbol_id)
    }

    /// `resolveByName(name, context)`: unambiguous first, then
    /// ambiguous-with-scoring. Updates the winning candidate's `usageCount`
    /// and `lastUsed`.
    #[must_use]
    pub fn resolve_by_name(&mut self, name: &str, context: &ResolveContext) -> Option<&Symbol> {
        if self.unambiguous.contains_key(name) {
            return self.resolve_by_fqn(name);
        }

        let now = now_millis();
        let entry = self.ambiguous.get_mut(name)?;
        if entry.candidates.is_empty() {
            return None;
        }

        let mut best_idx = 0;
        let mut best_score = f32::MIN;
        for (idx, candidate) in entry.candidates.iter().enumerate() {
            let score = score_candidate(candidate, context, now);
            let better = score > best_score
                || (score == best_score
                    && is_better_tiebreak(candidate, &entry.candidates[best_idx], context));
            if better {
                best_score = score;
                best_idx = idx;
            }
        }

        entry.default_candidate = best_idx;
        let winner = &mut entry.candidates[best_idx];
        winner.usage_count += 1;
        winner.last_used_millis = Some(now);
        let path = Arc::clone(&winner.file_path);
        let symbol_id = winner.symbol_id;

        self.last_resolved_millis.insert(Arc::clone(&path), now);
        self.tables.get(&path)?.get(symbol_id)
    }

    /// `candidates(name)`: every registered candidate for `name`, for a
    /// disambiguation UI. Empty for a name with only an unambiguous entry.
    #[must_use]
    pub fn candidates(&self, name: &str) -> &[Candidate] {
        self.ambiguous
            .get(name)
            .map(|e| e.candidates.as_slice())
            .unwrap_or(&[])
    }

    #[must_use]
    pub fn is_registered(&self, path: &str) -> bool {
        self.tables.contains_key(path)
    }

    #[must_use]
    pub fn table_for(&self, path: &str) -> Option<&Arc<SymbolTable>> {
        self.tables.get(path)
    }

    /// I6: the names contributed by `path`.
    #[must_use]
    pub fn names_for_file(&self, path: &str) -> FxHashSet<String> {
        self.file_to_names.get(path).cloned().unwrap_or_default()
    }

    /// I6, symmetric: every file that contributed a symbol named `name`.
    #[must_use]
    pub fn files_for_name(&self, name: &str) -> FxHashSet<Arc<str>> {
        self.names_to_files.get(name).cloned().unwrap_or_default()
    }

    /// Evicts least-recently-resolved files over `max_files`, skipping any
    /// file whose table is still referenced by a caller (`Arc::strong_count
    /// > 1`, since the registry's own map holds one). Never evicts `just_registered`.
    fn enforce_capacity(&mut self, just_registered: &Arc<str>) -> Vec<Arc<str>> {
        let Some(max_files) = self.options.max_files else {
            return Vec::new();
        };
        if self.tables.len() <= max_files {
            return Vec::new();
        }

        let mut by_age: Vec<Arc<str>> = self
            .last_resolved_millis
            .iter()
            .filter(|(path, _)| path.as_ref() != just_registered.as_ref())
            .map(|(path, _)| Arc::clone(path))
            .collect();
        by_age.sort_by_key(|path| self.last_resolved_millis.get(path).copied().unwrap_or(0));

        let mut evicted = Vec::new();
        for path in by_age {
            if self.tables.len() <= max_files {
                break;
            }
            let Some(table) = self.tables.get(&path) else {
                continue;
            };
            if Arc::strong_count(table) > 1 {
                continue;
            }
            self.unregister(&path);
            evicted.push(path);
        }
        evicted
    }
}

fn titlecase(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

fn score_candidate(candidate: &Candidate, context: &ResolveContext, now_millis: u64) -> f32 {
    let mut score = candidate.base_confidence;

    if candidate.tier == NamespaceTier::BuiltIn && context.is_common_operation {
        score += 0.3;
    }
    if let (Some(expected), Some(actual)) = (&context.expected_namespace, &candidate.namespace) {
        if expected == actual {
            score += 0.4;
        }
    }
    score += (candidate.usage_count as f32 / 100.0).min(0.2);

    if let Some(last_used) = candidate.last_used_millis {
        let elapsed_hours = now_millis.saturating_sub(last_used) as f32 / (1000.0 * 60.0 * 60.0);
        score += (1.0 - elapsed_hours / 24.0).max(0.0) * 0.1;
    }

    score
}

fn is_better_tiebreak(candidate: &Candidate, current_best: &Candidate, context: &ResolveContext) -> bool {
    let candidate_matches = context
        .expected_namespace
        .as_ref()
        .is_some_and(|expected| candidate.namespace.as_deref() == Some(expected.as_str()));
    let best_matches = context
        .expected_namespace
        .as_ref()
        .is_some_and(|expected| current_best.namespace.as_deref() == Some(expected.as_str()));
    if candidate_matches != best_matches {
        return candidate_matches;
    }
    candidate.registration_seq < current_best.registration_seq
}

