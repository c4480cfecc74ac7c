//! Centralized limits shared by the binder and the cross-file resolver.
//!
//! Centralizing these avoids duplicate, inconsistently-tuned constants
//! scattered across the crates that need them.

/// Apex's own file-size ceiling. `Location`'s packed line/column
/// representation relies on this: at this size, line and column numbers
/// never exceed `u16::MAX`.
pub const MAX_FILE_CHARS: usize = 1_000_000;

/// Upper bound on a single scope's nesting depth while walking outward
/// during `lookup`. Guards against a malformed (cyclic) scope tree turning
/// a lookup into an infinite loop; real Apex code nests nowhere near this
/// deep.
pub const MAX_SCOPE_WALK_ITERATIONS: usize = 10_000;

/// Initial capacity hint for a scope's name-to-symbols multimap. Most
/// scopes (method bodies, block scopes) declare a handful of names; this
/// avoids repeated reallocation without over-allocating for the common case.
pub const SCOPE_SYMBOLS_INITIAL_CAPACITY: usize = 8;

/// Soft cap on how many deferred edges a single FQN may accumulate before
/// the resolver logs a warning that something is probably never going to
/// resolve (e.g. a typo'd type name referenced from many call sites).
pub const DEFERRED_EDGE_WARN_THRESHOLD: usize = 256;
