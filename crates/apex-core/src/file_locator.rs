//! `DefaultFileLocator` (§4.9 step 3): the `<name>.cls`/`<name>.trigger`
//! naming convention spec.md describes inline without naming a type for it.

use apex_registry::FileLocator;

/// Answers whether a candidate path exists, kept abstract so this crate
/// never assumes a real filesystem — a CLI host backs this with
/// `std::path::Path::exists`, a test backs it with a fixed set.
pub trait FileExistenceCheck: Sync {
    fn exists(&self, path: &str) -> bool;
}

/// `<name>.cls` / `<name>.trigger` for a simple name; `A.B` locates `A.cls`
/// (the outer type's file — member `B` is found inside it once loaded).
pub struct DefaultFileLocator<C> {
    existence: C,
}

impl<C: FileExistenceCheck> DefaultFileLocator<C> {
    #[must_use]
    pub fn new(existence: C) -> Self {
        Self { existence }
    }
}

impl<C: FileExistenceCheck> FileLocator for DefaultFileLocator<C> {
    fn locate(&self, name_or_fqn: &str) -> Option<String> {
        let head = name_or_fqn.split('.').next().unwrap_or(name_or_fqn);
        if head.is_empty() {
            return None;
        }

        let cls_path = format!("{head}.cls");
        if self.existence.exists(&cls_path) {
            return Some(cls_path);
        }

        let trigger_path = format!("{head}.trigger");
        if self.existence.exists(&trigger_path) {
            return Some(trigger_path);
        }

        None
    }
}
