//! Exercises `DefaultFileLocator`'s `<name>.cls`/`<name>.trigger` convention
//! through the public `apex_core` API.

use std::collections::HashSet;

use apex_core::{DefaultFileLocator, FileExistenceCheck, FileLocator};

struct FixedFileSet(HashSet<&'static str>);

impl FileExistenceCheck for FixedFileSet {
    fn exists(&self, path: &str) -> bool {
        self.0.contains(path)
    }
}

fn locator(paths: &[&'static str]) -> DefaultFileLocator<FixedFileSet> {
    DefaultFileLocator::new(FixedFileSet(paths.iter().copied().collect()))
}

#[test]
fn a_simple_name_resolves_to_its_cls_file_when_present() {
    let locator = locator(&["Account.cls"]);
    assert_eq!(locator.locate("Account"), Some("Account.cls".to_string()));
}

#[test]
fn falls_back_to_a_trigger_file_when_no_cls_file_exists() {
    let locator = locator(&["AccountTrigger.trigger"]);
    assert_eq!(
        locator.locate("AccountTrigger"),
        Some("AccountTrigger.trigger".to_string())
    );
}

#[test]
fn cls_is_preferred_over_trigger_when_both_exist() {
    let locator = locator(&["Account.cls", "Account.trigger"]);
    assert_eq!(locator.locate("Account"), Some("Account.cls".to_string()));
}

#[test]
fn returns_none_when_neither_file_exists() {
    let locator = locator(&[]);
    assert_eq!(locator.locate("Ghost"), None);
}

#[test]
fn a_qualified_member_reference_locates_the_outer_type_file() {
    let locator = locator(&["Outer.cls"]);
    assert_eq!(locator.locate("Outer.Inner"), Some("Outer.cls".to_string()));
}

#[test]
fn an_empty_name_never_matches_anything() {
    let locator = locator(&[".cls", ".trigger"]);
    assert_eq!(locator.locate(""), None);
}
