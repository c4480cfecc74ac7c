//! Annotations (`@IsTest`, `@AuraEnabled(cacheable=true)`, ...).

use apex_common::Location;

/// One `name=value` argument inside an annotation's parameter list.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AnnotationParam {
    pub name: String,
    pub value: String,
}

/// A parsed annotation, in source order, attached to the declaration that
/// immediately follows it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Annotation {
    pub name: String,
    pub location: Location,
    pub parameters: Vec<AnnotationParam>,
}

impl Annotation {
    #[must_use]
    pub fn new(name: impl Into<String>, location: Location) -> Self {
        Self {
            name: name.into(),
            location,
            parameters: Vec::new(),
        }
    }

    /// Case-insensitive match against `@isTest`/`@IsTest`/`@ISTEST` (I5).
    #[must_use]
    pub fn is_test_annotation(&self) -> bool {
        self.name.eq_ignore_ascii_case("istest")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn istest_matches_case_insensitively() {
        for spelling in ["IsTest", "istest", "ISTEST", "IsTeSt"] {
            let a = Annotation::new(spelling, Location::dummy());
            assert!(a.is_test_annotation(), "{spelling} should match");
        }
        let not_test = Annotation::new("AuraEnabled", Location::dummy());
        assert!(!not_test.is_test_annotation());
    }
}
