//! Modifier and annotation validators: stateless rule sets (R1-R16). Each
//! function takes exactly what it needs to decide — modifiers, enclosing
//! context, a location — and reports straight into an `ErrorReporter`. None
//! of these hold state between calls; the listener is what accumulates
//! context (current type, current scope) across the walk.

use apex_common::diagnostics::rules;
use apex_common::{ErrorReporter, Location, TypeDescriptor};
use apex_symbols::Modifiers;

/// R1/R2: a method cannot be both `abstract` and `final`, nor both
/// `abstract` and `static`.
pub fn check_method_modifiers(
    modifiers: &Modifiers,
    location: Location,
    file_path: &str,
    reporter: &mut impl ErrorReporter,
) {
    if modifiers.is_abstract() && modifiers.is_final() {
        reporter.add_rule_error(
            rules::R1_ABSTRACT_FINAL,
            "method cannot be both abstract and final",
            location.start_line(),
            location.start_column(),
            file_path,
        );
    }
    if modifiers.is_abstract() && modifiers.is_static() {
        reporter.add_rule_error(
            rules::R2_ABSTRACT_STATIC,
            "method cannot be both abstract and static",
            location.start_line(),
            location.start_column(),
            file_path,
        );
    }
}

/// R3: an interface member may not carry any explicit modifier; its
/// modifiers are always the implicit `public abstract`.
pub fn check_interface_member_modifiers(
    modifiers: &Modifiers,
    location: Location,
    file_path: &str,
    reporter: &mut impl ErrorReporter,
) {
    if modifiers.has_any_explicit() {
        reporter.add_rule_error(
            rules::R3_INTERFACE_MEMBER_MODIFIER,
            "interface members cannot carry explicit modifiers",
            location.start_line(),
            location.start_column(),
            file_path,
        );
    }
}

/// The kind of declaration R4-R8 police inside an interface body.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InterfaceBodyMember {
    Class,
    Interface,
    Field,
    Enum,
    Constructor,
}

/// R4-R8: an interface body may only contain method declarations — no
/// nested class/interface/field/enum/constructor.
pub fn check_not_in_interface_body(
    member: InterfaceBodyMember,
    location: Location,
    file_path: &str,
    reporter: &mut impl ErrorReporter,
) {
    let (rule, label) = match member {
        InterfaceBodyMember::Class => (rules::R4_CLASS_IN_INTERFACE, "class"),
        InterfaceBodyMember::Interface => (rules::R5_INTERFACE_IN_INTERFACE, "interface"),
        InterfaceBodyMember::Field => (rules::R6_FIELD_IN_INTERFACE, "field"),
        InterfaceBodyMember::Enum => (rules::R7_ENUM_IN_INTERFACE, "enum"),
        InterfaceBodyMember::Constructor => (rules::R8_CONSTRUCTOR_IN_INTERFACE, "constructor"),
    };
    reporter.add_rule_error(
        rule,
        &format!("{label} declaration is not allowed inside an interface body"),
        location.start_line(),
        location.start_column(),
        file_path,
    );
}

/// R9: a class nested more than one level deep (class-in-class-in-class).
/// `class_nesting_depth` counts enclosing class scopes *including* the one
/// about to be entered — a top-level class is depth 1, its inner class is
/// depth 2 (allowed), and a class inside that is depth 3 (rejected).
pub fn check_class_nesting_depth(
    class_nesting_depth: usize,
    location: Location,
    file_path: &str,
    reporter: &mut impl ErrorReporter,
) {
    if class_nesting_depth > 2 {
        reporter.add_rule_error(
            rules::R9_NESTED_INNER_CLASS,
            "classes may only be nested one level deep",
            location.start_line(),
            location.start_column(),
            file_path,
        );
    }
}

/// R10: an inner class sharing its outer class's name.
pub fn check_inner_class_name_collision(
    inner_name: &str,
    outer_name: &str,
    location: Location,
    file_path: &str,
    reporter: &mut impl ErrorReporter,
) {
    if inner_name.eq_ignore_ascii_case(outer_name) {
        reporter.add_rule_error(
            rules::R10_INNER_CLASS_NAME_COLLISION,
            &format!("inner class `{inner_name}` has the same name as its enclosing class"),
            location.start_line(),
            location.start_column(),
            file_path,
        );
    }
}

/// R11/R12: a constructor's name must be the enclosing class's simple name,
/// undotted.
pub fn check_constructor_name(
    constructor_name: &str,
    enclosing_class_name: &str,
    location: Location,
    file_path: &str,
    reporter: &mut impl ErrorReporter,
) {
    if constructor_name.contains('.') {
        reporter.add_rule_error(
            rules::R11_DOTTED_CONSTRUCTOR_NAME,
            &format!("constructor name `{constructor_name}` must not be dotted"),
            location.start_line(),
            location.start_column(),
            file_path,
        );
        return;
    }
    if !constructor_name.eq_ignore_ascii_case(enclosing_class_name) {
        reporter.add_rule_error(
            rules::R12_CONSTRUCTOR_NAME_MISMATCH,
            &format!(
                "constructor name `{constructor_name}` does not match enclosing class `{enclosing_class_name}`"
            ),
            location.start_line(),
            location.start_column(),
            file_path,
        );
    }
}

/// Tier-1 duplicate comparison: case-insensitive name, equal parameter
/// count, equal `originalTypeString` per position (case-insensitive).
/// Conservative by design — `String` and `System.String` compare unequal
/// even though they name the same type; tier-2 re-checks with resolved
/// types (§4.9).
#[must_use]
pub fn signatures_conflict(a: &[TypeDescriptor], b: &[TypeDescriptor]) -> bool {
    a.len() == b.len()
        && a.iter()
            .zip(b.iter())
            .all(|(x, y)| x.original_type_string.eq_ignore_ascii_case(&y.original_type_string))
}

/// R13: an exact-duplicate method (same name, same parameter types) in the
/// same scope.
pub fn report_duplicate_method(
    name: &str,
    location: Location,
    file_path: &str,
    reporter: &mut impl ErrorReporter,
) {
    reporter.add_rule_error(
        rules::R13_DUPLICATE_METHOD,
        &format!("duplicate method `{name}`: identical parameter types already declared"),
        location.start_line(),
        location.start_column(),
        file_path,
    );
}

/// R14: an exact-duplicate constructor in the same class.
pub fn report_duplicate_constructor(
    name: &str,
    location: Location,
    file_path: &str,
    reporter: &mut impl ErrorReporter,
) {
    reporter.add_rule_error(
        rules::R14_DUPLICATE_CONSTRUCTOR,
        &format!("duplicate constructor `{name}`: identical parameter types already declared"),
        location.start_line(),
        location.start_column(),
        file_path,
    );
}

/// R15: a second variable declared with the same name in the same scope.
pub fn report_duplicate_variable(
    name: &str,
    location: Location,
    file_path: &str,
    reporter: &mut impl ErrorReporter,
) {
    reporter.add_rule_error(
        rules::R15_DUPLICATE_VARIABLE,
        &format!("duplicate variable declaration `{name}` in this scope"),
        location.start_line(),
        location.start_column(),
        file_path,
    );
}

/// R16: `override` on a method whose enclosing type has no `extends`
/// clause at all can never have a parent to override — a tier-1-decidable
/// subset of the rule. When the enclosing type does extend something, tier-1
/// has no resolved signature to compare against and defers to tier-2
/// (cross-file) validation instead of guessing.
pub fn check_override_without_superclass(
    is_override: bool,
    super_class: Option<&TypeDescriptor>,
    method_name: &str,
    location: Location,
    file_path: &str,
    reporter: &mut impl ErrorReporter,
) {
    if is_override && super_class.is_none() {
        reporter.add_rule_warning(
            rules::R16_UNRESOLVED_OVERRIDE,
            &format!("method `{method_name}` is marked override but its class has no superclass"),
            location.start_line(),
            location.start_column(),
            file_path,
        );
    }
}

#[cfg(test)]
#[path = "../tests/validators.rs"]
mod tests;
