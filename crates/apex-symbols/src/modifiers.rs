//! Modifiers: visibility plus the boolean modifier flags, bit-packed so a
//! 100,000-symbol registry keeps this field to two bytes per symbol.

use bitflags::bitflags;

/// Apex visibility keywords. `Default` is the implicit (package-private)
/// visibility when no keyword is written.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Visibility {
    Public,
    Private,
    Protected,
    Global,
    #[default]
    Default,
}

bitflags! {
    /// The boolean modifier flags, packed into a single byte.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct ModifierFlags: u8 {
        const STATIC      = 1 << 0;
        const FINAL       = 1 << 1;
        const ABSTRACT    = 1 << 2;
        const VIRTUAL     = 1 << 3;
        const OVERRIDE    = 1 << 4;
        const TRANSIENT   = 1 << 5;
        const TEST_METHOD = 1 << 6;
        const WEB_SERVICE = 1 << 7;
    }
}

/// The full modifier set carried by every symbol kind that owns modifiers
/// (everything but `BlockScope`).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Modifiers {
    pub visibility: Visibility,
    flags: ModifierFlags,
}

impl Modifiers {
    #[must_use]
    pub fn new(visibility: Visibility) -> Self {
        Self {
            visibility,
            flags: ModifierFlags::empty(),
        }
    }

    /// The implicit modifier set for an interface method: `public abstract`,
    /// every other flag false. The validator rejects any explicit modifier
    /// layered on top of this (R3).
    #[must_use]
    pub fn interface_method_implicit() -> Self {
        Self {
            visibility: Visibility::Public,
            flags: ModifierFlags::ABSTRACT,
        }
    }

    #[must_use]
    pub const fn is_static(&self) -> bool {
        self.flags.contains(ModifierFlags::STATIC)
    }

    #[must_use]
    pub const fn is_final(&self) -> bool {
        self.flags.contains(ModifierFlags::FINAL)
    }

    #[must_use]
    pub const fn is_abstract(&self) -> bool {
        self.flags.contains(ModifierFlags::ABSTRACT)
    }

    #[must_use]
    pub const fn is_virtual(&self) -> bool {
        self.flags.contains(ModifierFlags::VIRTUAL)
    }

    #[must_use]
    pub const fn is_override(&self) -> bool {
        self.flags.contains(ModifierFlags::OVERRIDE)
    }

    #[must_use]
    pub const fn is_transient(&self) -> bool {
        self.flags.contains(ModifierFlags::TRANSIENT)
    }

    #[must_use]
    pub const fn is_test_method(&self) -> bool {
        self.flags.contains(ModifierFlags::TEST_METHOD)
    }

    #[must_use]
    pub const fn is_web_service(&self) -> bool {
        self.flags.contains(ModifierFlags::WEB_SERVICE)
    }

    pub fn set_static(&mut self, value: bool) {
        self.flags.set(ModifierFlags::STATIC, value);
    }

    pub fn set_final(&mut self, value: bool) {
        self.flags.set(ModifierFlags::FINAL, value);
    }

    pub fn set_abstract(&mut self, value: bool) {
        self.flags.set(ModifierFlags::ABSTRACT, value);
    }

    pub fn set_virtual(&mut self, value: bool) {
        self.flags.set(ModifierFlags::VIRTUAL, value);
    }

    pub fn set_override(&mut self, value: bool) {
        self.flags.set(ModifierFlags::OVERRIDE, value);
    }

    pub fn set_transient(&mut self, value: bool) {
        self.flags.set(ModifierFlags::TRANSIENT, value);
    }

    /// Set by the listener when an `@isTest` annotation is seen (I5); never
    /// writable from an explicit `testmethod` modifier keyword in modern Apex.
    pub fn set_test_method(&mut self, value: bool) {
        self.flags.set(ModifierFlags::TEST_METHOD, value);
    }

    pub fn set_web_service(&mut self, value: bool) {
        self.flags.set(ModifierFlags::WEB_SERVICE, value);
    }

    /// True if this modifier set has any flag or non-default visibility set
    /// explicitly; used by R3 to reject explicit modifiers on interface
    /// members.
    #[must_use]
    pub fn has_any_explicit(&self) -> bool {
        !self.flags.is_empty() || self.visibility != Visibility::Default
    }
}
