//! The parse-tree listener: builds a [`SymbolTable`] and its reference list
//! in one pass while driving the modifier/annotation validators (§4.5/§4.6).
//!
//! State the listener tracks across the walk, per the design notes:
//! - `pending_modifiers`/`pending_annotations` — consumed and reset by the
//!   next declaration that owns modifiers; block entries never touch them.
//! - `type_stack` — enclosing class/interface/enum/trigger frames, used for
//!   nesting-depth checks (R9), constructor name checks (R11/R12), the
//!   `SymbolKey` path, and `R16`'s superclass lookup.
//! - `callable_stack` — the method/constructor/interface-method currently
//!   being walked, so parameters and the eventual duplicate check land on
//!   the right declaration.
//! - `call_stack` — open method/constructor *call expressions*, so a
//!   chained-expression argument can be attached to the call it belongs to
//!   (§4.6's chained-argument-attachment scenario).
//! - `block_depth` — a plain counter, not a stack: nested `{}` blocks are
//!   named `block{depth}` and never need to be addressed by anything other
//!   than the symbol table's own scope links.

use std::mem;

use apex_common::diagnostics::rules;
use apex_common::{DiagnosticSink, ErrorReporter, Location, Logger, NoopLogger, ParserOptions, TypeDescriptor};
use apex_symbols::{
    Annotation, AnnotationParam, Modifiers, Reference, ScopeType, Symbol, SymbolDetail, SymbolId,
    SymbolKey, SymbolKind, SymbolTable,
};

use crate::tree::{AnnotationParamArg, TreeVisitor};
use crate::validators::{self, InterfaceBodyMember};

/// A class/interface/enum/trigger currently open on the walk.
struct TypeFrame {
    kind: SymbolKind,
    symbol_id: SymbolId,
    name: String,
    location: Location,
    /// Triggers have no real supertype; for a `Trigger` frame this instead
    /// carries the target sObject descriptor (`trigger X on Account`), since
    /// the symbol model's `TypeLike::super_class` slot is otherwise unused
    /// on a trigger symbol.
    super_class: Option<TypeDescriptor>,
}

/// A method/constructor/interface-method currently open on the walk.
struct CallableFrame {
    symbol_id: SymbolId,
    name: String,
    location: Location,
    param_types: Vec<TypeDescriptor>,
    is_constructor: bool,
}

/// An open method/constructor *call expression*, tracking which chained
/// references have been passed as its arguments so far.
struct CallFrame {
    name: String,
    location: Location,
    attached_arguments: Vec<String>,
}

/// Shared state for a field or local-variable-declaration group: the type
/// and the modifier/annotation snapshot every declarator in the group
/// shares, consumed once from `pending_modifiers`/`pending_annotations`
/// when the group is entered (§4.5's modifier-isolation discipline treats
/// the whole declaration, not each declarator, as the thing that consumes
/// pending state).
struct DeclarationGroup {
    type_descriptor: TypeDescriptor,
    modifiers: Modifiers,
    annotations: Vec<Annotation>,
}

/// Builds a [`SymbolTable`] and reference list from a single parse-tree
/// walk. See the module docs for the transient state tracked alongside the
/// table.
pub struct ApexListener<'a> {
    table: SymbolTable,
    diagnostics: DiagnosticSink,
    logger: &'a dyn Logger,
    options: ParserOptions,
    file_path: String,

    pending_modifiers: Modifiers,
    pending_annotations: Vec<Annotation>,

    type_stack: Vec<TypeFrame>,
    callable_stack: Vec<CallableFrame>,
    call_stack: Vec<CallFrame>,
    block_depth: usize,

    pending_field: Option<DeclarationGroup>,
    pending_local: Option<DeclarationGroup>,

    /// Set once a structural (I2) inconsistency is observed; surfaced via
    /// `CompilationResult::is_suspect` so a host can choose not to promote a
    /// suspect file's symbols into the global registry.
    suspect: bool,
}

impl<'a> ApexListener<'a> {
    #[must_use]
    pub fn new(file_path: impl Into<String>, options: ParserOptions, logger: &'a dyn Logger) -> Self {
        let file_path = file_path.into();
        Self {
            table: SymbolTable::new(file_path.clone()),
            diagnostics: DiagnosticSink::new(),
            logger,
            options,
            file_path,
            pending_modifiers: Modifiers::default(),
            pending_annotations: Vec::new(),
            type_stack: Vec::new(),
            callable_stack: Vec::new(),
            call_stack: Vec::new(),
            block_depth: 0,
            pending_field: None,
            pending_local: None,
            suspect: false,
        }
    }

    #[must_use]
    pub fn with_noop_logger(file_path: impl Into<String>, options: ParserOptions) -> Self {
        Self::new(file_path, options, &NoopLogger)
    }

    #[must_use]
    pub fn into_parts(self) -> (SymbolTable, DiagnosticSink, bool) {
        (self.table, self.diagnostics, self.suspect)
    }

    #[must_use]
    pub fn table(&self) -> &SymbolTable {
        &self.table
    }

    #[must_use]
    pub fn diagnostics(&self) -> &DiagnosticSink {
        &self.diagnostics
    }

    #[must_use]
    pub fn is_suspect(&self) -> bool {
        self.suspect
    }

    fn in_interface_body(&self) -> bool {
        self.callable_stack.is_empty()
            && matches!(self.type_stack.last(), Some(frame) if frame.kind == SymbolKind::Interface)
    }

    fn class_nesting_depth_including_next(&self) -> usize {
        self.type_stack
            .iter()
            .filter(|frame| frame.kind == SymbolKind::Class)
            .count()
            + 1
    }

    fn type_path(&self) -> Vec<String> {
        self.type_stack.iter().map(|f| f.name.clone()).collect()
    }

    fn current_scope_owner(&self) -> SymbolId {
        self.table.current_scope_id().symbol_id()
    }

    fn enclosing_symbol_id(&self) -> SymbolId {
        self.callable_stack
            .last()
            .map(|f| f.symbol_id)
            .unwrap_or_else(|| self.table.file_scope_id().symbol_id())
    }

    fn report_fault(&mut self, label: &'static str, location: Location) {
        self.diagnostics.add_error(
            &format!("internal error while processing {label}"),
            location.start_line(),
            location.start_column(),
            &self.file_path,
        );
        self.logger
            .log_lazy(apex_common::logger::LogLevel::Error, || {
                format!("fault barrier tripped in {label} at {location} ({})", self.file_path)
            });
    }

    /// Run `op`, converting a panic into a semantic error at `location`
    /// instead of aborting the whole walk (§4.5/§7's fault barrier — one
    /// malformed subtree must not corrupt subsequent ones).
    fn guarded(&mut self, label: &'static str, location: Location, op: impl FnOnce(&mut Self)) {
        let outcome = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| op(self)));
        if outcome.is_err() {
            self.report_fault(label, location);
        }
    }

    /// Pop the current scope, recording a structural error (never silently
    /// unwinding) if its `ScopeType` isn't the one the matching exit handler
    /// expects.
    fn exit_scope_expecting(&mut self, expected: ScopeType, label: &'static str, fallback_location: Location) {
        if self.table.current_scope_id() == self.table.file_scope_id() {
            // An exit_* call with no matching enter_* ever having run (a
            // malformed event stream from the tree producer). SymbolTable's
            // own `exit_scope` asserts on this; check first so a driver bug
            // becomes a structural diagnostic instead of a panic.
            self.suspect = true;
            self.diagnostics.add_rule_error(
                rules::I2_STRUCTURAL,
                &format!("unmatched exit for {label}: scope stack already at the file scope"),
                fallback_location.start_line(),
                fallback_location.start_column(),
                &self.file_path,
            );
            return;
        }

        let actual = self.table.current_scope().scope_type;
        if actual != expected {
            self.suspect = true;
            self.diagnostics.add_rule_error(
                rules::I2_STRUCTURAL,
                &format!(
                    "scope stack inconsistent exiting {label}: expected {expected:?} scope, found {actual:?}"
                ),
                fallback_location.start_line(),
                fallback_location.start_column(),
                &self.file_path,
            );
        }
        self.table.exit_scope();
    }

    fn take_pending(&mut self) -> (Modifiers, Vec<Annotation>) {
        (
            mem::take(&mut self.pending_modifiers),
            mem::take(&mut self.pending_annotations),
        )
    }

    fn apply_istest(annotations: &[Annotation], modifiers: &mut Modifiers) {
        if annotations.iter().any(Annotation::is_test_annotation) {
            modifiers.set_test_method(true);
        }
    }

    fn param_type_descriptors(&self, ids: &[SymbolId]) -> Vec<TypeDescriptor> {
        ids.iter()
            .filter_map(|id| self.table.get(*id))
            .filter_map(|sym| sym.detail.as_typed().cloned())
            .collect()
    }

    /// Check the just-closed callable against its already-registered
    /// siblings in the now-current (enclosing) scope; called after the
    /// callable's own scope has been popped.
    fn check_callable_duplicate(&mut self, frame: &CallableFrame) {
        let sibling_ids = self
            .table
            .names_in_current_scope(&frame.name)
            .to_vec();
        let expected_kind = if frame.is_constructor {
            SymbolKind::Constructor
        } else {
            SymbolKind::Method
        };

        for id in sibling_ids {
            if id == frame.symbol_id {
                continue;
            }
            let Some(sibling) = self.table.get(id) else {
                continue;
            };
            if sibling.kind != expected_kind {
                continue;
            }
            let Some((_, params, _)) = sibling.detail.as_callable() else {
                continue;
            };
            let sibling_types = self.param_type_descriptors(params);
            if validators::signatures_conflict(&frame.param_types, &sibling_types) {
                if frame.is_constructor {
                    validators::report_duplicate_constructor(
                        &frame.name,
                        frame.location,
                        &self.file_path,
                        &mut self.diagnostics,
                    );
                } else {
                    validators::report_duplicate_method(
                        &frame.name,
                        frame.location,
                        &self.file_path,
                        &mut self.diagnostics,
                    );
                }
                return;
            }
        }
    }

    /// Finish the currently open call expression (method or constructor),
    /// emitting its `Reference` with any chained-argument attachments.
    fn finish_call(&mut self, context: apex_symbols::ReferenceContext) {
        let Some(frame) = self.call_stack.pop() else {
            return;
        };
        let mut reference = Reference::new(frame.name, context, frame.location, self.enclosing_symbol_id());
        reference.attached_arguments = frame.attached_arguments;
        self.table.add_reference(reference);
    }
}

impl<'a> TreeVisitor for ApexListener<'a> {
    fn enter_annotation(&mut self, name: &str, location: Location, params: &[AnnotationParamArg]) {
        self.guarded("Annotation", location, |this| {
            let mut annotation = Annotation::new(name, location);
            annotation.parameters = params
                .iter()
                .map(|(n, v)| AnnotationParam {
                    name: (*n).to_string(),
                    value: (*v).to_string(),
                })
                .collect();
            this.pending_annotations.push(annotation);
        });
    }

    fn enter_modifier(&mut self, keyword: &str, location: Location) {
        // R3 fires once, against the *accumulated* modifier set, at the
        // declaration the modifiers end up attached to (see
        // `enter_method_declaration`/`enter_interface_method_declaration`);
        // checking per-keyword here would both mis-scope the diagnostic to
        // the wrong declaration and double-report it.
        self.guarded("Modifier", location, |this| {
            apply_modifier_keyword(&mut this.pending_modifiers, keyword);
        });
    }

    fn enter_class_declaration(
        &mut self,
        name: &str,
        super_class: Option<&str>,
        interfaces: &[&str],
        location: Location,
    ) {
        self.guarded("ClassDeclaration", location, |this| {
            if this.in_interface_body() {
                validators::check_not_in_interface_body(
                    InterfaceBodyMember::Class,
                    location,
                    &this.file_path,
                    &mut this.diagnostics,
                );
            }
            if this.class_nesting_depth_including_next() > 2 {
                validators::check_class_nesting_depth(
                    this.class_nesting_depth_including_next(),
                    location,
                    &this.file_path,
                    &mut this.diagnostics,
                );
            }
            if let Some(outer) = this.type_stack.iter().rev().find(|f| f.kind == SymbolKind::Class) {
                validators::check_inner_class_name_collision(
                    name,
                    &outer.name,
                    location,
                    &this.file_path,
                    &mut this.diagnostics,
                );
            }

            let (mut modifiers, annotations) = this.take_pending();
            Self::apply_istest(&annotations, &mut modifiers);

            let super_descriptor = super_class.map(TypeDescriptor::parse);
            let interface_descriptors: Vec<TypeDescriptor> =
                interfaces.iter().map(|i| TypeDescriptor::parse(i)).collect();
            let path = this.type_path();
            let owner = this.current_scope_owner();

            let symbol_id = this.table.add_symbol(|id| Symbol {
                id,
                kind: SymbolKind::Class,
                name: name.to_string(),
                location,
                modifiers,
                annotations,
                parent_id: Some(owner),
                key: SymbolKey::new(SymbolKind::Class, name, path),
                detail: SymbolDetail::TypeLike {
                    super_class: super_descriptor.clone(),
                    interfaces: interface_descriptors,
                    values: Vec::new(),
                },
            });

            this.table
                .enter_scope(name, ScopeType::Class, location, symbol_id);
            this.type_stack.push(TypeFrame {
                kind: SymbolKind::Class,
                symbol_id,
                name: name.to_string(),
                location,
                super_class: super_descriptor,
            });
        });
    }

    fn exit_class_declaration(&mut self) {
        let location = self.type_stack.last().map(|f| f.location).unwrap_or_else(Location::dummy);
        self.exit_scope_expecting(ScopeType::Class, "ClassDeclaration", location);
        self.type_stack.pop();
    }

    fn enter_interface_declaration(&mut self, name: &str, interfaces: &[&str], location: Location) {
        self.guarded("InterfaceDeclaration", location, |this| {
            if this.in_interface_body() {
                validators::check_not_in_interface_body(
                    InterfaceBodyMember::Interface,
                    location,
                    &this.file_path,
                    &mut this.diagnostics,
                );
            }
            let (mut modifiers, annotations) = this.take_pending();
            Self::apply_istest(&annotations, &mut modifiers);

            let interface_descriptors: Vec<TypeDescriptor> =
                interfaces.iter().map(|i| TypeDescriptor::parse(i)).collect();
            let path = this.type_path();
            let owner = this.current_scope_owner();

            let symbol_id = this.table.add_symbol(|id| Symbol {
                id,
                kind: SymbolKind::Interface,
                name: name.to_string(),
                location,
                modifiers,
                annotations,
                parent_id: Some(owner),
                key: SymbolKey::new(SymbolKind::Interface, name, path),
                detail: SymbolDetail::TypeLike {
                    super_class: None,
                    interfaces: interface_descriptors,
                    values: Vec::new(),
                },
            });

            this.table
                .enter_scope(name, ScopeType::Class, location, symbol_id);
            this.type_stack.push(TypeFrame {
                kind: SymbolKind::Interface,
                symbol_id,
                name: name.to_string(),
                location,
                super_class: None,
            });
        });
    }

    fn exit_interface_declaration(&mut self) {
        let location = self.type_stack.last().map(|f| f.location).unwrap_or_else(Location::dummy);
        self.exit_scope_expecting(ScopeType::Class, "InterfaceDeclaration", location);
        self.type_stack.pop();
    }

    fn enter_enum_declaration(&mut self, name: &str, location: Location) {
        self.guarded("EnumDeclaration", location, |this| {
            if this.in_interface_body() {
                validators::check_not_in_interface_body(
                    InterfaceBodyMember::Enum,
                    location,
                    &this.file_path,
                    &mut this.diagnostics,
                );
            }
            let (modifiers, annotations) = this.take_pending();
            let path = this.type_path();
            let owner = this.current_scope_owner();

            let symbol_id = this.table.add_symbol(|id| Symbol {
                id,
                kind: SymbolKind::Enum,
                name: name.to_string(),
                location,
                modifiers,
                annotations,
                parent_id: Some(owner),
                key: SymbolKey::new(SymbolKind::Enum, name, path),
                detail: SymbolDetail::TypeLike {
                    super_class: None,
                    interfaces: Vec::new(),
                    values: Vec::new(),
                },
            });

            this.table
                .enter_scope(name, ScopeType::Class, location, symbol_id);
            this.type_stack.push(TypeFrame {
                kind: SymbolKind::Enum,
                symbol_id,
                name: name.to_string(),
                location,
                super_class: None,
            });
        });
    }

    fn exit_enum_declaration(&mut self) {
        let location = self.type_stack.last().map(|f| f.location).unwrap_or_else(Location::dummy);
        self.exit_scope_expecting(ScopeType::Class, "EnumDeclaration", location);
        self.type_stack.pop();
    }

    fn enum_constant(&mut self, name: &str, location: Location) {
        self.guarded("EnumConstants", location, |this| {
            let Some(enum_frame) = this.type_stack.last() else {
                return;
            };
            let enum_symbol_id = enum_frame.symbol_id;
            let enum_name = enum_frame.name.clone();
            let path = this.type_path();
            let owner = this.current_scope_owner();

            let value_id = this.table.add_symbol(|id| Symbol {
                id,
                kind: SymbolKind::EnumValue,
                name: name.to_string(),
                location,
                modifiers: Modifiers::default(),
                annotations: Vec::new(),
                parent_id: Some(owner),
                key: SymbolKey::new(SymbolKind::EnumValue, name, path),
                detail: SymbolDetail::Typed {
                    type_descriptor: TypeDescriptor::synthetic(enum_name),
                },
            });

            if let Some(sym) = this.table.symbol_mut(enum_symbol_id) {
                if let SymbolDetail::TypeLike { values, .. } = &mut sym.detail {
                    values.push(value_id);
                }
            }
        });
    }

    fn enter_trigger_unit(&mut self, name: &str, target_object: &str, location: Location) {
        self.guarded("TriggerUnit", location, |this| {
            let (modifiers, annotations) = this.take_pending();
            let owner = this.current_scope_owner();
            let target_descriptor = TypeDescriptor::parse(target_object);

            let symbol_id = this.table.add_symbol(|id| Symbol {
                id,
                kind: SymbolKind::Trigger,
                name: name.to_string(),
                location,
                modifiers,
                annotations,
                parent_id: Some(owner),
                key: SymbolKey::new(SymbolKind::Trigger, name, Vec::new()),
                detail: SymbolDetail::TypeLike {
                    super_class: Some(target_descriptor.clone()),
                    interfaces: Vec::new(),
                    values: Vec::new(),
                },
            });

            this.table
                .enter_scope(name, ScopeType::Trigger, location, symbol_id);
            this.type_stack.push(TypeFrame {
                kind: SymbolKind::Trigger,
                symbol_id,
                name: name.to_string(),
                location,
                super_class: Some(target_descriptor),
            });
        });
    }

    fn exit_trigger_unit(&mut self) {
        let location = self.type_stack.last().map(|f| f.location).unwrap_or_else(Location::dummy);
        self.exit_scope_expecting(ScopeType::Trigger, "TriggerUnit", location);
        self.type_stack.pop();
    }

    fn enter_method_declaration(&mut self, name: &str, return_type: &str, location: Location) {
        self.guarded("MethodDeclaration", location, |this| {
            let (mut modifiers, annotations) = this.take_pending();
            Self::apply_istest(&annotations, &mut modifiers);

            validators::check_method_modifiers(&modifiers, location, &this.file_path, &mut this.diagnostics);
            if this.in_interface_body() {
                validators::check_interface_member_modifiers(
                    &modifiers,
                    location,
                    &this.file_path,
                    &mut this.diagnostics,
                );
            }
            let super_class = this.type_stack.last().and_then(|f| f.super_class.as_ref());
            validators::check_override_without_superclass(
                modifiers.is_override(),
                super_class,
                name,
                location,
                &this.file_path,
                &mut this.diagnostics,
            );

            let return_descriptor = TypeDescriptor::parse(return_type);
            let path = this.type_path();
            let owner = this.current_scope_owner();

            let symbol_id = this.table.add_symbol(|id| Symbol {
                id,
                kind: SymbolKind::Method,
                name: name.to_string(),
                location,
                modifiers,
                annotations,
                parent_id: Some(owner),
                key: SymbolKey::new(SymbolKind::Method, name, path),
                detail: SymbolDetail::Callable {
                    return_type: return_descriptor,
                    parameters: Vec::new(),
                    is_constructor: false,
                },
            });

            this.table
                .enter_scope(name, ScopeType::Method, location, symbol_id);
            this.callable_stack.push(CallableFrame {
                symbol_id,
                name: name.to_string(),
                location,
                param_types: Vec::new(),
                is_constructor: false,
            });
        });
    }

    fn exit_method_declaration(&mut self) {
        let Some(frame) = self.callable_stack.pop() else {
            return;
        };
        self.exit_scope_expecting(ScopeType::Method, "MethodDeclaration", frame.location);
        self.check_callable_duplicate(&frame);
    }

    fn enter_interface_method_declaration(
        &mut self,
        name: &str,
        return_type: &str,
        location: Location,
    ) {
        self.guarded("InterfaceMethodDeclaration", location, |this| {
            // Explicit pending modifiers on an interface method are always
            // invalid; implicit modifiers are `public abstract` regardless
            // of what (if anything) was pending.
            let (explicit_modifiers, _annotations_discarded) = this.take_pending();
            if explicit_modifiers.has_any_explicit() {
                validators::check_interface_member_modifiers(
                    &explicit_modifiers,
                    location,
                    &this.file_path,
                    &mut this.diagnostics,
                );
            }
            let modifiers = Modifiers::interface_method_implicit();
            let return_descriptor = TypeDescriptor::parse(return_type);
            let path = this.type_path();
            let owner = this.current_scope_owner();

            let symbol_id = this.table.add_symbol(|id| Symbol {
                id,
                kind: SymbolKind::Method,
                name: name.to_string(),
                location,
                modifiers,
                annotations: Vec::new(),
                parent_id: Some(owner),
                key: SymbolKey::new(SymbolKind::Method, name, path),
                detail: SymbolDetail::Callable {
                    return_type: return_descriptor,
                    parameters: Vec::new(),
                    is_constructor: false,
                },
            });

            this.table
                .enter_scope(name, ScopeType::Method, location, symbol_id);
            this.callable_stack.push(CallableFrame {
                symbol_id,
                name: name.to_string(),
                location,
                param_types: Vec::new(),
                is_constructor: false,
            });
        });
    }

    fn exit_interface_method_declaration(&mut self) {
        let Some(frame) = self.callable_stack.pop() else {
            return;
        };
        self.exit_scope_expecting(ScopeType::Method, "InterfaceMethodDeclaration", frame.location);
        self.check_callable_duplicate(&frame);
    }

    fn enter_constructor_declaration(&mut self, name: &str, location: Location) {
        self.guarded("ConstructorDeclaration", location, |this| {
            if this.in_interface_body() {
                validators::check_not_in_interface_body(
                    InterfaceBodyMember::Constructor,
                    location,
                    &this.file_path,
                    &mut this.diagnostics,
                );
            }
            let enclosing_class_name = this
                .type_stack
                .last()
                .map(|f| f.name.clone())
                .unwrap_or_default();
            validators::check_constructor_name(
                name,
                &enclosing_class_name,
                location,
                &this.file_path,
                &mut this.diagnostics,
            );

            let (modifiers, annotations) = this.take_pending();
            let path = this.type_path();
            let owner = this.current_scope_owner();
            // I4: constructor name is always the enclosing class's name,
            // even when the source spelled something else (the mismatch is
            // already reported by R11/R12 above).
            let stored_name = enclosing_class_name.clone();

            let symbol_id = this.table.add_symbol(|id| Symbol {
                id,
                kind: SymbolKind::Constructor,
                name: stored_name.clone(),
                location,
                modifiers,
                annotations,
                parent_id: Some(owner),
                key: SymbolKey::new(SymbolKind::Constructor, &stored_name, path),
                detail: SymbolDetail::Callable {
                    return_type: TypeDescriptor::void(),
                    parameters: Vec::new(),
                    is_constructor: true,
                },
            });

            this.table
                .enter_scope(&stored_name, ScopeType::Method, location, symbol_id);
            this.callable_stack.push(CallableFrame {
                symbol_id,
                name: stored_name,
                location,
                param_types: Vec::new(),
                is_constructor: true,
            });
        });
    }

    fn exit_constructor_declaration(&mut self) {
        let Some(frame) = self.callable_stack.pop() else {
            return;
        };
        self.exit_scope_expecting(ScopeType::Method, "ConstructorDeclaration", frame.location);
        self.check_callable_duplicate(&frame);
    }

    fn formal_parameter(&mut self, name: &str, type_spelling: &str, location: Location) {
        self.guarded("FormalParameter", location, |this| {
            let (modifiers, annotations) = this.take_pending();
            let type_descriptor = TypeDescriptor::parse(type_spelling);
            let path = this.type_path();
            let owner = this.current_scope_owner();

            let param_id = this.table.add_symbol(|id| Symbol {
                id,
                kind: SymbolKind::Parameter,
                name: name.to_string(),
                location,
                modifiers,
                annotations,
                parent_id: Some(owner),
                key: SymbolKey::new(SymbolKind::Parameter, name, path),
                detail: SymbolDetail::Typed {
                    type_descriptor: type_descriptor.clone(),
                },
            });

            if let Some(frame) = this.callable_stack.last_mut() {
                frame.param_types.push(type_descriptor);
                let callable_id = frame.symbol_id;
                if let Some(sym) = this.table.symbol_mut(callable_id) {
                    if let SymbolDetail::Callable { parameters, .. } = &mut sym.detail {
                        parameters.push(param_id);
                    }
                }
            }
        });
    }

    fn enter_field_declaration(&mut self, type_spelling: &str, location: Location) {
        self.guarded("FieldDeclaration", location, |this| {
            if this.in_interface_body() {
                validators::check_not_in_interface_body(
                    InterfaceBodyMember::Field,
                    location,
                    &this.file_path,
                    &mut this.diagnostics,
                );
            }
            let (modifiers, annotations) = this.take_pending();
            this.pending_field = Some(DeclarationGroup {
                type_descriptor: TypeDescriptor::parse(type_spelling),
                modifiers,
                annotations,
            });
        });
    }

    fn field_declarator(&mut self, name: &str, location: Location) {
        self.guarded("FieldDeclarator", location, |this| {
            let Some(group) = this.pending_field.as_ref() else {
                return;
            };
            let type_descriptor = group.type_descriptor.clone();
            let modifiers = group.modifiers;
            let annotations = group.annotations.clone();
            let path = this.type_path();
            let owner = this.current_scope_owner();

            this.table.add_symbol(|id| Symbol {
                id,
                kind: SymbolKind::Property,
                name: name.to_string(),
                location,
                modifiers,
                annotations,
                parent_id: Some(owner),
                key: SymbolKey::new(SymbolKind::Property, name, path),
                detail: SymbolDetail::Typed { type_descriptor },
            });
        });
    }

    fn exit_field_declaration(&mut self) {
        self.pending_field = None;
    }

    fn enter_local_variable_declaration(&mut self, type_spelling: &str, location: Location) {
        self.guarded("LocalVariableDeclaration", location, |this| {
            let (modifiers, annotations) = this.take_pending();
            this.pending_local = Some(DeclarationGroup {
                type_descriptor: TypeDescriptor::parse(type_spelling),
                modifiers,
                annotations,
            });
        });
    }

    fn local_variable_declarator(&mut self, name: &str, location: Location) {
        self.guarded("LocalVariableDeclarator", location, |this| {
            if !this.table.names_in_current_scope(name).is_empty() {
                validators::report_duplicate_variable(name, location, &this.file_path, &mut this.diagnostics);
            }

            let Some(group) = this.pending_local.as_ref() else {
                return;
            };
            let type_descriptor = group.type_descriptor.clone();
            let modifiers = group.modifiers;
            let annotations = group.annotations.clone();
            let path = this.type_path();
            let owner = this.current_scope_owner();

            this.table.add_symbol(|id| Symbol {
                id,
                kind: SymbolKind::Variable,
                name: name.to_string(),
                location,
                modifiers,
                annotations,
                parent_id: Some(owner),
                key: SymbolKey::new(SymbolKind::Variable, name, path),
                detail: SymbolDetail::Typed { type_descriptor },
            });
        });
    }

    fn exit_local_variable_declaration(&mut self) {
        self.pending_local = None;
    }

    fn enter_block(&mut self, location: Location) {
        self.guarded("Block", location, |this| {
            let name = format!("block{}", this.block_depth);
            let owner = this.current_scope_owner();
            this.block_depth += 1;
            this.table.enter_scope(name, ScopeType::Block, location, owner);
        });
    }

    fn exit_block(&mut self) {
        self.block_depth = self.block_depth.saturating_sub(1);
        self.exit_scope_expecting(ScopeType::Block, "Block", Location::dummy());
    }

    fn variable_usage(&mut self, name: &str, location: Location) {
        self.guarded("VariableUsage", location, |this| {
            let enclosing = this.enclosing_symbol_id();
            this.table.add_reference(Reference::new(
                name,
                apex_symbols::ReferenceContext::VariableUsage,
                location,
                enclosing,
            ));
        });
    }

    fn field_access(&mut self, name: &str, location: Location) {
        self.guarded("FieldAccess", location, |this| {
            let enclosing = this.enclosing_symbol_id();
            this.table.add_reference(Reference::new(
                name,
                apex_symbols::ReferenceContext::FieldAccess,
                location,
                enclosing,
            ));
        });
    }

    fn type_reference(&mut self, name: &str, location: Location) {
        self.guarded("TypeReference", location, |this| {
            let enclosing = this.enclosing_symbol_id();
            this.table.add_reference(Reference::new(
                name,
                apex_symbols::ReferenceContext::TypeReference,
                location,
                enclosing,
            ));
        });
    }

    fn static_member_access(&mut self, name: &str, location: Location) {
        self.guarded("StaticMemberAccess", location, |this| {
            let enclosing = this.enclosing_symbol_id();
            this.table.add_reference(Reference::new(
                name,
                apex_symbols::ReferenceContext::StaticMemberAccess,
                location,
                enclosing,
            ));
        });
    }

    fn enter_method_call(&mut self, name: &str, location: Location) {
        self.guarded("MethodCall", location, |this| {
            this.call_stack.push(CallFrame {
                name: name.to_string(),
                location,
                attached_arguments: Vec::new(),
            });
        });
    }

    fn exit_method_call(&mut self) {
        self.finish_call(apex_symbols::ReferenceContext::MethodCall);
    }

    fn enter_constructor_call(&mut self, name: &str, location: Location) {
        self.guarded("ConstructorCall", location, |this| {
            this.call_stack.push(CallFrame {
                name: name.to_string(),
                location,
                attached_arguments: Vec::new(),
            });
        });
    }

    fn exit_constructor_call(&mut self) {
        self.finish_call(apex_symbols::ReferenceContext::ConstructorCall);
    }

    fn chained_expression(&mut self, chain_nodes: &[&str], location: Location) {
        self.guarded("ChainedExpression", location, |this| {
            let owned_nodes: Vec<String> = chain_nodes.iter().map(|s| (*s).to_string()).collect();
            let enclosing = this.enclosing_symbol_id();
            let reference = Reference::chained(owned_nodes, location, enclosing);
            let joined_name = reference.name.clone();
            this.table.add_reference(reference);

            if this.options.enable_reference_correction {
                if let Some(frame) = this.call_stack.last_mut() {
                    frame.attached_arguments.push(joined_name);
                }
            }
        });
    }
}

/// Apply one modifier keyword to a `Modifiers` set. Unknown keywords are a
/// no-op rather than an error: a concrete grammar only ever calls this with
/// its own known modifier tokens, and a new Apex keyword showing up here
/// first is not this crate's concern to reject.
fn apply_modifier_keyword(modifiers: &mut Modifiers, keyword: &str) {
    use apex_symbols::Visibility;

    match keyword.to_ascii_lowercase().as_str() {
        "public" => modifiers.visibility = Visibility::Public,
        "private" => modifiers.visibility = Visibility::Private,
        "protected" => modifiers.visibility = Visibility::Protected,
        "global" => modifiers.visibility = Visibility::Global,
        "static" => modifiers.set_static(true),
        "final" => modifiers.set_final(true),
        "abstract" => modifiers.set_abstract(true),
        "virtual" => modifiers.set_virtual(true),
        "override" => modifiers.set_override(true),
        "transient" => modifiers.set_transient(true),
        "testmethod" => modifiers.set_test_method(true),
        "webservice" => modifiers.set_web_service(true),
        _ => {}
    }
}

#[cfg(test)]
#[path = "../tests/listener_unit.rs"]
mod tests;
