//! The abstract parse-tree contract (§6 "Consumed: `ParseTree`").
//!
//! The concrete Apex grammar is an external collaborator (§1 Out of
//! scope): this crate never parses Apex source itself. Instead a host
//! supplies a [`ParseTree`] — anything that can walk its own internal
//! representation once and drive a [`TreeVisitor`] through the enter/exit
//! contract described in §4.5/§4.6 of the design notes. [`ApexListener`]
//! (`crate::listener`) is the only `TreeVisitor` this crate implements; a
//! host's `ParseTree` implementation is expected to already have parsed
//! modifiers, annotations, and type spellings down to plain strings before
//! calling back here, since lexical/grammatical analysis is the producer's
//! job, not the binder's.
//!
//! [`ApexListener`]: crate::listener::ApexListener

use apex_common::Location;

/// One `name=value` annotation argument, as already parsed by the tree
/// producer.
pub type AnnotationParamArg<'a> = (&'a str, &'a str);

/// The enter/exit callback contract a [`ParseTree`] drives. Every method has
/// a default no-op body so a partial visitor (e.g. a test harness that only
/// cares about a handful of events) doesn't need to implement all of them;
/// [`ApexListener`](crate::listener::ApexListener) overrides every method
/// that can affect the symbol table or reference list.
#[allow(unused_variables)]
pub trait TreeVisitor {
    fn enter_annotation(&mut self, name: &str, location: Location, params: &[AnnotationParamArg]) {}

    fn enter_modifier(&mut self, keyword: &str, location: Location) {}

    fn enter_class_declaration(
        &mut self,
        name: &str,
        super_class: Option<&str>,
        interfaces: &[&str],
        location: Location,
    ) {
    }
    fn exit_class_declaration(&mut self) {}

    fn enter_interface_declaration(&mut self, name: &str, interfaces: &[&str], location: Location) {}
    fn exit_interface_declaration(&mut self) {}

    fn enter_enum_declaration(&mut self, name: &str, location: Location) {}
    fn exit_enum_declaration(&mut self) {}
    fn enum_constant(&mut self, name: &str, location: Location) {}

    fn enter_trigger_unit(&mut self, name: &str, target_object: &str, location: Location) {}
    fn exit_trigger_unit(&mut self) {}

    fn enter_method_declaration(&mut self, name: &str, return_type: &str, location: Location) {}
    fn exit_method_declaration(&mut self) {}

    fn enter_interface_method_declaration(
        &mut self,
        name: &str,
        return_type: &str,
        location: Location,
    ) {
    }
    fn exit_interface_method_declaration(&mut self) {}

    fn enter_constructor_declaration(&mut self, name: &str, location: Location) {}
    fn exit_constructor_declaration(&mut self) {}

    fn formal_parameter(&mut self, name: &str, type_spelling: &str, location: Location) {}

    fn enter_field_declaration(&mut self, type_spelling: &str, location: Location) {}
    fn field_declarator(&mut self, name: &str, location: Location) {}
    fn exit_field_declaration(&mut self) {}

    fn enter_local_variable_declaration(&mut self, type_spelling: &str, location: Location) {}
    fn local_variable_declarator(&mut self, name: &str, location: Location) {}
    fn exit_local_variable_declaration(&mut self) {}

    fn enter_block(&mut self, location: Location) {}
    fn exit_block(&mut self) {}

    fn variable_usage(&mut self, name: &str, location: Location) {}
    fn field_access(&mut self, name: &str, location: Location) {}
    fn type_reference(&mut self, name: &str, location: Location) {}
    fn static_member_access(&mut self, name: &str, location: Location) {}

    fn enter_method_call(&mut self, name: &str, location: Location) {}
    fn exit_method_call(&mut self) {}
    fn enter_constructor_call(&mut self, name: &str, location: Location) {}
    fn exit_constructor_call(&mut self) {}
    fn chained_expression(&mut self, chain_nodes: &[&str], location: Location) {}
}

/// A walkable parse tree, produced by an external grammar this core does
/// not implement. `accept` walks the tree exactly once, calling back into
/// `visitor` in document order (§5 "references are emitted in document
/// order").
pub trait ParseTree {
    fn accept(&self, visitor: &mut dyn TreeVisitor);
}
