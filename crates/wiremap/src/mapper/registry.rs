// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! The interface↔concrete mapping registry.
//!
//! Populated once during the single-threaded initialization pass and
//! read-only thereafter; shared by reference across worker threads without
//! further synchronization. Entries are only ever added, never replaced or
//! removed.

use crate::contract::{TypeDef, TypeRef};
use crate::naming::strip_proxy_suffix;
use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

/// How an instance of a registered concrete type is materialized.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CtorKind {
    /// A parameterless constructor exists: declared defaults are applied.
    Parameterless,
    /// No accessible parameterless constructor: instances are allocated
    /// zero-initialized without running one.
    Missing,
}

/// Bidirectional interface↔concrete map plus the canonical-name lookup the
/// wire codec uses for type tags.
#[derive(Debug, Default)]
pub struct TypeRegistry {
    interface_to_concrete: HashMap<String, Arc<TypeDef>>,
    concrete_to_interface: HashMap<String, TypeRef>,
    name_to_type: HashMap<String, TypeRef>,
    constructors: HashMap<String, CtorKind>,
    unmapped: BTreeSet<String>,
}

impl TypeRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// True if a canonical name has already been handled. This check is the
    /// sole guard against infinite recursion during discovery.
    pub fn contains_name(&self, canonical: &str) -> bool {
        self.name_to_type.contains_key(canonical)
    }

    pub(crate) fn register_name(&mut self, canonical: String, ty: TypeRef) {
        self.name_to_type.insert(canonical, ty);
    }

    pub(crate) fn record_ctor(&mut self, canonical: String, kind: CtorKind) {
        self.constructors.insert(canonical, kind);
    }

    /// Insert a proxy mapping. Both directions are inserted together so the
    /// bijection invariant can never be observed half-established, and the
    /// synthesized type's parameterless constructor is recorded.
    pub(crate) fn insert_mapping(
        &mut self,
        interface_canonical: &str,
        interface_ref: TypeRef,
        concrete: Arc<TypeDef>,
    ) {
        let concrete_name = concrete.full_name();
        self.interface_to_concrete
            .insert(interface_canonical.to_string(), concrete.clone());
        self.concrete_to_interface
            .insert(concrete_name.clone(), interface_ref);
        self.constructors.insert(concrete_name, CtorKind::Parameterless);
    }

    pub(crate) fn mark_unmapped(&mut self, canonical: String) {
        self.unmapped.insert(canonical);
    }

    /// The synthesized concrete type for an interface's canonical name.
    pub fn resolve_concrete(&self, interface_canonical: &str) -> Option<&Arc<TypeDef>> {
        self.interface_to_concrete.get(interface_canonical)
    }

    /// The interface a synthesized concrete type was generated to support.
    /// Only synthesized concrete types participate; anything else misses.
    pub fn resolve_interface(&self, concrete_canonical: &str) -> Option<&TypeRef> {
        self.concrete_to_interface.get(concrete_canonical)
    }

    /// Resolve a wire-format type tag, stripping the synthesized-type
    /// suffix first. Misses return `None`; the facade layers its last-resort
    /// resolver on top of this.
    pub fn resolve_by_name(&self, name: &str) -> Option<&TypeRef> {
        self.name_to_type.get(strip_proxy_suffix(name))
    }

    pub fn ctor_kind(&self, canonical: &str) -> Option<CtorKind> {
        self.constructors.get(canonical).copied()
    }

    /// Interfaces that were skipped (method-bearing) and left unmapped.
    pub fn unmapped_interfaces(&self) -> impl Iterator<Item = &str> {
        self.unmapped.iter().map(String::as_str)
    }

    /// Number of registered canonical names.
    #[must_use]
    pub fn len(&self) -> usize {
        self.name_to_type.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.name_to_type.is_empty()
    }

    /// All proxy mappings, for ahead-of-time source emission.
    pub fn mappings(&self) -> impl Iterator<Item = (&str, &Arc<TypeDef>)> {
        self.interface_to_concrete
            .iter()
            .map(|(k, v)| (k.as_str(), v))
    }

    /// All registered canonical names and what they refer to.
    pub fn names(&self) -> impl Iterator<Item = (&str, &TypeRef)> {
        self.name_to_type.iter().map(|(k, v)| (k.as_str(), v))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contract::{ClassBuilder, SimpleKind};

    fn proxy_def() -> Arc<TypeDef> {
        Arc::new(
            ClassBuilder::new("", "shop.IOrder__impl")
                .implements("shop.IOrder")
                .sealed()
                .property("id", TypeRef::Simple(SimpleKind::Uuid))
                .build(),
        )
    }

    #[test]
    fn test_bijection_round_trip() {
        let mut reg = TypeRegistry::new();
        reg.register_name("shop.IOrder".into(), TypeRef::named("shop.IOrder"));
        reg.insert_mapping("shop.IOrder", TypeRef::named("shop.IOrder"), proxy_def());

        let concrete = reg.resolve_concrete("shop.IOrder").expect("concrete");
        assert_eq!(concrete.full_name(), "shop.IOrder__impl");
        assert_eq!(
            reg.resolve_interface("shop.IOrder__impl"),
            Some(&TypeRef::named("shop.IOrder"))
        );
        assert_eq!(
            reg.ctor_kind("shop.IOrder__impl"),
            Some(CtorKind::Parameterless)
        );
    }

    #[test]
    fn test_resolve_by_name_strips_suffix() {
        let mut reg = TypeRegistry::new();
        reg.register_name("shop.IOrder".into(), TypeRef::named("shop.IOrder"));
        assert_eq!(
            reg.resolve_by_name("shop.IOrder__impl"),
            reg.resolve_by_name("shop.IOrder")
        );
        assert!(reg.resolve_by_name("shop.IUnknown").is_none());
    }

    #[test]
    fn test_unmapped_record() {
        let mut reg = TypeRegistry::new();
        reg.mark_unmapped("shop.ICallback".into());
        let unmapped: Vec<_> = reg.unmapped_interfaces().collect();
        assert_eq!(unmapped, ["shop.ICallback"]);
        assert!(reg.resolve_concrete("shop.ICallback").is_none());
    }
}
