// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! The mapper facade: the surface the host serializer talks to.

use crate::contract::{AnnotationTable, ContractSet, TypeRef};
use crate::error::Result;
use crate::instance::{InstanceFactory, MessageInstance};
use crate::mapper::registry::TypeRegistry;
use crate::mapper::walker::{resolve_effective, Walker};
use crate::naming::{strip_proxy_suffix, NameCache};

/// Last-resort name resolution, consulted when a wire tag misses the
/// registry. Hosts that can resolve names some other way plug in here;
/// a miss is an absent result, never an error.
pub trait NameResolver: Send + Sync {
    fn resolve(&self, name: &str) -> Option<TypeRef>;
}

/// Maps between interface contracts and their generated concrete types.
///
/// Initialization walks the message-type closure exactly once, on one
/// thread, before any traffic; afterwards every lookup is a read against
/// immutable state and is safe to share across worker threads. Only the
/// canonical-name memo is populated lazily, under a thread-safe
/// get-or-compute.
pub struct MessageMapper {
    contracts: ContractSet,
    annotations: AnnotationTable,
    registry: TypeRegistry,
    names: NameCache,
    fallback: Option<Box<dyn NameResolver>>,
}

impl MessageMapper {
    /// Create an empty mapper over a contract universe, with the standard
    /// annotation table.
    #[must_use]
    pub fn new(contracts: ContractSet) -> Self {
        Self {
            contracts,
            annotations: AnnotationTable::standard(),
            registry: TypeRegistry::new(),
            names: NameCache::new(),
            fallback: None,
        }
    }

    /// Replace the annotation replication table.
    #[must_use]
    pub fn with_annotation_table(mut self, table: AnnotationTable) -> Self {
        self.annotations = table;
        self
    }

    /// Install a last-resort name resolver.
    #[must_use]
    pub fn with_fallback_resolver(mut self, resolver: Box<dyn NameResolver>) -> Self {
        self.fallback = Some(resolver);
        self
    }

    /// Scan the given root types, generating concrete types for every
    /// reachable interface. An empty sequence is a no-op. Errors abort
    /// startup: an incompletely initialized registry is unsafe to serve
    /// traffic.
    pub fn initialize<I>(&mut self, roots: I) -> Result<()>
    where
        I: IntoIterator<Item = TypeRef>,
    {
        Walker::new(&self.contracts, &self.annotations, &mut self.registry).discover(roots)
    }

    /// If the given type is a synthesized concrete type, the interface it
    /// was generated to support; if it is an interface, the concrete type
    /// generated to implement it. Plain concrete types map to themselves;
    /// generic type definitions never resolve.
    pub fn mapped_type_for(&self, ty: &TypeRef) -> Option<TypeRef> {
        match ty {
            // Plain concrete shapes map to themselves.
            TypeRef::Simple(_)
            | TypeRef::Sequence(_)
            | TypeRef::Map(_, _)
            | TypeRef::Pair(_, _) => Some(ty.clone()),
            TypeRef::Param(_) => None,
            TypeRef::Named(_) | TypeRef::Instance { .. } => {
                let canonical = self.names.canonical(ty)?;
                if let Some(interface_ref) = self.registry.resolve_interface(&canonical) {
                    return Some(interface_ref.clone());
                }
                let effective = resolve_effective(&self.contracts, ty).ok()??;
                if effective.def.is_interface() {
                    self.registry
                        .resolve_concrete(&effective.canonical)
                        .map(|concrete| TypeRef::named(concrete.full_name()))
                } else {
                    Some(ty.clone())
                }
            }
        }
    }

    /// Resolve a wire-format type tag back to a runtime type, stripping the
    /// synthesized-type suffix first. Falls back to the installed resolver;
    /// a miss is `None`, left to the codec to handle.
    pub fn mapped_type_for_name(&self, name: &str) -> Option<TypeRef> {
        if let Some(ty) = self.registry.resolve_by_name(name) {
            return Some(ty.clone());
        }
        self.fallback
            .as_ref()
            .and_then(|resolver| resolver.resolve(strip_proxy_suffix(name)))
    }

    /// If the given type is an interface or abstract, find its generated
    /// concrete implementation, instantiate it, and return the result.
    pub fn create_instance(&self, ty: &TypeRef) -> Result<MessageInstance> {
        InstanceFactory::new(&self.contracts, &self.registry, &self.names).create(ty)
    }

    /// Create an instance and apply `setup` to it before returning.
    pub fn create_instance_with<F>(&self, ty: &TypeRef, setup: F) -> Result<MessageInstance>
    where
        F: FnOnce(&mut MessageInstance),
    {
        let mut instance = self.create_instance(ty)?;
        setup(&mut instance);
        Ok(instance)
    }

    /// Interfaces that were skipped during initialization and left
    /// unmapped.
    pub fn unmapped_interfaces(&self) -> impl Iterator<Item = &str> {
        self.registry.unmapped_interfaces()
    }

    pub fn registry(&self) -> &TypeRegistry {
        &self.registry
    }

    pub fn contracts(&self) -> &ContractSet {
        &self.contracts
    }
}
