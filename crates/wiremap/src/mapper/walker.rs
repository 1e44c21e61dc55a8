// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Recursive discovery of the reachable contract closure.

use crate::contract::{AnnotationTable, ContractSet, TypeDef, TypeRef};
use crate::error::{MapperError, Result};
use crate::mapper::registry::{CtorKind, TypeRegistry};
use crate::mapper::synthesizer::synthesize;
use crate::naming::canonical_name;
use std::sync::Arc;

/// A nominal reference resolved against the contract set: its canonical
/// name plus the effective definition (bound, for generic constructions).
pub(crate) struct Effective {
    pub canonical: String,
    pub def: Arc<TypeDef>,
}

/// Resolve a `Named` or `Instance` reference. Returns `None` for an open
/// generic definition referenced bare (those are skipped, never resolved).
pub(crate) fn resolve_effective(
    contracts: &ContractSet,
    ty: &TypeRef,
) -> Result<Option<Effective>> {
    match ty {
        TypeRef::Named(full) => {
            let def = contracts
                .get(full)
                .ok_or_else(|| MapperError::UnknownType { name: full.clone() })?;
            if def.is_generic_definition() {
                return Ok(None);
            }
            Ok(Some(Effective {
                canonical: full.clone(),
                def: def.clone(),
            }))
        }
        TypeRef::Instance { definition, args } => {
            let def = contracts
                .get(definition)
                .ok_or_else(|| MapperError::UnknownType {
                    name: definition.clone(),
                })?;
            let Some(canonical) = canonical_name(ty) else {
                return Ok(None);
            };
            let bound = def.bound(canonical.clone(), String::new(), args);
            Ok(Some(Effective {
                canonical,
                def: Arc::new(bound),
            }))
        }
        _ => Ok(None),
    }
}

/// Walks the type graph once, at initialization, registering everything it
/// reaches. The registry's canonical-name check is the sole guard against
/// infinite recursion on self-referential or mutually-referential shapes.
pub(crate) struct Walker<'a> {
    contracts: &'a ContractSet,
    annotations: &'a AnnotationTable,
    registry: &'a mut TypeRegistry,
}

impl<'a> Walker<'a> {
    pub fn new(
        contracts: &'a ContractSet,
        annotations: &'a AnnotationTable,
        registry: &'a mut TypeRegistry,
    ) -> Self {
        Self {
            contracts,
            annotations,
            registry,
        }
    }

    pub fn discover<I>(&mut self, roots: I) -> Result<()>
    where
        I: IntoIterator<Item = TypeRef>,
    {
        for root in roots {
            self.visit(&root)?;
        }
        Ok(())
    }

    fn visit(&mut self, ty: &TypeRef) -> Result<()> {
        match ty {
            // Terminal: directly serializable, nothing to synthesize.
            TypeRef::Simple(_) => Ok(()),
            // Unbound parameters only occur inside open generic definitions.
            TypeRef::Param(_) => Ok(()),
            // Collections are walked through, never registered.
            TypeRef::Sequence(elem) => self.visit(elem),
            TypeRef::Map(key, value) => {
                self.visit(&TypeRef::Pair(key.clone(), value.clone()))?;
                self.visit(key)?;
                self.visit(value)
            }
            TypeRef::Pair(key, value) => {
                let Some(canonical) = canonical_name(ty) else {
                    return Ok(());
                };
                if self.registry.contains_name(&canonical) {
                    return Ok(());
                }
                self.registry.register_name(canonical.clone(), ty.clone());
                // The pair construct is a value type with no parameterless
                // constructor; instances are materialized uninitialized.
                self.registry.record_ctor(canonical, CtorKind::Missing);
                self.visit(key)?;
                self.visit(value)
            }
            TypeRef::Named(_) | TypeRef::Instance { .. } => {
                if ty.has_unbound_params() {
                    return Ok(());
                }
                let Some(effective) = resolve_effective(self.contracts, ty)? else {
                    return Ok(());
                };
                if self.registry.contains_name(&effective.canonical) {
                    return Ok(());
                }

                if effective.def.is_interface() {
                    self.generate_implementation_for(&effective, ty)?;
                } else {
                    let kind = if effective.def.has_default_ctor() && !effective.def.is_abstract()
                    {
                        CtorKind::Parameterless
                    } else {
                        CtorKind::Missing
                    };
                    self.registry
                        .record_ctor(effective.canonical.clone(), kind);
                }

                // Register before recursing: this is what terminates cycles.
                self.registry
                    .register_name(effective.canonical.clone(), ty.clone());

                for ext in effective.def.extends() {
                    self.visit(ext)?;
                }
                for field in effective.def.public_fields() {
                    self.visit(&field.ty)?;
                }
                for prop in &effective.def.properties {
                    self.visit(&prop.ty)?;
                }
                Ok(())
            }
        }
    }

    fn generate_implementation_for(
        &mut self,
        effective: &Effective,
        interface_ref: &TypeRef,
    ) -> Result<()> {
        if effective.def.visibility != crate::contract::Visibility::Public {
            return Err(MapperError::NotPublic {
                type_name: effective.canonical.clone(),
            });
        }
        if effective.def.has_methods() {
            log::warn!(
                "Interface {} contains methods and can therefore not be mapped. \
                 A non-mapped interface can't be used to send messages.",
                effective.canonical
            );
            self.registry.mark_unmapped(effective.canonical.clone());
            return Ok(());
        }
        let concrete = synthesize(
            self.contracts,
            &effective.def,
            interface_ref.clone(),
            &effective.canonical,
            self.annotations,
        )?;
        self.registry
            .insert_mapping(&effective.canonical, interface_ref.clone(), Arc::new(concrete));
        Ok(())
    }
}
