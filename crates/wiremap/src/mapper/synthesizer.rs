// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Synthesis of concrete backing types for interface contracts.
//!
//! Only properties are synthesized: each one gets a private backing field
//! and a public accessor pair that read/write it with no other behavior.
//! The generated type is sealed, public, default-constructible and declares
//! the source interface as implemented.

use crate::contract::{
    AnnotationTable, ContractKind, ContractSet, FieldDef, PropertyDef, TypeDef, TypeRef,
    Visibility,
};
use crate::error::Result;
use crate::mapper::walker::resolve_effective;
use crate::naming::PROXY_SUFFIX;
use std::collections::HashSet;

/// Build the concrete type for `iface` (already bound if it came from a
/// generic construction). `canonical` is the interface's canonical name;
/// `interface_ref` is recorded as the implemented contract.
pub(crate) fn synthesize(
    contracts: &ContractSet,
    iface: &TypeDef,
    interface_ref: TypeRef,
    canonical: &str,
    annotations: &AnnotationTable,
) -> Result<TypeDef> {
    let mut fields = Vec::new();
    let mut properties = Vec::new();
    for prop in all_properties(contracts, iface)? {
        fields.push(FieldDef::private(
            format!("field_{}", prop.name),
            prop.ty.clone(),
        ));
        properties.push(PropertyDef {
            name: prop.name,
            ty: prop.ty,
            annotations: annotations.replicate(&prop.annotations),
            default: prop.default,
        });
    }

    Ok(TypeDef {
        name: format!("{canonical}{PROXY_SUFFIX}"),
        namespace: String::new(),
        visibility: Visibility::Public,
        generic_params: Vec::new(),
        kind: ContractKind::Class {
            implements: vec![interface_ref],
            has_default_ctor: true,
            sealed: true,
            is_abstract: false,
        },
        properties,
        fields,
    })
}

/// The union of properties across the interface and everything it extends,
/// transitively, in first-encountered order. A later property with the same
/// name *and* the same type as an earlier one is a diamond duplicate and is
/// dropped; a same-name property of a different type survives (member
/// shadowing).
pub(crate) fn all_properties(
    contracts: &ContractSet,
    iface: &TypeDef,
) -> Result<Vec<PropertyDef>> {
    let mut out: Vec<PropertyDef> = Vec::new();
    let mut visited: HashSet<String> = HashSet::new();
    collect(contracts, iface, &mut visited, &mut out)?;

    let mut kept: Vec<PropertyDef> = Vec::with_capacity(out.len());
    for prop in out {
        let duplicate = kept
            .iter()
            .any(|k| k.name == prop.name && k.ty == prop.ty);
        if !duplicate {
            kept.push(prop);
        }
    }
    Ok(kept)
}

fn collect(
    contracts: &ContractSet,
    def: &TypeDef,
    visited: &mut HashSet<String>,
    out: &mut Vec<PropertyDef>,
) -> Result<()> {
    if !visited.insert(def.full_name()) {
        return Ok(());
    }
    out.extend(def.properties.iter().cloned());
    for ext in def.extends() {
        if let Some(effective) = resolve_effective(contracts, ext)? {
            collect(contracts, &effective.def, visited, out)?;
        }
    }
    Ok(())
}
