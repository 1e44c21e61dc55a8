// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com
//
// Mapping manifest
//
// JSON summary of the initialized registry: the interface<->concrete table
// and the canonical-name map the host serializer uses for wire tags.

use serde::Serialize;
use std::collections::BTreeMap;
use wiremap::contract::TypeRef;
use wiremap::MessageMapper;

#[derive(Debug, Serialize)]
pub struct MappingManifest {
    pub generated_at: String,
    pub source: String,
    pub mappings: Vec<MappingEntry>,
    /// Canonical name -> what it refers to.
    pub names: BTreeMap<String, String>,
    /// Interfaces skipped during initialization (method-bearing).
    pub unmapped: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct MappingEntry {
    pub interface: String,
    pub concrete: String,
    pub properties: Vec<ManifestProperty>,
}

#[derive(Debug, Serialize)]
pub struct ManifestProperty {
    pub name: String,
    pub hints: Vec<String>,
}

/// Build the manifest from an initialized mapper.
pub fn build(mapper: &MessageMapper, source: &str, generated_at: String) -> MappingManifest {
    let mut mappings: Vec<MappingEntry> = mapper
        .registry()
        .mappings()
        .map(|(interface, concrete)| MappingEntry {
            interface: interface.to_string(),
            concrete: concrete.full_name(),
            properties: concrete
                .properties
                .iter()
                .map(|p| ManifestProperty {
                    name: p.name.clone(),
                    hints: p
                        .annotations
                        .iter()
                        .map(super::rust_backend::render_hint)
                        .collect(),
                })
                .collect(),
        })
        .collect();
    mappings.sort_by(|a, b| a.interface.cmp(&b.interface));

    let names = mapper
        .registry()
        .names()
        .map(|(name, ty)| (name.to_string(), kind_tag(ty).to_string()))
        .collect();

    MappingManifest {
        generated_at,
        source: source.to_string(),
        mappings,
        names,
        unmapped: mapper.unmapped_interfaces().map(str::to_string).collect(),
    }
}

fn kind_tag(ty: &TypeRef) -> &'static str {
    match ty {
        TypeRef::Named(_) => "contract",
        TypeRef::Instance { .. } => "generic-instance",
        TypeRef::Pair(_, _) => "pair",
        TypeRef::Simple(_) => "simple",
        TypeRef::Sequence(_) => "sequence",
        TypeRef::Map(_, _) => "map",
        TypeRef::Param(_) => "param",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremap::contract::{ContractSet, InterfaceBuilder, SimpleKind};

    #[test]
    fn test_manifest_content() {
        let mut set = ContractSet::new();
        set.add(
            InterfaceBuilder::new("shop", "IOrder")
                .property("id", TypeRef::Simple(SimpleKind::Uuid))
                .build(),
        );
        let mut mapper = MessageMapper::new(set);
        mapper
            .initialize(vec![TypeRef::named("shop.IOrder")])
            .expect("initialize");

        let manifest = build(&mapper, "orders.yaml", "2026-01-01T00:00:00Z".into());
        assert_eq!(manifest.mappings.len(), 1);
        assert_eq!(manifest.mappings[0].interface, "shop.IOrder");
        assert_eq!(manifest.mappings[0].concrete, "shop.IOrder__impl");
        assert_eq!(manifest.names.get("shop.IOrder"), Some(&"contract".to_string()));
        assert!(manifest.unmapped.is_empty());

        let json = serde_json::to_string_pretty(&manifest).expect("serialize");
        assert!(json.contains("shop.IOrder__impl"));
    }
}
