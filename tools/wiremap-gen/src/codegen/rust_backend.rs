// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com
//
// Rust source backend
//
// Maps contract references to Rust types and builds the template context
// for each synthesized proxy: one trait per interface, one sealed struct
// per proxy, explicit Default impls so every proxy is default-constructible
// even when a field type (e.g. a timestamp) has no derive-able default.

use serde::Serialize;
use std::sync::Arc;
use wiremap::contract::{
    Annotation, AnnotationValue, ContractSet, EnumDef, SimpleKind, TypeDef, TypeRef,
};
use wiremap::naming::{canonical_name, PROXY_SUFFIX};

/// Template context for one synthesized proxy.
#[derive(Debug, Clone, Serialize)]
pub struct ProxySpec {
    pub interface: String,
    pub trait_name: String,
    pub struct_name: String,
    pub properties: Vec<PropertySpec>,
}

/// Template context for one accessor pair.
#[derive(Debug, Clone, Serialize)]
pub struct PropertySpec {
    pub name: String,
    pub rust_name: String,
    pub field_name: String,
    pub rust_type: String,
    pub default_expr: String,
    pub hints: Vec<String>,
}

/// Template context for one contract enum.
#[derive(Debug, Clone, Serialize)]
pub struct EnumSpec {
    pub name: String,
    pub variants: Vec<EnumVariantSpec>,
}

#[derive(Debug, Clone, Serialize)]
pub struct EnumVariantSpec {
    pub name: String,
    pub value: i64,
}

/// Build the proxy spec for one interface mapping.
pub fn proxy_spec(
    contracts: &ContractSet,
    interface_canonical: &str,
    concrete: &TypeDef,
) -> ProxySpec {
    let trait_name = short_name(interface_canonical).to_string();
    let struct_name = short_name(&concrete.full_name()).to_string();
    let properties = concrete
        .properties
        .iter()
        .map(|prop| {
            let rust_name = to_snake_case(&prop.name);
            PropertySpec {
                name: prop.name.clone(),
                field_name: format!("field_{rust_name}"),
                rust_name,
                rust_type: rust_type(contracts, &prop.ty),
                default_expr: default_expr(&prop.ty),
                hints: prop.annotations.iter().map(render_hint).collect(),
            }
        })
        .collect();
    ProxySpec {
        interface: interface_canonical.to_string(),
        trait_name,
        struct_name,
        properties,
    }
}

/// Build the enum spec for one contract enum.
pub fn enum_spec(def: &Arc<EnumDef>) -> EnumSpec {
    EnumSpec {
        name: def.name.clone(),
        variants: def
            .variants
            .iter()
            .map(|v| EnumVariantSpec {
                name: v.name.clone(),
                value: v.value,
            })
            .collect(),
    }
}

/// The Rust type a contract reference maps to in emitted source.
pub fn rust_type(contracts: &ContractSet, ty: &TypeRef) -> String {
    match ty {
        TypeRef::Simple(kind) => simple_rust_type(kind),
        TypeRef::Named(full) => nominal_rust_type(contracts, full, full),
        TypeRef::Instance { definition, .. } => {
            let canonical = canonical_name(ty).unwrap_or_else(|| definition.clone());
            nominal_rust_type(contracts, definition, &canonical)
        }
        TypeRef::Param(name) => name.clone(),
        TypeRef::Sequence(elem) => format!("Vec<{}>", rust_type(contracts, elem)),
        TypeRef::Map(key, value) => format!(
            "Vec<({}, {})>",
            rust_type(contracts, key),
            rust_type(contracts, value)
        ),
        TypeRef::Pair(key, value) => format!(
            "({}, {})",
            rust_type(contracts, key),
            rust_type(contracts, value)
        ),
    }
}

/// Interface-typed positions hold the backing type; class-typed positions
/// hold the host-supplied class type.
fn nominal_rust_type(contracts: &ContractSet, definition: &str, canonical: &str) -> String {
    let short = short_name(canonical);
    match contracts.get(definition) {
        Some(def) if def.is_interface() => format!("{short}{PROXY_SUFFIX}"),
        _ => short.to_string(),
    }
}

fn simple_rust_type(kind: &SimpleKind) -> String {
    match kind {
        SimpleKind::Bool => "bool".into(),
        SimpleKind::U8 => "u8".into(),
        SimpleKind::U16 => "u16".into(),
        SimpleKind::U32 => "u32".into(),
        SimpleKind::U64 => "u64".into(),
        SimpleKind::I8 => "i8".into(),
        SimpleKind::I16 => "i16".into(),
        SimpleKind::I32 => "i32".into(),
        SimpleKind::I64 => "i64".into(),
        SimpleKind::F32 => "f32".into(),
        SimpleKind::F64 => "f64".into(),
        SimpleKind::Decimal => "wiremap::instance::Decimal".into(),
        SimpleKind::String => "String".into(),
        SimpleKind::Uuid => "uuid::Uuid".into(),
        SimpleKind::Timestamp => "chrono::DateTime<chrono::Utc>".into(),
        SimpleKind::Duration => "chrono::Duration".into(),
        SimpleKind::Enum(def) => def.name.clone(),
    }
}

/// Expression yielding the zero value for a field in emitted Default impls.
pub fn default_expr(ty: &TypeRef) -> String {
    match ty {
        TypeRef::Simple(SimpleKind::Timestamp) => "chrono::DateTime::UNIX_EPOCH".into(),
        TypeRef::Simple(SimpleKind::Duration) => "chrono::Duration::zero()".into(),
        TypeRef::Pair(key, value) => {
            format!("({}, {})", default_expr(key), default_expr(value))
        }
        _ => "Default::default()".into(),
    }
}

/// Render an annotation as a serialization-hint string, e.g.
/// `rename(to = "OrderId")`.
pub fn render_hint(ann: &Annotation) -> String {
    if ann.values.is_empty() {
        return ann.name.clone();
    }
    let params: Vec<String> = ann
        .values
        .iter()
        .map(|(key, value)| match value {
            AnnotationValue::Bool(b) => format!("{key} = {b}"),
            AnnotationValue::Int(i) => format!("{key} = {i}"),
            AnnotationValue::Text(s) => format!("{key} = \"{s}\""),
        })
        .collect();
    format!("{}({})", ann.name, params.join(", "))
}

fn short_name(full: &str) -> &str {
    full.rsplit('.').next().unwrap_or(full)
}

/// Contract property names are case-preserving; emitted Rust uses
/// snake_case accessors.
pub fn to_snake_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    let mut prev_lower = false;
    for c in name.chars() {
        if c.is_uppercase() {
            if prev_lower {
                out.push('_');
            }
            out.extend(c.to_lowercase());
            prev_lower = false;
        } else {
            prev_lower = c.is_lowercase() || c.is_ascii_digit();
            out.push(c);
        }
    }
    out
}
