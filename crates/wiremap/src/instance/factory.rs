// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Instance materialization.
//!
//! Interfaces and abstract classes are materialized through their mapped
//! concrete type; a missing mapping is the caller's error. Concrete types
//! with a recorded parameterless constructor get their declared defaults
//! applied; everything else is allocated zero-initialized, the escape
//! hatch for types that cannot be normally constructed but must still be
//! materialized for deserialization.

use crate::contract::{ContractSet, SimpleKind, TypeDef, TypeRef};
use crate::error::{MapperError, Result};
use crate::instance::{Decimal, MessageInstance, MessageValue};
use crate::mapper::registry::{CtorKind, TypeRegistry};
use crate::mapper::walker::resolve_effective;
use crate::naming::{friendly_name, NameCache, PROXY_SUFFIX};
use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use uuid::Uuid;

/// Creates instances against an initialized registry.
pub struct InstanceFactory<'a> {
    contracts: &'a ContractSet,
    registry: &'a TypeRegistry,
    names: &'a NameCache,
}

impl<'a> InstanceFactory<'a> {
    pub fn new(
        contracts: &'a ContractSet,
        registry: &'a TypeRegistry,
        names: &'a NameCache,
    ) -> Self {
        Self {
            contracts,
            registry,
            names,
        }
    }

    /// Create an instance of the requested type.
    pub fn create(&self, ty: &TypeRef) -> Result<MessageInstance> {
        match ty {
            TypeRef::Simple(kind) => Ok(MessageInstance::new(
                friendly_name(ty),
                None,
                zero_simple(kind),
            )),
            TypeRef::Param(name) => Err(MapperError::UnboundParameter { name: name.clone() }),
            TypeRef::Sequence(_) => Ok(MessageInstance::new(
                friendly_name(ty),
                None,
                MessageValue::Sequence(Vec::new()),
            )),
            TypeRef::Map(_, _) => Ok(MessageInstance::new(
                friendly_name(ty),
                None,
                MessageValue::Map(Vec::new()),
            )),
            TypeRef::Pair(key, value) => {
                let name = self
                    .names
                    .canonical(ty)
                    .unwrap_or_else(|| friendly_name(ty));
                Ok(MessageInstance::new(
                    name,
                    None,
                    MessageValue::Pair(
                        Box::new(zero_value(key)),
                        Box::new(zero_value(value)),
                    ),
                ))
            }
            TypeRef::Named(_) | TypeRef::Instance { .. } => self.create_nominal(ty),
        }
    }

    fn create_nominal(&self, ty: &TypeRef) -> Result<MessageInstance> {
        let Some(canonical) = self.names.canonical(ty) else {
            return Err(MapperError::NoMappingFound {
                type_name: friendly_name(ty),
            });
        };

        // A request by the synthesized concrete type itself.
        if canonical.ends_with(PROXY_SUFFIX) {
            let stripped = crate::naming::strip_proxy_suffix(&canonical);
            if let Some(concrete) = self.registry.resolve_concrete(stripped) {
                if concrete.full_name() == canonical {
                    return Ok(self.materialize(concrete));
                }
            }
        }

        let Some(effective) = resolve_effective(self.contracts, ty)? else {
            // Open generic definitions never resolve to anything creatable.
            return Err(MapperError::NoMappingFound {
                type_name: canonical,
            });
        };

        if effective.def.is_interface() || effective.def.is_abstract() {
            let concrete = self
                .registry
                .resolve_concrete(&effective.canonical)
                .ok_or(MapperError::NoMappingFound {
                    type_name: effective.canonical.clone(),
                })?;
            return Ok(self.materialize(concrete));
        }

        Ok(self.materialize(&effective.def))
    }

    /// Build a struct-shaped instance of a concrete definition. Every
    /// accessor gets its language-zero value; a recorded parameterless
    /// constructor additionally applies declared default literals. The
    /// uninitialized path never runs defaults.
    fn materialize(&self, def: &Arc<TypeDef>) -> MessageInstance {
        let canonical = def.full_name();
        let run_ctor = matches!(
            self.registry.ctor_kind(&canonical),
            Some(CtorKind::Parameterless)
        );

        let mut slots = HashMap::new();
        for prop in &def.properties {
            let mut value = zero_value(&prop.ty);
            if run_ctor {
                if let Some(literal) = &prop.default {
                    if let Some(parsed) = parse_default(literal, &prop.ty) {
                        value = parsed;
                    }
                }
            }
            slots.insert(prop.name.clone(), value);
        }
        for field in def.public_fields() {
            slots
                .entry(field.name.clone())
                .or_insert_with(|| zero_value(&field.ty));
        }

        MessageInstance::new(canonical, Some(def.clone()), MessageValue::Struct(slots))
    }
}

/// Language-zero value for a slot of the given type. Reference and
/// collection slots stay null; nothing is partially initialized.
pub(crate) fn zero_value(ty: &TypeRef) -> MessageValue {
    match ty {
        TypeRef::Simple(kind) => zero_simple(kind),
        TypeRef::Pair(key, value) => MessageValue::Pair(
            Box::new(zero_value(key)),
            Box::new(zero_value(value)),
        ),
        TypeRef::Named(_)
        | TypeRef::Instance { .. }
        | TypeRef::Param(_)
        | TypeRef::Sequence(_)
        | TypeRef::Map(_, _) => MessageValue::Null,
    }
}

fn zero_simple(kind: &SimpleKind) -> MessageValue {
    match kind {
        SimpleKind::Bool => MessageValue::Bool(false),
        SimpleKind::U8 => MessageValue::U8(0),
        SimpleKind::U16 => MessageValue::U16(0),
        SimpleKind::U32 => MessageValue::U32(0),
        SimpleKind::U64 => MessageValue::U64(0),
        SimpleKind::I8 => MessageValue::I8(0),
        SimpleKind::I16 => MessageValue::I16(0),
        SimpleKind::I32 => MessageValue::I32(0),
        SimpleKind::I64 => MessageValue::I64(0),
        SimpleKind::F32 => MessageValue::F32(0.0),
        SimpleKind::F64 => MessageValue::F64(0.0),
        SimpleKind::Decimal => MessageValue::Decimal(Decimal::zero()),
        SimpleKind::String => MessageValue::String(String::new()),
        SimpleKind::Uuid => MessageValue::Uuid(Uuid::nil()),
        SimpleKind::Timestamp => MessageValue::Timestamp(DateTime::UNIX_EPOCH),
        SimpleKind::Duration => MessageValue::Duration(Duration::zero()),
        SimpleKind::Enum(def) => match def.variant_by_value(0).or_else(|| def.variants.first()) {
            Some(v) => MessageValue::Enum(v.value, v.name.clone()),
            None => MessageValue::Enum(0, String::new()),
        },
    }
}

/// Parse a declared default literal for a simple slot. Unparseable or
/// non-simple defaults are ignored in favor of the zero value.
fn parse_default(literal: &str, ty: &TypeRef) -> Option<MessageValue> {
    let TypeRef::Simple(kind) = ty else {
        return None;
    };
    match kind {
        SimpleKind::Bool => literal.parse().ok().map(MessageValue::Bool),
        SimpleKind::U8 => literal.parse().ok().map(MessageValue::U8),
        SimpleKind::U16 => literal.parse().ok().map(MessageValue::U16),
        SimpleKind::U32 => literal.parse().ok().map(MessageValue::U32),
        SimpleKind::U64 => literal.parse().ok().map(MessageValue::U64),
        SimpleKind::I8 => literal.parse().ok().map(MessageValue::I8),
        SimpleKind::I16 => literal.parse().ok().map(MessageValue::I16),
        SimpleKind::I32 => literal.parse().ok().map(MessageValue::I32),
        SimpleKind::I64 => literal.parse().ok().map(MessageValue::I64),
        SimpleKind::F32 => literal.parse().ok().map(MessageValue::F32),
        SimpleKind::F64 => literal.parse().ok().map(MessageValue::F64),
        SimpleKind::Decimal => literal.parse().ok().map(MessageValue::Decimal),
        SimpleKind::String => Some(MessageValue::String(literal.to_string())),
        SimpleKind::Uuid => literal.parse().ok().map(MessageValue::Uuid),
        SimpleKind::Timestamp => DateTime::parse_from_rfc3339(literal)
            .ok()
            .map(|dt| MessageValue::Timestamp(dt.with_timezone(&Utc))),
        SimpleKind::Duration => literal
            .parse()
            .ok()
            .map(|secs: i64| MessageValue::Duration(Duration::seconds(secs))),
        SimpleKind::Enum(def) => def
            .variants
            .iter()
            .find(|v| v.name == literal)
            .or_else(|| literal.parse().ok().and_then(|n| def.variant_by_value(n)))
            .map(|v| MessageValue::Enum(v.value, v.name.clone())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contract::{EnumDef, EnumVariant};

    #[test]
    fn test_zero_values() {
        assert_eq!(
            zero_value(&TypeRef::Simple(SimpleKind::I32)),
            MessageValue::I32(0)
        );
        assert_eq!(
            zero_value(&TypeRef::Simple(SimpleKind::Uuid)),
            MessageValue::Uuid(Uuid::nil())
        );
        assert_eq!(zero_value(&TypeRef::named("shop.IBar")), MessageValue::Null);
        assert_eq!(
            zero_value(&TypeRef::sequence(TypeRef::Simple(SimpleKind::U8))),
            MessageValue::Null
        );
    }

    #[test]
    fn test_parse_defaults() {
        assert_eq!(
            parse_default("42", &TypeRef::Simple(SimpleKind::I32)),
            Some(MessageValue::I32(42))
        );
        assert_eq!(
            parse_default("19.99", &TypeRef::Simple(SimpleKind::Decimal)),
            Some(MessageValue::Decimal(Decimal::new(1999, 2)))
        );
        assert_eq!(
            parse_default("not-a-number", &TypeRef::Simple(SimpleKind::I32)),
            None
        );
        let status = Arc::new(
            EnumDef::new("shop", "Status")
                .with_variants(vec![EnumVariant::new("Open", 0), EnumVariant::new("Done", 1)]),
        );
        assert_eq!(
            parse_default("Done", &TypeRef::Simple(SimpleKind::Enum(status.clone()))),
            Some(MessageValue::Enum(1, "Done".into()))
        );
        assert_eq!(
            parse_default("1", &TypeRef::Simple(SimpleKind::Enum(status))),
            Some(MessageValue::Enum(1, "Done".into()))
        );
    }
}
