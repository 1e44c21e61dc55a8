// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Closed type classification for contract references.

use std::sync::Arc;

/// Directly serializable kinds. Discovery treats these as terminal: no
/// synthesis is attempted and no recursion is performed.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SimpleKind {
    Bool,
    U8,
    U16,
    U32,
    U64,
    I8,
    I16,
    I32,
    I64,
    F32,
    F64,
    Decimal,
    String,
    Uuid,
    Timestamp,
    Duration,
    Enum(Arc<EnumDef>),
}

impl SimpleKind {
    /// Name used when this kind appears inside a flattened generic name.
    pub fn friendly_name(&self) -> &str {
        match self {
            Self::Bool => "Bool",
            Self::U8 => "U8",
            Self::U16 => "U16",
            Self::U32 => "U32",
            Self::U64 => "U64",
            Self::I8 => "I8",
            Self::I16 => "I16",
            Self::I32 => "I32",
            Self::I64 => "I64",
            Self::F32 => "F32",
            Self::F64 => "F64",
            Self::Decimal => "Decimal",
            Self::String => "String",
            Self::Uuid => "Uuid",
            Self::Timestamp => "Timestamp",
            Self::Duration => "Duration",
            Self::Enum(def) => &def.name,
        }
    }
}

/// Enumeration contract. Enumerations are simple types: they carry their
/// own closed value set and need no synthesized backing type.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EnumDef {
    /// Unqualified name.
    pub name: String,
    /// Declaring namespace.
    pub namespace: String,
    /// Variants in declaration order.
    pub variants: Vec<EnumVariant>,
}

impl EnumDef {
    pub fn new(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            namespace: namespace.into(),
            variants: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_variants(mut self, variants: Vec<EnumVariant>) -> Self {
        self.variants = variants;
        self
    }

    pub fn full_name(&self) -> String {
        if self.namespace.is_empty() {
            self.name.clone()
        } else {
            format!("{}.{}", self.namespace, self.name)
        }
    }

    /// Get variant by numeric value.
    pub fn variant_by_value(&self, value: i64) -> Option<&EnumVariant> {
        self.variants.iter().find(|v| v.value == value)
    }
}

/// Enum variant.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EnumVariant {
    pub name: String,
    pub value: i64,
}

impl EnumVariant {
    pub fn new(name: impl Into<String>, value: i64) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }
}

/// A reference to a type as it appears in a property or field declaration.
///
/// This is the closed classification the mapper consults everywhere instead
/// of re-deriving "is this an interface / a collection / simple" per call.
/// Nominal types are referenced by full name and resolved through the
/// [`ContractSet`](crate::contract::ContractSet); late binding by name is
/// what lets self-referential and mutually-referential contracts exist
/// without reference cycles.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeRef {
    /// Terminal, directly serializable value.
    Simple(SimpleKind),
    /// Interface or class contract, by full name.
    Named(String),
    /// Unbound type parameter inside a generic definition.
    Param(String),
    /// Bound construction of a named generic definition.
    Instance {
        definition: String,
        args: Vec<TypeRef>,
    },
    /// Variable-length collection. The collection itself is never
    /// registered; only its element participates in discovery.
    Sequence(Box<TypeRef>),
    /// Dictionary-shaped collection of key/value pairs.
    Map(Box<TypeRef>, Box<TypeRef>),
    /// The two-argument key/value construct itself. Unlike `Map`, this is a
    /// constructible value type and is registered under a qualified
    /// friendly name.
    Pair(Box<TypeRef>, Box<TypeRef>),
}

impl TypeRef {
    /// Shorthand for a named contract reference.
    pub fn named(full_name: impl Into<String>) -> Self {
        Self::Named(full_name.into())
    }

    /// Shorthand for a sequence of the given element type.
    pub fn sequence(element: TypeRef) -> Self {
        Self::Sequence(Box::new(element))
    }

    /// Shorthand for a map from `key` to `value`.
    pub fn map(key: TypeRef, value: TypeRef) -> Self {
        Self::Map(Box::new(key), Box::new(value))
    }

    /// Shorthand for a key/value pair.
    pub fn pair(key: TypeRef, value: TypeRef) -> Self {
        Self::Pair(Box::new(key), Box::new(value))
    }

    /// Shorthand for a bound generic construction.
    pub fn instance(definition: impl Into<String>, args: Vec<TypeRef>) -> Self {
        Self::Instance {
            definition: definition.into(),
            args,
        }
    }

    pub fn is_simple(&self) -> bool {
        matches!(self, Self::Simple(_))
    }

    /// Collections are walked through, never registered.
    pub fn is_collection(&self) -> bool {
        matches!(self, Self::Sequence(_) | Self::Map(_, _))
    }

    /// True if any unbound parameter occurs anywhere in this reference.
    pub fn has_unbound_params(&self) -> bool {
        match self {
            Self::Param(_) => true,
            Self::Simple(_) | Self::Named(_) => false,
            Self::Instance { args, .. } => args.iter().any(TypeRef::has_unbound_params),
            Self::Sequence(e) => e.has_unbound_params(),
            Self::Map(k, v) | Self::Pair(k, v) => {
                k.has_unbound_params() || v.has_unbound_params()
            }
        }
    }

    /// Substitute unbound parameters using `bindings` (parameter name →
    /// argument), recursively. References without parameters are cloned
    /// unchanged.
    pub fn bind(&self, bindings: &[(String, TypeRef)]) -> TypeRef {
        match self {
            Self::Param(name) => bindings
                .iter()
                .find(|(p, _)| p == name)
                .map(|(_, arg)| arg.clone())
                .unwrap_or_else(|| self.clone()),
            Self::Simple(_) | Self::Named(_) => self.clone(),
            Self::Instance { definition, args } => Self::Instance {
                definition: definition.clone(),
                args: args.iter().map(|a| a.bind(bindings)).collect(),
            },
            Self::Sequence(e) => Self::Sequence(Box::new(e.bind(bindings))),
            Self::Map(k, v) => Self::Map(Box::new(k.bind(bindings)), Box::new(v.bind(bindings))),
            Self::Pair(k, v) => Self::Pair(Box::new(k.bind(bindings)), Box::new(v.bind(bindings))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classification() {
        assert!(TypeRef::Simple(SimpleKind::U32).is_simple());
        assert!(TypeRef::sequence(TypeRef::named("a.B")).is_collection());
        assert!(TypeRef::map(
            TypeRef::Simple(SimpleKind::String),
            TypeRef::named("a.B")
        )
        .is_collection());
        assert!(!TypeRef::pair(
            TypeRef::Simple(SimpleKind::String),
            TypeRef::named("a.B")
        )
        .is_collection());
    }

    #[test]
    fn test_bind_substitutes_nested_params() {
        let bindings = vec![("T".to_string(), TypeRef::named("shop.IBar"))];
        let ty = TypeRef::sequence(TypeRef::Param("T".into()));
        assert_eq!(
            ty.bind(&bindings),
            TypeRef::sequence(TypeRef::named("shop.IBar"))
        );

        let unbound = TypeRef::Param("U".into());
        assert_eq!(unbound.bind(&bindings), unbound);
        assert!(unbound.has_unbound_params());
    }

    #[test]
    fn test_enum_lookup() {
        let def = EnumDef::new("shop", "Status")
            .with_variants(vec![EnumVariant::new("Open", 0), EnumVariant::new("Done", 1)]);
        assert_eq!(def.full_name(), "shop.Status");
        assert_eq!(def.variant_by_value(1).map(|v| v.name.as_str()), Some("Done"));
        assert!(def.variant_by_value(7).is_none());
    }
}
