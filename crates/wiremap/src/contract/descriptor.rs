// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Contract descriptors: the structural description of message types.

use crate::contract::annotation::Annotation;
use crate::contract::TypeRef;
use std::collections::HashMap;
use std::sync::Arc;

/// External visibility of a contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    Public,
    Crate,
}

/// What a nominal contract is.
#[derive(Debug, Clone, PartialEq)]
pub enum ContractKind {
    /// A property-only (or method-bearing, in which case unmappable)
    /// message contract.
    Interface {
        /// Extended interfaces; each ref is `Named` or a bound `Instance`.
        extends: Vec<TypeRef>,
        /// Names of declared non-accessor members. Non-empty means the
        /// interface cannot be mapped.
        methods: Vec<String>,
    },
    /// A concrete (or abstract) class contract.
    Class {
        /// Implemented interfaces.
        implements: Vec<TypeRef>,
        /// Whether a parameterless constructor is available.
        has_default_ctor: bool,
        sealed: bool,
        is_abstract: bool,
    },
}

/// A property declaration: name, declared type, annotation set, optional
/// default literal applied by the parameterless constructor.
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyDef {
    pub name: String,
    pub ty: TypeRef,
    pub annotations: Vec<Annotation>,
    pub default: Option<String>,
}

impl PropertyDef {
    pub fn new(name: impl Into<String>, ty: TypeRef) -> Self {
        Self {
            name: name.into(),
            ty,
            annotations: Vec::new(),
            default: None,
        }
    }

    #[must_use]
    pub fn with_annotations(mut self, annotations: Vec<Annotation>) -> Self {
        self.annotations = annotations;
        self
    }

    #[must_use]
    pub fn with_default(mut self, literal: impl Into<String>) -> Self {
        self.default = Some(literal.into());
        self
    }
}

/// An instance field declaration. Discovery only follows public fields;
/// synthesized backing fields are private and therefore invisible to it.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDef {
    pub name: String,
    pub ty: TypeRef,
    pub visibility: Visibility,
}

impl FieldDef {
    pub fn public(name: impl Into<String>, ty: TypeRef) -> Self {
        Self {
            name: name.into(),
            ty,
            visibility: Visibility::Public,
        }
    }

    pub fn private(name: impl Into<String>, ty: TypeRef) -> Self {
        Self {
            name: name.into(),
            ty,
            visibility: Visibility::Crate,
        }
    }
}

/// A nominal contract: interface or class, possibly a generic definition.
/// Immutable once computed.
#[derive(Debug, Clone, PartialEq)]
pub struct TypeDef {
    /// Unqualified name.
    pub name: String,
    /// Declaring namespace; empty for the global namespace.
    pub namespace: String,
    pub visibility: Visibility,
    /// Unbound parameter names. Non-empty means this is an open generic
    /// definition: it is skipped by discovery and never resolves.
    pub generic_params: Vec<String>,
    pub kind: ContractKind,
    pub properties: Vec<PropertyDef>,
    pub fields: Vec<FieldDef>,
}

impl TypeDef {
    pub fn full_name(&self) -> String {
        if self.namespace.is_empty() {
            self.name.clone()
        } else {
            format!("{}.{}", self.namespace, self.name)
        }
    }

    pub fn is_interface(&self) -> bool {
        matches!(self.kind, ContractKind::Interface { .. })
    }

    pub fn is_class(&self) -> bool {
        matches!(self.kind, ContractKind::Class { .. })
    }

    pub fn is_generic_definition(&self) -> bool {
        !self.generic_params.is_empty()
    }

    pub fn is_abstract(&self) -> bool {
        matches!(
            self.kind,
            ContractKind::Class {
                is_abstract: true,
                ..
            }
        )
    }

    pub fn has_default_ctor(&self) -> bool {
        matches!(
            self.kind,
            ContractKind::Class {
                has_default_ctor: true,
                ..
            }
        )
    }

    /// Extended interfaces (empty for classes).
    pub fn extends(&self) -> &[TypeRef] {
        match &self.kind {
            ContractKind::Interface { extends, .. } => extends,
            ContractKind::Class { .. } => &[],
        }
    }

    /// True if the interface declares members other than property accessors.
    pub fn has_methods(&self) -> bool {
        match &self.kind {
            ContractKind::Interface { methods, .. } => !methods.is_empty(),
            ContractKind::Class { .. } => false,
        }
    }

    pub fn property(&self, name: &str) -> Option<&PropertyDef> {
        self.properties.iter().find(|p| p.name == name)
    }

    /// Declared type of a named accessor: a property, or a public field.
    pub fn member_type(&self, name: &str) -> Option<&TypeRef> {
        self.property(name).map(|p| &p.ty).or_else(|| {
            self.fields
                .iter()
                .find(|f| f.name == name && f.visibility == Visibility::Public)
                .map(|f| &f.ty)
        })
    }

    /// Public instance fields, in declaration order.
    pub fn public_fields(&self) -> impl Iterator<Item = &FieldDef> {
        self.fields
            .iter()
            .filter(|f| f.visibility == Visibility::Public)
    }

    /// Produce a copy of this generic definition with its parameters bound
    /// to `args`, renamed to `name` in namespace `namespace`. Property and
    /// field types have parameters substituted; `generic_params` is cleared.
    pub(crate) fn bound(&self, name: String, namespace: String, args: &[TypeRef]) -> TypeDef {
        let bindings: Vec<(String, TypeRef)> = self
            .generic_params
            .iter()
            .cloned()
            .zip(args.iter().cloned())
            .collect();
        let kind = match &self.kind {
            ContractKind::Interface { extends, methods } => ContractKind::Interface {
                extends: extends.iter().map(|e| e.bind(&bindings)).collect(),
                methods: methods.clone(),
            },
            ContractKind::Class {
                implements,
                has_default_ctor,
                sealed,
                is_abstract,
            } => ContractKind::Class {
                implements: implements.iter().map(|i| i.bind(&bindings)).collect(),
                has_default_ctor: *has_default_ctor,
                sealed: *sealed,
                is_abstract: *is_abstract,
            },
        };
        TypeDef {
            name,
            namespace,
            visibility: self.visibility,
            generic_params: Vec::new(),
            kind,
            properties: self
                .properties
                .iter()
                .map(|p| PropertyDef {
                    name: p.name.clone(),
                    ty: p.ty.bind(&bindings),
                    annotations: p.annotations.clone(),
                    default: p.default.clone(),
                })
                .collect(),
            fields: self
                .fields
                .iter()
                .map(|f| FieldDef {
                    name: f.name.clone(),
                    ty: f.ty.bind(&bindings),
                    visibility: f.visibility,
                })
                .collect(),
        }
    }
}

/// The closed, caller-owned universe of contracts, keyed by full name.
/// Built once before initialization and read-only thereafter.
#[derive(Debug, Default)]
pub struct ContractSet {
    types: HashMap<String, Arc<TypeDef>>,
}

impl ContractSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a contract. The last definition for a full name wins; contract
    /// sets are assembled once by the host, so collisions indicate a
    /// misconfigured universe rather than a runtime race.
    pub fn add(&mut self, def: TypeDef) -> Arc<TypeDef> {
        let arc = Arc::new(def);
        self.types.insert(arc.full_name(), arc.clone());
        arc
    }

    pub fn get(&self, full_name: &str) -> Option<&Arc<TypeDef>> {
        self.types.get(full_name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.types.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Arc<TypeDef>)> {
        self.types.iter().map(|(k, v)| (k.as_str(), v))
    }
}
