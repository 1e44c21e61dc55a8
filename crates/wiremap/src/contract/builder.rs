// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Fluent builders for contract descriptors.

use crate::contract::{
    Annotation, ContractKind, FieldDef, PropertyDef, TypeDef, TypeRef, Visibility,
};

/// Builder for interface contracts.
#[derive(Debug)]
pub struct InterfaceBuilder {
    name: String,
    namespace: String,
    visibility: Visibility,
    generic_params: Vec<String>,
    extends: Vec<TypeRef>,
    methods: Vec<String>,
    properties: Vec<PropertyDef>,
}

impl InterfaceBuilder {
    pub fn new(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            namespace: namespace.into(),
            visibility: Visibility::Public,
            generic_params: Vec::new(),
            extends: Vec::new(),
            methods: Vec::new(),
            properties: Vec::new(),
        }
    }

    /// Mark the interface as crate-visible only. Such interfaces cannot be
    /// proxied and fail initialization.
    #[must_use]
    pub fn crate_visible(mut self) -> Self {
        self.visibility = Visibility::Crate;
        self
    }

    #[must_use]
    pub fn generic_param(mut self, name: impl Into<String>) -> Self {
        self.generic_params.push(name.into());
        self
    }

    /// Extend another interface by full name.
    #[must_use]
    pub fn extends(mut self, full_name: impl Into<String>) -> Self {
        self.extends.push(TypeRef::named(full_name));
        self
    }

    /// Extend an interface given as a reference (e.g. a bound generic).
    #[must_use]
    pub fn extends_ref(mut self, ty: TypeRef) -> Self {
        self.extends.push(ty);
        self
    }

    /// Declare a non-accessor member. Any method makes the interface
    /// unmappable.
    #[must_use]
    pub fn method(mut self, name: impl Into<String>) -> Self {
        self.methods.push(name.into());
        self
    }

    #[must_use]
    pub fn property(mut self, name: impl Into<String>, ty: TypeRef) -> Self {
        self.properties.push(PropertyDef::new(name, ty));
        self
    }

    #[must_use]
    pub fn annotated_property(
        mut self,
        name: impl Into<String>,
        ty: TypeRef,
        annotations: Vec<Annotation>,
    ) -> Self {
        self.properties
            .push(PropertyDef::new(name, ty).with_annotations(annotations));
        self
    }

    #[must_use]
    pub fn property_with_default(
        mut self,
        name: impl Into<String>,
        ty: TypeRef,
        literal: impl Into<String>,
    ) -> Self {
        self.properties
            .push(PropertyDef::new(name, ty).with_default(literal));
        self
    }

    /// Add a fully built property declaration.
    #[must_use]
    pub fn property_def(mut self, def: PropertyDef) -> Self {
        self.properties.push(def);
        self
    }

    pub fn build(self) -> TypeDef {
        TypeDef {
            name: self.name,
            namespace: self.namespace,
            visibility: self.visibility,
            generic_params: self.generic_params,
            kind: ContractKind::Interface {
                extends: self.extends,
                methods: self.methods,
            },
            properties: self.properties,
            fields: Vec::new(),
        }
    }
}

/// Builder for class contracts.
#[derive(Debug)]
pub struct ClassBuilder {
    name: String,
    namespace: String,
    visibility: Visibility,
    generic_params: Vec<String>,
    implements: Vec<TypeRef>,
    has_default_ctor: bool,
    sealed: bool,
    is_abstract: bool,
    properties: Vec<PropertyDef>,
    fields: Vec<FieldDef>,
}

impl ClassBuilder {
    pub fn new(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            namespace: namespace.into(),
            visibility: Visibility::Public,
            generic_params: Vec::new(),
            implements: Vec::new(),
            has_default_ctor: true,
            sealed: false,
            is_abstract: false,
            properties: Vec::new(),
            fields: Vec::new(),
        }
    }

    #[must_use]
    pub fn crate_visible(mut self) -> Self {
        self.visibility = Visibility::Crate;
        self
    }

    #[must_use]
    pub fn implements(mut self, full_name: impl Into<String>) -> Self {
        self.implements.push(TypeRef::named(full_name));
        self
    }

    /// Declare that no parameterless constructor exists. Instances of such
    /// classes are materialized uninitialized.
    #[must_use]
    pub fn no_default_ctor(mut self) -> Self {
        self.has_default_ctor = false;
        self
    }

    #[must_use]
    pub fn sealed(mut self) -> Self {
        self.sealed = true;
        self
    }

    #[must_use]
    pub fn abstract_class(mut self) -> Self {
        self.is_abstract = true;
        self
    }

    #[must_use]
    pub fn property(mut self, name: impl Into<String>, ty: TypeRef) -> Self {
        self.properties.push(PropertyDef::new(name, ty));
        self
    }

    #[must_use]
    pub fn property_with_default(
        mut self,
        name: impl Into<String>,
        ty: TypeRef,
        literal: impl Into<String>,
    ) -> Self {
        self.properties
            .push(PropertyDef::new(name, ty).with_default(literal));
        self
    }

    #[must_use]
    pub fn field(mut self, name: impl Into<String>, ty: TypeRef) -> Self {
        self.fields.push(FieldDef::public(name, ty));
        self
    }

    pub fn build(self) -> TypeDef {
        TypeDef {
            name: self.name,
            namespace: self.namespace,
            visibility: self.visibility,
            generic_params: self.generic_params,
            kind: ContractKind::Class {
                implements: self.implements,
                has_default_ctor: self.has_default_ctor,
                sealed: self.sealed,
                is_abstract: self.is_abstract,
            },
            properties: self.properties,
            fields: self.fields,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contract::SimpleKind;

    #[test]
    fn test_interface_builder() {
        let def = InterfaceBuilder::new("shop", "IOrder")
            .extends("shop.IAudited")
            .property("id", TypeRef::Simple(SimpleKind::Uuid))
            .property("total", TypeRef::Simple(SimpleKind::Decimal))
            .build();
        assert!(def.is_interface());
        assert_eq!(def.properties.len(), 2);
        assert_eq!(def.extends(), [TypeRef::named("shop.IAudited")]);
        assert!(!def.has_methods());
    }

    #[test]
    fn test_class_builder_ctor_flags() {
        let def = ClassBuilder::new("shop", "LegacyAudit")
            .no_default_ctor()
            .field("entries", TypeRef::sequence(TypeRef::Simple(SimpleKind::String)))
            .build();
        assert!(def.is_class());
        assert!(!def.has_default_ctor());
        assert_eq!(def.public_fields().count(), 1);
    }
}
