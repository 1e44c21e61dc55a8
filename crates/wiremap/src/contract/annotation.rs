// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Serialization-hint annotations and the declarative replication table.
//!
//! Contract properties may carry annotations (rename, ignore, optional,
//! default text) that the host serializer interprets. When a proxy type is
//! synthesized, the annotations on each source property are replicated onto
//! the generated accessor through an [`AnnotationTable`]: an explicit table
//! of known annotation names with the declared default for every parameter.
//! Only parameter values that differ from their declared default are
//! carried over; annotations and parameters the table does not know are
//! dropped. The table is supplied by the caller, so what replicates is a
//! configuration decision, not a reflection heuristic.

use std::collections::{BTreeMap, HashMap};

/// A single annotation parameter value.
#[derive(Debug, Clone, PartialEq)]
pub enum AnnotationValue {
    Bool(bool),
    Int(i64),
    Text(String),
}

/// An annotation instance attached to a contract property.
///
/// Parameters are kept in a `BTreeMap` so replicated annotations render in
/// a stable order in generated source.
#[derive(Debug, Clone, PartialEq)]
pub struct Annotation {
    pub name: String,
    pub values: BTreeMap<String, AnnotationValue>,
}

impl Annotation {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            values: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: AnnotationValue) -> Self {
        self.values.insert(key.into(), value);
        self
    }

    pub fn get(&self, key: &str) -> Option<&AnnotationValue> {
        self.values.get(key)
    }
}

/// Declares one known annotation: its name and the default value of each
/// parameter it accepts.
#[derive(Debug, Clone)]
pub struct AnnotationSpec {
    pub name: String,
    pub defaults: BTreeMap<String, AnnotationValue>,
}

impl AnnotationSpec {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            defaults: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn param(mut self, key: impl Into<String>, default: AnnotationValue) -> Self {
        self.defaults.insert(key.into(), default);
        self
    }
}

/// The set of annotations that replicate onto synthesized accessors.
#[derive(Debug, Clone, Default)]
pub struct AnnotationTable {
    specs: HashMap<String, AnnotationSpec>,
}

impl AnnotationTable {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The built-in hints every serializer boundary understands.
    #[must_use]
    pub fn standard() -> Self {
        Self::new()
            .with_spec(AnnotationSpec::new("rename").param("to", AnnotationValue::Text(String::new())))
            .with_spec(AnnotationSpec::new("ignore"))
            .with_spec(AnnotationSpec::new("optional").param("required", AnnotationValue::Bool(false)))
            .with_spec(
                AnnotationSpec::new("default").param("text", AnnotationValue::Text(String::new())),
            )
    }

    #[must_use]
    pub fn with_spec(mut self, spec: AnnotationSpec) -> Self {
        self.specs.insert(spec.name.clone(), spec);
        self
    }

    pub fn knows(&self, name: &str) -> bool {
        self.specs.contains_key(name)
    }

    /// Replicate `source` annotations for a synthesized accessor.
    ///
    /// A known annotation replicates with only those parameters whose value
    /// differs from the declared default; a marker annotation (no
    /// parameters) replicates as a bare name. Unknown annotations and
    /// unknown parameters are not applicable and are dropped.
    pub fn replicate(&self, source: &[Annotation]) -> Vec<Annotation> {
        let mut out = Vec::new();
        for ann in source {
            let Some(spec) = self.specs.get(&ann.name) else {
                continue;
            };
            let mut replicated = Annotation::new(&ann.name);
            for (key, value) in &ann.values {
                match spec.defaults.get(key) {
                    Some(default) if default != value => {
                        replicated.values.insert(key.clone(), value.clone());
                    }
                    _ => {}
                }
            }
            out.push(replicated);
        }
        out
    }
}
