// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Canonical wire names.
//!
//! Every registered type gets one collision-resistant string identity that
//! is stable across generic instantiations and safe to embed as a
//! wire-format type tag: the full name for plain contracts, a flattened
//! separator-free form for bound generics (`Holder<IBar>` becomes
//! `HolderOfIBar`), and a namespace-qualified friendly name for the
//! key/value pair construct so it cannot collide with an identically-named
//! user type.

use crate::contract::TypeRef;
use dashmap::DashMap;

/// Suffix appended to an interface's canonical name to name its
/// synthesized concrete type.
pub const PROXY_SUFFIX: &str = "__impl";

/// Namespace qualifying the key/value pair construct's canonical name.
pub const PAIR_NAMESPACE: &str = "wiremap";

/// Remove the synthesized-type suffix if present. Idempotent.
pub fn strip_proxy_suffix(name: &str) -> &str {
    name.strip_suffix(PROXY_SUFFIX).unwrap_or(name)
}

/// Unqualified portion of a full name.
fn short_name(full_name: &str) -> &str {
    full_name.rsplit('.').next().unwrap_or(full_name)
}

/// Name used when a reference appears inside a flattened generic name.
pub fn friendly_name(ty: &TypeRef) -> String {
    match ty {
        TypeRef::Simple(kind) => kind.friendly_name().to_string(),
        TypeRef::Named(full) => short_name(full).to_string(),
        TypeRef::Param(name) => name.clone(),
        TypeRef::Instance { definition, args } => flattened(short_name(definition), args),
        TypeRef::Sequence(elem) => format!("SequenceOf{}", friendly_name(elem)),
        TypeRef::Map(k, v) => format!("MapOf{}And{}", friendly_name(k), friendly_name(v)),
        TypeRef::Pair(k, v) => {
            format!("KeyValuePairOf{}And{}", friendly_name(k), friendly_name(v))
        }
    }
}

fn flattened(base: &str, args: &[TypeRef]) -> String {
    let mut out = String::from(base);
    out.push_str("Of");
    for (i, arg) in args.iter().enumerate() {
        out.push_str(&friendly_name(arg));
        if i != args.len() - 1 {
            out.push_str("And");
        }
    }
    out
}

/// Canonical registration name for a reference, or `None` for references
/// that never register (simple types, collections, unbound parameters).
pub fn canonical_name(ty: &TypeRef) -> Option<String> {
    match ty {
        TypeRef::Named(full) => Some(full.clone()),
        TypeRef::Instance { definition, args } => Some(flattened(short_name(definition), args)),
        TypeRef::Pair(k, v) => Some(format!(
            "{PAIR_NAMESPACE}.KeyValuePairOf{}And{}",
            friendly_name(k),
            friendly_name(v)
        )),
        TypeRef::Simple(_) | TypeRef::Param(_) | TypeRef::Sequence(_) | TypeRef::Map(_, _) => None,
    }
}

/// Memoized canonical-name lookup.
///
/// Discovery computes names eagerly on one thread; this cache exists for
/// the post-initialization path where worker threads resolve names per
/// message concurrently. Get-or-compute, first writer wins.
#[derive(Debug, Default)]
pub struct NameCache {
    memo: DashMap<TypeRef, Option<String>>,
}

impl NameCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn canonical(&self, ty: &TypeRef) -> Option<String> {
        self.memo
            .entry(ty.clone())
            .or_insert_with(|| canonical_name(ty))
            .clone()
    }
}
