// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Mapper error types.

use std::fmt;

/// Errors raised by contract discovery, mapping and instantiation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MapperError {
    /// An interface contract is not externally visible and cannot be proxied.
    NotPublic { type_name: String },
    /// No concrete type is registered for the requested interface/abstract type.
    NoMappingFound { type_name: String },
    /// A contract referenced a full name that is not present in the `ContractSet`.
    UnknownType { name: String },
    /// A type parameter escaped its generic definition unbound.
    UnboundParameter { name: String },
}

impl fmt::Display for MapperError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotPublic { type_name } => write!(
                f,
                "a concrete implementation for '{type_name}' can only be generated if '{type_name}' is public"
            ),
            Self::NoMappingFound { type_name } => {
                write!(f, "could not find a concrete type mapped to {type_name}")
            }
            Self::UnknownType { name } => {
                write!(f, "contract set has no type named '{name}'")
            }
            Self::UnboundParameter { name } => {
                write!(f, "type parameter '{name}' is unbound outside its generic definition")
            }
        }
    }
}

impl std::error::Error for MapperError {}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, MapperError>;
