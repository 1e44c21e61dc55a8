// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! # wiremap - contract-to-concrete type mapping for message buses
//!
//! Message contracts are declared as property-only interfaces; wiremap
//! gives each one an instantiable, serializable backing representation and
//! the type-identity layer a wire codec needs to tag and reconstruct
//! polymorphic payloads.
//!
//! ## Quick Start
//!
//! ```rust
//! use wiremap::contract::{ContractSet, InterfaceBuilder, SimpleKind, TypeRef};
//! use wiremap::MessageMapper;
//!
//! fn main() -> wiremap::Result<()> {
//!     // Describe the closed universe of message contracts.
//!     let mut contracts = ContractSet::new();
//!     contracts.add(
//!         InterfaceBuilder::new("shop", "IOrderPlaced")
//!             .property("order_id", TypeRef::Simple(SimpleKind::Uuid))
//!             .property("total", TypeRef::Simple(SimpleKind::Decimal))
//!             .build(),
//!     );
//!
//!     // Walk the closure once, at startup.
//!     let mut mapper = MessageMapper::new(contracts);
//!     mapper.initialize(vec![TypeRef::named("shop.IOrderPlaced")])?;
//!
//!     // Per-message: materialize and populate an instance.
//!     let mut message = mapper.create_instance(&TypeRef::named("shop.IOrderPlaced"))?;
//!     message.set("order_id", uuid::Uuid::new_v4()).expect("set");
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! +--------------------------------------------------------------+
//! |                     Host serializer / bus                    |
//! |   initialize | mapped_type_for | create_instance | by-name   |
//! +--------------------------------------------------------------+
//! |                        MessageMapper                         |
//! |   TypeGraphWalker -> ProxySynthesizer -> TypeRegistry        |
//! +--------------------------------------------------------------+
//! |   ContractSet (closed type universe)  |  InstanceFactory     |
//! +--------------------------------------------------------------+
//! ```
//!
//! Initialization is a single-threaded pass over the statically known
//! contract closure; afterwards all registry state is immutable and safe
//! for unsynchronized concurrent reads. Only the canonical-name memo is
//! populated lazily, first writer wins.
//!
//! ## Key Types
//!
//! | Type | Description |
//! |------|-------------|
//! | [`MessageMapper`] | Facade: initialization plus the per-message lookup surface |
//! | [`contract::ContractSet`] | The closed universe of contract descriptors |
//! | [`contract::TypeRef`] | Closed classification of every type position |
//! | [`TypeRegistry`] | Bijective interface↔concrete map plus wire-tag lookup |
//! | [`instance::MessageInstance`] | Materialized message with checked accessors |

pub mod contract;
mod error;
pub mod instance;
pub mod mapper;
pub mod naming;

pub use error::{MapperError, Result};
pub use mapper::{CtorKind, MessageMapper, NameResolver, TypeRegistry};
