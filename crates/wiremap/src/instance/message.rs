// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Materialized message instances.

use crate::contract::TypeDef;
use crate::instance::{Decimal, MessageValue};
use chrono::{DateTime, Duration, Utc};
use std::fmt;
use std::sync::Arc;
use uuid::Uuid;

/// Errors for instance field operations.
#[derive(Debug)]
pub enum InstanceError {
    FieldNotFound(String),
    TypeMismatch { expected: String, got: String },
    InvalidOperation(String),
    IndexOutOfBounds { index: usize, length: usize },
}

impl fmt::Display for InstanceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FieldNotFound(name) => write!(f, "Field not found: {}", name),
            Self::TypeMismatch { expected, got } => {
                write!(f, "Type mismatch: expected {}, got {}", expected, got)
            }
            Self::InvalidOperation(msg) => write!(f, "Invalid operation for instance: {}", msg),
            Self::IndexOutOfBounds { index, length } => {
                write!(f, "Index out of bounds: {} >= {}", index, length)
            }
        }
    }
}

impl std::error::Error for InstanceError {}

/// A materialized instance: the concrete descriptor it was built from (when
/// it has one) plus a value tree. Accessors are independently settable and
/// gettable; the serializer walks the value tree when encoding.
#[derive(Debug, Clone)]
pub struct MessageInstance {
    type_name: String,
    descriptor: Option<Arc<TypeDef>>,
    value: MessageValue,
}

impl MessageInstance {
    pub(crate) fn new(
        type_name: String,
        descriptor: Option<Arc<TypeDef>>,
        value: MessageValue,
    ) -> Self {
        Self {
            type_name,
            descriptor,
            value,
        }
    }

    /// Canonical name of the materialized type.
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// The concrete descriptor, absent for simple/collection instances.
    pub fn descriptor(&self) -> Option<&Arc<TypeDef>> {
        self.descriptor.as_ref()
    }

    pub fn value(&self) -> &MessageValue {
        &self.value
    }

    pub fn value_mut(&mut self) -> &mut MessageValue {
        &mut self.value
    }

    pub fn into_value(self) -> MessageValue {
        self.value
    }

    /// Get an accessor value by name.
    pub fn get<T: FromMessageValue>(&self, name: &str) -> Result<T, InstanceError> {
        T::from_value(self.get_field(name)?)
    }

    /// Set an accessor value by name.
    pub fn set<T: IntoMessageValue>(&mut self, name: &str, value: T) -> Result<(), InstanceError> {
        self.check_field(name)?;
        match &mut self.value {
            MessageValue::Struct(fields) => {
                fields.insert(name.to_string(), value.into_value());
                Ok(())
            }
            _ => Err(InstanceError::InvalidOperation(
                "set requires a struct-shaped instance".into(),
            )),
        }
    }

    pub fn get_field(&self, name: &str) -> Result<&MessageValue, InstanceError> {
        self.check_field(name)?;
        match &self.value {
            MessageValue::Struct(fields) => fields
                .get(name)
                .ok_or_else(|| InstanceError::FieldNotFound(name.to_string())),
            _ => Err(InstanceError::InvalidOperation(
                "get_field requires a struct-shaped instance".into(),
            )),
        }
    }

    pub fn get_field_mut(&mut self, name: &str) -> Result<&mut MessageValue, InstanceError> {
        self.check_field(name)?;
        match &mut self.value {
            MessageValue::Struct(fields) => fields
                .get_mut(name)
                .ok_or_else(|| InstanceError::FieldNotFound(name.to_string())),
            _ => Err(InstanceError::InvalidOperation(
                "get_field_mut requires a struct-shaped instance".into(),
            )),
        }
    }

    /// Iterate accessor values (struct-shaped instances).
    pub fn fields(&self) -> impl Iterator<Item = (&str, &MessageValue)> {
        match &self.value {
            MessageValue::Struct(fields) => {
                Box::new(fields.iter().map(|(k, v)| (k.as_str(), v)))
                    as Box<dyn Iterator<Item = _>>
            }
            _ => Box::new(std::iter::empty()),
        }
    }

    /// Push an element (sequence-shaped instances).
    pub fn push_element(&mut self, value: MessageValue) -> Result<(), InstanceError> {
        match &mut self.value {
            MessageValue::Sequence(items) => {
                items.push(value);
                Ok(())
            }
            _ => Err(InstanceError::InvalidOperation(
                "push_element requires a sequence-shaped instance".into(),
            )),
        }
    }

    /// Element by index (sequence-shaped instances).
    pub fn get_element(&self, index: usize) -> Result<&MessageValue, InstanceError> {
        match &self.value {
            MessageValue::Sequence(items) => {
                items.get(index).ok_or(InstanceError::IndexOutOfBounds {
                    index,
                    length: items.len(),
                })
            }
            _ => Err(InstanceError::InvalidOperation(
                "get_element requires a sequence-shaped instance".into(),
            )),
        }
    }

    pub fn len(&self) -> Result<usize, InstanceError> {
        match &self.value {
            MessageValue::Sequence(items) => Ok(items.len()),
            MessageValue::Map(entries) => Ok(entries.len()),
            _ => Err(InstanceError::InvalidOperation(
                "len requires a collection-shaped instance".into(),
            )),
        }
    }

    pub fn is_empty(&self) -> Result<bool, InstanceError> {
        self.len().map(|l| l == 0)
    }

    /// When a descriptor is present, reject names it does not declare.
    fn check_field(&self, name: &str) -> Result<(), InstanceError> {
        if let Some(def) = &self.descriptor {
            if def.member_type(name).is_none() {
                return Err(InstanceError::FieldNotFound(name.to_string()));
            }
        }
        Ok(())
    }
}

impl PartialEq for MessageInstance {
    fn eq(&self, other: &Self) -> bool {
        self.type_name == other.type_name && self.value == other.value
    }
}

/// Conversion out of a [`MessageValue`].
pub trait FromMessageValue: Sized {
    fn from_value(value: &MessageValue) -> Result<Self, InstanceError>;
}

/// Conversion into a [`MessageValue`].
pub trait IntoMessageValue {
    fn into_value(self) -> MessageValue;
}

macro_rules! impl_from_value {
    ($ty:ty, $variant:ident, $name:expr) => {
        impl FromMessageValue for $ty {
            fn from_value(value: &MessageValue) -> Result<Self, InstanceError> {
                match value {
                    MessageValue::$variant(v) => Ok(*v),
                    other => Err(InstanceError::TypeMismatch {
                        expected: $name.to_string(),
                        got: other.kind_name().to_string(),
                    }),
                }
            }
        }
    };
}

impl_from_value!(bool, Bool, "bool");
impl_from_value!(u8, U8, "u8");
impl_from_value!(u16, U16, "u16");
impl_from_value!(u32, U32, "u32");
impl_from_value!(u64, U64, "u64");
impl_from_value!(i8, I8, "i8");
impl_from_value!(i16, I16, "i16");
impl_from_value!(i32, I32, "i32");
impl_from_value!(i64, I64, "i64");
impl_from_value!(f32, F32, "f32");
impl_from_value!(f64, F64, "f64");
impl_from_value!(Decimal, Decimal, "decimal");
impl_from_value!(Uuid, Uuid, "uuid");
impl_from_value!(Duration, Duration, "duration");

impl FromMessageValue for DateTime<Utc> {
    fn from_value(value: &MessageValue) -> Result<Self, InstanceError> {
        match value {
            MessageValue::Timestamp(v) => Ok(*v),
            other => Err(InstanceError::TypeMismatch {
                expected: "timestamp".to_string(),
                got: other.kind_name().to_string(),
            }),
        }
    }
}

impl FromMessageValue for String {
    fn from_value(value: &MessageValue) -> Result<Self, InstanceError> {
        match value {
            MessageValue::String(s) => Ok(s.clone()),
            other => Err(InstanceError::TypeMismatch {
                expected: "string".to_string(),
                got: other.kind_name().to_string(),
            }),
        }
    }
}

impl FromMessageValue for MessageValue {
    fn from_value(value: &MessageValue) -> Result<Self, InstanceError> {
        Ok(value.clone())
    }
}

macro_rules! impl_into_value {
    ($ty:ty, $variant:ident) => {
        impl IntoMessageValue for $ty {
            fn into_value(self) -> MessageValue {
                MessageValue::$variant(self)
            }
        }
    };
}

impl_into_value!(bool, Bool);
impl_into_value!(u8, U8);
impl_into_value!(u16, U16);
impl_into_value!(u32, U32);
impl_into_value!(u64, U64);
impl_into_value!(i8, I8);
impl_into_value!(i16, I16);
impl_into_value!(i32, I32);
impl_into_value!(i64, I64);
impl_into_value!(f32, F32);
impl_into_value!(f64, F64);
impl_into_value!(Decimal, Decimal);
impl_into_value!(String, String);
impl_into_value!(Uuid, Uuid);
impl_into_value!(Duration, Duration);

impl IntoMessageValue for DateTime<Utc> {
    fn into_value(self) -> MessageValue {
        MessageValue::Timestamp(self)
    }
}

impl IntoMessageValue for &str {
    fn into_value(self) -> MessageValue {
        MessageValue::String(self.to_string())
    }
}

impl IntoMessageValue for MessageValue {
    fn into_value(self) -> MessageValue {
        self
    }
}

/// Free-standing struct instance for tests and ad-hoc composition.
impl MessageInstance {
    pub fn from_parts(type_name: impl Into<String>, value: MessageValue) -> Self {
        Self::new(type_name.into(), None, value)
    }
}
