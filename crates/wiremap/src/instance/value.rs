// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Type-erased message values.

use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Fixed-point decimal: `units * 10^-scale`.
///
/// Exists so monetary contract values never pass through binary floating
/// point. Equality is representational: `1.0` and `1.00` carry different
/// scales and compare unequal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Decimal {
    units: i128,
    scale: u32,
}

impl Decimal {
    pub fn new(units: i128, scale: u32) -> Self {
        Self { units, scale }
    }

    pub fn zero() -> Self {
        Self::default()
    }

    pub fn units(&self) -> i128 {
        self.units
    }

    pub fn scale(&self) -> u32 {
        self.scale
    }
}

impl fmt::Display for Decimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.scale == 0 {
            return write!(f, "{}", self.units);
        }
        let sign = if self.units < 0 { "-" } else { "" };
        let magnitude = self.units.unsigned_abs();
        let divisor = 10u128.pow(self.scale);
        let whole = magnitude / divisor;
        let frac = magnitude % divisor;
        write!(f, "{sign}{whole}.{frac:0width$}", width = self.scale as usize)
    }
}

/// Error parsing a decimal literal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseDecimalError;

impl fmt::Display for ParseDecimalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid decimal literal")
    }
}

impl std::error::Error for ParseDecimalError {}

impl FromStr for Decimal {
    type Err = ParseDecimalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (sign, digits) = match s.strip_prefix('-') {
            Some(rest) => (-1i128, rest),
            None => (1i128, s.strip_prefix('+').unwrap_or(s)),
        };
        let (whole, frac) = match digits.split_once('.') {
            Some((w, f)) => (w, f),
            None => (digits, ""),
        };
        if whole.is_empty() && frac.is_empty() {
            return Err(ParseDecimalError);
        }
        if !whole.chars().all(|c| c.is_ascii_digit())
            || !frac.chars().all(|c| c.is_ascii_digit())
        {
            return Err(ParseDecimalError);
        }
        let mut units: i128 = 0;
        for c in whole.chars().chain(frac.chars()) {
            units = units
                .checked_mul(10)
                .and_then(|u| u.checked_add((c as u8 - b'0') as i128))
                .ok_or(ParseDecimalError)?;
        }
        Ok(Decimal::new(sign * units, frac.len() as u32))
    }
}

/// A dynamic value that can hold any contract-describable shape.
#[derive(Debug, Clone, PartialEq)]
pub enum MessageValue {
    // Simple values
    Bool(bool),
    U8(u8),
    U16(u16),
    U32(u32),
    U64(u64),
    I8(i8),
    I16(i16),
    I32(i32),
    I64(i64),
    F32(f32),
    F64(f64),
    Decimal(Decimal),
    String(String),
    Uuid(Uuid),
    Timestamp(DateTime<Utc>),
    Duration(Duration),
    Enum(i64, String), // (value, variant_name)

    // Composites
    Struct(HashMap<String, MessageValue>),
    Sequence(Vec<MessageValue>),
    Map(Vec<(MessageValue, MessageValue)>),
    Pair(Box<MessageValue>, Box<MessageValue>),

    // Unset reference/collection slot
    Null,
}

impl MessageValue {
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_u32(&self) -> Option<u32> {
        match self {
            Self::U32(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_u64(&self) -> Option<u64> {
        match self {
            Self::U64(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_i32(&self) -> Option<i32> {
        match self {
            Self::I32(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::I64(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::F64(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_decimal(&self) -> Option<Decimal> {
        match self {
            Self::Decimal(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_uuid(&self) -> Option<Uuid> {
        match self {
            Self::Uuid(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_timestamp(&self) -> Option<DateTime<Utc>> {
        match self {
            Self::Timestamp(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_struct(&self) -> Option<&HashMap<String, MessageValue>> {
        match self {
            Self::Struct(fields) => Some(fields),
            _ => None,
        }
    }

    pub fn as_sequence(&self) -> Option<&[MessageValue]> {
        match self {
            Self::Sequence(items) => Some(items),
            _ => None,
        }
    }

    /// Short name of the variant, for diagnostics.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Bool(_) => "bool",
            Self::U8(_) => "u8",
            Self::U16(_) => "u16",
            Self::U32(_) => "u32",
            Self::U64(_) => "u64",
            Self::I8(_) => "i8",
            Self::I16(_) => "i16",
            Self::I32(_) => "i32",
            Self::I64(_) => "i64",
            Self::F32(_) => "f32",
            Self::F64(_) => "f64",
            Self::Decimal(_) => "decimal",
            Self::String(_) => "string",
            Self::Uuid(_) => "uuid",
            Self::Timestamp(_) => "timestamp",
            Self::Duration(_) => "duration",
            Self::Enum(_, _) => "enum",
            Self::Struct(_) => "struct",
            Self::Sequence(_) => "sequence",
            Self::Map(_) => "map",
            Self::Pair(_, _) => "pair",
            Self::Null => "null",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decimal_display_round_trip() {
        let d: Decimal = "19.99".parse().expect("parse");
        assert_eq!(d, Decimal::new(1999, 2));
        assert_eq!(d.to_string(), "19.99");

        let neg: Decimal = "-0.05".parse().expect("parse");
        assert_eq!(neg, Decimal::new(-5, 2));
        assert_eq!(neg.to_string(), "-0.05");

        let whole: Decimal = "42".parse().expect("parse");
        assert_eq!(whole.to_string(), "42");
    }

    #[test]
    fn test_decimal_rejects_garbage() {
        assert!("".parse::<Decimal>().is_err());
        assert!("abc".parse::<Decimal>().is_err());
        assert!("1.2.3".parse::<Decimal>().is_err());
    }

    #[test]
    fn test_accessors() {
        assert_eq!(MessageValue::I32(7).as_i32(), Some(7));
        assert_eq!(MessageValue::I32(7).as_u32(), None);
        assert!(MessageValue::Null.is_null());
        assert_eq!(MessageValue::Null.kind_name(), "null");
        assert_eq!(
            MessageValue::String("x".into()).as_str(),
            Some("x")
        );
    }
}
