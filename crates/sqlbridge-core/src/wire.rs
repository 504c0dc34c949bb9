//! Protocol-level wire type tags.

use serde::{Deserialize, Serialize};

/// The declared protocol-level type of a column or parameter.
///
/// Tags the caller does not recognize travel as `Other(code)` so dispatch
/// stays total: every tag maps to exactly one handling branch, and
/// unrecognized tags fall through to the generic accessor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WireType {
    Bit,
    TinyInt,
    SmallInt,
    Integer,
    BigInt,
    Real,
    Float,
    Double,
    Numeric,
    Decimal,
    Char,
    VarChar,
    LongVarChar,
    NChar,
    NVarChar,
    NClob,
    Binary,
    VarBinary,
    LongVarBinary,
    Date,
    Time,
    Timestamp,
    Blob,
    Clob,
    /// Any tag with no named variant, carrying its raw protocol code.
    Other(i32),
}

impl WireType {
    /// The stable protocol type code for this tag.
    pub const fn code(&self) -> i32 {
        match self {
            WireType::Bit => -7,
            WireType::TinyInt => -6,
            WireType::SmallInt => 5,
            WireType::Integer => 4,
            WireType::BigInt => -5,
            WireType::Real => 7,
            WireType::Float => 6,
            WireType::Double => 8,
            WireType::Numeric => 2,
            WireType::Decimal => 3,
            WireType::Char => 1,
            WireType::VarChar => 12,
            WireType::LongVarChar => -1,
            WireType::NChar => -15,
            WireType::NVarChar => -9,
            WireType::NClob => 2011,
            WireType::Binary => -2,
            WireType::VarBinary => -3,
            WireType::LongVarBinary => -4,
            WireType::Date => 91,
            WireType::Time => 92,
            WireType::Timestamp => 93,
            WireType::Blob => 2004,
            WireType::Clob => 2005,
            WireType::Other(code) => *code,
        }
    }

    /// Map a raw protocol type code back to a tag.
    pub const fn from_code(code: i32) -> Self {
        match code {
            -7 => WireType::Bit,
            -6 => WireType::TinyInt,
            5 => WireType::SmallInt,
            4 => WireType::Integer,
            -5 => WireType::BigInt,
            7 => WireType::Real,
            6 => WireType::Float,
            8 => WireType::Double,
            2 => WireType::Numeric,
            3 => WireType::Decimal,
            1 => WireType::Char,
            12 => WireType::VarChar,
            -1 => WireType::LongVarChar,
            -15 => WireType::NChar,
            -9 => WireType::NVarChar,
            2011 => WireType::NClob,
            -2 => WireType::Binary,
            -3 => WireType::VarBinary,
            -4 => WireType::LongVarBinary,
            91 => WireType::Date,
            92 => WireType::Time,
            93 => WireType::Timestamp,
            2004 => WireType::Blob,
            2005 => WireType::Clob,
            other => WireType::Other(other),
        }
    }

    /// Tags handled by the driver's generic accessor/binder without any
    /// special conversion.
    pub const fn is_passthrough(&self) -> bool {
        matches!(
            self,
            WireType::Char
                | WireType::VarChar
                | WireType::Numeric
                | WireType::Decimal
                | WireType::Bit
                | WireType::TinyInt
                | WireType::SmallInt
                | WireType::Integer
                | WireType::BigInt
                | WireType::Real
                | WireType::Float
                | WireType::Double
                | WireType::Binary
                | WireType::VarBinary
        )
    }

    /// Check if this tag is a date/time type.
    pub const fn is_temporal(&self) -> bool {
        matches!(self, WireType::Date | WireType::Time | WireType::Timestamp)
    }

    /// Check if this tag is a large-object type, streamed or handle-based.
    pub const fn is_large_object(&self) -> bool {
        matches!(
            self,
            WireType::Blob
                | WireType::Clob
                | WireType::NClob
                | WireType::LongVarBinary
                | WireType::LongVarChar
        )
    }
}
