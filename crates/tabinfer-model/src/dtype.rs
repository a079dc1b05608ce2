//! Semantic types and the storage types reported for each column.

use std::fmt;

use serde::{Deserialize, Serialize, Serializer};

/// The inferred logical type of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SemanticType {
    Integer,
    Float,
    DateTime,
    Categorical,
    String,
}

impl SemanticType {
    pub fn is_numeric(self) -> bool {
        matches!(self, Self::Integer | Self::Float)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Integer => "Integer",
            Self::Float => "Float",
            Self::DateTime => "DateTime",
            Self::Categorical => "Categorical",
            Self::String => "String",
        }
    }
}

impl fmt::Display for SemanticType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Signed integer storage widths, narrowest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum IntWidth {
    I8,
    I16,
    I32,
    I64,
}

impl IntWidth {
    pub const ALL: [IntWidth; 4] = [Self::I8, Self::I16, Self::I32, Self::I64];

    /// Inclusive value range of the width.
    pub fn bounds(self) -> (i64, i64) {
        match self {
            Self::I8 => (i64::from(i8::MIN), i64::from(i8::MAX)),
            Self::I16 => (i64::from(i16::MIN), i64::from(i16::MAX)),
            Self::I32 => (i64::from(i32::MIN), i64::from(i32::MAX)),
            Self::I64 => (i64::MIN, i64::MAX),
        }
    }

    pub fn contains(self, value: i64) -> bool {
        let (low, high) = self.bounds();
        (low..=high).contains(&value)
    }

    /// Smallest width holding every value in `min..=max`.
    pub fn smallest_for(min: i64, max: i64) -> Self {
        Self::ALL
            .into_iter()
            .find(|width| width.contains(min) && width.contains(max))
            .unwrap_or(Self::I64)
    }
}

/// Floating point storage widths, narrowest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FloatWidth {
    F32,
    F64,
}

impl FloatWidth {
    /// Whether `value` survives a trip through this width unchanged.
    pub fn represents(self, value: f64) -> bool {
        match self {
            Self::F64 => true,
            Self::F32 => !value.is_finite() || f64::from(value as f32) == value,
        }
    }
}

/// Storage type of a column, as reported before and after inference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DType {
    /// Untyped raw text.
    Object,
    Int(IntWidth),
    Float(FloatWidth),
    DateTime,
    Category,
    String,
}

impl DType {
    pub fn name(self) -> &'static str {
        match self {
            Self::Object => "object",
            Self::Int(IntWidth::I8) => "int8",
            Self::Int(IntWidth::I16) => "int16",
            Self::Int(IntWidth::I32) => "int32",
            Self::Int(IntWidth::I64) => "int64",
            Self::Float(FloatWidth::F32) => "float32",
            Self::Float(FloatWidth::F64) => "float64",
            Self::DateTime => "datetime64[ns]",
            Self::Category => "category",
            Self::String => "string",
        }
    }

    /// Semantic type carried by this storage type, `None` for raw text.
    pub fn semantic(self) -> Option<SemanticType> {
        match self {
            Self::Object => None,
            Self::Int(_) => Some(SemanticType::Integer),
            Self::Float(_) => Some(SemanticType::Float),
            Self::DateTime => Some(SemanticType::DateTime),
            Self::Category => Some(SemanticType::Categorical),
            Self::String => Some(SemanticType::String),
        }
    }
}

impl fmt::Display for DType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Serialize for DType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}
