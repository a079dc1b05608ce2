//! Width-tagged storage for numeric columns.
//!
//! Inference produces `i64`/`f64` vectors; the downcast pass narrows them
//! to the smallest width that holds every value exactly. Reads always
//! decode back to `i64`/`f64`.

use crate::dtype::{FloatWidth, IntWidth};

/// Integer column values at a concrete storage width.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IntValues {
    I8(Vec<Option<i8>>),
    I16(Vec<Option<i16>>),
    I32(Vec<Option<i32>>),
    I64(Vec<Option<i64>>),
}

impl IntValues {
    pub fn width(&self) -> IntWidth {
        match self {
            Self::I8(_) => IntWidth::I8,
            Self::I16(_) => IntWidth::I16,
            Self::I32(_) => IntWidth::I32,
            Self::I64(_) => IntWidth::I64,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Self::I8(v) => v.len(),
            Self::I16(v) => v.len(),
            Self::I32(v) => v.len(),
            Self::I64(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn get(&self, idx: usize) -> Option<i64> {
        match self {
            Self::I8(v) => v.get(idx).copied().flatten().map(i64::from),
            Self::I16(v) => v.get(idx).copied().flatten().map(i64::from),
            Self::I32(v) => v.get(idx).copied().flatten().map(i64::from),
            Self::I64(v) => v.get(idx).copied().flatten(),
        }
    }

    /// Decoded values in row order.
    pub fn to_i64(&self) -> Vec<Option<i64>> {
        (0..self.len()).map(|idx| self.get(idx)).collect()
    }

    /// Re-stores the values at the smallest width holding all of them.
    /// An all-null column narrows to `i8`.
    #[must_use]
    pub fn downcast(self) -> Self {
        let values = self.to_i64();
        let min = values.iter().flatten().copied().min().unwrap_or(0);
        let max = values.iter().flatten().copied().max().unwrap_or(0);
        let narrowed = match IntWidth::smallest_for(min, max) {
            IntWidth::I8 => narrow(&values).map(Self::I8),
            IntWidth::I16 => narrow(&values).map(Self::I16),
            IntWidth::I32 => narrow(&values).map(Self::I32),
            IntWidth::I64 => None,
        };
        narrowed.unwrap_or(Self::I64(values))
    }
}

fn narrow<T: TryFrom<i64>>(values: &[Option<i64>]) -> Option<Vec<Option<T>>> {
    values
        .iter()
        .map(|v| match v {
            Some(x) => T::try_from(*x).ok().map(Some),
            None => Some(None),
        })
        .collect()
}

/// Float column values at a concrete storage width.
#[derive(Debug, Clone, PartialEq)]
pub enum FloatValues {
    F32(Vec<Option<f32>>),
    F64(Vec<Option<f64>>),
}

impl FloatValues {
    pub fn width(&self) -> FloatWidth {
        match self {
            Self::F32(_) => FloatWidth::F32,
            Self::F64(_) => FloatWidth::F64,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Self::F32(v) => v.len(),
            Self::F64(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn get(&self, idx: usize) -> Option<f64> {
        match self {
            Self::F32(v) => v.get(idx).copied().flatten().map(f64::from),
            Self::F64(v) => v.get(idx).copied().flatten(),
        }
    }

    /// Decoded values in row order.
    pub fn to_f64(&self) -> Vec<Option<f64>> {
        (0..self.len()).map(|idx| self.get(idx)).collect()
    }

    /// Re-stores the values as `f32` when every value survives the trip
    /// exactly, otherwise keeps `f64`.
    #[must_use]
    pub fn downcast(self) -> Self {
        let values = self.to_f64();
        let fits = values
            .iter()
            .flatten()
            .all(|v| FloatWidth::F32.represents(*v));
        if fits {
            Self::F32(values.iter().map(|v| v.map(|x| x as f32)).collect())
        } else {
            Self::F64(values)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ints_narrow_to_smallest_width() {
        let narrowed = IntValues::I64(vec![Some(1), None, Some(-128)]).downcast();
        assert_eq!(narrowed.width(), IntWidth::I8);
        assert_eq!(narrowed.to_i64(), vec![Some(1), None, Some(-128)]);

        let wide = IntValues::I64(vec![Some(70_000)]).downcast();
        assert_eq!(wide.width(), IntWidth::I32);
        assert_eq!(wide.get(0), Some(70_000));
    }

    #[test]
    fn all_null_ints_narrow_to_i8() {
        let narrowed = IntValues::I64(vec![None, None]).downcast();
        assert_eq!(narrowed, IntValues::I8(vec![None, None]));
    }

    #[test]
    fn floats_keep_f64_when_f32_would_round() {
        let exact = FloatValues::F64(vec![Some(10.5), None, Some(7.0)]).downcast();
        assert_eq!(exact.width(), FloatWidth::F32);
        assert_eq!(exact.to_f64(), vec![Some(10.5), None, Some(7.0)]);

        let inexact = FloatValues::F64(vec![Some(0.1), Some(2.0)]).downcast();
        assert_eq!(inexact.width(), FloatWidth::F64);
        assert_eq!(inexact.get(0), Some(0.1));
    }
}
