use std::io::{Seek, Write};

use ndarray::ArrayD;
use ndarray_npy::{NpzWriter, ReadNpyError, ReadNpyExt, WriteNpzError};

/// A decoded `.npy` member, widened to 64-bit
///
/// Integer and boolean dtypes become [`FieldArray::Int`], `f4`/`f8` become
/// [`FieldArray::Float`]. Unsigned 64-bit, complex, string and object members
/// have no lossless widening and are not decoded.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldArray {
    Int(ArrayD<i64>),
    Float(ArrayD<f64>),
}

impl FieldArray {
    pub fn shape(&self) -> &[usize] {
        match self {
            FieldArray::Int(array) => array.shape(),
            FieldArray::Float(array) => array.shape(),
        }
    }

    /// Element type after widening
    pub fn dtype(&self) -> &'static str {
        match self {
            FieldArray::Int(_) => "int64",
            FieldArray::Float(_) => "float64",
        }
    }

    pub fn is_integral(&self) -> bool {
        matches!(self, FieldArray::Int(_))
    }

    /// Values as floats, converting integers
    pub fn into_floats(self) -> ArrayD<f64> {
        match self {
            FieldArray::Float(array) => array,
            FieldArray::Int(array) => array.mapv(|v| v as f64),
        }
    }

    /// Add to `npz` as `{name}.npy`
    pub fn write_to<W: Write + Seek>(
        &self,
        npz: &mut NpzWriter<W>,
        name: &str,
    ) -> Result<(), WriteNpzError> {
        match self {
            FieldArray::Int(array) => npz.add_array(name, array),
            FieldArray::Float(array) => npz.add_array(name, array),
        }
    }

    /// Decode one `.npy` member, trying each supported dtype in turn.
    /// Returns `Ok(None)` when the member's dtype is not supported.
    pub fn decode(bytes: &[u8]) -> Result<Option<Self>, ReadNpyError> {
        macro_rules! attempt {
            ($elem:ty, $widen:expr) => {
                match ArrayD::<$elem>::read_npy(bytes) {
                    Ok(array) => return Ok(Some($widen(array))),
                    Err(ReadNpyError::WrongDescriptor(_)) => {}
                    Err(e) => return Err(e),
                }
            };
        }

        attempt!(f64, FieldArray::Float);
        attempt!(f32, |a: ArrayD<f32>| FieldArray::Float(a.mapv(f64::from)));
        attempt!(i64, FieldArray::Int);
        attempt!(i32, |a: ArrayD<i32>| FieldArray::Int(a.mapv(i64::from)));
        attempt!(i16, |a: ArrayD<i16>| FieldArray::Int(a.mapv(i64::from)));
        attempt!(i8, |a: ArrayD<i8>| FieldArray::Int(a.mapv(i64::from)));
        attempt!(u32, |a: ArrayD<u32>| FieldArray::Int(a.mapv(i64::from)));
        attempt!(u16, |a: ArrayD<u16>| FieldArray::Int(a.mapv(i64::from)));
        attempt!(u8, |a: ArrayD<u8>| FieldArray::Int(a.mapv(i64::from)));
        attempt!(bool, |a: ArrayD<bool>| FieldArray::Int(a.mapv(i64::from)));

        Ok(None)
    }
}
