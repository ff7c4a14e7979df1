//! Data type tags and the element types that carry them.

use std::fmt;

use num_complex::Complex;

/// Data type of an array's elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dtype {
    Float64,
    Float32,
    Int8,
    Int16,
    Int32,
    Int64,
    Uint8,
    Uint16,
    Uint32,
    Uint64,
    Bool,
    /// Interleaved pairs of `f32`.
    Complex64,
    /// Interleaved pairs of `f64`.
    Complex128,
    /// Arbitrary values with no fixed width.
    Generic,
}

impl Dtype {
    pub const ALL: [Dtype; 14] = [
        Dtype::Float64,
        Dtype::Float32,
        Dtype::Int8,
        Dtype::Int16,
        Dtype::Int32,
        Dtype::Int64,
        Dtype::Uint8,
        Dtype::Uint16,
        Dtype::Uint32,
        Dtype::Uint64,
        Dtype::Bool,
        Dtype::Complex64,
        Dtype::Complex128,
        Dtype::Generic,
    ];

    /// Resolve a dtype name.
    ///
    /// Unknown names resolve to [`Dtype::Generic`] rather than failing, so an
    /// unrecognized buffer is still traversable element by element.
    pub fn resolve(name: &str) -> Dtype {
        Self::ALL
            .into_iter()
            .find(|d| d.as_str() == name)
            .unwrap_or(Dtype::Generic)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Dtype::Float64 => "float64",
            Dtype::Float32 => "float32",
            Dtype::Int8 => "int8",
            Dtype::Int16 => "int16",
            Dtype::Int32 => "int32",
            Dtype::Int64 => "int64",
            Dtype::Uint8 => "uint8",
            Dtype::Uint16 => "uint16",
            Dtype::Uint32 => "uint32",
            Dtype::Uint64 => "uint64",
            Dtype::Bool => "bool",
            Dtype::Complex64 => "complex64",
            Dtype::Complex128 => "complex128",
            Dtype::Generic => "generic",
        }
    }

    /// Size of one element in bytes, `None` for [`Dtype::Generic`].
    pub fn bytes_per_element(&self) -> Option<usize> {
        match self {
            Dtype::Int8 | Dtype::Uint8 | Dtype::Bool => Some(1),
            Dtype::Int16 | Dtype::Uint16 => Some(2),
            Dtype::Float32 | Dtype::Int32 | Dtype::Uint32 => Some(4),
            Dtype::Float64 | Dtype::Int64 | Dtype::Uint64 | Dtype::Complex64 => Some(8),
            Dtype::Complex128 => Some(16),
            Dtype::Generic => None,
        }
    }

    pub fn is_complex(&self) -> bool {
        matches!(self, Dtype::Complex64 | Dtype::Complex128)
    }
}

impl fmt::Display for Dtype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Plain-old-data element types with a fixed [`Dtype`].
pub trait Element: Copy + Default + 'static {
    const DTYPE: Dtype;
}

macro_rules! impl_element {
    ($($t:ty => $d:ident),* $(,)?) => {
        $(
            impl Element for $t {
                const DTYPE: Dtype = Dtype::$d;
            }
        )*
    };
}

impl_element!(
    f64 => Float64,
    f32 => Float32,
    i8 => Int8,
    i16 => Int16,
    i32 => Int32,
    i64 => Int64,
    u8 => Uint8,
    u16 => Uint16,
    u32 => Uint32,
    u64 => Uint64,
    bool => Bool,
    Complex<f32> => Complex64,
    Complex<f64> => Complex128,
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_known() {
        for d in Dtype::ALL {
            assert_eq!(Dtype::resolve(d.as_str()), d);
        }
        assert_eq!(Dtype::resolve("float64"), Dtype::Float64);
    }

    #[test]
    fn test_resolve_unknown_is_generic() {
        assert_eq!(Dtype::resolve("float16"), Dtype::Generic);
        assert_eq!(Dtype::resolve(""), Dtype::Generic);
    }

    #[test]
    fn test_bytes_per_element() {
        assert_eq!(Dtype::Float64.bytes_per_element(), Some(8));
        assert_eq!(Dtype::Complex64.bytes_per_element(), Some(8));
        assert_eq!(Dtype::Complex128.bytes_per_element(), Some(16));
        assert_eq!(Dtype::Bool.bytes_per_element(), Some(1));
        assert_eq!(Dtype::Generic.bytes_per_element(), None);
    }

    #[test]
    fn test_element_dtype_widths() {
        fn width<T: Element>() -> Option<usize> {
            T::DTYPE.bytes_per_element()
        }
        assert_eq!(width::<f64>(), Some(std::mem::size_of::<f64>()));
        assert_eq!(width::<i16>(), Some(std::mem::size_of::<i16>()));
        assert_eq!(width::<u32>(), Some(std::mem::size_of::<u32>()));
        assert_eq!(width::<Complex<f32>>(), Some(std::mem::size_of::<Complex<f32>>()));
        assert_eq!(width::<Complex<f64>>(), Some(std::mem::size_of::<Complex<f64>>()));
    }

    #[test]
    fn test_every_fixed_dtype_has_element() {
        let elements = [
            f64::DTYPE,
            f32::DTYPE,
            i8::DTYPE,
            i16::DTYPE,
            i32::DTYPE,
            i64::DTYPE,
            u8::DTYPE,
            u16::DTYPE,
            u32::DTYPE,
            u64::DTYPE,
            bool::DTYPE,
            Complex::<f32>::DTYPE,
            Complex::<f64>::DTYPE,
        ];
        for d in Dtype::ALL {
            assert_eq!(elements.contains(&d), d != Dtype::Generic, "{d}");
        }
        assert_eq!(Dtype::resolve("uint8c"), Dtype::Generic);
    }

    #[test]
    fn test_display() {
        assert_eq!(Dtype::Complex128.to_string(), "complex128");
        assert!(Dtype::Complex64.is_complex());
        assert!(!Dtype::Float32.is_complex());
    }
}
