//! Zero-copy reinterpretation between complex slices and interleaved real
//! slices.
//!
//! `Complex<T>` is `repr(C)` with fields `re, im`, so `[Complex<T>]` and
//! `[T]` of twice the length share a layout. These casts let an interleaved
//! buffer be traversed with [`Direct`](crate::Direct) over `Complex<T>`, or a
//! complex buffer with [`Interleaved`](crate::Interleaved) over `T`.

use bytemuck::Pod;
use num_complex::Complex;

/// View an interleaved `[re, im, ...]` slice as complex values.
///
/// Returns `None` if the slice has odd length or is not aligned for
/// `Complex<T>`.
pub fn interleaved_as_complex<T: Pod>(src: &[T]) -> Option<&[Complex<T>]> {
    bytemuck::try_cast_slice(src).ok()
}

/// Mutable variant of [`interleaved_as_complex`].
pub fn interleaved_as_complex_mut<T: Pod>(src: &mut [T]) -> Option<&mut [Complex<T>]> {
    bytemuck::try_cast_slice_mut(src).ok()
}

/// View complex values as an interleaved `[re, im, ...]` slice.
pub fn complex_as_interleaved<T: Pod>(src: &[Complex<T>]) -> &[T] {
    bytemuck::cast_slice(src)
}

/// Mutable variant of [`complex_as_interleaved`].
pub fn complex_as_interleaved_mut<T: Pod>(src: &mut [Complex<T>]) -> &mut [T] {
    bytemuck::cast_slice_mut(src)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_complex_as_interleaved() {
        let z = [Complex::new(1.0f64, 2.0), Complex::new(3.0, 4.0)];
        assert_eq!(complex_as_interleaved(&z), &[1.0, 2.0, 3.0, 4.0]);
    }

    #[test]
    fn test_interleaved_as_complex() {
        let buf = vec![1.0f32, -1.0, 0.5, 0.25];
        let z = interleaved_as_complex(&buf).unwrap();
        assert_eq!(z, &[Complex::new(1.0, -1.0), Complex::new(0.5, 0.25)]);
    }

    #[test]
    fn test_interleaved_as_complex_odd_length() {
        let buf = vec![1.0f64, 2.0, 3.0];
        assert!(interleaved_as_complex(&buf).is_none());
    }

    #[test]
    fn test_mutation_through_cast() {
        let mut z = vec![Complex::new(0.0f64, 0.0); 2];
        {
            let flat = complex_as_interleaved_mut(&mut z);
            flat[3] = 9.0;
        }
        assert_eq!(z[1], Complex::new(0.0, 9.0));

        let mut buf = vec![0.0f64; 4];
        if let Some(c) = interleaved_as_complex_mut(&mut buf) {
            c[0] = Complex::new(7.0, 8.0);
        }
        assert_eq!(buf, vec![7.0, 8.0, 0.0, 0.0]);
    }
}
