//! Element accessors.
//!
//! Traversal kernels only produce buffer indices; accessors turn an index into
//! a value (and back). The accessor is a type parameter of every view, so the
//! choice between plain, interleaved-complex, and generic storage is made at
//! compile time and the kernel is monomorphized for it.
//!
//! | Accessor          | Buffer   | Value        | Element `i`            |
//! |-------------------|----------|--------------|------------------------|
//! | [`Direct<T>`]     | `[T]`    | `T`          | `buf[i]`               |
//! | [`Interleaved<T>`]| `[T]`    | `Complex<T>` | `buf[2i] + i*buf[2i+1]`|
//! | [`Generic<T>`]    | `[T]`    | `T` (cloned) | `buf[i]`               |

use std::marker::PhantomData;

use num_complex::Complex;
use num_traits::Float;

use crate::dtype::{Dtype, Element};

/// Read access to elements of a buffer.
pub trait Accessor {
    /// Underlying storage.
    type Buffer: ?Sized;
    /// Value produced for one logical element.
    type Value;
    /// Data type tag of the elements.
    const DTYPE: Dtype;

    /// Number of logical elements in `buf`.
    fn len(buf: &Self::Buffer) -> usize;

    /// Read element `index`. Panics if `index >= Self::len(buf)`.
    fn get(buf: &Self::Buffer, index: usize) -> Self::Value;
}

/// Write access to elements of a buffer.
pub trait Mutator: Accessor {
    /// Write element `index`. Panics if `index >= Self::len(buf)`.
    fn set(buf: &mut Self::Buffer, index: usize, value: Self::Value);
}

/// Plain slices of [`Element`] values.
#[derive(Debug, Clone, Copy, Default)]
pub struct Direct<T>(PhantomData<T>);

impl<T: Element> Accessor for Direct<T> {
    type Buffer = [T];
    type Value = T;
    const DTYPE: Dtype = T::DTYPE;

    #[inline(always)]
    fn len(buf: &[T]) -> usize {
        buf.len()
    }

    #[inline(always)]
    fn get(buf: &[T], index: usize) -> T {
        buf[index]
    }
}

impl<T: Element> Mutator for Direct<T> {
    #[inline(always)]
    fn set(buf: &mut [T], index: usize, value: T) {
        buf[index] = value;
    }
}

/// Complex values stored as `[re, im, re, im, ...]` in a real slice.
///
/// Element `i` occupies slots `2i` and `2i + 1`. Strides and offsets of views
/// over this accessor count complex elements, not slots. A trailing unpaired
/// slot is not an element.
#[derive(Debug, Clone, Copy, Default)]
pub struct Interleaved<T>(PhantomData<T>);

impl<T> Accessor for Interleaved<T>
where
    T: Float + 'static,
    Complex<T>: Element,
{
    type Buffer = [T];
    type Value = Complex<T>;
    const DTYPE: Dtype = <Complex<T> as Element>::DTYPE;

    #[inline(always)]
    fn len(buf: &[T]) -> usize {
        buf.len() / 2
    }

    #[inline(always)]
    fn get(buf: &[T], index: usize) -> Complex<T> {
        Complex::new(buf[2 * index], buf[2 * index + 1])
    }
}

impl<T> Mutator for Interleaved<T>
where
    T: Float + 'static,
    Complex<T>: Element,
{
    #[inline(always)]
    fn set(buf: &mut [T], index: usize, value: Complex<T>) {
        buf[2 * index] = value.re;
        buf[2 * index + 1] = value.im;
    }
}

/// Slices of arbitrary cloneable values.
///
/// Reads clone the stored value. The element width is unknown to the
/// traversal engine, so blocked traversal falls back to element-count tiles.
#[derive(Debug, Clone, Copy, Default)]
pub struct Generic<T>(PhantomData<T>);

impl<T: Clone> Accessor for Generic<T> {
    type Buffer = [T];
    type Value = T;
    const DTYPE: Dtype = Dtype::Generic;

    #[inline(always)]
    fn len(buf: &[T]) -> usize {
        buf.len()
    }

    #[inline(always)]
    fn get(buf: &[T], index: usize) -> T {
        buf[index].clone()
    }
}

impl<T: Clone> Mutator for Generic<T> {
    #[inline(always)]
    fn set(buf: &mut [T], index: usize, value: T) {
        buf[index] = value;
    }
}
