// SPDX-License-Identifier: Parity-7.0.0 OR PolyForm-Noncommercial-1.0.0
/*! Packed texel buffers.

A [`TexelBuffer`] carries 1D, 2D or 3D texel data across the driver boundary in the
physical layout the driver expects.

# Coordinate systems

Logical coordinates follow the usual image convention:
- Origin (0, 0, 0) is the top-left texel of the first layer
- X increases to the right
- Y increases downward
- Z selects the layer

Storage, on the other hand, is bottom-up, which is the order the driver reads rows
in.  The storage offset of a logical texel is

```text
index(x, y, z) = x + (height - 1 - y) * width + z * width * height
```

so the top logical row is the *last* row in memory.  Every constructor and
conversion in this module produces that layout; nothing ever hands the driver
top-down rows.

# Example

```
use bindshadow::TexelBuffer;

// row 0 is [1, 2], row 1 is [3, 4]
let buffer = TexelBuffer::from_rows(&[vec![1u8, 2], vec![3, 4]]).unwrap();

// stored bottom row first
assert_eq!(buffer.as_slice(), &[3, 4, 1, 2]);
// but read back logically
assert_eq!(buffer[(0, 0)], 1);
assert_eq!(buffer[(1, 1)], 4);
```
*/

use crate::error::TexelBufferError;
use crate::pixel_formats::PngPixel;
use crate::pixel_formats::{CPixel, pixel_as_bytes, pixel_as_bytes_mut};
use std::ops::{Index, IndexMut};

/// Logical texel coordinates.
///
/// # Examples
///
/// ```
/// use bindshadow::texel_buffer::Texel;
///
/// let texel = Texel::new(10, 20, 0);
/// assert_eq!(Texel::ZERO.x, 0);
/// # let _ = texel;
/// ```
#[derive(Copy, Clone, PartialEq, Eq, Debug, Hash)]
pub struct Texel {
    pub x: usize,
    pub y: usize,
    pub z: usize,
}

impl Texel {
    pub const ZERO: Texel = Texel { x: 0, y: 0, z: 0 };

    pub const fn new(x: usize, y: usize, z: usize) -> Self {
        Texel { x, y, z }
    }

    /// Storage offset of this texel in a buffer of the given width and height.
    ///
    /// `y` must be below `height`; a larger `y` overflows.
    const fn vec_offset(&self, width: usize, height: usize) -> usize {
        self.x + (height - 1 - self.y) * width + self.z * width * height
    }
}

impl From<(usize, usize)> for Texel {
    fn from((x, y): (usize, usize)) -> Self {
        Texel { x, y, z: 0 }
    }
}
impl From<(usize, usize, usize)> for Texel {
    fn from((x, y, z): (usize, usize, usize)) -> Self {
        Texel { x, y, z }
    }
}

/// A flat, full-size, bottom-up container of texels.
///
/// The element type is any [`CPixel`], so the buffer can be handed to the driver as
/// bytes with an element stride equal to the element's byte width.
///
/// Dimensions are fixed at construction and are each at least 1.  The buffer never
/// grows.
#[derive(Debug, Clone, PartialEq)]
pub struct TexelBuffer<T: CPixel> {
    data: Vec<T>,
    width: usize,
    height: usize,
    depth: usize,
}

impl<T: CPixel> TexelBuffer<T> {
    /// `width * height * depth`, once every dimension is at least 1 and the whole
    /// buffer fits in an allocation.
    fn texel_count(width: usize, height: usize, depth: usize) -> Result<usize, TexelBufferError> {
        if width < 1 || height < 1 || depth < 1 {
            return Err(TexelBufferError::ZeroDimension {
                width,
                height,
                depth,
            });
        }
        width
            .checked_mul(height)
            .and_then(|n| n.checked_mul(depth))
            .filter(|n| {
                n.checked_mul(std::mem::size_of::<T>())
                    .is_some_and(|bytes| bytes <= isize::MAX as usize)
            })
            .ok_or(TexelBufferError::TooLarge {
                width,
                height,
                depth,
            })
    }

    /// Wraps values that are already in storage (bottom-up) order.
    ///
    /// # Errors
    ///
    /// Fails if any dimension is 0, if the dimensions overflow, or if
    /// `values.len() != width * height * depth`.
    pub fn from_raw(
        width: usize,
        height: usize,
        depth: usize,
        values: Vec<T>,
    ) -> Result<Self, TexelBufferError> {
        let expected = Self::texel_count(width, height, depth)?;
        if values.len() != expected {
            return Err(TexelBufferError::LengthMismatch {
                expected,
                actual: values.len(),
            });
        }
        Ok(TexelBuffer {
            data: values,
            width,
            height,
            depth,
        })
    }

    /// A 1D buffer filled with the default texel.
    pub fn new_1d(length: usize) -> Result<Self, TexelBufferError> {
        Self::new_3d(length, 1, 1)
    }

    /// A 2D buffer filled with the default texel.
    pub fn new_2d(width: usize, height: usize) -> Result<Self, TexelBufferError> {
        Self::new_3d(width, height, 1)
    }

    /// A 3D buffer filled with the default texel.
    pub fn new_3d(width: usize, height: usize, depth: usize) -> Result<Self, TexelBufferError> {
        let len = Self::texel_count(width, height, depth)?;
        Ok(TexelBuffer {
            data: vec![T::default(); len],
            width,
            height,
            depth,
        })
    }

    /// Builds a buffer by calling `f` for every logical texel.
    ///
    /// # Examples
    ///
    /// ```
    /// use bindshadow::TexelBuffer;
    ///
    /// // a vertical gradient: 0 at the top row
    /// let b = TexelBuffer::new_with(3, 2, 1, |t| t.y as u8).unwrap();
    /// assert_eq!(b[(2, 0)], 0);
    /// assert_eq!(b.as_slice(), &[1, 1, 1, 0, 0, 0]);
    /// ```
    pub fn new_with<F: FnMut(Texel) -> T>(
        width: usize,
        height: usize,
        depth: usize,
        mut f: F,
    ) -> Result<Self, TexelBufferError> {
        let len = Self::texel_count(width, height, depth)?;
        let mut data = Vec::with_capacity(len);
        //push in storage order so each texel is written exactly once
        for z in 0..depth {
            for row in 0..height {
                let y = height - 1 - row;
                for x in 0..width {
                    data.push(f(Texel { x, y, z }));
                }
            }
        }
        Ok(TexelBuffer {
            data,
            width,
            height,
            depth,
        })
    }

    /// Builds a 2D buffer from rows, top row first.
    ///
    /// Rows may be any slice-like type, so both `Vec<Vec<T>>` and `&[&[T]]` work.
    ///
    /// # Errors
    ///
    /// Fails on an empty input or on rows of differing length.
    pub fn from_rows<R: AsRef<[T]>>(rows: &[R]) -> Result<Self, TexelBufferError> {
        let width = uniform_width(rows)?;
        Self::new_with(width, rows.len(), 1, |t| rows[t.y].as_ref()[t.x])
    }

    /// Builds a 2D buffer from columns, leftmost column first, each column top to bottom.
    pub fn from_columns<C: AsRef<[T]>>(columns: &[C]) -> Result<Self, TexelBufferError> {
        let height = uniform_width(columns)?;
        Self::new_with(columns.len(), height, 1, |t| columns[t.x].as_ref()[t.y])
    }

    /// Builds a 2D buffer from a fixed-size array of rows, top row first.
    pub fn from_array_2d<const W: usize, const H: usize>(
        array: &[[T; W]; H],
    ) -> Result<Self, TexelBufferError> {
        Self::new_with(W, H, 1, |t| array[t.y][t.x])
    }

    /// Builds a 3D buffer from a fixed-size array of layers of rows.
    pub fn from_array_3d<const W: usize, const H: usize, const D: usize>(
        array: &[[[T; W]; H]; D],
    ) -> Result<Self, TexelBufferError> {
        Self::new_with(W, H, D, |t| array[t.z][t.y][t.x])
    }

    /// Builds a 3D buffer from layers, each layer a list of rows, top row first.
    ///
    /// # Errors
    ///
    /// Fails if the layers differ in height or if any row differs in width.
    pub fn from_layers<L, R>(layers: &[L]) -> Result<Self, TexelBufferError>
    where
        L: AsRef<[R]>,
        R: AsRef<[T]>,
    {
        let first = layers.first().ok_or(TexelBufferError::ZeroDimension {
            width: 0,
            height: 0,
            depth: 0,
        })?;
        let height = first.as_ref().len();
        let width = uniform_width(first.as_ref())?;
        for (z, layer) in layers.iter().enumerate() {
            let rows = layer.as_ref();
            if rows.len() != height {
                return Err(TexelBufferError::Ragged {
                    row: z,
                    expected: height,
                    actual: rows.len(),
                });
            }
            let layer_width = uniform_width(rows)?;
            if layer_width != width {
                return Err(TexelBufferError::Ragged {
                    row: z * height,
                    expected: width,
                    actual: layer_width,
                });
            }
        }
        Self::new_with(width, height, layers.len(), |t| {
            layers[t.z].as_ref()[t.y].as_ref()[t.x]
        })
    }

    /// Decodes an 8-bit PNG into a 2D buffer.
    ///
    /// The PNG's colour type must match the element type (RGBA for
    /// [`crate::pixel_formats::Unorm4`], grayscale for `u8`).
    pub fn from_png(bytes: &[u8]) -> Result<Self, TexelBufferError>
    where
        T: PngPixel,
    {
        let (width, height, top_down) = crate::pixel_formats::png_support::decode::<T>(bytes)?;
        Self::new_with(width, height, 1, |t| top_down[t.x + t.y * width])
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }
    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }
    #[inline]
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Number of texels in the buffer.
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Always `false`; a texel buffer holds at least one texel.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Size of the buffer in bytes.
    #[inline]
    pub fn byte_len(&self) -> usize {
        std::mem::size_of_val(self.data.as_slice())
    }

    /// The storage in driver order.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.data
    }

    /// The storage as bytes, exactly as the driver will read them.
    pub fn as_bytes(&self) -> &[u8] {
        pixel_as_bytes(&self.data)
    }

    pub(crate) fn as_bytes_mut(&mut self) -> &mut [u8] {
        pixel_as_bytes_mut(&mut self.data)
    }

    pub fn into_raw(self) -> Vec<T> {
        self.data
    }

    /// Iterates the storage in driver order.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.data.iter()
    }

    /// Copies `size` texels starting at storage offset `offset` into a new 1D buffer.
    ///
    /// # Panics
    ///
    /// If `offset + size` exceeds [`Self::len`].
    pub fn sub_section_1d(&self, offset: usize, size: usize) -> Result<Self, TexelBufferError> {
        assert!(
            offset + size <= self.data.len(),
            "sub section {offset}+{size} beyond {}",
            self.data.len()
        );
        Self::new_with(size, 1, 1, |t| self.data[t.x + offset])
    }

    /// Copies the `width`x`height` region whose top-left logical texel is `(x, y)`.
    ///
    /// # Panics
    ///
    /// If the region does not lie inside the buffer.
    pub fn sub_section_2d(
        &self,
        x: usize,
        y: usize,
        width: usize,
        height: usize,
    ) -> Result<Self, TexelBufferError> {
        self.sub_section_3d(x, y, 0, width, height, 1)
    }

    /// Copies a 3D region whose first logical texel is `(x, y, z)`.
    ///
    /// # Panics
    ///
    /// If the region does not lie inside the buffer.
    pub fn sub_section_3d(
        &self,
        x: usize,
        y: usize,
        z: usize,
        width: usize,
        height: usize,
        depth: usize,
    ) -> Result<Self, TexelBufferError> {
        assert!(
            x + width <= self.width && y + height <= self.height && z + depth <= self.depth,
            "sub section at ({x}, {y}, {z}) of {width}x{height}x{depth} beyond {}x{}x{}",
            self.width,
            self.height,
            self.depth
        );
        Self::new_with(width, height, depth, |t| {
            self[Texel {
                x: t.x + x,
                y: t.y + y,
                z: t.z + z,
            }]
        })
    }
}

/// Width shared by every row, or an error naming the first row that differs.
fn uniform_width<T, R: AsRef<[T]>>(rows: &[R]) -> Result<usize, TexelBufferError> {
    let width = rows.first().map(|r| r.as_ref().len()).unwrap_or(0);
    for (row, r) in rows.iter().enumerate() {
        let actual = r.as_ref().len();
        if actual != width {
            return Err(TexelBufferError::Ragged {
                row,
                expected: width,
                actual,
            });
        }
    }
    Ok(width)
}

impl<T: CPixel> Index<usize> for TexelBuffer<T> {
    type Output = T;
    #[inline]
    fn index(&self, index: usize) -> &T {
        &self.data[index]
    }
}
impl<T: CPixel> IndexMut<usize> for TexelBuffer<T> {
    #[inline]
    fn index_mut(&mut self, index: usize) -> &mut T {
        &mut self.data[index]
    }
}

impl<T: CPixel> Index<Texel> for TexelBuffer<T> {
    type Output = T;
    #[inline]
    fn index(&self, index: Texel) -> &T {
        &self.data[index.vec_offset(self.width, self.height)]
    }
}
impl<T: CPixel> IndexMut<Texel> for TexelBuffer<T> {
    #[inline]
    fn index_mut(&mut self, index: Texel) -> &mut T {
        let offset = index.vec_offset(self.width, self.height);
        &mut self.data[offset]
    }
}

impl<T: CPixel> Index<(usize, usize)> for TexelBuffer<T> {
    type Output = T;
    #[inline]
    fn index(&self, index: (usize, usize)) -> &T {
        &self[Texel::from(index)]
    }
}
impl<T: CPixel> IndexMut<(usize, usize)> for TexelBuffer<T> {
    #[inline]
    fn index_mut(&mut self, index: (usize, usize)) -> &mut T {
        &mut self[Texel::from(index)]
    }
}

impl<T: CPixel> Index<(usize, usize, usize)> for TexelBuffer<T> {
    type Output = T;
    #[inline]
    fn index(&self, index: (usize, usize, usize)) -> &T {
        &self[Texel::from(index)]
    }
}
impl<T: CPixel> IndexMut<(usize, usize, usize)> for TexelBuffer<T> {
    #[inline]
    fn index_mut(&mut self, index: (usize, usize, usize)) -> &mut T {
        &mut self[Texel::from(index)]
    }
}

impl<'a, T: CPixel> IntoIterator for &'a TexelBuffer<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;
    fn into_iter(self) -> Self::IntoIter {
        self.data.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_dimension_is_rejected_before_length() {
        let err = TexelBuffer::<u8>::from_raw(0, 1, 1, vec![]).unwrap_err();
        assert!(matches!(err, TexelBufferError::ZeroDimension { width: 0, .. }));
    }

    #[test]
    fn length_must_match_dimensions() {
        let err = TexelBuffer::from_raw(2, 2, 1, vec![1u8, 2, 3]).unwrap_err();
        assert_eq!(
            err,
            TexelBufferError::LengthMismatch {
                expected: 4,
                actual: 3
            }
        );
    }

    #[test]
    fn overflowing_dimensions_are_too_large() {
        let side = 1usize << (usize::BITS / 2 + 1);
        let err = TexelBuffer::<u8>::from_raw(side, side, 1, vec![]).unwrap_err();
        assert_eq!(
            err,
            TexelBufferError::TooLarge {
                width: side,
                height: side,
                depth: 1
            }
        );
        assert!(matches!(
            TexelBuffer::<u8>::new_3d(usize::MAX, 2, 1),
            Err(TexelBufferError::TooLarge { .. })
        ));
    }

    #[test]
    fn byte_size_is_bounded_before_allocating() {
        // the texel count fits but the bytes do not
        assert!(matches!(
            TexelBuffer::<crate::pixel_formats::RGBA16Pixel>::new_1d(usize::MAX / 4),
            Err(TexelBufferError::TooLarge { .. })
        ));
        let mut calls = 0;
        let err = TexelBuffer::<u32>::new_with(usize::MAX / 2, 3, 1, |_| {
            calls += 1;
            0
        });
        assert!(matches!(err, Err(TexelBufferError::TooLarge { .. })));
        assert_eq!(calls, 0);
    }

    #[test]
    fn three_d_offsets_skip_whole_layers() {
        let mut b = TexelBuffer::<u16>::new_3d(2, 3, 2).unwrap();
        b[(1, 0, 1)] = 9;
        // layer 1 starts at 6; logical row 0 is storage row 2
        assert_eq!(b.as_slice()[6 + 2 * 2 + 1], 9);
    }

    #[test]
    fn ragged_rows_are_rejected() {
        let err = TexelBuffer::from_rows(&[vec![1u8, 2], vec![3]]).unwrap_err();
        assert_eq!(
            err,
            TexelBufferError::Ragged {
                row: 1,
                expected: 2,
                actual: 1
            }
        );
    }

    #[test]
    fn empty_rows_are_a_zero_dimension() {
        let rows: [Vec<u8>; 0] = [];
        assert!(matches!(
            TexelBuffer::from_rows(&rows),
            Err(TexelBufferError::ZeroDimension { .. })
        ));
    }

    #[test]
    fn columns_and_rows_agree() {
        let by_rows = TexelBuffer::from_rows(&[[1u8, 2, 3], [4, 5, 6]]).unwrap();
        let by_columns = TexelBuffer::from_columns(&[[1u8, 4], [2, 5], [3, 6]]).unwrap();
        assert_eq!(by_rows, by_columns);
        assert_eq!(by_rows.as_slice(), &[4, 5, 6, 1, 2, 3]);
    }

    #[test]
    fn fixed_arrays_use_the_same_flip() {
        let a = TexelBuffer::from_array_2d(&[[1u8, 2], [3, 4]]).unwrap();
        let b = TexelBuffer::from_rows(&[[1u8, 2], [3, 4]]).unwrap();
        assert_eq!(a, b);

        let c = TexelBuffer::from_array_3d(&[[[1u8, 2], [3, 4]], [[5, 6], [7, 8]]]).unwrap();
        assert_eq!(c.as_slice(), &[3, 4, 1, 2, 7, 8, 5, 6]);
        let d = TexelBuffer::from_layers(&[vec![vec![1u8, 2], vec![3, 4]], vec![vec![5, 6], vec![7, 8]]])
            .unwrap();
        assert_eq!(c, d);
    }

    #[test]
    fn layers_of_different_heights_are_rejected() {
        let err = TexelBuffer::from_layers(&[vec![vec![1u8], vec![2]], vec![vec![3]]]).unwrap_err();
        assert!(matches!(err, TexelBufferError::Ragged { row: 1, expected: 2, actual: 1 }));
    }

    #[test]
    fn sub_section_2d_keeps_logical_orientation() {
        let b = TexelBuffer::from_rows(&[[1u8, 2, 3], [4, 5, 6], [7, 8, 9]]).unwrap();
        let s = b.sub_section_2d(1, 1, 2, 2).unwrap();
        assert_eq!(s[(0, 0)], 5);
        assert_eq!(s[(1, 1)], 9);
        assert_eq!(s.as_slice(), &[8, 9, 5, 6]);
    }

    #[test]
    fn sub_section_3d_copies_layers() {
        let b = TexelBuffer::new_with(2, 2, 3, |t| (t.x + 10 * t.y + 100 * t.z) as u16).unwrap();
        let s = b.sub_section_3d(1, 0, 1, 1, 2, 2).unwrap();
        assert_eq!(s.depth(), 2);
        assert_eq!(s[(0, 0, 0)], 101);
        assert_eq!(s[(0, 1, 1)], 211);
    }

    #[test]
    fn sub_section_is_a_copy() {
        let mut b = TexelBuffer::from_rows(&[[1u8, 2]]).unwrap();
        let s = b.sub_section_1d(0, 2).unwrap();
        b[0] = 42;
        assert_eq!(s[0], 1);
    }

    #[test]
    #[should_panic]
    fn out_of_range_sub_section_panics() {
        let b = TexelBuffer::<u8>::new_1d(4).unwrap();
        let _ = b.sub_section_1d(3, 2);
    }

    #[test]
    fn byte_len_uses_element_width() {
        let b = TexelBuffer::<f32>::new_2d(3, 2).unwrap();
        assert_eq!(b.byte_len(), 24);
        assert_eq!(b.as_bytes().len(), 24);
    }
}
