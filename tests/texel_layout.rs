// SPDX-License-Identifier: Parity-7.0.0 OR PolyForm-Noncommercial-1.0.0
//! Bottom-up storage layout of texel buffers.

use bindshadow::pixel_formats::Unorm4;
use bindshadow::texel_buffer::Texel;
use bindshadow::{TexelBuffer, TexelBufferError};
use proptest::prelude::*;

#[test]
fn rows_are_stored_bottom_up() {
    let (a, b, c, d) = (10u8, 20, 30, 40);
    let buffer = TexelBuffer::from_rows(&[[a, b], [c, d]]).unwrap();
    assert_eq!(buffer.as_slice(), &[c, d, a, b]);
    assert_eq!(buffer[(0, 0)], a);
    assert_eq!(buffer[(1, 0)], b);
    assert_eq!(buffer[(0, 1)], c);
    assert_eq!(buffer[(1, 1)], d);
}

#[test]
fn constructors_agree() {
    let rows = [[1u16, 2, 3], [4, 5, 6]];
    let from_rows = TexelBuffer::from_rows(&rows).unwrap();
    let from_array = TexelBuffer::from_array_2d(&rows).unwrap();
    let from_columns = TexelBuffer::from_columns(&[[1u16, 4], [2, 5], [3, 6]]).unwrap();
    let from_fn = TexelBuffer::new_with(3, 2, 1, |t| rows[t.y][t.x]).unwrap();
    let from_raw = TexelBuffer::from_raw(3, 2, 1, vec![4u16, 5, 6, 1, 2, 3]).unwrap();
    assert_eq!(from_rows, from_array);
    assert_eq!(from_rows, from_columns);
    assert_eq!(from_rows, from_fn);
    assert_eq!(from_rows, from_raw);
}

#[test]
fn layers_follow_one_another() {
    let layers = [[[1u8, 2], [3, 4]], [[5, 6], [7, 8]]];
    let buffer = TexelBuffer::from_array_3d(&layers).unwrap();
    assert_eq!(buffer.as_slice(), &[3, 4, 1, 2, 7, 8, 5, 6]);
    assert_eq!(buffer[(1, 0, 1)], 6);
    let nested: Vec<Vec<Vec<u8>>> = layers
        .iter()
        .map(|l| l.iter().map(|r| r.to_vec()).collect())
        .collect();
    assert_eq!(TexelBuffer::from_layers(&nested).unwrap(), buffer);
}

#[test]
fn mismatched_input_is_rejected() {
    assert_eq!(
        TexelBuffer::from_raw(2, 2, 1, vec![0u8; 3]),
        Err(TexelBufferError::LengthMismatch {
            expected: 4,
            actual: 3
        })
    );
    assert!(matches!(
        TexelBuffer::<u8>::from_raw(0, 2, 1, vec![]),
        Err(TexelBufferError::ZeroDimension { .. })
    ));
    assert!(matches!(
        TexelBuffer::from_rows(&[vec![1u8, 2], vec![3]]),
        Err(TexelBufferError::Ragged { row: 1, .. })
    ));
    let side = 1usize << (usize::BITS / 2 + 1);
    assert!(matches!(
        TexelBuffer::<u8>::from_raw(side, side, 1, vec![]),
        Err(TexelBufferError::TooLarge { .. })
    ));
    let empty: [[u8; 0]; 0] = [];
    assert!(TexelBuffer::from_rows(&empty).is_err());
}

#[test]
fn writes_land_at_the_flipped_offset() {
    let mut buffer = TexelBuffer::<u8>::new_2d(3, 3).unwrap();
    buffer[Texel::new(2, 0, 0)] = 9;
    assert_eq!(buffer[8], 9);
    buffer[(0, 2)] = 7;
    assert_eq!(buffer[0], 7);
}

#[test]
fn bytes_are_element_strided() {
    let texel = Unorm4 { r: 1, g: 2, b: 3, a: 4 };
    let buffer = TexelBuffer::new_with(2, 1, 1, |_| texel).unwrap();
    assert_eq!(buffer.byte_len(), 8);
    assert_eq!(buffer.as_bytes(), &[1, 2, 3, 4, 1, 2, 3, 4]);
}

#[test]
fn zero_sized_sub_sections_are_errors() {
    let buffer = TexelBuffer::<u8>::new_2d(4, 4).unwrap();
    assert!(buffer.sub_section_2d(0, 0, 0, 2).is_err());
}

#[test]
#[should_panic]
fn out_of_range_sub_sections_panic() {
    let buffer = TexelBuffer::<u8>::new_2d(4, 4).unwrap();
    let _ = buffer.sub_section_2d(3, 3, 2, 2);
}

fn sized_buffer() -> impl Strategy<Value = TexelBuffer<u32>> {
    (1usize..8, 1usize..8, 1usize..4).prop_flat_map(|(w, h, d)| {
        prop::collection::vec(any::<u32>(), w * h * d)
            .prop_map(move |v| TexelBuffer::from_raw(w, h, d, v).unwrap())
    })
}

proptest! {
    #[test]
    fn logical_index_matches_storage_formula(buffer in sized_buffer()) {
        let (w, h, d) = (buffer.width(), buffer.height(), buffer.depth());
        for z in 0..d {
            for y in 0..h {
                for x in 0..w {
                    prop_assert_eq!(buffer[(x, y, z)], buffer[x + (h - 1 - y) * w + z * w * h]);
                }
            }
        }
    }

    #[test]
    fn sub_section_reads_the_same_texels(
        buffer in sized_buffer(),
        seed in any::<(usize, usize, usize, usize, usize, usize)>(),
    ) {
        let (w, h, d) = (buffer.width(), buffer.height(), buffer.depth());
        let x = seed.0 % w;
        let y = seed.1 % h;
        let z = seed.2 % d;
        let sw = 1 + seed.3 % (w - x);
        let sh = 1 + seed.4 % (h - y);
        let sd = 1 + seed.5 % (d - z);
        let sub = buffer.sub_section_3d(x, y, z, sw, sh, sd).unwrap();
        prop_assert_eq!((sub.width(), sub.height(), sub.depth()), (sw, sh, sd));
        for k in 0..sd {
            for j in 0..sh {
                for i in 0..sw {
                    prop_assert_eq!(sub[(i, j, k)], buffer[(x + i, y + j, z + k)]);
                }
            }
        }
    }

    #[test]
    fn sub_section_1d_is_a_storage_slice(buffer in sized_buffer(), a in any::<usize>(), b in any::<usize>()) {
        let offset = a % buffer.len();
        let size = 1 + b % (buffer.len() - offset);
        let sub = buffer.sub_section_1d(offset, size).unwrap();
        prop_assert_eq!(sub.as_slice(), &buffer.as_slice()[offset..offset + size]);
    }

    #[test]
    fn rows_round_trip(rows in (1usize..6, 1usize..6).prop_flat_map(|(w, h)| {
        prop::collection::vec(prop::collection::vec(any::<u8>(), w), h)
    })) {
        let buffer = TexelBuffer::from_rows(&rows).unwrap();
        let mut expected: Vec<u8> = Vec::new();
        for row in rows.iter().rev() {
            expected.extend_from_slice(row);
        }
        prop_assert_eq!(buffer.as_slice(), &expected[..]);
        for (y, row) in rows.iter().enumerate() {
            for (x, v) in row.iter().enumerate() {
                prop_assert_eq!(buffer[(x, y)], *v);
            }
        }
    }
}
