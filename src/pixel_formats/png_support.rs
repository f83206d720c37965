// SPDX-License-Identifier: Parity-7.0.0 OR PolyForm-Noncommercial-1.0.0
use crate::error::TexelBufferError;
use crate::pixel_formats::{CPixel, Unorm4, pixel_as_bytes_mut};
use png::{BitDepth, ColorType};
use std::io::Cursor;

/// Texel types a PNG can decode into directly.
///
/// # Safety
/// The in-memory layout of `Self` must be exactly one decoded PNG pixel of
/// [`PngPixel::png_color_type`] at [`PngPixel::png_bit_depth`].
pub unsafe trait PngPixel: CPixel {
    fn png_color_type() -> ColorType;
    fn png_bit_depth() -> BitDepth;
}

unsafe impl PngPixel for Unorm4 {
    fn png_color_type() -> ColorType {
        ColorType::Rgba
    }

    fn png_bit_depth() -> BitDepth {
        BitDepth::Eight
    }
}

unsafe impl PngPixel for u8 {
    fn png_color_type() -> ColorType {
        ColorType::Grayscale
    }

    fn png_bit_depth() -> BitDepth {
        BitDepth::Eight
    }
}

/// Decodes `bytes` into top-down rows.  Returns `(width, height, texels)`.
pub(crate) fn decode<T: PngPixel>(bytes: &[u8]) -> Result<(usize, usize, Vec<T>), TexelBufferError> {
    let decoder = png::Decoder::new(Cursor::new(bytes));
    let mut reader = decoder
        .read_info()
        .map_err(|e| TexelBufferError::Png(e.to_string()))?;
    let (color_type, bit_depth) = {
        let info = reader.info();
        (info.color_type, info.bit_depth)
    };
    if color_type != T::png_color_type() || bit_depth != T::png_bit_depth() {
        return Err(TexelBufferError::Png(format!(
            "expected {:?}/{:?} but the image is {color_type:?}/{bit_depth:?}",
            T::png_color_type(),
            T::png_bit_depth()
        )));
    }
    let width = reader.info().width as usize;
    let height = reader.info().height as usize;
    logwise::trace_sync!(
        "decoding png {width}x{height}",
        width = width,
        height = height
    );
    let mut texels = vec![T::default(); width * height];
    let frame = reader
        .next_frame(pixel_as_bytes_mut(&mut texels))
        .map_err(|e| TexelBufferError::Png(e.to_string()))?;
    texels.truncate(frame.width as usize * frame.height as usize);
    Ok((frame.width as usize, frame.height as usize, texels))
}

#[cfg(test)]
mod tests {
    use crate::TexelBuffer;
    use crate::error::TexelBufferError;
    use crate::pixel_formats::Unorm4;

    fn encode(width: u32, height: u32, color: png::ColorType, data: &[u8]) -> Vec<u8> {
        let mut out = Vec::new();
        {
            let mut encoder = png::Encoder::new(&mut out, width, height);
            encoder.set_color(color);
            encoder.set_depth(png::BitDepth::Eight);
            let mut writer = encoder.write_header().unwrap();
            writer.write_image_data(data).unwrap();
        }
        out
    }

    #[test]
    fn load_png_flips_rows() {
        // top row red, bottom row blue
        let bytes = encode(
            1,
            2,
            png::ColorType::Rgba,
            &[255, 0, 0, 255, 0, 0, 255, 255],
        );
        let texture = TexelBuffer::<Unorm4>::from_png(&bytes).unwrap();
        assert_eq!(texture.width(), 1);
        assert_eq!(texture.height(), 2);
        assert_eq!(texture[(0, 0)].r, 255);
        assert_eq!(texture.as_slice()[0].b, 255);
    }

    #[test]
    fn grayscale_into_rgba_is_rejected() {
        let bytes = encode(2, 1, png::ColorType::Grayscale, &[1, 2]);
        let err = TexelBuffer::<Unorm4>::from_png(&bytes).unwrap_err();
        assert!(matches!(err, TexelBufferError::Png(_)));
        let gray = TexelBuffer::<u8>::from_png(&bytes).unwrap();
        assert_eq!(gray.as_slice(), &[1, 2]);
    }

    #[test]
    fn garbage_is_an_error() {
        assert!(TexelBuffer::<u8>::from_png(b"not a png").is_err());
    }
}
