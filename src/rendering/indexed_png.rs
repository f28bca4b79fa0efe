//! Indexed PNG output for quantized thumbnails.
//!
//! Four palette entries fit in two bits per pixel, so the image is written
//! as color type 3 with a 4-entry PLTE and packed rows, then recompressed
//! with oxipng.

use palette_quant::QuantizedImage;
use std::io::Cursor;

use crate::error::JobError;

/// Encode `image` as an indexed 2-bit PNG.
///
/// With `optimize` set the result is recompressed with oxipng; if oxipng
/// fails the unoptimized bytes are returned.
pub fn encode_indexed_png(image: &QuantizedImage, optimize: bool) -> Result<Vec<u8>, JobError> {
    let plte: Vec<u8> = image
        .palette()
        .colors()
        .iter()
        .flat_map(|c| c.to_bytes())
        .collect();
    let packed = pack_nbits(image.indices(), image.width() as u32, 2);

    // Fast settings; oxipng picks filters and compression afterwards
    let png_bytes = encode_png(
        image.width() as u32,
        image.height() as u32,
        &plte,
        &packed,
    )?;

    if !optimize {
        return Ok(png_bytes);
    }

    let optimized = oxipng::optimize_from_memory(
        &png_bytes,
        &oxipng::Options {
            strip: oxipng::StripChunks::Safe,
            optimize_alpha: false,
            ..Default::default()
        },
    )
    .unwrap_or(png_bytes);
    Ok(optimized)
}

fn encode_png(width: u32, height: u32, plte: &[u8], packed: &[u8]) -> Result<Vec<u8>, JobError> {
    let mut buf = Cursor::new(Vec::new());
    {
        let mut encoder = png::Encoder::new(&mut buf, width, height);
        encoder.set_color(png::ColorType::Indexed);
        encoder.set_depth(png::BitDepth::Two);
        encoder.set_compression(png::Compression::Fast);
        encoder.set_filter(png::FilterType::NoFilter);
        encoder.set_palette(plte);
        let mut writer = encoder
            .write_header()
            .map_err(|e| JobError::Encode(e.to_string()))?;
        writer
            .write_image_data(packed)
            .map_err(|e| JobError::Encode(e.to_string()))?;
    }
    Ok(buf.into_inner())
}

/// Pack pixel values into N-bit PNG row data (1, 2, or 4 bits per pixel).
///
/// Rows start on a byte boundary; the last byte of a row is zero-padded.
fn pack_nbits(indices: &[u8], width: u32, bits: u8) -> Vec<u8> {
    let pixels_per_byte = 8 / bits as usize;
    let bytes_per_row = (width as usize).div_ceil(pixels_per_byte);
    let height = indices.len() / width as usize;
    let mask = (1u8 << bits) - 1;
    let mut packed = Vec::with_capacity(bytes_per_row * height);

    for row in indices.chunks(width as usize) {
        let mut byte = 0u8;
        for (i, &idx) in row.iter().enumerate() {
            let shift = (8 - bits) - (i % pixels_per_byte) as u8 * bits;
            byte |= (idx & mask) << shift;

            if (i % pixels_per_byte) == pixels_per_byte - 1 || i == row.len() - 1 {
                packed.push(byte);
                byte = 0;
            }
        }
    }

    packed
}
