//! Contrast Limited Adaptive Histogram Equalization on an 8-bit plane.
//!
//! The plane is divided into a `tiles x tiles` grid. Each tile gets its own
//! equalization lookup table built from a clipped histogram; every output
//! pixel blends the tables of the (up to) four nearest tile centers.
//!
//! Planes whose sides are not multiples of the grid are extended to the
//! right and bottom by reflection (`dcb|abcd|cba`, edge not repeated) for
//! histogram building only. Output always has the input's dimensions.

const BINS: usize = 256;

/// Equalize `plane` (row-major, `width * height` bytes).
///
/// `clip_limit <= 0` disables clipping. `tiles` must be at least 1.
pub fn clahe(plane: &[u8], width: usize, height: usize, clip_limit: f32, tiles: usize) -> Vec<u8> {
    debug_assert_eq!(plane.len(), width * height);
    if plane.is_empty() || tiles == 0 {
        return plane.to_vec();
    }

    let padded_w = width + (tiles - width % tiles) % tiles;
    let padded_h = height + (tiles - height % tiles) % tiles;
    let tile_w = padded_w / tiles;
    let tile_h = padded_h / tiles;
    let tile_area = tile_w * tile_h;

    let clip = if clip_limit > 0.0 {
        Some(((clip_limit * tile_area as f32 / BINS as f32) as usize).max(1))
    } else {
        None
    };
    let lut_scale = 255.0 / tile_area as f32;

    let mut luts = vec![[0u8; BINS]; tiles * tiles];
    for ty in 0..tiles {
        for tx in 0..tiles {
            let mut hist = [0usize; BINS];
            for y in ty * tile_h..(ty + 1) * tile_h {
                let row = reflect_101(y, height) * width;
                for x in tx * tile_w..(tx + 1) * tile_w {
                    hist[plane[row + reflect_101(x, width)] as usize] += 1;
                }
            }
            if let Some(limit) = clip {
                clip_histogram(&mut hist, limit);
            }

            let lut = &mut luts[ty * tiles + tx];
            let mut sum = 0usize;
            for (entry, &count) in lut.iter_mut().zip(hist.iter()) {
                sum += count;
                *entry = round_to_u8(sum as f32 * lut_scale);
            }
        }
    }

    let inv_tw = 1.0 / tile_w as f32;
    let inv_th = 1.0 / tile_h as f32;
    let last = tiles as isize - 1;

    let mut out = vec![0u8; plane.len()];
    for y in 0..height {
        let tyf = y as f32 * inv_th - 0.5;
        let ty1 = tyf.floor() as isize;
        let ya = tyf - ty1 as f32;
        let ty2 = (ty1 + 1).min(last) as usize;
        let ty1 = ty1.max(0) as usize;

        for x in 0..width {
            let txf = x as f32 * inv_tw - 0.5;
            let tx1 = txf.floor() as isize;
            let xa = txf - tx1 as f32;
            let tx2 = (tx1 + 1).min(last) as usize;
            let tx1 = tx1.max(0) as usize;

            let v = plane[y * width + x] as usize;
            let at = |ty: usize, tx: usize| luts[ty * tiles + tx][v] as f32;

            let top = at(ty1, tx1) * (1.0 - xa) + at(ty1, tx2) * xa;
            let bottom = at(ty2, tx1) * (1.0 - xa) + at(ty2, tx2) * xa;
            out[y * width + x] = round_to_u8(top * (1.0 - ya) + bottom * ya);
        }
    }

    out
}

/// Cap every bin at `limit` and hand the excess back evenly; what does not
/// divide evenly goes one count at a time to bins spaced across the range.
fn clip_histogram(hist: &mut [usize; BINS], limit: usize) {
    let mut clipped = 0;
    for count in hist.iter_mut() {
        if *count > limit {
            clipped += *count - limit;
            *count = limit;
        }
    }

    let batch = clipped / BINS;
    let mut residual = clipped - batch * BINS;
    for count in hist.iter_mut() {
        *count += batch;
    }

    if residual > 0 {
        let step = (BINS / residual).max(1);
        let mut i = 0;
        while i < BINS && residual > 0 {
            hist[i] += 1;
            residual -= 1;
            i += step;
        }
    }
}

/// Mirror an out-of-range index back into `0..n` without repeating the edge.
#[inline]
fn reflect_101(i: usize, n: usize) -> usize {
    if n == 1 {
        return 0;
    }
    let period = 2 * (n - 1);
    let m = i % period;
    if m >= n {
        period - m
    } else {
        m
    }
}

#[inline]
fn round_to_u8(v: f32) -> u8 {
    v.round_ties_even().clamp(0.0, 255.0) as u8
}
