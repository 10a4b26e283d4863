// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! Signed distance field generation
//!
//! [`render_sdf`] transforms a single-channel glyph coverage bitmap into a
//! padded signed distance field. One stored SDF bitmap may then be drawn
//! crisply at arbitrary scale, which is why map renderers cache glyphs in
//! this form.
//!
//! The distance transform is the exact Euclidean distance transform of
//! Felzenszwalb & Huttenlocher, computed over squared distances on two
//! grids (one seeded from coverage, one from its complement) so that both
//! the inside and the outside of the glyph carry a distance. Anti-aliased
//! edge pixels seed fractional distances, which keeps the reconstructed
//! edge position sub-pixel accurate.

/// Large finite stand-in for "no sample here".
///
/// A finite value avoids `inf - inf` in the envelope intersection math.
const INF: f64 = 1e20;

/// Transform a coverage bitmap into a padded signed distance field
///
/// `coverage` is row-major, one byte per pixel (0 = background, 255 = full
/// coverage), `width * height` bytes. The result has dimensions
/// `(width + 2 * margin) × (height + 2 * margin)`; the input is centred
/// within it and the added border is treated as background.
///
/// Each output byte encodes the signed distance to the nearest
/// coverage/background boundary, quantized so that 128 sits on the
/// boundary: values above 128 are inside the glyph, values below are
/// outside. The encoded falloff spans `margin` pixels on either side of
/// the boundary.
///
/// This function reads no shared state and may be called concurrently.
///
/// # Panics
///
/// Panics if `coverage.len() != width * height` or if `width * height == 0`.
pub fn render_sdf(coverage: &[u8], width: usize, height: usize, margin: usize) -> Vec<u8> {
    assert_eq!(coverage.len(), width * height);
    assert!(width > 0 && height > 0);

    let gw = width + 2 * margin;
    let gh = height + 2 * margin;

    // Border cells are fully outside: zero distance to background,
    // unbounded distance to coverage.
    let mut outer = vec![INF; gw * gh];
    let mut inner = vec![0.0; gw * gh];

    for y in 0..height {
        for x in 0..width {
            let i = (y + margin) * gw + (x + margin);
            match coverage[y * width + x] {
                0 => (),
                255 => {
                    outer[i] = 0.0;
                    inner[i] = INF;
                }
                a => {
                    // Partial coverage: seed a fractional squared distance
                    // on whichever side of the 50% threshold the pixel is.
                    let a = f64::from(a) / 255.0;
                    outer[i] = (0.5 - a).max(0.0).powi(2);
                    inner[i] = (a - 0.5).max(0.0).powi(2);
                }
            }
        }
    }

    edt(&mut outer, gw, gh);
    edt(&mut inner, gw, gh);

    let radius = (2 * margin.max(1)) as f64;
    let mut out = vec![0u8; gw * gh];
    for (i, byte) in out.iter_mut().enumerate() {
        let dist = outer[i].sqrt() - inner[i].sqrt();
        *byte = (255.0 - 255.0 * (dist / radius + 0.5)).round().clamp(0.0, 255.0) as u8;
    }
    out
}

/// Two-dimensional squared Euclidean distance transform, in place
///
/// Runs the one-dimensional transform over every column, then every row.
fn edt(grid: &mut [f64], width: usize, height: usize) {
    let n = width.max(height);
    let mut f = vec![0.0; n];
    let mut d = vec![0.0; n];
    let mut v = vec![0usize; n];
    let mut z = vec![0.0; n + 1];

    for x in 0..width {
        for y in 0..height {
            f[y] = grid[y * width + x];
        }
        edt_1d(&f[..height], &mut d[..height], &mut v[..height], &mut z[..height + 1]);
        for y in 0..height {
            grid[y * width + x] = d[y];
        }
    }

    for y in 0..height {
        let row = &mut grid[y * width..(y + 1) * width];
        f[..width].copy_from_slice(row);
        edt_1d(&f[..width], &mut d[..width], &mut v[..width], &mut z[..width + 1]);
        row.copy_from_slice(&d[..width]);
    }
}

/// One-dimensional squared distance transform (lower envelope of parabolas)
fn edt_1d(f: &[f64], d: &mut [f64], v: &mut [usize], z: &mut [f64]) {
    let n = f.len();
    let mut k = 0;
    v[0] = 0;
    z[0] = -INF;
    z[1] = INF;

    for q in 1..n {
        let fq = f[q] + (q * q) as f64;
        let s = loop {
            let p = v[k];
            let s = (fq - f[p] - (p * p) as f64) / (2 * (q - p)) as f64;
            if s > z[k] {
                break s;
            }
            k -= 1;
        };
        k += 1;
        v[k] = q;
        z[k] = s;
        z[k + 1] = INF;
    }

    k = 0;
    for q in 0..n {
        while z[k + 1] < q as f64 {
            k += 1;
        }
        let p = v[k];
        let dq = q as f64 - p as f64;
        d[q] = dq * dq + f[p];
    }
}
