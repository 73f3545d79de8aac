#![cfg(feature = "rayon")]

use probekernel::lowlevel::{shift_wrapped_bilinear, shift_wrapped_fourier};
use probekernel::{build_kernel, KernelSpec, OwnedImage};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn make_probe(width: usize, height: usize, seed: u64) -> OwnedImage<f64> {
    let mut rng = StdRng::seed_from_u64(seed);
    let data = (0..width * height)
        .map(|_| rng.random_range(0.0..10.0))
        .collect();
    OwnedImage::new(data, width, height).unwrap()
}

/// Reference shift built from single-row and single-column images, so every
/// pass runs as one chunk. Odd sizes keep each 1D pass real-valued.
fn fourier_reference(src: &OwnedImage<f64>, dx: f64, dy: f64) -> OwnedImage<f64> {
    let (w, h) = (src.width(), src.height());
    let mut rows = Vec::with_capacity(w * h);
    for y in 0..h {
        let row = OwnedImage::new(src.data()[y * w..(y + 1) * w].to_vec(), w, 1).unwrap();
        rows.extend(shift_wrapped_fourier(row.view(), dx, 0.0).into_vec());
    }

    let mut out = vec![0.0; w * h];
    for x in 0..w {
        let column: Vec<f64> = (0..h).map(|y| rows[y * w + x]).collect();
        let column = OwnedImage::new(column, 1, h).unwrap();
        let shifted = shift_wrapped_fourier(column.view(), 0.0, dy);
        for (y, value) in shifted.into_vec().into_iter().enumerate() {
            out[y * w + x] = value;
        }
    }
    OwnedImage::new(out, w, h).unwrap()
}

#[test]
fn parallel_bilinear_matches_per_pixel_formula() {
    let probe = make_probe(37, 29, 11);
    let (w, h) = (probe.width() as i64, probe.height() as i64);
    let (dx, dy) = (3.25f64, -7.5f64);
    let shifted = shift_wrapped_bilinear(probe.view(), dx, dy);

    let (x0, y0) = (dx.floor(), dy.floor());
    let (wx, wy) = (dx - x0, dy - y0);
    let (x0, y0) = (x0 as i64, y0 as i64);
    let at = |x: i64, y: i64| {
        probe
            .get(x.rem_euclid(w) as usize, y.rem_euclid(h) as usize)
            .unwrap()
    };
    for y in 0..h {
        for x in 0..w {
            let expected = at(x - x0, y - y0) * (1.0 - wx) * (1.0 - wy)
                + at(x - x0 - 1, y - y0) * wx * (1.0 - wy)
                + at(x - x0, y - y0 - 1) * (1.0 - wx) * wy
                + at(x - x0 - 1, y - y0 - 1) * wx * wy;
            assert_eq!(shifted.get(x as usize, y as usize), Some(expected));
        }
    }
}

#[test]
fn parallel_fourier_matches_separable_reference() {
    let probe = make_probe(21, 15, 3);
    let shifted = shift_wrapped_fourier(probe.view(), 1.3, -2.6);
    let reference = fourier_reference(&probe, 1.3, -2.6);
    for (a, b) in shifted.data().iter().zip(reference.data()) {
        assert!((a - b).abs() < 1e-9, "{a} vs {b}");
    }
}

#[test]
fn parallel_kernels_are_repeatable() {
    let probe = make_probe(64, 48, 7);
    for spec in [
        KernelSpec::flat(),
        KernelSpec::gaussian(1.2),
        KernelSpec::sigmoid(3.0, 9.0),
        KernelSpec::sigmoid_log(3.0, 9.0),
    ] {
        let a = build_kernel(probe.view(), &spec).unwrap();
        let b = build_kernel(probe.view(), &spec).unwrap();
        assert_eq!(a, b, "{spec:?}");
    }
}
