// noise/pink.rs
// Gaussian 1/f noise synthesized in the frequency domain

use rand::Rng;
use rand_distr::{Distribution, StandardNormal};
use rustfft::num_complex::Complex;
use rustfft::FftPlanner;

/// Zero-mean Gaussian trace of length `n` with a 1/f power spectrum,
/// normalized to unit variance.
///
/// Each positive-frequency bin gets a random complex amplitude scaled by
/// `f^-1/2`; the Hermitian spectrum is inverted with an FFT. The DC bin
/// takes the amplitude of the lowest nonzero frequency. Traces shorter
/// than two points have no spectrum and fall back to white noise.
pub fn pink_noise<R: Rng + ?Sized>(n: usize, rng: &mut R) -> Vec<f64> {
    if n < 2 {
        return (0..n)
            .map(|_| {
                let z: f64 = StandardNormal.sample(rng);
                z
            })
            .collect();
    }

    let bins = n / 2 + 1;
    let even = n % 2 == 0;
    let nf = n as f64;

    // rfft frequencies k/n, clipped below at 1/n
    let amplitude: Vec<f64> = (0..bins)
        .map(|k| {
            let f = (k.max(1) as f64) / nf;
            f.powf(-0.5)
        })
        .collect();

    // Expected standard deviation of the unnormalized trace
    let mut weights: Vec<f64> = amplitude[1..].to_vec();
    if even {
        if let Some(last) = weights.last_mut() {
            *last *= 0.5;
        }
    }
    let sigma = 2.0 * weights.iter().map(|w| w * w).sum::<f64>().sqrt() / nf;

    let mut half: Vec<Complex<f64>> = amplitude
        .iter()
        .map(|&a| {
            let re: f64 = StandardNormal.sample(rng);
            let im: f64 = StandardNormal.sample(rng);
            Complex::new(a * re, a * im)
        })
        .collect();

    // DC and Nyquist bins must be real
    half[0].im = 0.0;
    half[0].re *= std::f64::consts::SQRT_2;
    if even {
        half[bins - 1].im = 0.0;
        half[bins - 1].re *= std::f64::consts::SQRT_2;
    }

    let mut spectrum = vec![Complex::new(0.0, 0.0); n];
    for (k, value) in half.iter().enumerate() {
        spectrum[k] = *value;
        if k > 0 && k < n - k {
            spectrum[n - k] = value.conj();
        }
    }

    let mut planner = FftPlanner::<f64>::new();
    let fft = planner.plan_fft_inverse(n);
    fft.process(&mut spectrum);

    spectrum.iter().map(|c| c.re / nf / sigma).collect()
}
