//! Canonical (Direct Form II) IIR filter

use super::SampleFilter;
use std::f64::consts::PI;

/// Canonical Direct Form II IIR filter.
///
/// Maintains a single shared delay line `w` of length max(|a|, |b|). For
/// each input `x`:
///
/// ```text
/// w[0] = x - a[1]*w[1] - a[2]*w[2] - ...
/// y    = b[0]*w[0] + b[1]*w[1] + ...
/// ```
///
/// then the delay line shifts down one place. `a[0]` is assumed normalized
/// to 1 and is never applied. Arithmetic is f64 internally; the sample
/// interface is f32. Coefficients are fixed at construction.
#[derive(Debug, Clone)]
pub struct CanonicalFilter {
    /// Delay line
    w: Vec<f64>,
    /// Feed-forward coefficients
    b: Vec<f64>,
    /// Feedback coefficients (a[0] unused)
    a: Vec<f64>,
}

impl CanonicalFilter {
    /// Create a filter from feed-forward (`b`) and feedback (`a`)
    /// coefficient vectors, with a zeroed delay line.
    ///
    /// `b` must be non-empty. `a[0]` must already be normalized to 1;
    /// it is never used in the recurrence.
    pub fn new(b: Vec<f64>, a: Vec<f64>) -> Self {
        assert!(!b.is_empty(), "feed-forward coefficients must be non-empty");
        let len = b.len().max(a.len());
        CanonicalFilter {
            w: vec![0.0; len],
            b,
            a,
        }
    }

    /// Zero the delay line, keeping the coefficients
    pub fn reset(&mut self) {
        self.w.fill(0.0);
    }

    /// Second-order low-pass filter (RBJ cookbook)
    pub fn low_pass(sample_rate: u32, frequency: f64, q: f64) -> Self {
        let w0 = 2.0 * PI * frequency / sample_rate as f64;
        let cos_w0 = w0.cos();
        let alpha = w0.sin() / (2.0 * q);
        let a0 = 1.0 + alpha;

        let b = vec![
            ((1.0 - cos_w0) / 2.0) / a0,
            (1.0 - cos_w0) / a0,
            ((1.0 - cos_w0) / 2.0) / a0,
        ];
        let a = vec![1.0, (-2.0 * cos_w0) / a0, (1.0 - alpha) / a0];
        Self::new(b, a)
    }

    /// Second-order high-pass filter (RBJ cookbook)
    pub fn high_pass(sample_rate: u32, frequency: f64, q: f64) -> Self {
        let w0 = 2.0 * PI * frequency / sample_rate as f64;
        let cos_w0 = w0.cos();
        let alpha = w0.sin() / (2.0 * q);
        let a0 = 1.0 + alpha;

        let b = vec![
            ((1.0 + cos_w0) / 2.0) / a0,
            (-(1.0 + cos_w0)) / a0,
            ((1.0 + cos_w0) / 2.0) / a0,
        ];
        let a = vec![1.0, (-2.0 * cos_w0) / a0, (1.0 - alpha) / a0];
        Self::new(b, a)
    }
}

impl SampleFilter for CanonicalFilter {
    fn process_sample(&mut self, x: f32) -> f32 {
        let mut w0 = x as f64;
        for k in 1..self.a.len() {
            w0 -= self.a[k] * self.w[k];
        }
        self.w[0] = w0;

        let mut y = 0.0;
        for k in 0..self.b.len() {
            y += self.b[k] * self.w[k];
        }

        for k in (1..self.w.len()).rev() {
            self.w[k] = self.w[k - 1];
        }

        y as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_coefficients() {
        let mut f = CanonicalFilter::new(vec![1.0], vec![1.0]);
        for &x in &[0.0f32, 0.5, -0.5, 1.0, -1.0] {
            assert_eq!(f.process_sample(x), x);
        }
    }

    #[test]
    fn test_one_pole_impulse_decay() {
        // y[n] = x[n] + 0.5 y[n-1]: impulse response 1, 0.5, 0.25, ...
        let mut f = CanonicalFilter::new(vec![1.0], vec![1.0, -0.5]);
        let mut expected = 1.0f32;
        assert!((f.process_sample(1.0) - expected).abs() < 1e-6);
        for _ in 0..5 {
            expected *= 0.5;
            assert!((f.process_sample(0.0) - expected).abs() < 1e-6);
        }
    }

    #[test]
    fn test_fir_moving_average() {
        let mut f = CanonicalFilter::new(vec![0.5, 0.5], vec![1.0]);
        assert!((f.process_sample(1.0) - 0.5).abs() < 1e-6);
        assert!((f.process_sample(1.0) - 1.0).abs() < 1e-6);
        assert!((f.process_sample(0.0) - 0.5).abs() < 1e-6);
        assert!((f.process_sample(0.0) - 0.0).abs() < 1e-6);
    }

    #[test]
    fn test_reset_clears_delay_line() {
        let mut f = CanonicalFilter::new(vec![1.0], vec![1.0, -0.5]);
        f.process_sample(1.0);
        f.reset();
        // After reset the impulse response starts over.
        assert!((f.process_sample(1.0) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_low_pass_passes_dc() {
        let mut f = CanonicalFilter::low_pass(48000, 1000.0, 0.707);
        let mut y = 0.0f32;
        for _ in 0..10_000 {
            y = f.process_sample(1.0);
        }
        assert!((y - 1.0).abs() < 1e-3, "DC gain should be unity, got {}", y);
    }

    #[test]
    fn test_high_pass_blocks_dc() {
        let mut f = CanonicalFilter::high_pass(48000, 1000.0, 0.707);
        let mut y = 1.0f32;
        for _ in 0..10_000 {
            y = f.process_sample(1.0);
        }
        assert!(y.abs() < 1e-3, "DC should be rejected, got {}", y);
    }
}
