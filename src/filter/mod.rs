//! Sample-by-sample audio filtering

pub mod canonical;
pub mod pipeline;

pub use canonical::CanonicalFilter;
pub use pipeline::filter;

/// Sample-by-sample processing interface.
///
/// Implementations own whatever state they need between samples; the
/// pipeline calls `process_sample` exactly once per sample, in order.
pub trait SampleFilter {
    /// Process one input sample and return the output sample
    fn process_sample(&mut self, x: f32) -> f32;
}

/// Pass-through filter
#[derive(Debug, Default, Clone, Copy)]
pub struct Identity;

impl SampleFilter for Identity {
    fn process_sample(&mut self, x: f32) -> f32 {
        x
    }
}
