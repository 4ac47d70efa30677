//! Effect builders and the graph synthesis behind them.
//!
//! Builders implement [`LayerBuilder`] and reach a timeline only through
//! [`Timeline::apply`](crate::Timeline::apply); the synthesis functions are called by the
//! compiler when it folds the resulting layers.

use crate::foundation::error::ReelResult;
use crate::model::layer::Layer;

pub(crate) mod captions;
pub(crate) mod chroma;
pub(crate) mod ducking;
pub(crate) mod transitions;
pub(crate) mod zoompan;

/// Something that expands into timeline layers.
///
/// The returned layers are validated and appended in order by
/// [`Timeline::apply`](crate::Timeline::apply).
pub trait LayerBuilder {
    /// Layers to append.
    fn layers(&self) -> ReelResult<Vec<Layer>>;
}

impl LayerBuilder for Layer {
    fn layers(&self) -> ReelResult<Vec<Layer>> {
        Ok(vec![self.clone()])
    }
}
