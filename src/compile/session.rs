use crate::compile::command::InputSpec;
use crate::graph::alloc::{FilterGraph, Pad};
use crate::graph::filter::Filter;
use crate::timeline::options::OutputTarget;

/// Per-compilation state shared by the compiler and the effect synthesizers.
pub(crate) struct Session {
    pub(crate) graph: FilterGraph,
    pub(crate) inputs: Vec<InputSpec>,
    pub(crate) target: OutputTarget,
    pub(crate) seed: u64,
}

impl Session {
    pub(crate) fn new(target: OutputTarget, seed: u64) -> Self {
        Self {
            graph: FilterGraph::new(),
            inputs: Vec::new(),
            target,
            seed,
        }
    }

    /// Declare an input; its index is its position in declaration order.
    pub(crate) fn input(&mut self, spec: InputSpec) -> usize {
        self.inputs.push(spec);
        self.inputs.len() - 1
    }

    /// Scale-to-cover and center-crop onto the canvas.
    pub(crate) fn cover_filters(&self) -> Vec<Filter> {
        let c = self.target.canvas;
        vec![
            Filter::Scale {
                w: c.width.to_string(),
                h: c.height.to_string(),
                cover: true,
            },
            Filter::Crop {
                w: c.width,
                h: c.height,
                x: format!("(iw-{})/2", c.width),
                y: format!("(ih-{})/2", c.height),
            },
            Filter::SetSar,
        ]
    }

    /// [`Self::cover_filters`] when a platform preset or aspect ratio is in force.
    pub(crate) fn fit_filters(&self) -> Vec<Filter> {
        if self.target.fit {
            self.cover_filters()
        } else {
            Vec::new()
        }
    }

    /// Apply a linear gain to an audio pad; unity gain adds nothing.
    pub(crate) fn with_gain(&mut self, pad: Pad, gain: f64) -> Pad {
        if gain == 1.0 {
            return pad;
        }
        self.graph.extend(pad, vec![Filter::Volume(gain)], "a")
    }
}
