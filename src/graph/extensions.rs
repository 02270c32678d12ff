use crate::dsp::automation::Automation;
use crate::graph::{filter::Filter, gain::Gain, layer::Layer, node::GraphNode};

pub trait NodeExt: GraphNode + Sized {
    fn gain(self, gain: Automation) -> Gain<Self> {
        Gain::new(self, gain)
    }

    fn lowpass(self, cutoff: Automation, q: f32) -> Filter<Self> {
        Filter::lowpass(self, cutoff, q)
    }

    fn highpass(self, cutoff: Automation, q: f32) -> Filter<Self> {
        Filter::highpass(self, cutoff, q)
    }

    fn layer<B: GraphNode>(self, other: B) -> Layer<Self, B> {
        Layer::new(self, other)
    }

    fn boxed(self) -> Box<dyn GraphNode>
    where
        Self: 'static,
    {
        Box::new(self)
    }
}

impl<T: GraphNode> NodeExt for T {}
