use crate::foundation::error::{ReelError, ReelResult};
use crate::graph::filter::Filter;
use smallvec::SmallVec;
use std::collections::BTreeMap;
use std::fmt;

/// Stream type selector of an input pad.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum MediaKind {
    Video,
    Audio,
}

impl MediaKind {
    fn as_str(self) -> &'static str {
        match self {
            Self::Video => "v",
            Self::Audio => "a",
        }
    }
}

/// A stream endpoint: either a stream of a declared input or a label produced inside the graph.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum Pad {
    Stream { input: usize, kind: MediaKind },
    Label(String),
}

impl Pad {
    pub(crate) fn video(input: usize) -> Self {
        Self::Stream {
            input,
            kind: MediaKind::Video,
        }
    }

    pub(crate) fn audio(input: usize) -> Self {
        Self::Stream {
            input,
            kind: MediaKind::Audio,
        }
    }

    /// Spelling used after `-map`.
    pub(crate) fn map_spec(&self) -> String {
        match self {
            Self::Stream { input, kind } => format!("{input}:{}", kind.as_str()),
            Self::Label(l) => format!("[{l}]"),
        }
    }
}

/// Bracketed spelling used inside the filter graph.
impl fmt::Display for Pad {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Stream { input, kind } => write!(f, "[{input}:{}]", kind.as_str()),
            Self::Label(l) => write!(f, "[{l}]"),
        }
    }
}

/// One filter chain: consumed pads, filters applied in order, produced labels.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct Node {
    pub(crate) inputs: SmallVec<[Pad; 2]>,
    pub(crate) chain: Vec<Filter>,
    pub(crate) outputs: SmallVec<[String; 2]>,
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for pad in &self.inputs {
            write!(f, "{pad}")?;
        }
        for (i, filter) in self.chain.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{filter}")?;
        }
        for out in &self.outputs {
            write!(f, "[{out}]")?;
        }
        Ok(())
    }
}

/// Filter graph under construction.
///
/// Labels come from per-prefix counters owned by the graph, so one compilation never reuses a
/// label and two compilations of the same timeline produce the same labels.
#[derive(Clone, Debug, Default)]
pub(crate) struct FilterGraph {
    nodes: Vec<Node>,
    counters: BTreeMap<&'static str, u32>,
}

impl FilterGraph {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub(crate) fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Allocate a fresh label such as `v0`, `a3`.
    pub(crate) fn label(&mut self, prefix: &'static str) -> String {
        let n = self.counters.entry(prefix).or_insert(0);
        let out = format!("{prefix}{n}");
        *n += 1;
        out
    }

    /// Add a node consuming `inputs` and producing one fresh label.
    pub(crate) fn node(
        &mut self,
        inputs: impl IntoIterator<Item = Pad>,
        chain: Vec<Filter>,
        prefix: &'static str,
    ) -> Pad {
        let out = self.label(prefix);
        self.nodes.push(Node {
            inputs: inputs.into_iter().collect(),
            chain,
            outputs: SmallVec::from_iter([out.clone()]),
        });
        Pad::Label(out)
    }

    /// Add a source node (no inputs).
    pub(crate) fn source(&mut self, chain: Vec<Filter>, prefix: &'static str) -> Pad {
        self.node(std::iter::empty(), chain, prefix)
    }

    /// Add a node producing `N` labels from one input (`split`/`asplit`).
    pub(crate) fn fan_out<const N: usize>(
        &mut self,
        input: Pad,
        filter: Filter,
        prefix: &'static str,
    ) -> [Pad; N] {
        let labels: [String; N] = std::array::from_fn(|_| self.label(prefix));
        self.nodes.push(Node {
            inputs: SmallVec::from_iter([input]),
            chain: vec![filter],
            outputs: labels.iter().cloned().collect(),
        });
        labels.map(Pad::Label)
    }

    /// Apply `filters` to `pad`.
    ///
    /// When `pad` is the sole output of an existing node the filters join that node's chain and
    /// the pad is returned unchanged; otherwise a new single-input node is created.
    pub(crate) fn extend(&mut self, pad: Pad, filters: Vec<Filter>, prefix: &'static str) -> Pad {
        if filters.is_empty() {
            return pad;
        }
        if let Pad::Label(label) = &pad
            && let Some(node) = self
                .nodes
                .iter_mut()
                .find(|n| n.outputs.len() == 1 && n.outputs[0] == *label)
        {
            node.chain.extend(filters);
            return pad;
        }
        self.node([pad], filters, prefix)
    }

    /// Serialized graph: nodes joined by `;` in creation order.
    pub(crate) fn render(&self) -> String {
        self.nodes
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(";")
    }

    /// Check label discipline: every label is produced once and then either consumed exactly once
    /// or listed in `mapped`; nothing consumes an unknown label.
    pub(crate) fn check(&self, mapped: &[&Pad]) -> ReelResult<()> {
        let mut produced: BTreeMap<&str, usize> = BTreeMap::new();
        for node in &self.nodes {
            for out in &node.outputs {
                if produced.insert(out.as_str(), 0).is_some() {
                    return Err(ReelError::validation(format!(
                        "label [{out}] produced more than once"
                    )));
                }
            }
        }

        let consumers = self
            .nodes
            .iter()
            .flat_map(|n| n.inputs.iter())
            .chain(mapped.iter().copied());
        for pad in consumers {
            if let Pad::Label(l) = pad {
                let uses = produced.get_mut(l.as_str()).ok_or_else(|| {
                    ReelError::validation(format!("label [{l}] consumed but never produced"))
                })?;
                *uses += 1;
            }
        }

        match produced.iter().find(|(_, uses)| **uses != 1) {
            Some((label, &0)) => Err(ReelError::validation(format!(
                "label [{label}] is dangling"
            ))),
            Some((label, _)) => Err(ReelError::validation(format!(
                "label [{label}] consumed more than once"
            ))),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/graph/alloc.rs"]
mod tests;
