use crate::compile::fingerprint::{
    CommandFingerprint, fingerprint_str, normalize_whitespace, redact_paths,
};
use crate::foundation::core::{AspectRatio, Canvas};
use crate::foundation::num::fmt_num;
use crate::graph::alloc::Pad;
use crate::graph::escape::{shell_arg, shell_quote};

/// One `-i` declaration with its per-input directives.
#[derive(Clone, Debug, PartialEq)]
pub struct InputSpec {
    /// Media path as given by the caller.
    pub path: String,
    /// Seek into the source before reading (`-ss`).
    pub seek: Option<f64>,
    /// Read at most this many seconds (`-t`).
    pub duration: Option<f64>,
    /// Repeat the source forever (`-stream_loop -1`).
    pub stream_loop: bool,
    /// Repeat a still image as a video stream (`-loop 1`).
    pub still: bool,
}

impl InputSpec {
    pub(crate) fn media(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            seek: None,
            duration: None,
            stream_loop: false,
            still: false,
        }
    }

    pub(crate) fn still(path: impl Into<String>) -> Self {
        Self {
            still: true,
            ..Self::media(path)
        }
    }

    fn push_args(&self, out: &mut ArgList) {
        if self.stream_loop {
            out.plain(["-stream_loop", "-1"]);
        }
        if self.still {
            out.plain(["-loop", "1"]);
        }
        if let Some(ss) = self.seek {
            out.plain(["-ss".to_owned(), fmt_num(ss)]);
        }
        if let Some(t) = self.duration {
            out.plain(["-t".to_owned(), fmt_num(t)]);
        }
        out.plain(["-i"]);
        out.quoted(&self.path);
    }
}

/// Argument vector plus its shell rendering, built side by side.
#[derive(Default)]
struct ArgList {
    args: Vec<String>,
    shell: Vec<String>,
}

impl ArgList {
    fn plain<S: Into<String>>(&mut self, items: impl IntoIterator<Item = S>) {
        for s in items {
            let s = s.into();
            self.shell.push(shell_arg(&s));
            self.args.push(s);
        }
    }

    fn quoted(&mut self, s: &str) {
        self.shell.push(shell_quote(s));
        self.args.push(s.to_owned());
    }
}

/// Everything the assembler needs from a finished compilation.
pub(crate) struct Assembly<'a> {
    pub(crate) inputs: Vec<InputSpec>,
    pub(crate) filter_graph: Option<String>,
    pub(crate) video: Option<Pad>,
    pub(crate) audio: Option<Pad>,
    pub(crate) global_args: Vec<String>,
    pub(crate) overwrite: bool,
    pub(crate) output: &'a str,
    pub(crate) canvas: Canvas,
    pub(crate) aspect: AspectRatio,
    pub(crate) duration_estimate: Option<f64>,
    pub(crate) kbps: u32,
}

/// Result of compiling a timeline: the command plus derived metadata.
#[derive(Clone, Debug, PartialEq)]
pub struct CompiledCommand {
    command: String,
    args: Vec<String>,
    inputs: Vec<InputSpec>,
    filter_graph: Option<String>,
    output: String,
    canvas: Canvas,
    aspect: AspectRatio,
    duration_estimate: Option<f64>,
    size_estimate: Option<u64>,
}

/// Emit, in order: program, inputs, filter graph, stream maps, global flags, overwrite flag,
/// output path.
pub(crate) fn assemble(a: Assembly<'_>) -> CompiledCommand {
    let mut out = ArgList::default();
    out.plain(["ffmpeg"]);
    for input in &a.inputs {
        input.push_args(&mut out);
    }
    if let Some(graph) = &a.filter_graph {
        out.plain(["-filter_complex"]);
        out.quoted(graph);
    }
    for pad in a.video.iter().chain(a.audio.iter()) {
        out.plain(["-map"]);
        match pad {
            Pad::Label(_) => out.quoted(&pad.map_spec()),
            Pad::Stream { .. } => out.plain([pad.map_spec()]),
        }
    }
    out.plain(a.global_args);
    out.plain([if a.overwrite { "-y" } else { "-n" }]);
    out.quoted(a.output);

    let size_estimate = a
        .duration_estimate
        .map(|d| (f64::from(a.kbps) * 1000.0 / 8.0 * d).round() as u64);

    CompiledCommand {
        command: out.shell.join(" "),
        args: out.args,
        inputs: a.inputs,
        filter_graph: a.filter_graph,
        output: a.output.to_owned(),
        canvas: a.canvas,
        aspect: a.aspect,
        duration_estimate: a.duration_estimate,
        size_estimate,
    }
}

impl CompiledCommand {
    /// Shell-ready command line.
    pub fn command(&self) -> &str {
        &self.command
    }

    /// Unquoted argument vector, program name first.
    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// Input table in `-i` order.
    pub fn inputs(&self) -> &[InputSpec] {
        &self.inputs
    }

    /// The `-filter_complex` graph, if any node was created.
    pub fn filter_graph(&self) -> Option<&str> {
        self.filter_graph.as_deref()
    }

    /// Output path.
    pub fn output(&self) -> &str {
        &self.output
    }

    /// Target canvas.
    pub fn canvas(&self) -> Canvas {
        self.canvas
    }

    /// Target aspect ratio.
    pub fn aspect_ratio(&self) -> AspectRatio {
        self.aspect
    }

    /// Output length in seconds, when it can be derived.
    pub fn duration_estimate(&self) -> Option<f64> {
        self.duration_estimate
    }

    /// Rough output size in bytes from bitrate hints and the duration estimate.
    pub fn size_estimate_bytes(&self) -> Option<u64> {
        self.size_estimate
    }

    /// Hash of the whitespace-normalized command.
    pub fn fingerprint(&self) -> CommandFingerprint {
        fingerprint_str(&normalize_whitespace(&self.command))
    }

    /// Hash of the normalized command with every input and output path replaced by a positional
    /// placeholder, so the same edit on different files shares a key.
    pub fn portable_fingerprint(&self) -> CommandFingerprint {
        let quoted: Vec<String> = self.inputs.iter().map(|i| shell_quote(&i.path)).collect();
        let inputs: Vec<&str> = quoted.iter().map(String::as_str).collect();
        let normalized = normalize_whitespace(&self.command);
        fingerprint_str(&redact_paths(
            &normalized,
            &inputs,
            &shell_quote(&self.output),
        ))
    }
}

impl std::fmt::Display for CompiledCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.command)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/compile/command.rs"]
mod tests;
