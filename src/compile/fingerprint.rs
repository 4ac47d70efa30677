use xxhash_rust::xxh3::Xxh3;

const XXH3_SEED: u64 = 0x5e3d_19c7_a04b_62f1;

/// Stable 128-bit key of a compiled command, suitable for record/replay caches.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CommandFingerprint {
    /// High 64 bits.
    pub hi: u64,
    /// Low 64 bits.
    pub lo: u64,
}

impl std::fmt::Display for CommandFingerprint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:016x}{:016x}", self.hi, self.lo)
    }
}

struct StableHasher {
    inner: Xxh3,
}

impl StableHasher {
    fn new() -> Self {
        Self {
            inner: Xxh3::with_seed(XXH3_SEED),
        }
    }

    fn write_str(&mut self, s: &str) {
        self.inner.update(&(s.len() as u64).to_le_bytes());
        self.inner.update(s.as_bytes());
    }

    fn finish(self) -> CommandFingerprint {
        let v = self.inner.digest128();
        CommandFingerprint {
            hi: (v >> 64) as u64,
            lo: v as u64,
        }
    }
}

/// Collapse runs of whitespace to one space and trim the ends.
pub(crate) fn normalize_whitespace(command: &str) -> String {
    command.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Replace every occurrence of the given paths with positional placeholders.
///
/// Inputs become `{input0}`, `{input1}`, ... and the output becomes `{output}`. Longer paths are
/// replaced first so a path that is a prefix of another does not split it.
pub(crate) fn redact_paths(command: &str, inputs: &[&str], output: &str) -> String {
    let mut subs: Vec<(&str, String)> = inputs
        .iter()
        .enumerate()
        .map(|(i, p)| (*p, format!("{{input{i}}}")))
        .collect();
    subs.push((output, "{output}".to_owned()));
    subs.retain(|(p, _)| !p.is_empty());
    subs.sort_by(|a, b| b.0.len().cmp(&a.0.len()));

    let mut out = command.to_owned();
    for (path, placeholder) in subs {
        out = out.replace(path, &placeholder);
    }
    out
}

pub(crate) fn fingerprint_str(normalized: &str) -> CommandFingerprint {
    let mut h = StableHasher::new();
    h.write_str(normalized);
    h.finish()
}

#[cfg(test)]
#[path = "../../tests/unit/compile/fingerprint.rs"]
mod tests;
