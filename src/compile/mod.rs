pub(crate) mod command;
pub(crate) mod compiler;
pub(crate) mod fingerprint;
pub(crate) mod session;
