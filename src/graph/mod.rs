pub(crate) mod alloc;
pub(crate) mod escape;
pub(crate) mod filter;
