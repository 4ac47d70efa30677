//! Pure coordinate and timing resolution.

pub(crate) mod position;
pub(crate) mod timing;
