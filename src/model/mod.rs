//! Layer data model.

pub(crate) mod color;
pub(crate) mod layer;
pub(crate) mod position;
pub(crate) mod style;
pub(crate) mod timing;
