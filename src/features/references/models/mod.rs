mod reference;

pub use reference::{Reference, ReferenceKind};
