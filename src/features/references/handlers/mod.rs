mod reference_handler;

pub use reference_handler::*;
