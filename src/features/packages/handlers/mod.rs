mod import_handler;
mod package_handler;

pub use import_handler::*;
pub use package_handler::*;
