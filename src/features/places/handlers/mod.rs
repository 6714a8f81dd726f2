mod archive_handler;
mod place_handler;

pub use archive_handler::*;
pub use place_handler::*;
