//! Zone generation: template rendering, serial management and compilation.

pub mod compiler;
pub mod serial;
pub mod template;

pub use compiler::{compile, ZoneDocument};
pub use serial::{next_serial, DEFAULT_SERIAL};
pub use template::ZoneTemplate;
