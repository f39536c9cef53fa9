pub mod image;
pub mod report;
pub mod sheet;

pub use image::*;
pub use report::*;
pub use sheet::*;
