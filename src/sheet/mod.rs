pub mod assembler;
pub mod staging;

pub use assembler::SheetAssembler;
pub use staging::{stage_assets, StagingReport};
