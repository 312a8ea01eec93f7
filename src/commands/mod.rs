pub mod batch;
pub mod config;
pub mod ocr;
pub mod output;
pub mod verify;

pub use output::CommandOutput;
