pub mod config;
pub mod encoder;
pub mod normalizer;
pub mod ocr;
pub mod pipeline;
pub mod reporter;
pub mod verification;
