pub mod config;
pub mod image_payload;
pub mod ocr_result;
pub mod report;
pub mod verification;
