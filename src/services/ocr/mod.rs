pub mod http_ocr;

pub use http_ocr::HttpOcrClient;
