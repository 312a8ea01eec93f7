pub mod commands;
pub mod error;
pub mod models;
pub mod services;
pub mod utils;

pub use error::{BackendError, FailureKind, PipelineError, TransportError, TransportErrorKind};
pub use models::config::AppConfig;
pub use models::image_payload::{ImagePayload, MimeType};
pub use models::ocr_result::{OcrOutcome, OcrRequest, OcrResult};
pub use models::report::Report;
pub use models::verification::{VerificationRequest, VerificationResult};
pub use services::encoder::{decode_data_uri, encode, to_data_uri};
pub use services::normalizer::InferenceResult;
pub use services::ocr::HttpOcrClient;
pub use services::pipeline::Pipeline;
pub use services::verification::{invoke_verification, DeepFaceBackend, FaceVerifier};
