use super::FaceVerifier;
use crate::error::BackendError;
use crate::models::config::VerificationConfig;
use crate::models::verification::{FaceMatch, FaceModelSettings};
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};
use std::process::Command;

/// Max characters of stderr quoted in error messages
const STDERR_TAIL: usize = 400;

/// Face verification through the bundled Python helper.
///
/// Runs `<python> <script> <a> <b> --model <m> --metric <d> [--no-enforce-detection]`
/// and reads one JSON object from stdout. Blocks until the process exits.
#[derive(Debug, Clone)]
pub struct DeepFaceBackend {
    python: String,
    script: PathBuf,
}

impl DeepFaceBackend {
    pub fn new(python: impl Into<String>, script: impl Into<PathBuf>) -> Self {
        Self {
            python: python.into(),
            script: script.into(),
        }
    }

    /// Build from configuration, locating a relative script with `resolve_script`
    pub fn from_config(config: &VerificationConfig) -> Self {
        let script = resolve_script(&config.script);
        tracing::debug!(script = %script.display(), "verification helper script");
        Self::new(config.python.clone(), script)
    }

    fn command(&self, image_a: &Path, image_b: &Path, settings: &FaceModelSettings) -> Command {
        let mut command = Command::new(&self.python);
        command
            .arg(&self.script)
            .arg(image_a)
            .arg(image_b)
            .arg("--model")
            .arg(settings.model_name)
            .arg("--metric")
            .arg(settings.distance_metric);
        if !settings.enforce_detection {
            command.arg("--no-enforce-detection");
        }
        command
    }
}

/// Find a relative helper script next to the executable, then under the
/// working directory, then in the source tree. Absolute paths and scripts
/// found nowhere are returned unchanged.
pub fn resolve_script(script: &Path) -> PathBuf {
    if script.is_absolute() {
        return script.to_path_buf();
    }

    let exe_dir = std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf));
    let search = exe_dir
        .into_iter()
        .chain(std::env::current_dir().ok())
        .chain(std::iter::once(PathBuf::from(env!("CARGO_MANIFEST_DIR"))));

    resolve_script_in(script, search)
}

fn resolve_script_in(script: &Path, dirs: impl IntoIterator<Item = PathBuf>) -> PathBuf {
    dirs.into_iter()
        .map(|dir| dir.join(script))
        .find(|candidate| candidate.is_file())
        .unwrap_or_else(|| script.to_path_buf())
}

impl FaceVerifier for DeepFaceBackend {
    fn verify(
        &self,
        image_a: &Path,
        image_b: &Path,
        settings: &FaceModelSettings,
    ) -> Result<FaceMatch, BackendError> {
        tracing::debug!(
            python = %self.python,
            script = %self.script.display(),
            model = settings.model_name,
            metric = settings.distance_metric,
            "running face verification backend"
        );

        let output = self.command(image_a, image_b, settings).output()?;
        let stdout = String::from_utf8_lossy(&output.stdout);

        let Some(object) = last_json_object(&stdout) else {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(BackendError::MalformedOutput(format!(
                "{}, no JSON object on stdout; stderr: {}",
                output.status,
                tail(stderr.trim(), STDERR_TAIL)
            )));
        };

        parse_backend_output(&object, settings)
    }
}

/// Model libraries print progress to stdout; the answer is the last JSON line
fn last_json_object(stdout: &str) -> Option<Map<String, Value>> {
    stdout
        .lines()
        .rev()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .find_map(|line| match serde_json::from_str::<Value>(line) {
            Ok(Value::Object(map)) => Some(map),
            _ => None,
        })
}

/// Normalize the helper's JSON into a `FaceMatch`
pub(crate) fn parse_backend_output(
    object: &Map<String, Value>,
    settings: &FaceModelSettings,
) -> Result<FaceMatch, BackendError> {
    if object.get("success").and_then(as_bool) == Some(false) {
        let message = object
            .get("error")
            .and_then(Value::as_str)
            .unwrap_or("verification backend reported failure without a message");
        return Err(BackendError::Reported(message.to_string()));
    }

    let distance = required_metric(object, "distance")?;
    let threshold = required_metric(object, "threshold")?;
    let verified = object
        .get("verified")
        .and_then(as_bool)
        .ok_or_else(|| BackendError::UnexpectedShape("missing or invalid 'verified'".to_string()))?;

    let model_name = object
        .get("model_name")
        .and_then(Value::as_str)
        .unwrap_or(settings.model_name)
        .to_string();
    let detector_backend = object
        .get("detector_backend")
        .and_then(Value::as_str)
        .unwrap_or("unknown")
        .to_string();

    Ok(FaceMatch {
        distance,
        verified,
        threshold,
        model_name,
        detector_backend,
    })
}

fn required_metric(object: &Map<String, Value>, key: &str) -> Result<f64, BackendError> {
    let value = object
        .get(key)
        .and_then(as_f64)
        .ok_or_else(|| BackendError::UnexpectedShape(format!("missing or invalid '{}'", key)))?;

    if !value.is_finite() || value < 0.0 {
        return Err(BackendError::UnexpectedShape(format!(
            "'{}' must be a non-negative number, got {}",
            key, value
        )));
    }
    Ok(value)
}

fn as_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn as_bool(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(b) => Some(*b),
        Value::Number(n) => n.as_f64().map(|v| v != 0.0),
        Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
            "true" | "1" => Some(true),
            "false" | "0" => Some(false),
            _ => None,
        },
        _ => None,
    }
}

fn tail(text: &str, max_chars: usize) -> &str {
    let count = text.chars().count();
    if count <= max_chars {
        return text;
    }
    let start = text
        .char_indices()
        .nth(count - max_chars)
        .map(|(i, _)| i)
        .unwrap_or(0);
    &text[start..]
}
