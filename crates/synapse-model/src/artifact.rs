//! Model artifact persistence.
//!
//! One JSON file holds the structural config, every parameter tensor, and
//! the training-time vocabulary, so a loaded model encodes exactly the way
//! it did when trained. The payload is stored as a string and checksummed
//! with blake3; a corrupt or truncated file fails loading instead of
//! silently degrading predictions.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use synapse_core::config::PredictorConfig;
use synapse_core::errors::{ModelError, SynapseResult};
use synapse_embeddings::Vocabulary;

use crate::attention::AttentionHead;
use crate::linear::Linear;
use crate::predictor::LinkPredictor;

/// Artifact format version.
const ARTIFACT_VERSION: u32 = 1;

#[derive(Serialize, Deserialize)]
struct ArtifactFile {
    version: u32,
    /// blake3 hex digest of `payload`.
    checksum: String,
    /// JSON-encoded `ArtifactPayload`, hashed as the exact stored bytes.
    payload: String,
}

#[derive(Serialize, Deserialize)]
struct ArtifactPayload {
    config: PredictorConfig,
    vocabulary: Vocabulary,
    heads: Vec<AttentionHead>,
    ffn1: Linear,
    ffn2: Linear,
    out: Linear,
}

/// Serialize a predictor and its vocabulary to `path`.
pub fn save_artifact(
    path: &Path,
    model: &LinkPredictor,
    vocabulary: &Vocabulary,
) -> SynapseResult<()> {
    let (heads, ffn1, ffn2, out) = model.parts();
    let payload = ArtifactPayload {
        config: *model.config(),
        vocabulary: vocabulary.clone(),
        heads: heads.to_vec(),
        ffn1: ffn1.clone(),
        ffn2: ffn2.clone(),
        out: out.clone(),
    };
    let payload_json = serde_json::to_string(&payload).map_err(|e| corrupt(e.to_string()))?;
    let file = ArtifactFile {
        version: ARTIFACT_VERSION,
        checksum: blake3::hash(payload_json.as_bytes()).to_hex().to_string(),
        payload: payload_json,
    };
    let text = serde_json::to_string(&file).map_err(|e| corrupt(e.to_string()))?;
    std::fs::write(path, text).map_err(|e| corrupt(format!("write {}: {e}", path.display())))?;

    info!(
        path = %path.display(),
        parameters = model.count_parameters(),
        vocabulary_terms = vocabulary.len(),
        "model artifact saved"
    );
    Ok(())
}

/// Reconstruct a predictor and its vocabulary from `path`.
pub fn load_artifact(path: &Path) -> SynapseResult<(LinkPredictor, Vocabulary)> {
    let text = std::fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            ModelError::ArtifactMissing {
                path: path.display().to_string(),
            }
            .into()
        } else {
            corrupt(format!("read {}: {e}", path.display()))
        }
    })?;

    let file: ArtifactFile =
        serde_json::from_str(&text).map_err(|e| corrupt(format!("outer parse: {e}")))?;

    if file.version != ARTIFACT_VERSION {
        return Err(ModelError::IncompatibleConfig {
            reason: format!(
                "artifact version {} unsupported, expected {ARTIFACT_VERSION}",
                file.version
            ),
        }
        .into());
    }

    let digest = blake3::hash(file.payload.as_bytes()).to_hex().to_string();
    if digest != file.checksum {
        return Err(corrupt("checksum mismatch".to_string()));
    }

    let payload: ArtifactPayload =
        serde_json::from_str(&file.payload).map_err(|e| corrupt(format!("payload parse: {e}")))?;
    payload.config.validate()?;
    validate_shapes(&payload)?;

    let model = LinkPredictor::from_parts(
        payload.config,
        payload.heads,
        payload.ffn1,
        payload.ffn2,
        payload.out,
    );
    Ok((model, payload.vocabulary))
}

fn validate_shapes(payload: &ArtifactPayload) -> SynapseResult<()> {
    let config = &payload.config;
    let head_dim = config.head_dim();
    let shape_ok = payload.heads.len() == config.head_count
        && payload.heads.iter().all(|h| {
            h.query.in_dim == head_dim
                && h.query.out_dim == head_dim
                && h.key.in_dim == head_dim
                && h.value.in_dim == head_dim
        })
        && payload.ffn1.in_dim == config.input_dim()
        && payload.ffn1.out_dim == config.hidden_dim
        && payload.ffn2.in_dim == config.hidden_dim
        && payload.ffn2.out_dim == config.reduced_dim()
        && payload.out.in_dim == config.reduced_dim()
        && payload.out.out_dim == 1;
    if !shape_ok {
        return Err(ModelError::IncompatibleConfig {
            reason: "tensor shapes do not match the declared config".to_string(),
        }
        .into());
    }
    // Guard against hand-edited tensors with plausible dims but short data.
    let lengths_ok = payload
        .heads
        .iter()
        .flat_map(|h| [&h.query, &h.key, &h.value])
        .chain([&payload.ffn1, &payload.ffn2, &payload.out])
        .all(|l| l.w.len() == l.in_dim * l.out_dim && l.b.len() == l.out_dim);
    if !lengths_ok {
        return Err(corrupt("tensor length does not match its shape".to_string()));
    }
    Ok(())
}

fn corrupt(reason: String) -> synapse_core::errors::SynapseError {
    ModelError::ArtifactCorrupt { reason }.into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use synapse_core::errors::SynapseError;

    fn artifact_pair() -> (LinkPredictor, Vocabulary) {
        let model = LinkPredictor::new(PredictorConfig::default(), 17).unwrap();
        let vocabulary = Vocabulary::build(["graph memory linking concepts"]);
        (model, vocabulary)
    }

    #[test]
    fn save_load_round_trips_the_model() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("model.json");
        let (model, vocabulary) = artifact_pair();

        save_artifact(&path, &model, &vocabulary).unwrap();
        let (loaded, loaded_vocab) = load_artifact(&path).unwrap();

        assert_eq!(loaded, model);
        assert_eq!(loaded_vocab, vocabulary);
    }

    #[test]
    fn missing_file_reports_artifact_missing() {
        let err = load_artifact(Path::new("/nonexistent/model.json")).unwrap_err();
        assert!(matches!(
            err,
            SynapseError::Model(ModelError::ArtifactMissing { .. })
        ));
    }

    #[test]
    fn tampered_payload_fails_the_checksum() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("model.json");
        let (model, vocabulary) = artifact_pair();
        save_artifact(&path, &model, &vocabulary).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        let mut value: serde_json::Value = serde_json::from_str(&text).unwrap();
        let payload = value["payload"].as_str().unwrap().to_string();
        let tampered = payload.replacen("64", "32", 1);
        assert_ne!(payload, tampered);
        value["payload"] = serde_json::Value::String(tampered);
        std::fs::write(&path, serde_json::to_string(&value).unwrap()).unwrap();

        let err = load_artifact(&path).unwrap_err();
        assert!(matches!(
            err,
            SynapseError::Model(ModelError::ArtifactCorrupt { .. })
        ));
    }

    #[test]
    fn garbage_file_reports_corrupt() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("model.json");
        std::fs::write(&path, "not json at all").unwrap();
        let err = load_artifact(&path).unwrap_err();
        assert!(matches!(
            err,
            SynapseError::Model(ModelError::ArtifactCorrupt { .. })
        ));
    }
}
