//! Per-gender body model files.
//!
//! Models live at `models/<gender>.json` (a list of named parts). A missing, unreadable or
//! empty file is logged and replaced by the built-in stylized body, so the viewport always
//! has something to pick against.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{info, warn};

use super::body::BodyModel;
use super::paths::resolve_resource_path;
use crate::state::Gender;

#[derive(Debug, Error)]
pub enum ModelAssetError {
    #[error("failed to read model {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse model {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("model {path:?} has no parts for {gender}")]
    Empty { path: PathBuf, gender: Gender },
}

/// Conventional location of a gender's model file.
pub fn model_path(gender: Gender, models_dir: Option<&Path>) -> PathBuf {
    let file_name = format!("{}.json", gender.as_str());
    match models_dir {
        Some(dir) => dir.join(file_name),
        None => resolve_resource_path(&Path::new("models").join(file_name)),
    }
}

/// Read a model file and keep only the parts for `gender`.
pub fn try_load_body_model(path: &Path, gender: Gender) -> Result<BodyModel, ModelAssetError> {
    let json = fs::read_to_string(path).map_err(|source| ModelAssetError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let model: BodyModel =
        serde_json::from_str(&json).map_err(|source| ModelAssetError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
    let visible = model.visible_for(gender);
    if visible.is_empty() {
        return Err(ModelAssetError::Empty {
            path: path.to_path_buf(),
            gender,
        });
    }
    Ok(visible)
}

/// Load the body for `gender`, falling back to the built-in figure.
pub fn load_body_model(gender: Gender, models_dir: Option<&Path>) -> BodyModel {
    let path = model_path(gender, models_dir);
    match try_load_body_model(&path, gender) {
        Ok(model) => {
            info!(%gender, parts = model.parts.len(), "loaded body model from {:?}", path);
            model
        }
        Err(err) => {
            warn!("{}; using built-in body", err);
            BodyModel::stylized(gender)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn temp_dir() -> PathBuf {
        let dir = std::env::temp_dir().join(format!("bodylog-models-{}", Uuid::new_v4()));
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_missing_file_falls_back_to_builtin() {
        let dir = temp_dir();
        let model = load_body_model(Gender::Female, Some(&dir));
        assert_eq!(model, BodyModel::stylized(Gender::Female));
        let _ = fs::remove_dir_all(dir);
    }

    #[test]
    fn test_corrupt_file_is_reported() {
        let dir = temp_dir();
        let path = model_path(Gender::Male, Some(&dir));
        fs::write(&path, "[[[").unwrap();
        assert!(matches!(
            try_load_body_model(&path, Gender::Male),
            Err(ModelAssetError::Parse { .. })
        ));
        assert_eq!(load_body_model(Gender::Male, Some(&dir)), BodyModel::stylized(Gender::Male));
        let _ = fs::remove_dir_all(dir);
    }

    #[test]
    fn test_bundled_file_is_filtered_by_gender() {
        let dir = temp_dir();
        let mut combined = BodyModel::stylized(Gender::Male);
        combined.parts.extend(BodyModel::stylized(Gender::Female).parts);
        let path = model_path(Gender::Female, Some(&dir));
        fs::write(&path, serde_json::to_string(&combined).unwrap()).unwrap();

        let model = try_load_body_model(&path, Gender::Female).unwrap();
        assert_eq!(model, BodyModel::stylized(Gender::Female));
        let _ = fs::remove_dir_all(dir);
    }

    #[test]
    fn test_file_without_matching_parts_is_empty() {
        let dir = temp_dir();
        let path = model_path(Gender::Female, Some(&dir));
        let male = BodyModel::stylized(Gender::Male);
        fs::write(&path, serde_json::to_string(&male).unwrap()).unwrap();
        assert!(matches!(
            try_load_body_model(&path, Gender::Female),
            Err(ModelAssetError::Empty { .. })
        ));
        let _ = fs::remove_dir_all(dir);
    }
}
