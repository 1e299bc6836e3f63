//! Image instances and their consultation log.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{ClientError, Result};
use crate::resource::{Collection, Entity, serialize_params};

/// An image as added to a project.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ImageInstance {
    pub base_image: Option<u64>,
    pub project: Option<u64>,
    pub user: Option<u64>,
    pub filename: Option<String>,
    pub instance_filename: Option<String>,
    pub width: Option<u64>,
    pub height: Option<u64>,
    pub magnification: Option<u64>,
    pub resolution: Option<f64>,
}

impl Entity for ImageInstance {
    const RESOURCE: &'static str = "imageinstance";
    const FILTERS: &'static [&'static str] = &["project", "user"];
    const UNFILTERED: bool = false;
    const QUERY_PARAMS: &'static [&'static str] =
        &["light", "tree", "withLastActivity", "sort", "order"];
}

/// One entry of the per-user image consultation log.
///
/// Entries are append-only: they are created under their image and listed
/// per project and user, never modified.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ImageConsultation {
    pub image: Option<u64>,
    pub project: Option<u64>,
    pub user: Option<u64>,
    pub mode: Option<String>,
    #[serde(deserialize_with = "crate::serde_helpers::opt_u64_from_string_or_number")]
    pub created: Option<u64>,
}

impl ImageConsultation {
    pub fn new(image: u64, mode: impl Into<String>) -> Self {
        Self {
            image: Some(image),
            mode: Some(mode.into()),
            ..Self::default()
        }
    }
}

impl Entity for ImageConsultation {
    const RESOURCE: &'static str = "imageconsultation";
    const FILTERS: &'static [&'static str] = &["user"];
    const UNFILTERED: bool = false;
    const QUERY_PARAMS: &'static [&'static str] = &["project", "distinctImages"];
    const UPDATABLE: bool = false;

    fn uri(&self, id: Option<u64>) -> Result<String> {
        match (self.image, id) {
            (Some(image), None) => Ok(format!("imageinstance/{}/consultation.json", image)),
            (_, Some(id)) => Ok(format!("{}/{}.json", Self::RESOURCE, id)),
            (None, None) => Err(ClientError::UnresolvedUri {
                entity: Self::RESOURCE,
                reason: "image not set".to_string(),
            }),
        }
    }

    fn collection_uri(collection: &Collection<Self>) -> Result<String> {
        let project = match collection.param("project") {
            Some(Value::Number(n)) => n.to_string(),
            Some(Value::String(s)) if !s.is_empty() => s.clone(),
            _ => {
                return Err(ClientError::UnresolvedUri {
                    entity: Self::RESOURCE,
                    reason: "project parameter not set".to_string(),
                });
            }
        };
        let user = collection.filter().ok_or(ClientError::FilterRequired {
            entity: Self::RESOURCE,
        })?;
        Ok(format!(
            "project/{}/{}/{}/{}.json",
            project,
            user.key,
            user.value,
            Self::COLLECTION
        ))
    }

    fn collection_params(collection: &Collection<Self>) -> Vec<(String, String)> {
        let params: Vec<_> = collection
            .params()
            .iter()
            .filter(|(name, _)| *name != "project")
            .cloned()
            .collect();
        serialize_params(&params)
    }
}
