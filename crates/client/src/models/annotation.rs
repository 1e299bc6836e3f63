//! Annotations and their term links.

use serde::{Deserialize, Serialize};

use crate::error::{ClientError, Result};
use crate::resource::Entity;

/// A geometry drawn on an image instance.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Annotation {
    pub location: Option<String>,
    pub image: Option<u64>,
    pub project: Option<u64>,
    pub user: Option<u64>,
    pub term: Option<Vec<u64>>,
    pub area: Option<f64>,
    pub perimeter: Option<f64>,
}

impl Annotation {
    pub fn new(image: u64, location: impl Into<String>) -> Self {
        Self {
            image: Some(image),
            location: Some(location.into()),
            ..Self::default()
        }
    }
}

impl Entity for Annotation {
    const RESOURCE: &'static str = "annotation";
    const FILTERS: &'static [&'static str] = &["project", "imageinstance", "user"];
    const BULK_SAVE: bool = true;
    const QUERY_PARAMS: &'static [&'static str] = &[
        "project",
        "image",
        "user",
        "users",
        "terms",
        "showWKT",
        "showTerm",
        "showMeta",
        "reviewed",
        "bbox",
        "included",
    ];
}

/// Association of a term with an annotation, addressed by both keys.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AnnotationTerm {
    #[serde(rename = "userannotation")]
    pub annotation: Option<u64>,
    pub term: Option<u64>,
    pub user: Option<u64>,
}

impl AnnotationTerm {
    pub fn new(annotation: u64, term: u64) -> Self {
        Self {
            annotation: Some(annotation),
            term: Some(term),
            user: None,
        }
    }
}

impl Entity for AnnotationTerm {
    const RESOURCE: &'static str = "annotationterm";
    const CALLBACK_KEY: &'static str = "annotationterm";
    const UPDATABLE: bool = false;

    fn uri(&self, _id: Option<u64>) -> Result<String> {
        match (self.annotation, self.term) {
            (Some(annotation), Some(term)) => {
                Ok(format!("annotation/{}/term/{}.json", annotation, term))
            }
            _ => Err(ClientError::UnresolvedUri {
                entity: Self::RESOURCE,
                reason: "annotation and term must both be set".to_string(),
            }),
        }
    }

    fn is_addressable(&self, _id: Option<u64>) -> bool {
        self.annotation.is_some() && self.term.is_some()
    }
}
