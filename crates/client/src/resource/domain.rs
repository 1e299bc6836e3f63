//! Domain association: metadata entities attached to another persisted entity.
//!
//! A domain entity (property, description, ...) is not addressable on its
//! own: its paths are rebased under `domain/<className>/<ident>/`. The
//! reference entity is captured once, as two scalars, when the association
//! is made; later changes to the reference are not tracked.

use serde::{Deserialize, Serialize};

use crate::endpoints::encode_path_segment;
use crate::error::{ClientError, Result};
use crate::resource::collection::Collection;
use crate::resource::entity::Entity;
use crate::resource::model::Model;

/// Server class name and identifier of a persisted reference entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DomainRef {
    #[serde(rename = "domainClassName")]
    pub class_name: String,
    #[serde(rename = "domainIdent")]
    pub ident: u64,
}

impl DomainRef {
    pub fn new(class_name: impl Into<String>, ident: u64) -> Self {
        Self {
            class_name: class_name.into(),
            ident,
        }
    }

    /// Capture the class name and identifier of `reference`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::UnpersistedReference`] unless the reference has
    /// both an identifier and a server-reported class.
    pub fn from_model<R: Entity>(reference: &Model<R>) -> Result<Self> {
        match (reference.class(), reference.id()) {
            (Some(class_name), Some(ident)) => Ok(Self::new(class_name, ident)),
            _ => Err(ClientError::UnpersistedReference {
                entity: R::RESOURCE,
            }),
        }
    }

    /// `domain/<className>/<ident>`
    pub fn path(&self) -> String {
        format!(
            "domain/{}/{}",
            encode_path_segment(&self.class_name),
            self.ident
        )
    }
}

/// An entity attached to a domain object.
pub trait DomainEntity: Entity {
    fn set_domain(&mut self, domain: DomainRef);
}

impl<E: DomainEntity> Model<E> {
    /// Attach this instance to `reference`.
    ///
    /// Validation happens before any mutation: on error the instance is unchanged.
    pub fn set_domain<R: Entity>(&mut self, reference: &Model<R>) -> Result<()> {
        let domain = DomainRef::from_model(reference)?;
        self.fields_mut().set_domain(domain);
        Ok(())
    }

    pub fn with_domain<R: Entity>(mut self, reference: &Model<R>) -> Result<Self> {
        self.set_domain(reference)?;
        Ok(self)
    }
}

impl<E: DomainEntity> Collection<E> {
    /// Scope this collection to the metadata of `reference`.
    pub fn set_domain<R: Entity>(&mut self, reference: &Model<R>) -> Result<()> {
        let domain = DomainRef::from_model(reference)?;
        self.set_domain_ref(domain);
        Ok(())
    }

    pub fn with_domain<R: Entity>(mut self, reference: &Model<R>) -> Result<Self> {
        self.set_domain(reference)?;
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Project, Property};
    use serde_json::json;

    fn persisted_project() -> Model<Project> {
        Model::from_value(json!({
            "id": 42,
            "class": "be.cytomine.project.Project",
            "name": "Lung",
        }))
        .unwrap()
    }

    #[test]
    fn test_from_model_captures_class_and_id() {
        let domain = DomainRef::from_model(&persisted_project()).unwrap();
        assert_eq!(domain, DomainRef::new("be.cytomine.project.Project", 42));
        assert_eq!(domain.path(), "domain/be.cytomine.project.Project/42");
    }

    #[test]
    fn test_from_model_rejects_new_reference() {
        let project = Model::new(Project::default());
        let err = DomainRef::from_model(&project).unwrap_err();
        assert!(matches!(
            err,
            ClientError::UnpersistedReference { entity: "project" }
        ));
    }

    #[test]
    fn test_from_model_rejects_reference_without_class() {
        let project = Model::new(Project::default()).with_id(42);
        assert!(DomainRef::from_model(&project).is_err());
    }

    #[test]
    fn test_set_domain_failure_leaves_model_untouched() {
        let mut property = Model::new(Property::new("stain", "HE"));
        let before = property.clone();

        let unpersisted = Model::new(Project::default());
        assert!(property.set_domain(&unpersisted).is_err());
        assert_eq!(property, before);
    }

    #[test]
    fn test_domain_reference_is_not_synchronized() {
        let mut project = persisted_project();
        let property = Model::new(Property::new("stain", "HE"))
            .with_domain(&project)
            .unwrap();

        project.set_id(7);
        assert_eq!(property.domain().map(|d| d.ident), Some(42));
    }
}
