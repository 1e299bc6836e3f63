//! Metadata attached to another entity through a domain reference.

use serde::{Deserialize, Serialize};

use crate::error::{ClientError, Result};
use crate::resource::{DomainEntity, DomainRef, Entity};

/// Key/value property of a domain object.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Property {
    pub key: Option<String>,
    pub value: Option<String>,
    #[serde(rename = "domainClassName")]
    pub domain_class_name: Option<String>,
    #[serde(rename = "domainIdent")]
    pub domain_ident: Option<u64>,
}

impl Property {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: Some(key.into()),
            value: Some(value.into()),
            ..Self::default()
        }
    }
}

impl Entity for Property {
    const RESOURCE: &'static str = "property";
    const DOMAIN_SCOPED: bool = true;
    const QUERY_PARAMS: &'static [&'static str] = &["key"];

    fn domain(&self) -> Option<DomainRef> {
        domain_of(self.domain_class_name.as_deref(), self.domain_ident)
    }

    fn keep_internal(&mut self, previous: &Self) {
        keep_domain(
            (&mut self.domain_class_name, &mut self.domain_ident),
            (&previous.domain_class_name, previous.domain_ident),
        );
    }
}

impl DomainEntity for Property {
    fn set_domain(&mut self, domain: DomainRef) {
        self.domain_class_name = Some(domain.class_name);
        self.domain_ident = Some(domain.ident);
    }
}

/// Free-text description; a domain object has at most one.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Description {
    pub data: Option<String>,
    #[serde(rename = "domainClassName")]
    pub domain_class_name: Option<String>,
    #[serde(rename = "domainIdent")]
    pub domain_ident: Option<u64>,
}

impl Description {
    pub fn new(data: impl Into<String>) -> Self {
        Self {
            data: Some(data.into()),
            ..Self::default()
        }
    }
}

impl Entity for Description {
    const RESOURCE: &'static str = "description";
    const DOMAIN_SCOPED: bool = true;

    /// `domain/<class>/<ident>/description.json` for every operation.
    fn uri(&self, _id: Option<u64>) -> Result<String> {
        let domain = self.domain().ok_or_else(|| ClientError::UnresolvedUri {
            entity: Self::RESOURCE,
            reason: "domain object not set".to_string(),
        })?;
        Ok(format!("{}/{}.json", domain.path(), Self::RESOURCE))
    }

    fn is_addressable(&self, _id: Option<u64>) -> bool {
        self.domain().is_some()
    }

    fn domain(&self) -> Option<DomainRef> {
        domain_of(self.domain_class_name.as_deref(), self.domain_ident)
    }

    fn keep_internal(&mut self, previous: &Self) {
        keep_domain(
            (&mut self.domain_class_name, &mut self.domain_ident),
            (&previous.domain_class_name, previous.domain_ident),
        );
    }
}

impl DomainEntity for Description {
    fn set_domain(&mut self, domain: DomainRef) {
        self.domain_class_name = Some(domain.class_name);
        self.domain_ident = Some(domain.ident);
    }
}

/// Responses that omit the domain keep the association made locally.
fn keep_domain(
    current: (&mut Option<String>, &mut Option<u64>),
    previous: (&Option<String>, Option<u64>),
) {
    if current.0.is_none() && current.1.is_none() {
        *current.0 = previous.0.clone();
        *current.1 = previous.1;
    }
}

fn domain_of(class_name: Option<&str>, ident: Option<u64>) -> Option<DomainRef> {
    Some(DomainRef::new(class_name?, ident?))
}
