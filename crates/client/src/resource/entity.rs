//! The [`Entity`] trait: what every concrete entity type supplies to the engine.
//!
//! An entity type is a plain data struct whose serde attributes are the
//! explicit field declaration: serialized fields are public (sent as request
//! bodies and replaced on fetch), `#[serde(skip)]` fields are internal.
//! Identity (`id`, `class`) is owned by [`Model`](crate::Model), not by the entity struct.
//!
//! Everything else is configured through associated constants and the
//! overridable methods below.

use std::fmt;

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::error::{ClientError, Result};
use crate::resource::collection::Collection;
use crate::resource::domain::DomainRef;
use crate::resource::params::serialize_params;

/// Declarative configuration of one server-side entity type.
pub trait Entity:
    Serialize + DeserializeOwned + Clone + Default + fmt::Debug + Send + Sync + 'static
{
    /// Server resource name, used in item paths (`<RESOURCE>/<id>.json`).
    const RESOURCE: &'static str;

    /// Path segment of collection endpoints (`<COLLECTION>.json`).
    const COLLECTION: &'static str = Self::RESOURCE;

    /// Key of the entity-shaped object in save/update responses.
    const CALLBACK_KEY: &'static str = Self::RESOURCE;

    /// Filter keys accepted by collections of this type.
    const FILTERS: &'static [&'static str] = &[];

    /// Whether a collection of this type may be fetched without a filter.
    const UNFILTERED: bool = true;

    /// Declared collection query parameters.
    const QUERY_PARAMS: &'static [&'static str] = &[];

    /// Whether a whole collection may be POSTed at once.
    const BULK_SAVE: bool = false;

    /// Whether existing instances may be modified with PUT.
    const UPDATABLE: bool = true;

    /// Whether instances only exist attached to a domain object.
    const DOMAIN_SCOPED: bool = false;

    /// Resource path for an instance in its current state.
    fn uri(&self, id: Option<u64>) -> Result<String> {
        default_uri(self, id)
    }

    /// Whether the addressing key is known, so the instance can be fetched
    /// or deleted. Composite-key types override this.
    fn is_addressable(&self, id: Option<u64>) -> bool {
        id.is_some()
    }

    /// Request body for create and update.
    fn public_properties(&self, id: Option<u64>) -> Result<Map<String, Value>> {
        default_public_properties(self, id)
    }

    /// Domain object this instance is attached to, for domain entities.
    fn domain(&self) -> Option<DomainRef> {
        None
    }

    /// Copy internal (non-serialized) state from the previous field set after
    /// a fetch or save replaced all public fields.
    fn keep_internal(&mut self, _previous: &Self) {}

    /// Path of the collection endpoint for the given collection state.
    fn collection_uri(collection: &Collection<Self>) -> Result<String> {
        default_collection_uri(collection)
    }

    /// Query parameters sent with every collection fetch, besides paging.
    fn collection_params(collection: &Collection<Self>) -> Vec<(String, String)> {
        serialize_params(collection.params())
    }
}

/// `<resource>.json` when new, `<resource>/<id>.json` when persisted; both
/// rebased under `domain/<class>/<ident>/` for domain entities.
pub fn default_uri<E: Entity>(fields: &E, id: Option<u64>) -> Result<String> {
    let base = match fields.domain() {
        Some(domain) => format!("{}/{}", domain.path(), E::RESOURCE),
        None if E::DOMAIN_SCOPED => {
            return Err(ClientError::UnresolvedUri {
                entity: E::RESOURCE,
                reason: "domain object not set".to_string(),
            });
        }
        None => E::RESOURCE.to_string(),
    };

    Ok(match id {
        Some(id) => format!("{}/{}.json", base, id),
        None => format!("{}.json", base),
    })
}

/// Serialized fields plus `id` when known.
pub fn default_public_properties<E: Entity>(
    fields: &E,
    id: Option<u64>,
) -> Result<Map<String, Value>> {
    let mut properties = match serde_json::to_value(fields)? {
        Value::Object(map) => map,
        other => {
            return Err(ClientError::InvalidResponse(format!(
                "{} fields must serialize to an object, got {}",
                E::RESOURCE,
                other
            )));
        }
    };
    if let Some(id) = id {
        properties.insert("id".to_string(), Value::from(id));
    }
    Ok(properties)
}

/// `<filterKey>/<filterValue>/<collection>.json` when filtered,
/// `<collection>.json` otherwise, or the domain path for domain collections.
pub fn default_collection_uri<E: Entity>(collection: &Collection<E>) -> Result<String> {
    if let Some(domain) = collection.domain() {
        return Ok(format!("{}/{}.json", domain.path(), E::COLLECTION));
    }
    if E::DOMAIN_SCOPED {
        return Err(ClientError::UnresolvedUri {
            entity: E::RESOURCE,
            reason: "domain object not set".to_string(),
        });
    }

    Ok(match collection.filter() {
        Some(filter) => format!("{}/{}/{}.json", filter.key, filter.value, E::COLLECTION),
        None => format!("{}.json", E::COLLECTION),
    })
}
