//! [`Model`]: one addressable server entity and its lifecycle.
//!
//! # Lifecycle
//!
//! ```text
//! NEW --save--> PERSISTED --update*--> PERSISTED --delete--> DELETED
//! ```
//!
//! - `save` on a new instance always POSTs; it never routes to `update`.
//! - `fetch` replaces every public field with the server's copy.
//! - After `delete` the instance stays readable but every lifecycle
//!   operation fails with [`ClientError::Deleted`] before any network call.
//!
//! Every network operation takes the [`ResourceClient`] explicitly.

use std::ops::{Deref, DerefMut};

use serde_json::Value;
use tracing::debug;

use crate::client::ResourceClient;
use crate::error::{ClientError, Result};
use crate::resource::entity::Entity;
use crate::serde_helpers::{opt_string_from_number_or_string, opt_u64_from_string_or_number};

/// One server entity of type `E`.
///
/// Derefs to the entity's field struct, so declared fields read as
/// `model.name`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Model<E> {
    id: Option<u64>,
    class: Option<String>,
    command: Option<String>,
    deleted: bool,
    fields: E,
}

impl<E: Entity> Model<E> {
    /// A new, unsaved instance with the given field values.
    pub fn new(fields: E) -> Self {
        Self {
            id: None,
            class: None,
            command: None,
            deleted: false,
            fields,
        }
    }

    /// Set a known identifier, e.g. to fetch an existing entity.
    pub fn with_id(mut self, id: u64) -> Self {
        self.id = Some(id);
        self
    }

    /// Build an instance from a single-item wire object.
    pub fn from_value(value: Value) -> Result<Self> {
        let mut model = Self::new(E::default());
        model.populate(value)?;
        Ok(model)
    }

    /// True iff the identifier is unset.
    pub fn is_new(&self) -> bool {
        self.id.is_none()
    }

    /// True once `delete` succeeded through this instance.
    pub fn is_deleted(&self) -> bool {
        self.deleted
    }

    pub fn id(&self) -> Option<u64> {
        self.id
    }

    pub fn set_id(&mut self, id: u64) {
        self.id = Some(id);
    }

    /// Concrete type name reported by the server on fetch or save.
    pub fn class(&self) -> Option<&str> {
        self.class.as_deref()
    }

    /// Command token returned by the last mutating call, for later undo.
    pub fn command_id(&self) -> Option<&str> {
        self.command.as_deref()
    }

    pub fn fields(&self) -> &E {
        &self.fields
    }

    pub fn fields_mut(&mut self) -> &mut E {
        &mut self.fields
    }

    pub fn into_fields(self) -> E {
        self.fields
    }

    /// Resource path for the current state.
    pub fn uri(&self) -> Result<String> {
        self.fields.uri(self.id)
    }

    /// Request body for create and update.
    pub fn public_properties(&self) -> Result<Value> {
        Ok(Value::Object(self.fields.public_properties(self.id)?))
    }

    /// GET the entity and replace all public fields with the response.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::NotFound`] without any network call when the
    /// addressing key is unset.
    pub async fn fetch(&mut self, client: &dyn ResourceClient) -> Result<()> {
        self.ensure_alive("fetch")?;
        if !self.fields.is_addressable(self.id) {
            return Err(ClientError::NotFound(format!(
                "{} cannot be fetched without an identifier",
                E::RESOURCE
            )));
        }

        let uri = self.uri()?;
        debug!(entity = E::RESOURCE, %uri, "Fetching resource");
        let response = client.get(&uri, &[]).await?;
        self.populate(response)
    }

    /// Create the entity if new (POST), otherwise [`update`](Self::update) it.
    pub async fn save(&mut self, client: &dyn ResourceClient) -> Result<()> {
        self.ensure_alive("save")?;
        if !self.is_new() {
            return self.update(client).await;
        }

        let uri = self.uri()?;
        let body = self.public_properties()?;
        debug!(entity = E::RESOURCE, %uri, "Creating resource");
        let response = client.post(&uri, &body).await?;
        self.populate_from_response(response)
    }

    /// PUT the public properties of a persisted entity.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Unsupported`] for entity types that cannot be
    /// modified, and [`ClientError::NotPersisted`] for new instances.
    pub async fn update(&mut self, client: &dyn ResourceClient) -> Result<()> {
        if !E::UPDATABLE {
            return Err(ClientError::Unsupported {
                operation: "update",
                entity: E::RESOURCE,
            });
        }
        self.ensure_alive("update")?;
        if self.is_new() {
            return Err(ClientError::NotPersisted {
                operation: "update",
                entity: E::RESOURCE,
            });
        }

        let uri = self.uri()?;
        let body = self.public_properties()?;
        debug!(entity = E::RESOURCE, %uri, "Updating resource");
        let response = client.put(&uri, &body).await?;
        self.populate_from_response(response)
    }

    /// DELETE the entity on the server. Local fields are left as they are.
    pub async fn delete(&mut self, client: &dyn ResourceClient) -> Result<()> {
        self.ensure_alive("delete")?;
        if !self.fields.is_addressable(self.id) {
            return Err(ClientError::NotPersisted {
                operation: "delete",
                entity: E::RESOURCE,
            });
        }

        let uri = self.uri()?;
        debug!(entity = E::RESOURCE, %uri, "Deleting resource");
        let response = client.delete(&uri, &[]).await?;
        self.command = command_token(&response)?;
        self.deleted = true;
        Ok(())
    }

    /// Fetch the entity with the given identifier.
    pub async fn fetch_id(client: &dyn ResourceClient, id: u64) -> Result<Self> {
        let mut model = Self::new(E::default()).with_id(id);
        model.fetch(client).await?;
        Ok(model)
    }

    /// Delete the entity with the given identifier.
    pub async fn delete_id(client: &dyn ResourceClient, id: u64) -> Result<()> {
        Self::new(E::default()).with_id(id).delete(client).await
    }

    fn ensure_alive(&self, operation: &'static str) -> Result<()> {
        if self.deleted {
            return Err(ClientError::Deleted {
                operation,
                entity: E::RESOURCE,
            });
        }
        Ok(())
    }

    /// Record the command token and populate from the entity-shaped field.
    fn populate_from_response(&mut self, mut response: Value) -> Result<()> {
        let command = command_token(&response)?;
        let entity = if response.get(E::CALLBACK_KEY).is_some_and(Value::is_object) {
            response[E::CALLBACK_KEY].take()
        } else {
            response
        };
        self.populate(entity)?;
        self.command = command;
        Ok(())
    }

    /// Replace identity and all public fields from a wire object.
    pub(crate) fn populate(&mut self, value: Value) -> Result<()> {
        let mut map = match value {
            Value::Object(map) => map,
            other => {
                return Err(ClientError::InvalidResponse(format!(
                    "expected a {} object, got {}",
                    E::RESOURCE,
                    other
                )));
            }
        };

        let id = opt_u64_from_string_or_number(map.remove("id").unwrap_or(Value::Null))?;
        let class = match map.remove("class") {
            Some(Value::String(class)) => Some(class),
            _ => None,
        };

        let mut fields: E = serde_json::from_value(Value::Object(map))?;
        fields.keep_internal(&self.fields);

        self.fields = fields;
        if id.is_some() {
            self.id = id;
        }
        if class.is_some() {
            self.class = class;
        }
        Ok(())
    }
}

fn command_token(response: &Value) -> Result<Option<String>> {
    let token = response.get("command").cloned().unwrap_or(Value::Null);
    Ok(opt_string_from_number_or_string(token)?)
}

impl<E> Deref for Model<E> {
    type Target = E;

    fn deref(&self) -> &E {
        &self.fields
    }
}

impl<E> DerefMut for Model<E> {
    fn deref_mut(&mut self) -> &mut E {
        &mut self.fields
    }
}

impl<E: Entity> From<E> for Model<E> {
    fn from(fields: E) -> Self {
        Self::new(fields)
    }
}
