//! Projects and users.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::Result;
use crate::resource::{Entity, default_public_properties};

/// A project groups images, annotations and members under one ontology.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Project {
    pub name: Option<String>,
    pub ontology: Option<u64>,
    pub discipline: Option<u64>,
    pub blind_mode: Option<bool>,
    pub is_read_only: Option<bool>,
    pub is_closed: Option<bool>,
    #[serde(deserialize_with = "crate::serde_helpers::opt_u64_from_string_or_number")]
    pub created: Option<u64>,
    #[serde(deserialize_with = "crate::serde_helpers::opt_u64_from_string_or_number")]
    pub updated: Option<u64>,
}

impl Project {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }
}

impl Entity for Project {
    const RESOURCE: &'static str = "project";
    const FILTERS: &'static [&'static str] = &["user", "ontology", "software"];
    const QUERY_PARAMS: &'static [&'static str] =
        &["withMembersCount", "withLastActivity", "sort", "order"];
}

/// A platform user.
///
/// The password is never read back from the server: it is kept locally and
/// only sent in create and update bodies.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct User {
    pub username: Option<String>,
    pub firstname: Option<String>,
    pub lastname: Option<String>,
    pub email: Option<String>,
    pub language: Option<String>,
    pub is_developer: Option<bool>,
    #[serde(skip)]
    pub password: Option<String>,
}

impl User {
    pub fn with_credentials(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: Some(username.into()),
            password: Some(password.into()),
            ..Self::default()
        }
    }
}

impl Entity for User {
    const RESOURCE: &'static str = "user";
    const FILTERS: &'static [&'static str] = &["project", "ontology"];
    const QUERY_PARAMS: &'static [&'static str] = &["onlineOnly", "withLastImage", "publicKey"];

    fn public_properties(&self, id: Option<u64>) -> Result<Map<String, Value>> {
        let mut properties = default_public_properties(self, id)?;
        if let Some(password) = &self.password {
            properties.insert("password".to_string(), Value::from(password.as_str()));
        }
        Ok(properties)
    }

    fn keep_internal(&mut self, previous: &Self) {
        if self.password.is_none() {
            self.password = previous.password.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resource::{Collection, Model};

    #[test]
    fn test_user_password_sent_only_in_body() {
        let user = Model::new(User::with_credentials("jdoe", "s3cret"));
        let body = user.public_properties().unwrap();
        assert_eq!(body["password"], "s3cret");

        let serialized = serde_json::to_value(user.fields()).unwrap();
        assert!(serialized.get("password").is_none());
    }

    #[test]
    fn test_user_password_never_read_from_server() {
        let user = Model::<User>::from_value(serde_json::json!({
            "id": 1,
            "username": "jdoe",
            "password": "leaked",
        }))
        .unwrap();
        assert_eq!(user.password, None);
    }

    #[test]
    fn test_project_filtered_by_software() {
        let projects = Collection::<Project>::new()
            .with_filter("software", 9)
            .unwrap();
        assert_eq!(projects.uri().unwrap(), "software/9/project.json");
    }
}
