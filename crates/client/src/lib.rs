//! Client-side resource engine for the Cytomine REST API.
//!
//! Entities are declared as plain serde structs implementing [`Entity`].
//! [`Model`] drives the single-entity lifecycle (fetch, save, update,
//! delete) and [`Collection`] handles filtered, paginated listing, full
//! fetch and bulk save. All network access goes through a
//! [`ResourceClient`], passed explicitly to every operation.
//!
//! ```no_run
//! # async fn demo() -> cytomine_client::Result<()> {
//! use cytomine_client::{Collection, HttpClient, Model, models::Project};
//!
//! let client = HttpClient::builder()
//!     .base_url("https://cytomine.example.org/api".to_string())
//!     .build()?;
//!
//! let mut project = Model::new(Project::named("Lung"));
//! project.save(&client).await?;
//!
//! let mut projects = Collection::<Project>::new().with_max(50);
//! projects.fetch_all(&client).await?;
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod endpoints;
pub mod error;
pub mod metrics;
pub mod models;
pub mod resource;
mod serde_helpers;

#[cfg(any(feature = "test-utils", test))]
pub mod testing;

pub use client::builder::HttpClientBuilder;
pub use client::{HttpClient, ResourceClient};
pub use error::{ClientError, ErrorKind, Result};
pub use metrics::{ErrorCategory, MetricsCollector};
pub use resource::{Collection, DomainEntity, DomainRef, Entity, Filter, Model};
