//! Generic resource engine: single entities ([`Model`]), paginated sets
//! ([`Collection`]), and domain association.

pub mod collection;
pub mod domain;
pub mod entity;
pub mod model;
pub mod params;

pub use collection::{Collection, Filter};
pub use domain::{DomainEntity, DomainRef};
pub use entity::{Entity, default_collection_uri, default_public_properties, default_uri};
pub use model::Model;
pub use params::serialize_params;
