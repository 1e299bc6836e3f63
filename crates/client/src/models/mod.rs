//! Entity declarations for the platform's resources.
//!
//! Each type is a plain field struct plus an [`Entity`](crate::Entity)
//! implementation naming its resource, filters and query parameters.

mod annotation;
mod image;
mod job;
mod metadata;
mod project;

pub use annotation::{Annotation, AnnotationTerm};
pub use image::{ImageConsultation, ImageInstance};
pub use job::{Job, JobParameter};
pub use metadata::{Description, Property};
pub use project::{Project, User};
