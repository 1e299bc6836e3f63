//! Common test utilities for integration tests.
//!
//! # Invariants
//! - Fixtures are loaded from the `fixtures/` directory relative to the crate root
//! - Every client points at `<mock server>/api`, so mocked paths start with `/api/`

#[allow(unused_imports)]
pub use cytomine_client::testing::generators::CollectionPageGenerator;
#[allow(unused_imports)]
pub use cytomine_client::testing::load_fixture;

#[allow(unused_imports)]
pub use cytomine_client::{ClientError, Collection, HttpClient, Model, ResourceClient};
#[allow(unused_imports)]
pub use serde_json::{Value, json};
#[allow(unused_imports)]
pub use wiremock::{Mock, MockServer, ResponseTemplate};

/// Client against the `/api` root of a mock server.
#[allow(dead_code)]
pub fn client_for(server: &MockServer) -> HttpClient {
    HttpClient::builder()
        .base_url(format!("{}/api", server.uri()))
        .build()
        .expect("mock server URL is valid")
}
