#![allow(dead_code)]

use dogdisk_cli::config::Config;
use serde_json::json;
use std::path::Path;
use std::time::Duration;
use tokio::runtime::Runtime;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// A mock server driven from synchronous tests.
///
/// The blocking reqwest client must not run inside an async context, so
/// the tests stay synchronous and use the runtime only to start the server
/// and mount mocks.
pub struct Harness {
    pub rt: Runtime,
    pub server: MockServer,
}

impl Harness {
    pub fn start() -> Self {
        let rt = Runtime::new().unwrap();
        let server = rt.block_on(MockServer::start());
        Harness { rt, server }
    }

    pub fn mount(&self, mock: Mock) {
        self.rt.block_on(mock.mount(&self.server));
    }

    pub fn uri(&self) -> String {
        self.server.uri()
    }

    /// Both APIs point at the mock server; the dog API lives under `/api`.
    pub fn config(&self, results: &Path) -> Config {
        Config {
            dog_api_url: format!("{}/api", self.uri()),
            disk_api_url: format!("{}/disk", self.uri()),
            request_timeout: Duration::from_secs(1),
            upload_timeout: Duration::from_secs(1),
            pacing: Duration::ZERO,
            results_path: results.to_path_buf(),
            plain_output: true,
            ..Config::default()
        }
    }

    pub fn mount_catalog(&self, catalog: serde_json::Value) {
        self.mount(
            Mock::given(method("GET"))
                .and(path("/api/breeds/list/all"))
                .respond_with(
                    ResponseTemplate::new(200)
                        .set_body_json(json!({"status": "success", "message": catalog})),
                ),
        );
    }

    /// Random image endpoint for `breed_path` (e.g. `hound` or `hound/afghan`).
    pub fn mount_image(&self, breed_path: &str, image_url: &str) {
        self.mount(
            Mock::given(method("GET"))
                .and(path(format!("/api/breed/{}/images/random", breed_path)))
                .respond_with(
                    ResponseTemplate::new(200)
                        .set_body_json(json!({"status": "success", "message": image_url})),
                ),
        );
    }
}
