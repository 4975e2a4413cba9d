// Dog image API client: a small blocking HTTP client for the breed list
// and random image endpoints. Nothing is cached between calls.

use crate::config::Config;
use crate::error::CatalogError;
use reqwest::blocking::Client;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::collections::BTreeMap;
use tracing::debug;

/// Breed name to its sub-breeds, as reported by `/breeds/list/all`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct BreedCatalog(BTreeMap<String, Vec<String>>);

impl BreedCatalog {
    pub fn contains(&self, breed: &str) -> bool {
        self.0.contains_key(breed)
    }

    /// Sub-breeds of `breed` in API order, `None` for an unknown breed.
    pub fn sub_breeds(&self, breed: &str) -> Option<&[String]> {
        self.0.get(breed).map(Vec::as_slice)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Every dog.ceo response is wrapped as `{ "status": ..., "message": ... }`.
/// On errors `message` is a plain string, so it is decoded lazily.
#[derive(Deserialize, Debug)]
struct Envelope {
    status: String,
    message: serde_json::Value,
}

/// Client for the dog image API.
#[derive(Clone)]
pub struct DogApi {
    client: Client,
    base_url: String,
}

impl DogApi {
    pub fn new(config: &Config) -> Result<Self, CatalogError> {
        let client = Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|source| CatalogError::Transport {
                url: config.dog_api_url.clone(),
                source,
            })?;
        Ok(DogApi {
            client,
            base_url: config.dog_api_url.clone(),
        })
    }

    /// Fetch the full breed catalog.
    pub fn list_breeds(&self) -> Result<BreedCatalog, CatalogError> {
        let url = format!("{}/breeds/list/all", self.base_url);
        let catalog: BreedCatalog = self.get_message(&url)?;
        debug!(breeds = catalog.len(), "fetched breed catalog");
        Ok(catalog)
    }

    /// URL of a random image of `breed`.
    pub fn random_image(&self, breed: &str) -> Result<String, CatalogError> {
        let url = format!("{}/breed/{}/images/random", self.base_url, breed);
        self.get_message(&url)
    }

    /// URL of a random image of `breed`/`sub_breed`.
    pub fn random_sub_breed_image(
        &self,
        breed: &str,
        sub_breed: &str,
    ) -> Result<String, CatalogError> {
        let url = format!(
            "{}/breed/{}/{}/images/random",
            self.base_url, breed, sub_breed
        );
        self.get_message(&url)
    }

    fn get_message<T: DeserializeOwned>(&self, url: &str) -> Result<T, CatalogError> {
        debug!(%url, "GET");
        let res = self
            .client
            .get(url)
            .send()
            .map_err(|source| CatalogError::Transport {
                url: url.to_string(),
                source,
            })?;
        if !res.status().is_success() {
            return Err(CatalogError::HttpStatus {
                url: url.to_string(),
                status: res.status(),
            });
        }
        let body = res.text().map_err(|source| CatalogError::Transport {
            url: url.to_string(),
            source,
        })?;
        let decode = |source| CatalogError::Decode {
            url: url.to_string(),
            source,
        };

        let envelope: Envelope = serde_json::from_str(&body).map_err(decode)?;
        if envelope.status != "success" {
            let message = match envelope.message {
                serde_json::Value::String(s) => s,
                other => other.to_string(),
            };
            return Err(CatalogError::ApiStatus {
                status: envelope.status,
                message,
            });
        }
        serde_json::from_value(envelope.message).map_err(decode)
    }
}
