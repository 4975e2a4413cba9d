// End-to-end flow for one run: resolve the breed, make sure its folder
// exists, copy one random image for the breed and for each sub-breed, and
// write the result file.

use crate::api::DogApi;
use crate::config::Config;
use crate::disk::DiskClient;
use crate::error::{DiskError, PersistError, RunError};
use crate::filename::{FALLBACK_FILENAME, filename_from_url};
use crate::messages::Notice;
use crate::results::{ResultRecorder, UploadRecord, UploadStatus};
use indicatif::ProgressBar;
use std::path::PathBuf;
use std::thread;
use tracing::{info, warn};

/// What the user asked for.
#[derive(Debug, Clone)]
pub struct RunRequest {
    pub breed: String,
    pub token: String,
}

impl RunRequest {
    /// Breed is trimmed and lower-cased, the token trimmed.
    pub fn new(breed: &str, token: &str) -> Self {
        RunRequest {
            breed: breed.trim().to_lowercase(),
            token: token.trim().to_string(),
        }
    }
}

/// Result of a run that got past breed resolution and folder creation.
#[derive(Debug)]
pub struct RunOutcome {
    /// Progress units: the breed plus one per sub-breed.
    pub total: u64,
    pub records: Vec<UploadRecord>,
    pub saved: Result<PathBuf, PersistError>,
}

impl RunOutcome {
    pub fn uploaded(&self) -> usize {
        self.records.iter().filter(|r| r.is_uploaded()).count()
    }

    pub fn failed(&self) -> usize {
        self.records.len() - self.uploaded()
    }

    /// Lines to show once the run is over.
    pub fn notices(&self) -> Vec<Notice> {
        let saved = match &self.saved {
            Ok(path) => Notice::Saved(path.clone()),
            Err(err) => Notice::SaveFailed(err.to_string()),
        };
        vec![
            saved,
            Notice::Finished {
                uploaded: self.uploaded(),
                failed: self.failed(),
            },
        ]
    }
}

impl RunError {
    pub fn notice(&self) -> Notice {
        match self {
            RunError::EmptyToken => Notice::EmptyToken,
            RunError::Disk(DiskError::InvalidToken(_)) => Notice::InvalidToken,
            RunError::Disk(err) => Notice::ClientUnavailable(err.to_string()),
            RunError::Catalog(_) | RunError::EmptyCatalog => Notice::CatalogUnavailable,
            RunError::UnknownBreed(breed) => Notice::BreedNotFound(breed.clone()),
            RunError::FolderCreation { folder, .. } => Notice::FolderCreateFailed(folder.clone()),
        }
    }
}

/// One image to copy: the breed itself or one of its sub-breeds.
struct Slot<'a> {
    breed: &'a str,
    sub_breed: Option<&'a str>,
}

impl Slot<'_> {
    /// `hound` or `hound_afghan`, prepended to the stored filename.
    fn prefix(&self) -> String {
        match self.sub_breed {
            Some(sub) => format!("{}_{}", self.breed, sub),
            None => self.breed.to_string(),
        }
    }
}

pub struct Orchestrator {
    config: Config,
    dog_api: DogApi,
}

impl Orchestrator {
    pub fn new(config: Config) -> Result<Self, RunError> {
        let dog_api = DogApi::new(&config).map_err(RunError::Catalog)?;
        Ok(Orchestrator { config, dog_api })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Run the whole flow. `progress` gets its length set once the number
    /// of sub-breeds is known and is advanced once per image.
    pub fn run(&self, request: &RunRequest, progress: &ProgressBar) -> Result<RunOutcome, RunError> {
        if request.token.is_empty() {
            return Err(RunError::EmptyToken);
        }
        let disk = DiskClient::new(&self.config, &request.token)?;

        let catalog = self.dog_api.list_breeds().map_err(RunError::Catalog)?;
        if catalog.is_empty() {
            return Err(RunError::EmptyCatalog);
        }
        let breed = request.breed.as_str();
        let sub_breeds = catalog
            .sub_breeds(breed)
            .ok_or_else(|| RunError::UnknownBreed(breed.to_string()))?;

        let folder = format!("/{}/", breed);
        disk.create_folder(&folder)
            .map_err(|source| RunError::FolderCreation {
                folder: folder.clone(),
                source,
            })?;

        let total = 1 + sub_breeds.len() as u64;
        info!(breed, total, "starting uploads");
        progress.set_length(total);

        let mut recorder = ResultRecorder::new();
        let slots = std::iter::once(None)
            .chain(sub_breeds.iter().map(|s| Some(s.as_str())))
            .map(|sub_breed| Slot { breed, sub_breed });
        for slot in slots {
            let record = self.process_slot(&disk, &folder, &slot);
            recorder.append(record);
            progress.inc(1);
            if !self.config.pacing.is_zero() {
                thread::sleep(self.config.pacing);
            }
        }
        progress.finish();

        let path = self.config.results_path.clone();
        let saved = match recorder.persist(&path) {
            Ok(()) => Ok(path),
            Err(err) => {
                warn!(error = %err, "could not save results");
                Err(err)
            }
        };

        Ok(RunOutcome {
            total,
            records: recorder.into_records(),
            saved,
        })
    }

    /// Fetch and upload one image. Never fails: problems become a `failed`
    /// record.
    fn process_slot(&self, disk: &DiskClient, folder: &str, slot: &Slot<'_>) -> UploadRecord {
        let prefix = slot.prefix();
        let fetched = match slot.sub_breed {
            Some(sub) => self.dog_api.random_sub_breed_image(slot.breed, sub),
            None => self.dog_api.random_image(slot.breed),
        };

        let image_url = match fetched {
            Ok(url) => url,
            Err(err) => {
                warn!(slot = %prefix, error = %err, "could not fetch image url");
                return UploadRecord {
                    breed: slot.breed.to_string(),
                    sub_breed: slot.sub_breed.map(str::to_string),
                    image_url: None,
                    destination_path: format!("{}{}_{}", folder, prefix, FALLBACK_FILENAME),
                    status: UploadStatus::Failed,
                    failure: Some(err.kind()),
                };
            }
        };

        let destination = format!("{}{}_{}", folder, prefix, filename_from_url(&image_url));
        let (status, failure) = match disk.upload_from_url(&image_url, &destination) {
            Ok(()) => (UploadStatus::Uploaded, None),
            Err(err) => {
                warn!(%destination, error = %err, "upload failed");
                (UploadStatus::Failed, Some(err.kind()))
            }
        };

        UploadRecord {
            breed: slot.breed.to_string(),
            sub_breed: slot.sub_breed.map(str::to_string),
            image_url: Some(image_url),
            destination_path: destination,
            status,
            failure,
        }
    }
}
