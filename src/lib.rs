// Library root
// -----------
// The binary (`main.rs`) wires these modules into an interactive CLI that
// copies random dog images for a breed into a cloud disk.
//
// Module responsibilities:
// - `api`: dog image API client (breed catalog, random image URLs).
// - `disk`: cloud disk client (folder creation, upload by URL with the
//   missing-folder retry).
// - `filename`: storage name derived from an image URL.
// - `results`: per-image records and the JSON result file.
// - `orchestrator`: the end-to-end run.
// - `messages` / `ui`: status lines, prompts and progress display.
// - `config`, `error`, `telemetry`: environment settings, error types and
//   logging setup.
pub mod api;
pub mod config;
pub mod disk;
pub mod error;
pub mod filename;
pub mod messages;
pub mod orchestrator;
pub mod results;
pub mod telemetry;
pub mod ui;
