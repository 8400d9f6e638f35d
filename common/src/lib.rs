//! CellScope Common Library
//!
//! CLIとWeb(WASM)で共有される型と状態管理

pub mod chart;
pub mod config;
pub mod error;
pub mod file;
pub mod metrics;
pub mod render;
pub mod state;
pub mod timeseries;
pub mod types;

pub use config::Endpoints;
pub use error::{Error, Result, SubmitError};
pub use file::{PreviewDataUri, SelectedFile, FILE_FIELD};
pub use metrics::{MetricGroup, MetricInfo, MetricsCatalog};
pub use render::{render, RenderOptions, ResultView, Section};
pub use state::{Completion, RequestState, SubmitTicket, UploadSession, ViewTab};
pub use timeseries::{generate_samples, SeriesKind, TimeSeriesSample, SAMPLE_COUNT};
pub use types::{BoundingBox, DetectionItem, PredictionPayload, ResponseStatus};
