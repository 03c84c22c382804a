pub mod app;
pub mod components;
pub mod controller;
pub mod dialog;
pub mod editor;
pub mod events;
pub mod input;
pub mod selection;
pub mod services;
pub mod theme;
pub mod ui;

pub use app::App;
pub use controller::{Controller, ControllerOutcome, UploadSummary};
pub use services::{DecodedImage, FileDataUriDecoder, ImageDecoder};
