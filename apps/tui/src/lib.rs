// Export our modules for use in binaries and tests
pub mod config;
pub mod db;
pub mod domain;
pub mod i18n;
pub mod marker;
pub mod selection;
pub mod settings;
pub mod source;
pub mod station;
pub mod viewport;

pub use domain::{AvailabilityStatus, Basemap, Language};
pub use station::{StationCollection, StationRecord};
