pub mod enrichment;
pub mod fetching;
pub mod merging;
pub mod picker_service;
pub mod selection;

pub use picker_service::{CycleOutcome, PickerEvent, PickerService, SessionSnapshot};
