mod cycle;
mod filters;
mod item;
pub(crate) mod source;

pub use cycle::{CycleCounter, CycleToken};
pub use filters::{parse_owners, Filters};
pub use item::{CollectionItem, ItemStats, LastPlayed};
pub use source::{CollectionSource, PlaysSource};
