pub mod entry;
pub mod item;
pub mod pack;
pub mod source;
pub mod state;

pub use entry::RawEntry;
pub use item::Item;
pub use pack::{ContentStatus, MaterialPack, Pack, ResearchPack, ResearchRecord};
pub use source::FeedSource;
pub use state::{SeenState, DEFAULT_SEEN_CAP};
