pub mod json;

use crate::app::Result;
use crate::domain::SeenState;

pub use json::JsonStateStore;

pub trait StateStore {
    /// Load persisted state. Missing or unreadable state yields an empty one.
    fn load(&self) -> SeenState;

    /// Trim `seen` to the store's cap and persist. Errors are fatal for the run.
    fn save(&self, state: &mut SeenState) -> Result<()>;
}
