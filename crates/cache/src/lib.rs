mod assistant;
mod cache;
mod calendar;
mod context;
mod error;
mod event;
mod invitation;
mod load;
mod shared;
mod state;

pub use cache::EventCache;
pub use error::CacheError;
pub use state::CacheChange;
