mod load_collections;

pub use load_collections::{reload_after_mutation, LoadCollectionsUseCase};
