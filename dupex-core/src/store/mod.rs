//! In-memory stores backing the review surface.

pub mod movie_store;
pub mod selection_store;

pub use movie_store::{LoadState, MovieStore};
pub use selection_store::{
    SelectedMedia, SelectionChange, SelectionStore, SelectionSubscriber,
};
