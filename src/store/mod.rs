pub mod error;
pub mod store;

pub use error::{StoreError, StoreErrorKind};
pub use store::DocumentStore;
