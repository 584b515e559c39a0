// farecard/src/storage/mod.rs

pub mod mock;
pub mod session;
pub mod traits;

pub use mock::{MockCard, StorageCall};
pub use session::CardSession;
pub use traits::CardStorage;
