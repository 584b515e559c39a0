// farecard/src/channel/mod.rs

pub mod mock;
#[cfg(feature = "std")]
pub mod stream;
pub mod traits;

pub use mock::MockChannel;
#[cfg(feature = "std")]
pub use stream::StreamChannel;
pub use traits::LineChannel;
