pub mod error;

pub use error::{ApiError, ProviderError, RelayError};
