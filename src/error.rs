use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum BundleError {
    /// The stat payload could not be read. Nothing else in a bundle build fails.
    #[error("player master source unavailable: {origin}")]
    SourceUnavailable {
        origin: String,
        #[source]
        source: io::Error,
    },
}
