// Season persistence
// MessagePack + LZ4 compression with a trailing SHA-256 checksum

pub mod error;
pub mod format;
pub mod store;

pub use error::SaveError;
pub use format::{current_timestamp, decompress_and_deserialize, serialize_and_compress, SeasonSave};
pub use store::{SeasonStore, DEFAULT_SAVE_NAME};

pub const SAVE_VERSION: u32 = 1;
