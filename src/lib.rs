pub mod bundle;
pub mod config;
pub mod error;
pub mod export;
pub mod logging;
pub mod percentiles;
pub mod player_master;
pub mod slug;
pub mod stat_access;
pub mod table;

pub use bundle::{Bundle, BundleCache, FileSource, InlineSource, StatSource, global_bundle};
pub use error::BundleError;
pub use player_master::{PlayerMasterRow, StatField};
pub use slug::normalize_name;
pub use stat_access::{StatMode, get_stat, get_stat_pct_label};
