pub mod market_data;
pub mod output;
pub mod record;

pub use market_data::OhlcvBar;
pub use output::{OutputRow, UNKNOWN_DATE};
pub use record::PartialRecord;
