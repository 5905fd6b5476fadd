//! Match records: every won game, ranked by how few moves it took.

mod store;

pub use store::{MatchRecord, RecordSink, RecordsStore};
