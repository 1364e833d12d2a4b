/// Series ids are integers: assigned by the remote store when connected,
/// or by the local monotonic allocator when running offline.
pub type SeriesId = i64;
