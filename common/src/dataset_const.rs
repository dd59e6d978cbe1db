/// Rows shown per page of the local dataset table.
pub const PAGE_SIZE: u64 = 20;

/// Batch size for the upstream bulk fetch. Unrelated to `PAGE_SIZE`.
pub const FETCH_CHUNK_SIZE: u64 = 1000;
