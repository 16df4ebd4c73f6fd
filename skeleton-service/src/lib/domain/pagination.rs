/// Row window for list queries.
///
/// `limit` of `None` means no cap. `offset` rows are skipped after ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Pagination {
    pub limit: Option<i64>,
    pub offset: i64,
}

impl Pagination {
    /// Build a window from raw caller values.
    ///
    /// A limit of zero or below is unbounded. Negative offsets clamp to zero.
    pub fn new(limit: i64, offset: i64) -> Self {
        Self {
            limit: (limit > 0).then_some(limit),
            offset: offset.max(0),
        }
    }

    pub fn unbounded() -> Self {
        Self::default()
    }
}
