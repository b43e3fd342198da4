//! Effects - side effects declared by the reducer

/// Side effects that can be triggered by actions
#[derive(Debug, Clone)]
pub enum Effect {
    /// Fetch the catalog names (single shot, client-side pagination)
    FetchRoster { limit: u32 },
    /// Fetch detail data for one record
    FetchDetail { id: u16 },
}
