use std::collections::HashMap;

/// Point-in-time listing of every holder of a collection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HolderSnapshot {
    /// Lower-cased wallet address to token count. Only wallets holding at least one
    /// token are present.
    pub holders: HashMap<String, u64>,
    /// `false` when a page request failed and the listing stopped early.
    ///
    /// Wallets on the unfetched pages are simply missing, so consumers must not treat
    /// absence from an incomplete snapshot as "holds nothing".
    pub complete: bool,
}

impl HolderSnapshot {
    pub fn len(&self) -> usize {
        self.holders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.holders.is_empty()
    }
}
