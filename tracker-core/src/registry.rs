use std::collections::HashSet;

use crate::Mmsi;

/// Tracks which vessels have had a static record accepted during the
/// current process run. Membership grows monotonically and is never
/// persisted across restarts.
#[derive(Debug, Default)]
pub struct VesselRegistry(HashSet<Mmsi>);

impl VesselRegistry {
    pub fn new() -> VesselRegistry {
        VesselRegistry(HashSet::new())
    }

    pub fn contains(&self, mmsi: Mmsi) -> bool {
        self.0.contains(&mmsi)
    }

    pub fn insert(&mut self, mmsi: Mmsi) -> bool {
        self.0.insert(mmsi)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
