use core::fmt;
use core::num::NonZeroU32;

/// Handle of a gear inside a network.
///
/// Handles are issued in insertion order and never reused. The niche from
/// `NonZeroU32` keeps `Option<GearId>` the same size as a bare handle.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(into = "u32", from = "u32")
)]
pub struct GearId(NonZeroU32);

impl GearId {
    /// Handle for the gear stored at 0-based position `index`.
    pub fn from_index(index: u32) -> Self {
        Self(NonZeroU32::MIN.saturating_add(index))
    }

    /// 0-based insertion position.
    pub fn index(self) -> u32 {
        self.0.get() - 1
    }

    /// Position as a slice index into arena storage.
    pub fn slot(self) -> usize {
        self.index() as usize
    }
}

/// Serialized form: the 0-based index.
impl From<GearId> for u32 {
    fn from(id: GearId) -> Self {
        id.index()
    }
}

impl From<u32> for GearId {
    fn from(index: u32) -> Self {
        Self::from_index(index)
    }
}

impl fmt::Debug for GearId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "GearId({})", self.index())
    }
}

impl fmt::Display for GearId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.index())
    }
}
