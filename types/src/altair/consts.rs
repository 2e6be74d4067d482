/// Default domain type for sync-committee computations, overridable through
/// the `DOMAIN_SYNC_COMMITTEE` configuration key.
pub const DOMAIN_SYNC_COMMITTEE: [u8; 4] = [0x07, 0x00, 0x00, 0x00];
