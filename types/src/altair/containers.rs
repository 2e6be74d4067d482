use bls::PublicKeyBytes;
use serde::Serialize;

/// A sync committee with its aggregate key. The number of members is
/// `SYNC_COMMITTEE_SIZE`, which is a runtime value in this project.
#[derive(Clone, PartialEq, Eq, Default, Debug, Serialize)]
pub struct SyncCommittee {
    pub pubkeys: Vec<PublicKeyBytes>,
    pub aggregate_pubkey: PublicKeyBytes,
}
