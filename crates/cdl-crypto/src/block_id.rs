use cdl_types::BlockId;

/// Generator of opaque per-event block identifiers.
///
/// Each id is 256 bits from the thread RNG rendered as `0x` + 64 lowercase
/// hex characters. Within a ledger's lifetime collisions are negligible;
/// the id carries no meaning beyond uniqueness and is not a security
/// token.
#[derive(Clone, Copy, Debug, Default)]
pub struct BlockIdGenerator;

impl BlockIdGenerator {
    pub fn new() -> Self {
        Self
    }

    /// Mint the next block identifier.
    pub fn next_id(&self) -> BlockId {
        let mut bytes = [0u8; 32];
        rand::Rng::fill(&mut rand::thread_rng(), &mut bytes);
        BlockId::from_bytes(&bytes)
    }
}
