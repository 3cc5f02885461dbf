use uuid::Uuid;

/// Produces candidate ids for new books.
///
/// Ids only need to be unique within one collection; the store rejects and
/// retries candidates that are already taken.
pub trait IdGenerator: Send + Sync {
    fn next_id(&self) -> String;
}

/// Random UUID v4 ids.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidGenerator;

impl IdGenerator for UuidGenerator {
    fn next_id(&self) -> String {
        Uuid::new_v4().to_string()
    }
}
