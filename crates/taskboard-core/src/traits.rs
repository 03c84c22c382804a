/// Source of identifiers for tasks and their nested entries.
///
/// Identifiers are millisecond timestamps so that stored data keeps its
/// historical shape; implementations decide how collisions are avoided.
pub trait IdGenerator: Send + Sync {
    /// Hand out the next identifier.
    fn next_id(&self) -> i64;

    /// Guarantee that every identifier handed out from now on is greater than `id`.
    fn observe(&self, id: i64);
}
