use async_trait::async_trait;
use std::sync::Arc;
use taskboard_core::TaskboardResult;

/// String-keyed persistent storage: each key holds one string value.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Value stored under `key`, or `None` if nothing was ever stored.
    async fn get(&self, key: &str) -> TaskboardResult<Option<String>>;

    /// Store `value` under `key`, replacing whatever was there.
    async fn set(&self, key: &str, value: String) -> TaskboardResult<()>;
}

#[async_trait]
impl<S: KeyValueStore + ?Sized> KeyValueStore for Arc<S> {
    async fn get(&self, key: &str) -> TaskboardResult<Option<String>> {
        (**self).get(key).await
    }

    async fn set(&self, key: &str, value: String) -> TaskboardResult<()> {
        (**self).set(key, value).await
    }
}

/// Trait for serialization/deserialization strategies
pub trait Serializer<T: Send + Sync>: Send + Sync {
    /// Serialize data to bytes
    fn serialize(&self, data: &T) -> TaskboardResult<Vec<u8>>;

    /// Deserialize data from bytes
    fn deserialize(&self, bytes: &[u8]) -> TaskboardResult<T>;
}
