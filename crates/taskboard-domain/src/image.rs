use rand::Rng;
use serde::{Deserialize, Serialize};

/// Millisecond timestamp plus a random fraction, kept as a float to match
/// previously stored data.
pub type ImageId = f64;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageAttachment {
    pub id: ImageId,
    /// `data:<mime>;base64,<payload>`
    pub data: String,
    #[serde(default)]
    pub name: String,
}

impl ImageAttachment {
    pub fn new(id: ImageId, name: String, data: String) -> Self {
        Self { id, data, name }
    }

    /// Draw an id for a new image that no image in `existing` already uses.
    pub fn fresh_id(now_millis: i64, existing: &[ImageAttachment], rng: &mut impl Rng) -> ImageId {
        loop {
            let candidate = now_millis as f64 + rng.gen::<f64>();
            if !existing.iter().any(|image| image.id == candidate) {
                return candidate;
            }
        }
    }

    /// MIME type declared in the data URI, if any.
    pub fn media_type(&self) -> Option<&str> {
        let rest = self.data.strip_prefix("data:")?;
        let end = rest.find([';', ','])?;
        Some(&rest[..end]).filter(|mime| !mime.is_empty())
    }

    /// Approximate decoded size of a base64 data URI payload.
    pub fn approx_size_bytes(&self) -> usize {
        match self.data.split_once(";base64,") {
            Some((_, payload)) => {
                let padding = payload.bytes().rev().take_while(|b| *b == b'=').count();
                (payload.len() / 4 * 3).saturating_sub(padding)
            }
            None => self.data.split_once(',').map(|(_, p)| p.len()).unwrap_or(0),
        }
    }
}
