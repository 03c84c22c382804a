pub mod image_decoder;

pub use image_decoder::{DecodedImage, FileDataUriDecoder, ImageDecoder};

#[cfg(test)]
pub use image_decoder::MockImageDecoder;
