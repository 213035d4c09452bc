//! Image generation service clients.

mod mock_generator;
mod openai_images;

pub use mock_generator::MockImageGenerator;
pub use openai_images::{OpenAiImages, OpenAiImagesConfig};
