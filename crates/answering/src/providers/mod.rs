pub mod mock;
pub mod openai;

pub use mock::MockAnswerer;
pub use openai::OpenAiAnswerer;
