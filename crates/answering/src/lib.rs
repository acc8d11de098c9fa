pub mod classify;
pub mod prompts;
pub mod providers;

pub use classify::classify;
pub use prompts::{SYSTEM_PROMPT, compose};
pub use providers::{MockAnswerer, OpenAiAnswerer};
