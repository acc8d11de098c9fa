pub mod ocr;
pub mod vision;

pub use ocr::{extract_text, is_blank};
pub use vision::{GoogleVisionDescriber, join_labels};
