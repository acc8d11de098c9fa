pub mod error;
pub mod traits;
pub mod types;

pub use error::ShotError;
pub use traits::{ImageDescriber, ReportMailer, TextAnswerer};
pub use types::{
    AnswerRequest, AnswerResponse, CapturedImage, ImageLabel, OutboundEmail, QuestionCategory,
    Region,
};
