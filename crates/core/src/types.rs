use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

/// A screenshot persisted to local storage.
///
/// Files accumulate under the screenshot directory and are never pruned.
#[derive(Debug, Clone)]
pub struct CapturedImage {
    pub path: PathBuf,
    pub captured_at: DateTime<Local>,
}

impl CapturedImage {
    /// Base name of the screenshot file, used when naming the attachment.
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}

/// A rectangle on the primary display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Region {
    pub left: i32,
    pub top: i32,
    pub width: u32,
    pub height: u32,
}

impl FromStr for Region {
    type Err = String;

    /// Parse `"left,top,width,height"`. Width and height must be positive.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split(',').map(str::trim).collect();
        if parts.len() != 4 {
            return Err(format!("expected \"left,top,width,height\", got \"{s}\""));
        }
        let left = parts[0]
            .parse()
            .map_err(|_| format!("invalid left offset \"{}\"", parts[0]))?;
        let top = parts[1]
            .parse()
            .map_err(|_| format!("invalid top offset \"{}\"", parts[1]))?;
        let width = parts[2]
            .parse()
            .map_err(|_| format!("invalid width \"{}\"", parts[2]))?;
        let height = parts[3]
            .parse()
            .map_err(|_| format!("invalid height \"{}\"", parts[3]))?;
        if width == 0 || height == 0 {
            return Err("width and height must be positive".to_string());
        }
        Ok(Region {
            left,
            top,
            width,
            height,
        })
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{},{},{}", self.left, self.top, self.width, self.height)
    }
}

/// Topic of a recognized question; selects the prompt template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionCategory {
    MultipleChoice,
    DragAndDrop,
    CodeInterpretation,
    Networking,
    Security,
    General,
}

impl QuestionCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            QuestionCategory::MultipleChoice => "multiple_choice",
            QuestionCategory::DragAndDrop => "drag_and_drop",
            QuestionCategory::CodeInterpretation => "code_interpretation",
            QuestionCategory::Networking => "networking",
            QuestionCategory::Security => "security",
            QuestionCategory::General => "general",
        }
    }
}

impl fmt::Display for QuestionCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Request to a text-answering model.
#[derive(Debug, Clone)]
pub struct AnswerRequest {
    pub model: String,
    pub system_prompt: String,
    pub user_prompt: String,
    pub max_tokens: u32,
    /// Number of completions to request; only the first is consumed.
    pub n: u32,
    pub stop: Option<Vec<String>>,
    pub temperature: f32,
}

/// A completed answer from a text provider.
#[derive(Debug, Clone)]
pub struct AnswerResponse {
    pub content: String,
    pub provider: String,
    pub model: String,
    pub latency_ms: u64,
}

/// One label annotation from the vision service, kept in service order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageLabel {
    pub description: String,
    pub score: f32,
}

/// A report ready for delivery: subject, plain-text body, and the screenshot
/// to attach.
#[derive(Debug, Clone, PartialEq)]
pub struct OutboundEmail {
    pub subject: String,
    pub body: String,
    pub attachment: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_region() {
        let region: Region = "0,100,1920,880".parse().unwrap();
        assert_eq!(
            region,
            Region {
                left: 0,
                top: 100,
                width: 1920,
                height: 880
            }
        );
    }

    #[test]
    fn parses_region_with_spaces() {
        let region: Region = " 10, 20, 30, 40 ".parse().unwrap();
        assert_eq!(region.left, 10);
        assert_eq!(region.height, 40);
    }

    #[test]
    fn rejects_zero_area_region() {
        assert!("0,0,0,100".parse::<Region>().is_err());
        assert!("0,0,100,0".parse::<Region>().is_err());
    }

    #[test]
    fn rejects_malformed_region() {
        assert!("1,2,3".parse::<Region>().is_err());
        assert!("a,b,c,d".parse::<Region>().is_err());
    }

    #[test]
    fn captured_image_file_name() {
        let shot = CapturedImage {
            path: PathBuf::from("screenshots/screenshot_20240501-130203.png"),
            captured_at: Local::now(),
        };
        assert_eq!(shot.file_name(), "screenshot_20240501-130203.png");
    }
}
