//! Keyword routing of recognized text to a question category.
//!
//! Crude substring matching over a fixed ordered rule table. The first
//! matching category wins, so earlier entries take precedence when a text
//! contains cues for more than one.

use shotwire_core::QuestionCategory;

/// Ordered rule table; matching is case-insensitive.
static CATEGORY_RULES: &[(QuestionCategory, &[&str])] = &[
    (
        QuestionCategory::MultipleChoice,
        &[
            "multiple choice",
            "multiple-choice",
            "which of the following",
            "select the correct",
            "choose the correct",
        ],
    ),
    (
        QuestionCategory::DragAndDrop,
        &["drag and drop", "drag-and-drop", "drag the", "matching pairs"],
    ),
    (
        QuestionCategory::CodeInterpretation,
        &["code", "function", "script", "output of"],
    ),
    (
        QuestionCategory::Networking,
        &["network", "subnet", "ip address", "router", "dns", "tcp"],
    ),
    (
        QuestionCategory::Security,
        &[
            "security",
            "encryption",
            "firewall",
            "vulnerability",
            "malware",
            "phishing",
        ],
    ),
];

/// Pick the category for `text`; `general` when nothing matches.
pub fn classify(text: &str) -> QuestionCategory {
    let haystack = text.to_lowercase();
    for (category, keywords) in CATEGORY_RULES {
        if keywords.iter().any(|kw| haystack.contains(kw)) {
            return *category;
        }
    }
    QuestionCategory::General
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn earlier_category_wins_on_ties() {
        let text = "This multiple choice question covers security topics";
        assert_eq!(classify(text), QuestionCategory::MultipleChoice);
    }

    #[test]
    fn matching_is_case_insensitive() {
        assert_eq!(
            classify("ANSWER THE MULTIPLE CHOICE QUESTION"),
            QuestionCategory::MultipleChoice
        );
    }

    #[test]
    fn unmatched_text_is_general() {
        assert_eq!(
            classify("Describe the water cycle in your own words"),
            QuestionCategory::General
        );
        assert_eq!(classify(""), QuestionCategory::General);
    }

    #[test]
    fn each_category_has_a_route() {
        assert_eq!(
            classify("Drag and drop the items into place"),
            QuestionCategory::DragAndDrop
        );
        assert_eq!(
            classify("What is the output of the following snippet?"),
            QuestionCategory::CodeInterpretation
        );
        assert_eq!(
            classify("Assign an IP address to the host"),
            QuestionCategory::Networking
        );
        assert_eq!(
            classify("Why is a firewall placed at the perimeter?"),
            QuestionCategory::Security
        );
    }
}
