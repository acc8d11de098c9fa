//! The one-shot capture-to-email pipeline.
//!
//! Control flow is strictly sequential; the only decision point is the
//! text/no-text fork after OCR. Provider failures on either answer branch are
//! caught here and end the run without delivery; every other failure
//! propagates to `main`.

use std::fs;
use std::sync::Arc;

use tracing::{error, info};
use uuid::Uuid;

use shotwire_answering::{SYSTEM_PROMPT, classify, compose};
use shotwire_capture as capture;
use shotwire_config::Config;
use shotwire_core::{
    AnswerRequest, CapturedImage, ImageDescriber, OutboundEmail, ReportMailer, ShotError,
    TextAnswerer,
};
use shotwire_understanding::{join_labels, ocr};

/// How a run ended: either the report went out, or a provider failure was
/// caught and delivery was skipped.
#[derive(Debug, PartialEq, Eq)]
pub enum RunOutcome {
    Delivered { subject: String },
    Aborted { stage: &'static str },
}

pub struct Pipeline<'a> {
    config: &'a Config,
    answerer: Arc<dyn TextAnswerer>,
    describer: Arc<dyn ImageDescriber>,
    mailer: Arc<dyn ReportMailer>,
}

impl<'a> Pipeline<'a> {
    pub fn new(
        config: &'a Config,
        answerer: Arc<dyn TextAnswerer>,
        describer: Arc<dyn ImageDescriber>,
        mailer: Arc<dyn ReportMailer>,
    ) -> Self {
        Self {
            config,
            answerer,
            describer,
            mailer,
        }
    }

    /// Run the full pipeline once: capture, recognize, answer, deliver.
    pub async fn run(&self) -> Result<RunOutcome, ShotError> {
        let run_id = Uuid::new_v4();
        info!(%run_id, "starting run");

        let shot = capture::capture(&self.config.screenshot_dir, self.config.capture_region)?;
        let text = ocr::extract_text(&shot.path)?;
        info!(chars = text.trim().len(), "text recognized");

        self.answer_and_deliver(&shot, &text).await
    }

    /// Everything after OCR: pick a branch, obtain the answer, send the
    /// report. Split from [`Pipeline::run`] so tests can drive it without a
    /// live display or OCR engine.
    pub async fn answer_and_deliver(
        &self,
        shot: &CapturedImage,
        text: &str,
    ) -> Result<RunOutcome, ShotError> {
        if ocr::is_blank(text) {
            self.describe_and_deliver(shot).await
        } else {
            self.answer_text(shot, text).await
        }
    }

    async fn answer_text(
        &self,
        shot: &CapturedImage,
        text: &str,
    ) -> Result<RunOutcome, ShotError> {
        let category = classify(text);
        info!(category = %category, "question classified");

        let request = AnswerRequest {
            model: self.config.model.clone(),
            system_prompt: SYSTEM_PROMPT.to_string(),
            user_prompt: compose(text, category),
            max_tokens: self.config.max_answer_tokens,
            n: 1,
            stop: None,
            temperature: self.config.temperature,
        };

        let answer = match self.answerer.answer(&request).await {
            Ok(answer) => answer,
            Err(err @ ShotError::Answerer { .. }) => {
                error!(error = %err, "answer provider failed, skipping delivery");
                return Ok(RunOutcome::Aborted { stage: "answer" });
            }
            Err(err) => return Err(err),
        };
        info!(provider = %answer.provider, latency_ms = answer.latency_ms, "answer received");

        let email = OutboundEmail {
            subject: "Screenshot Answer".to_string(),
            body: format!("Answer:\n{}", answer.content),
            attachment: Some(shot.path.clone()),
        };
        self.mailer.send(&email).await?;

        Ok(RunOutcome::Delivered {
            subject: email.subject,
        })
    }

    async fn describe_and_deliver(&self, shot: &CapturedImage) -> Result<RunOutcome, ShotError> {
        info!("no text recognized, describing image instead");

        let bytes = fs::read(&shot.path)?;
        let labels = match self.describer.describe(&bytes).await {
            Ok(labels) => labels,
            Err(err @ ShotError::Describer { .. }) => {
                error!(error = %err, "vision provider failed, skipping delivery");
                return Ok(RunOutcome::Aborted { stage: "describe" });
            }
            Err(err) => return Err(err),
        };
        info!(labels = labels.len(), "image described");

        let email = OutboundEmail {
            subject: "Screenshot Description".to_string(),
            body: format!("Image Description:\n{}", join_labels(&labels)),
            attachment: Some(shot.path.clone()),
        };
        self.mailer.send(&email).await?;

        Ok(RunOutcome::Delivered {
            subject: email.subject,
        })
    }
}
