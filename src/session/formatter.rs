use crate::engine::RecognitionEvent;
use serde::{Deserialize, Serialize};

/// Suffix telling the client's renderer not to insert a space before a word
pub const NO_SPACE_BEFORE_MARKER: &str = r"\*no-space-before";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranscriptionWord {
    pub word: String,
    pub confidence: f32,
}

/// Body of one `QueryResult` frame
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TranscriptionResponse {
    pub words: Vec<TranscriptionWord>,
}

/// Builds the responses for one request, applying the marker to the first
/// word of the whole response and never again.
#[derive(Debug, Default)]
pub struct ResponseFormatter {
    marker_applied: bool,
}

impl ResponseFormatter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn marker_applied(&self) -> bool {
        self.marker_applied
    }

    pub fn format(&mut self, event: &RecognitionEvent) -> TranscriptionResponse {
        let mut response = TranscriptionResponse {
            words: event
                .best_words()
                .map(|w| TranscriptionWord {
                    word: w.word.clone(),
                    confidence: w.confidence,
                })
                .collect(),
        };

        if !self.marker_applied {
            if let Some(first) = response.words.first_mut() {
                first.word.push_str(NO_SPACE_BEFORE_MARKER);
                self.marker_applied = true;
            }
        }

        response
    }
}
