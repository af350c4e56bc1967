use axum::body::Bytes;
use serde::{Deserialize, Serialize};

/// One message from the gateway to the recognition engine
#[derive(Debug, Clone)]
pub enum StreamingRequest {
    /// Session configuration; must be the first message
    Config(StreamingRecognitionConfig),
    /// Raw audio exactly as the client uploaded it
    Audio(Bytes),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AudioEncoding {
    SpeexWithHeaderByte,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MicrophoneDistance {
    Nearfield,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecognitionMetadata {
    pub microphone_distance: MicrophoneDistance,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecognitionConfig {
    pub encoding: AudioEncoding,
    pub sample_rate_hertz: u32,
    pub audio_channel_count: u16,
    pub language_code: String,
    pub max_alternatives: u32,
    pub profanity_filter: bool,
    pub enable_word_time_offsets: bool,
    pub enable_word_confidence: bool,
    pub enable_automatic_punctuation: bool,
    pub enable_spoken_punctuation: bool,
    pub enable_spoken_emojis: bool,
    pub metadata: RecognitionMetadata,
    pub model: String,
    pub use_enhanced: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StreamingRecognitionConfig {
    pub config: RecognitionConfig,
    /// End-of-utterance detection is done by the client device
    pub single_utterance: bool,
    /// The client protocol has no way to represent interim hypotheses
    pub interim_results: bool,
    pub enable_voice_activity_events: bool,
}

impl StreamingRecognitionConfig {
    /// The fixed dictation configuration for one session in `language_code`.
    pub fn dictation(language_code: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            config: RecognitionConfig {
                encoding: AudioEncoding::SpeexWithHeaderByte,
                sample_rate_hertz: 16000,
                audio_channel_count: 1,
                language_code: language_code.into(),
                max_alternatives: 1,
                profanity_filter: false,
                enable_word_time_offsets: false,
                enable_word_confidence: true,
                enable_automatic_punctuation: true,
                enable_spoken_punctuation: true,
                // Poor font support on the client
                enable_spoken_emojis: false,
                metadata: RecognitionMetadata {
                    microphone_distance: MicrophoneDistance::Nearfield,
                },
                model: model.into(),
                use_enhanced: false,
            },
            single_utterance: false,
            interim_results: false,
            enable_voice_activity_events: false,
        }
    }
}

/// One batch of results produced by the engine
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecognitionEvent {
    #[serde(default)]
    pub results: Vec<RecognitionResult>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecognitionResult {
    /// Ranked best first
    #[serde(default)]
    pub alternatives: Vec<Alternative>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Alternative {
    #[serde(default)]
    pub transcript: String,
    #[serde(default)]
    pub confidence: f32,
    #[serde(default)]
    pub words: Vec<WordInfo>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WordInfo {
    pub word: String,
    #[serde(default)]
    pub confidence: f32,
}

impl RecognitionEvent {
    /// Words of the top alternative of every result, in order.
    pub fn best_words(&self) -> impl Iterator<Item = &WordInfo> {
        self.results
            .iter()
            .filter_map(|result| result.alternatives.first())
            .flat_map(|alternative| alternative.words.iter())
    }
}
