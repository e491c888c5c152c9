//! Outbound response accumulation and serialisation.
//!
//! A handler creates a fresh [`SpeechletResponse`], calls builder methods in
//! order, and returns it. Conflicting directives are not validated: the last
//! call wins. For example `tell_plain_text` followed by `ask_plain_text`
//! replaces the speech but leaves the session flagged to end.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::envelope::SessionAttributes;

/// Protocol version written on every response.
pub const RESPONSE_VERSION: &str = "1.0";

/// The response accumulator.
///
/// # Example
///
/// ```
/// use speechlet::SpeechletResponse;
///
/// let mut response = SpeechletResponse::new();
/// response
///     .tell_plain_text("Goodbye")
///     .show_simple_card("Farewell", "See you soon");
/// let json = response.to_value().expect("serialise response");
/// assert_eq!(json["response"]["shouldEndSession"], true);
/// assert_eq!(json["response"]["outputSpeech"]["text"], "Goodbye");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpeechletResponse {
    version: String,
    session_attributes: SessionAttributes,
    response: ResponseBody,
}

impl Default for SpeechletResponse {
    fn default() -> Self {
        Self::new()
    }
}

impl SpeechletResponse {
    /// Creates an empty response that keeps the session open.
    #[must_use]
    pub fn new() -> Self {
        Self {
            version: RESPONSE_VERSION.to_owned(),
            session_attributes: SessionAttributes::new(),
            response: ResponseBody::default(),
        }
    }

    /// Speaks plain text and keeps the session open for an answer.
    pub fn ask_plain_text(&mut self, text: impl Into<String>) -> &mut Self {
        self.response.output_speech = Some(OutputSpeech::plain_text(text));
        self
    }

    /// Speaks plain text and ends the session.
    pub fn tell_plain_text(&mut self, text: impl Into<String>) -> &mut Self {
        self.response.should_end_session = true;
        self.ask_plain_text(text)
    }

    /// Speaks SSML markup and keeps the session open for an answer.
    pub fn ask_ssml(&mut self, ssml: impl Into<String>) -> &mut Self {
        self.response.output_speech = Some(OutputSpeech::ssml(ssml));
        self
    }

    /// Speaks SSML markup and ends the session.
    pub fn tell_ssml(&mut self, ssml: impl Into<String>) -> &mut Self {
        self.response.should_end_session = true;
        self.ask_ssml(ssml)
    }

    /// Sets plain text to speak if the user does not answer.
    pub fn reprompt_plain_text(&mut self, text: impl Into<String>) -> &mut Self {
        self.response.reprompt = Some(Reprompt::new(OutputSpeech::plain_text(text)));
        self
    }

    /// Sets SSML to speak if the user does not answer.
    pub fn reprompt_ssml(&mut self, ssml: impl Into<String>) -> &mut Self {
        self.response.reprompt = Some(Reprompt::new(OutputSpeech::ssml(ssml)));
        self
    }

    /// Shows a text-only card in the companion app.
    pub fn show_simple_card(
        &mut self,
        title: impl Into<String>,
        content: impl Into<String>,
    ) -> &mut Self {
        self.response.card = Some(Card::Simple {
            title: title.into(),
            content: content.into(),
        });
        self
    }

    /// Shows a card with text and an image.
    pub fn show_standard_card(
        &mut self,
        title: impl Into<String>,
        small_image_url: impl Into<String>,
        large_image_url: impl Into<String>,
        text: impl Into<String>,
    ) -> &mut Self {
        self.response.card = Some(Card::Standard {
            title: title.into(),
            text: text.into(),
            image: CardImage {
                small_image_url: small_image_url.into(),
                large_image_url: large_image_url.into(),
            },
        });
        self
    }

    /// Shows a card asking the user to link an external account.
    pub fn show_link_account_card(&mut self) -> &mut Self {
        self.response.card = Some(Card::LinkAccount);
        self
    }

    /// Sets whether the session ends after this response.
    pub fn set_should_end_session(&mut self, should_end: bool) -> &mut Self {
        self.response.should_end_session = should_end;
        self
    }

    /// Stores one attribute for the platform to echo back next turn.
    pub fn set_session_attribute(
        &mut self,
        key: impl Into<String>,
        value: impl Into<Value>,
    ) -> &mut Self {
        self.session_attributes.insert(key.into(), value.into());
        self
    }

    /// Replaces every session attribute, typically with the request's own.
    pub fn with_session_attributes(&mut self, attributes: SessionAttributes) -> &mut Self {
        self.session_attributes = attributes;
        self
    }

    /// Returns the protocol version.
    #[must_use]
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Returns the accumulated session attributes.
    #[must_use]
    pub const fn session_attributes(&self) -> &SessionAttributes {
        &self.session_attributes
    }

    /// Returns the speech directive, if set.
    #[must_use]
    pub const fn output_speech(&self) -> Option<&OutputSpeech> {
        self.response.output_speech.as_ref()
    }

    /// Returns the reprompt directive, if set.
    #[must_use]
    pub const fn reprompt(&self) -> Option<&Reprompt> {
        self.response.reprompt.as_ref()
    }

    /// Returns the card directive, if set.
    #[must_use]
    pub const fn card(&self) -> Option<&Card> {
        self.response.card.as_ref()
    }

    /// Returns whether the session ends after this response.
    #[must_use]
    pub const fn should_end_session(&self) -> bool {
        self.response.should_end_session
    }

    /// Serialises the response to its wire JSON text.
    ///
    /// # Errors
    ///
    /// Returns the serde error if a session attribute cannot be serialised.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Serialises the response to a JSON value.
    ///
    /// # Errors
    ///
    /// Returns the serde error if a session attribute cannot be serialised.
    pub fn to_value(&self) -> Result<Value, serde_json::Error> {
        serde_json::to_value(self)
    }
}

/// The directive section of a response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseBody {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    output_speech: Option<OutputSpeech>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    reprompt: Option<Reprompt>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    card: Option<Card>,
    should_end_session: bool,
}

/// Speech to play to the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum OutputSpeech {
    /// Plain text rendered with the default voice.
    PlainText {
        /// The words to speak.
        text: String,
    },
    /// Speech Synthesis Markup Language.
    #[serde(rename = "SSML")]
    Ssml {
        /// The `<speak>` document.
        ssml: String,
    },
}

impl OutputSpeech {
    /// Creates a plain text directive.
    #[must_use]
    pub fn plain_text(text: impl Into<String>) -> Self {
        Self::PlainText { text: text.into() }
    }

    /// Creates an SSML directive.
    #[must_use]
    pub fn ssml(ssml: impl Into<String>) -> Self {
        Self::Ssml { ssml: ssml.into() }
    }
}

/// Speech played when the user does not answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reprompt {
    output_speech: OutputSpeech,
}

impl Reprompt {
    /// Wraps a speech directive.
    #[must_use]
    pub const fn new(output_speech: OutputSpeech) -> Self {
        Self { output_speech }
    }

    /// Returns the wrapped speech.
    #[must_use]
    pub const fn output_speech(&self) -> &OutputSpeech {
        &self.output_speech
    }
}

/// A card shown in the companion app.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Card {
    /// Title and plain content.
    Simple {
        /// Card title.
        title: String,
        /// Card body.
        content: String,
    },
    /// Title, text, and an image.
    Standard {
        /// Card title.
        title: String,
        /// Card body.
        text: String,
        /// Image sources.
        image: CardImage,
    },
    /// Prompts the user to link an external account.
    LinkAccount,
}

/// Image sources for a standard card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardImage {
    /// Image URL for small screens.
    pub small_image_url: String,
    /// Image URL for large screens.
    pub large_image_url: String,
}
