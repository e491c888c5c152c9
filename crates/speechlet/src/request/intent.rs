//! Intent requests: the user asked the skill to do something specific.

use std::collections::BTreeMap;
use std::ops::Deref;

use serde_json::{Map, Value};

use super::launch::LaunchRequest;
use super::{ConfirmationStatus, DialogState};
use crate::decode::FieldReader;
use crate::envelope::RequestEnvelope;
use crate::error::DecodeError;

const INTENT_FIELD: &str = "intent";

/// An intent request.
///
/// Dereferences to [`LaunchRequest`] for the shared base fields.
#[derive(Debug, Clone, PartialEq)]
pub struct IntentRequest {
    launch: LaunchRequest,
    dialog_state: Option<DialogState>,
    intent: Intent,
}

impl IntentRequest {
    /// Builds an intent request from an envelope.
    ///
    /// The base fields are decoded first. `dialogState` is optional. The
    /// `intent` object must carry string `name` and `confirmationStatus`
    /// fields; `slots` yields an empty map when absent or not an object.
    ///
    /// # Errors
    ///
    /// Returns a [`DecodeError`] when the base fields fail to decode, when a
    /// required intent field is missing or mistyped, when an enum value is not
    /// recognised, or when a present slot lacks a string `name` or `value`.
    pub fn from_envelope(envelope: &RequestEnvelope) -> Result<Self, DecodeError> {
        let launch = LaunchRequest::from_envelope(envelope)?;
        let body = FieldReader::new(envelope.body());
        let dialog_state = body.optional_variant("dialogState")?;
        let intent = Intent::decode(&body.required_object(INTENT_FIELD)?)?;
        Ok(Self {
            launch,
            dialog_state,
            intent,
        })
    }

    /// Returns the base fields.
    #[must_use]
    pub const fn launch(&self) -> &LaunchRequest {
        &self.launch
    }

    /// Returns the dialog state, if the platform is managing a dialog.
    #[must_use]
    pub const fn dialog_state(&self) -> Option<DialogState> {
        self.dialog_state
    }

    /// Returns the resolved intent.
    #[must_use]
    pub const fn intent(&self) -> &Intent {
        &self.intent
    }
}

impl Deref for IntentRequest {
    type Target = LaunchRequest;

    fn deref(&self) -> &Self::Target {
        &self.launch
    }
}

/// Reads the intent name without decoding the rest of the request.
pub(crate) fn intent_name(body: &Map<String, Value>) -> Result<&str, DecodeError> {
    FieldReader::new(body)
        .required_object(INTENT_FIELD)?
        .required_str("name")
}

/// A resolved intent with its slot values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Intent {
    name: String,
    confirmation_status: ConfirmationStatus,
    slots: BTreeMap<String, Slot>,
}

impl Intent {
    fn decode(intent: &FieldReader<'_>) -> Result<Self, DecodeError> {
        let name = intent.required_str("name")?;
        let confirmation_status = intent.required_variant("confirmationStatus")?;
        let slots = intent
            .lenient_object("slots")
            .map_or_else(|| Ok(BTreeMap::new()), |slots| decode_slots(&slots))?;
        Ok(Self {
            name: name.to_owned(),
            confirmation_status,
            slots,
        })
    }

    /// Returns the intent name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns whether the user confirmed the intent.
    #[must_use]
    pub const fn confirmation_status(&self) -> ConfirmationStatus {
        self.confirmation_status
    }

    /// Returns every slot keyed by slot name; empty when the intent has none.
    #[must_use]
    pub const fn slots(&self) -> &BTreeMap<String, Slot> {
        &self.slots
    }

    /// Returns the named slot.
    #[must_use]
    pub fn slot(&self, name: &str) -> Option<&Slot> {
        self.slots.get(name)
    }

    /// Returns the value of the named slot.
    #[must_use]
    pub fn slot_value(&self, name: &str) -> Option<&str> {
        self.slot(name).map(Slot::value)
    }
}

fn decode_slots(slots: &FieldReader<'_>) -> Result<BTreeMap<String, Slot>, DecodeError> {
    slots
        .object_entries()
        .map(|entry| {
            let (key, slot) = entry?;
            Ok((key.to_owned(), Slot::decode(&slot)?))
        })
        .collect()
}

/// A named value the user supplied within an intent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Slot {
    name: String,
    value: String,
}

impl Slot {
    fn decode(slot: &FieldReader<'_>) -> Result<Self, DecodeError> {
        Ok(Self {
            name: slot.required_str("name")?.to_owned(),
            value: slot.required_str("value")?.to_owned(),
        })
    }

    /// Returns the slot name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the slot value.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }
}
