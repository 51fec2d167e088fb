//! Desktop notification types.

use serde::{Deserialize, Serialize};

// ============================================================================
// Sound
// ============================================================================

/// What a sound communicates to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SoundClass {
    /// Something finished well.
    Success,
    /// Something went wrong or was refused.
    Failure,
    /// The user needs to look.
    Attention,
    /// A slow command finished.
    LongRunning,
}

/// Notification sounds, named as the macOS system sounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sound {
    /// The system default sound.
    #[serde(rename = "default")]
    Default,
    /// Glass.
    Glass,
    /// Basso.
    Basso,
    /// Ping.
    Ping,
    /// Blow.
    Blow,
}

impl Sound {
    /// Returns the sound name passed to the notifier.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Glass => "Glass",
            Self::Basso => "Basso",
            Self::Ping => "Ping",
            Self::Blow => "Blow",
        }
    }

    /// Returns the class of this sound.
    pub fn class(&self) -> SoundClass {
        match self {
            Self::Default | Self::Glass => SoundClass::Success,
            Self::Basso => SoundClass::Failure,
            Self::Ping => SoundClass::Attention,
            Self::Blow => SoundClass::LongRunning,
        }
    }

    /// Returns the freedesktop urgency matching this sound.
    pub fn urgency(&self) -> &'static str {
        match self.class() {
            SoundClass::Failure => "critical",
            SoundClass::Attention => "normal",
            SoundClass::Success | SoundClass::LongRunning => "low",
        }
    }
}

// ============================================================================
// Notification
// ============================================================================

/// A single desktop notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    /// Body text.
    pub message: String,
    /// Title line.
    pub title: String,
    /// Sound to play.
    pub sound: Sound,
}

impl Notification {
    /// Creates a notification.
    pub fn new(message: impl Into<String>, title: impl Into<String>, sound: Sound) -> Self {
        Self {
            message: message.into(),
            title: title.into(),
            sound,
        }
    }
}
