//! Kernel protocol channel names.
//!
//! Only [`Channel::IOPub`] carries a closed set of message types with known
//! content shapes. The other channels carry caller-defined content.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A kernel protocol channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Channel {
    /// Request/reply traffic.
    Shell,
    /// Out-of-band requests (interrupt, shutdown, debug).
    Control,
    /// Broadcast notifications (output, status, comm events).
    #[serde(rename = "iopub")]
    IOPub,
    /// Raw input requested by the kernel.
    Stdin,
}

impl Channel {
    pub const ALL: [Channel; 4] = [
        Channel::Shell,
        Channel::Control,
        Channel::IOPub,
        Channel::Stdin,
    ];

    /// Wire names, in the same order as [`Channel::ALL`].
    pub const NAMES: &'static [&'static str] = &["shell", "control", "iopub", "stdin"];

    pub fn as_str(self) -> &'static str {
        match self {
            Channel::Shell => "shell",
            Channel::Control => "control",
            Channel::IOPub => "iopub",
            Channel::Stdin => "stdin",
        }
    }

    /// Returns true for the notification channel.
    pub fn is_notification(self) -> bool {
        self == Channel::IOPub
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string is not a known channel name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown channel '{0}'")]
pub struct UnknownChannel(pub String);

impl FromStr for Channel {
    type Err = UnknownChannel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Channel::ALL
            .into_iter()
            .find(|channel| channel.as_str() == s)
            .ok_or_else(|| UnknownChannel(s.to_string()))
    }
}
