//! Content shapes for iopub message types.
//!
//! Adding a notification type means adding a variant and a shape here; the
//! message validator resolves shapes only through [`content_shape`].

use std::fmt;

use serde_json::Value;

use crate::shape::{Field, Kind, Shape};

static STREAM: Shape = Shape::new(
    "stream",
    &[
        Field::required("name", Kind::String).one_of(&["stdout", "stderr"]),
        Field::required("text", Kind::String),
    ],
);

static DISPLAY_DATA: Shape = Shape::new(
    "display_data",
    &[
        Field::required("data", Kind::Object),
        Field::required("metadata", Kind::Object),
        Field::optional("transient", Kind::Object),
    ],
);

static UPDATE_DISPLAY_DATA: Shape = Shape::new(
    "update_display_data",
    &[
        Field::required("data", Kind::Object),
        Field::required("metadata", Kind::Object),
        Field::required("transient", Kind::Object),
    ],
);

static EXECUTE_INPUT: Shape = Shape::new(
    "execute_input",
    &[
        Field::required("code", Kind::String),
        Field::required("execution_count", Kind::Number),
    ],
);

static EXECUTE_RESULT: Shape = Shape::new(
    "execute_result",
    &[
        Field::required("execution_count", Kind::Number),
        Field::required("data", Kind::Object),
        Field::required("metadata", Kind::Object),
    ],
);

static ERROR: Shape = Shape::new(
    "error",
    &[
        Field::required("ename", Kind::String),
        Field::required("evalue", Kind::String),
        Field::required("traceback", Kind::Array),
    ],
);

static STATUS: Shape = Shape::new(
    "status",
    &[Field::required("execution_state", Kind::String).one_of(&[
        "starting",
        "idle",
        "busy",
        "restarting",
        "autorestarting",
        "dead",
    ])],
);

static CLEAR_OUTPUT: Shape = Shape::new("clear_output", &[Field::required("wait", Kind::Boolean)]);

static COMM_OPEN: Shape = Shape::new(
    "comm_open",
    &[
        Field::required("comm_id", Kind::String),
        Field::required("target_name", Kind::String),
        Field::required("data", Kind::Object),
        Field::optional("target_module", Kind::String).nullable(),
    ],
);

static COMM_MSG: Shape = Shape::new(
    "comm_msg",
    &[
        Field::required("comm_id", Kind::String),
        Field::required("data", Kind::Object),
    ],
);

static COMM_CLOSE: Shape = Shape::new(
    "comm_close",
    &[
        Field::required("comm_id", Kind::String),
        Field::optional("data", Kind::Object),
    ],
);

static SHUTDOWN_REPLY: Shape = Shape::new(
    "shutdown_reply",
    &[Field::required("restart", Kind::Boolean)],
);

static DEBUG_EVENT: Shape = Shape::new(
    "debug_event",
    &[
        Field::required("seq", Kind::Number),
        Field::required("type", Kind::String),
        Field::required("event", Kind::String),
        Field::optional("body", Kind::Object),
    ],
);

/// Message types registered for the iopub channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NotificationType {
    Stream,
    DisplayData,
    UpdateDisplayData,
    ExecuteInput,
    ExecuteResult,
    Error,
    Status,
    ClearOutput,
    CommOpen,
    CommMsg,
    CommClose,
    ShutdownReply,
    DebugEvent,
}

impl NotificationType {
    pub const ALL: [NotificationType; 13] = [
        NotificationType::Stream,
        NotificationType::DisplayData,
        NotificationType::UpdateDisplayData,
        NotificationType::ExecuteInput,
        NotificationType::ExecuteResult,
        NotificationType::Error,
        NotificationType::Status,
        NotificationType::ClearOutput,
        NotificationType::CommOpen,
        NotificationType::CommMsg,
        NotificationType::CommClose,
        NotificationType::ShutdownReply,
        NotificationType::DebugEvent,
    ];

    /// Resolve a wire `msg_type`.
    pub fn from_msg_type(msg_type: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.as_str() == msg_type)
    }

    pub fn as_str(self) -> &'static str {
        self.content_shape().name()
    }

    /// Shape the `content` of this message type must satisfy.
    pub fn content_shape(self) -> &'static Shape {
        match self {
            NotificationType::Stream => &STREAM,
            NotificationType::DisplayData => &DISPLAY_DATA,
            NotificationType::UpdateDisplayData => &UPDATE_DISPLAY_DATA,
            NotificationType::ExecuteInput => &EXECUTE_INPUT,
            NotificationType::ExecuteResult => &EXECUTE_RESULT,
            NotificationType::Error => &ERROR,
            NotificationType::Status => &STATUS,
            NotificationType::ClearOutput => &CLEAR_OUTPUT,
            NotificationType::CommOpen => &COMM_OPEN,
            NotificationType::CommMsg => &COMM_MSG,
            NotificationType::CommClose => &COMM_CLOSE,
            NotificationType::ShutdownReply => &SHUTDOWN_REPLY,
            NotificationType::DebugEvent => &DEBUG_EVENT,
        }
    }
}

impl fmt::Display for NotificationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Content shape registered for an iopub `msg_type`, if any.
pub fn content_shape(msg_type: &str) -> Option<&'static Shape> {
    NotificationType::from_msg_type(msg_type).map(NotificationType::content_shape)
}

/// JSON Schema documents for every registered content shape, in table order.
pub fn export_content_schemas(strict: bool) -> Vec<(&'static str, Value)> {
    NotificationType::ALL
        .into_iter()
        .map(|kind| (kind.as_str(), kind.content_shape().to_json_schema(strict)))
        .collect()
}
