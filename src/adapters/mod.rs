//! Adapters: concrete implementations of the hexagonal port traits.
//!
//! | Adapter    | Implements                 | Connects to                 |
//! |------------|----------------------------|-----------------------------|
//! | `board`    | LedPort, TimePort          | GPIO button / LED drivers   |
//! |            | CameraPort, FaceEnginePort | camera and face engine      |
//! | `log_sink` | EventSink                  | process log                 |
//! | `sim`      | CameraPort, FaceEnginePort | host simulation stubs       |
//! |            | NotifierPort               | log output                  |
//! | `time`     | n/a                        | system wall / monotonic clock |

pub mod board;
pub mod log_sink;
pub mod sim;
pub mod time;
