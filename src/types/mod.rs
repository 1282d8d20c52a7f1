//! Core type definitions for blink

mod action;
mod error;
mod event;
mod path;

pub use action::MirrorAction;
pub use error::BlinkError;
pub use event::{ChangeEvent, ChangeOp};
pub use path::RelativePath;

pub(crate) use path::normalize;
