#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

#[doc(inline)]
pub use retouch_image as image;

#[doc(inline)]
pub use retouch_imgproc as imgproc;

#[doc(inline)]
pub use retouch_io as io;

/// Error types returned by the edit session.
pub mod error;

/// The edit session holding the working image.
pub mod session;

pub use crate::error::EditError;
pub use crate::session::{Axis, Direction, EditOp, EditSession, SessionConfig, SessionState};
