//! Type definitions for secret references and host session exchange

mod reference;
mod session;

pub use reference::*;
pub use session::*;
