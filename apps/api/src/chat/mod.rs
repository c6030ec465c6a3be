//! Career-coach chat: per-session transcript, flattened-history prompting and
//! optional per-turn PDF/image attachments.

pub mod handlers;
pub mod session;
