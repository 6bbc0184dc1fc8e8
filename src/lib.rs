//! Topic-scoped AI chat
//!
//! A chat session picks one topic up front; every exchange after that is
//! prompted to stay within it. The crate splits into a pure session state
//! machine (`session`), the client glue that renders its effects (`client`,
//! `format`), and the reply server that answers exchanges (`api`, `llm`,
//! `prompt`). The two sides share wire types through `protocol`.

pub mod api;
pub mod client;
pub mod format;
pub mod llm;
pub mod prompt;
pub mod protocol;
pub mod session;
