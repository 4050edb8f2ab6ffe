pub mod handlers;

pub use handlers::{AppState, DEFAULT_MAX_SENTENCE_LEN, router};
