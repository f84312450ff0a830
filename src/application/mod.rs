pub mod event_input;
pub mod extractor;
pub mod generation;
pub mod merger;
pub mod prompt;
pub mod reconciler;
pub mod sync;
pub mod validator;
