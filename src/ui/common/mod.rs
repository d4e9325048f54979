//! Reusable UI components shared by the pages

pub mod message;
pub mod spinner;

pub use message::{ErrorMessage, FieldError};
pub use spinner::{InlineSpinner, LoadingSpinner, Spinner, SpinnerSize};
