//! Small styled building blocks shared by every view.

mod button;
mod field;
mod input;
mod label;
mod toast;

pub use button::{Button, ButtonVariant};
pub use field::Field;
pub use input::{Input, Select, Textarea};
pub use label::Label;
pub use toast::{use_error_toast, use_toast, ToastOptions, ToastProvider};
