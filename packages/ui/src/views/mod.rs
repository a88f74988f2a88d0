//! Screens, grouped by audience. Route wrappers in [`crate::routes`] pick the
//! layout and pass it down.

mod modal_overlay;
pub use modal_overlay::{ConfirmDialog, ModalOverlay};

mod page;
pub use page::{EmptyState, LoadError, LoadingScreen, PageHeader};

mod login;
pub use login::LoginView;

mod account;
pub use account::AccountView;

pub mod admin;
pub mod portal;
