//! Staff-facing management screens.

mod announcements;
mod assets;
mod dashboard;
mod distributors;
mod products;
mod upload;
mod users;

pub use announcements::AnnouncementAdminView;
pub use assets::AssetAdminView;
pub use dashboard::DashboardView;
pub use distributors::DistributorAdminView;
pub use products::ProductAdminView;
pub use users::AdminUsersView;
