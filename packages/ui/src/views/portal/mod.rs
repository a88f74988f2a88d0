//! Distributor-facing screens.

mod home;
mod library;
mod product_detail;
mod products;

pub use home::PortalHomeView;
pub use library::LibraryView;
pub use product_detail::ProductDetailView;
pub use products::ProductCatalogView;
pub(crate) use home::category_badge;
