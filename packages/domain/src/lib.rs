//! # Domain crate — platform-independent core of the distributor portal
//!
//! Everything in here is shared by the server functions in `api` and the Dioxus
//! views in `ui`. Nothing performs I/O directly: lookups go through the
//! [`IdentityBackend`] trait so the same resolution logic runs against the
//! server functions (client), PostgreSQL (server-side authorization) or the
//! in-memory [`MemoryIdentity`] (tests).
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`role`] | The two portal roles and how a stored role string maps onto them |
//! | [`session`] | Session records, the resolved `{id, email, role}` user and client auth state |
//! | [`identity`] | The [`IdentityBackend`] trait and its error type |
//! | [`resolve`] | Admin table → profile table → default role resolution, language preference |
//! | [`events`] | Auth events, the resolution tracker and the event controller |
//! | [`guard`] | Route access policy and redirect decisions |
//! | [`layout`] | Desktop/mobile layout selection |
//! | [`locale`] | Supported locales and per-locale row content |
//! | [`models`] | Table rows and their editable drafts |
//! | [`validation`] | Inline form validation |
//! | [`storage`] | Storage buckets and object naming |

pub mod events;
pub mod guard;
pub mod identity;
pub mod layout;
pub mod locale;
pub mod models;
pub mod resolve;
pub mod role;
pub mod session;
pub mod storage;
pub mod validation;

mod memory;
pub use memory::MemoryIdentity;

pub use events::{AuthController, AuthEvent, KeepAlive, ResolutionTicket, ResolutionTracker};
pub use guard::{guard, Destination, GuardOutcome, RouteAccess};
pub use identity::{DirectoryError, IdentityBackend};
pub use layout::{select_layout, Layout, LayoutTracker, Platform, MOBILE_BREAKPOINT};
pub use locale::{Locale, LocalizedText};
pub use resolve::{preferred_locale, resolve_role, resolve_session, SessionResolution};
pub use role::Role;
pub use session::{AuthState, ResolvedUser, SessionUser};
pub use storage::StorageBucket;
pub use validation::{FieldErrors, Validate};
