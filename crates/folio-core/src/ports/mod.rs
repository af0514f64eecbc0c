//! Ports - trait definitions for external dependencies.
//! These are the "interfaces" that infrastructure must implement.

mod auth;
mod clock;
mod form_relay;
mod rate_limit;
mod storage;
mod store;

pub use auth::{AuthError, Credentials, IdentityProvider, PasswordService, SessionClaims, TokenService};
pub use clock::{Clock, SystemClock};
pub use form_relay::{FORM_SUCCESS_MESSAGE, FormError, FormReceipt, FormRelay};
pub use rate_limit::{RateLimitError, RateLimitResult, RateLimiter};
pub use storage::{ObjectStorage, UploadError, UploadFile, upload_path};
pub use store::PostStore;
