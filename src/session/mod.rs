mod expiry;
mod identity;
mod lock;
mod policy;

pub use expiry::{LogOnExpiry, SessionExpiryHandler};
pub use identity::{FileIdentityStore, Identity, IdentityStore, MemoryIdentityStore};
pub use lock::{RefreshLock, RefreshOutcome};
pub use policy::AuthFailurePolicy;
