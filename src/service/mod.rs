//! Business logic layer

pub mod clock;
pub mod redirect;

pub use clock::{Clock, FixedClock, SystemClock};
pub use redirect::{RedirectError, RedirectService};
