mod booking;
mod deposit;
mod revenue;
mod snapshot;
mod tier;
mod vehicle;

pub use booking::*;
pub use deposit::*;
pub use revenue::*;
pub use snapshot::*;
pub use tier::*;
pub use vehicle::*;
