pub mod commission;
pub mod config;
pub mod deposit;
pub mod desk;
pub mod error;
pub mod quote;
pub mod revenue;
pub mod store;
pub mod types;

// ---- Top-level re-exports for ergonomic usage ----

// Config + errors
pub use config::RentalConfig;
pub use error::{RentalError, Result};

// Host actions
pub use desk::{HostDesk, VehicleDepositRow};

// Stores
pub use store::{HostStore, HttpStore, JsonFileStore, SaveGuard};

// Calculations
pub use commission::{commission_amount, host_earnings, resolve_tier};
pub use deposit::{
    effective_deposit, normalize_amount, normalize_settings, rate_based_deposit, resolve_deposit,
    validate_individual,
};
pub use quote::{quote_booking, rental_days};
pub use revenue::{can_save, has_unsaved_changes, payout_percent, EditorState, RevenuePathEditor};

// Data model
pub use types::{
    BookingQuote, CommissionTier, DepositClass, DepositSource, DiscountSettings,
    HostGlobalDepositSettings, HostSnapshot, ResolvedDeposit, RevenuePath, RevenueSelection,
    RevenueTier, TierProgress, Vehicle, VehicleDepositMode, COMMISSION_TIERS,
};
