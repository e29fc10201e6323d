//! Marketplace record types as the REST API returns them.
//!
//! Field names follow the API's camelCase JSON. Each type derives `Record`,
//! binding the attributes the listing views filter and sort on.

mod auction;
mod battery;
mod contract;
mod fee;
mod listing;
mod transaction;
mod user;
mod vehicle;

pub use auction::{AuctionRequest, AuctionStatus};
pub use battery::Battery;
pub use contract::Contract;
pub use fee::Fee;
pub use listing::{Listing, ListingStatus, ProductType};
pub use transaction::Transaction;
pub use user::User;
pub use vehicle::Vehicle;
