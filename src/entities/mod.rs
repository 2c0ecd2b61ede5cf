mod booking;
mod provider;
mod quote;
mod route;

pub use booking::Booking;
pub use provider::{PricingPolicy, Provider};
pub use quote::Quote;
pub use route::Route;
