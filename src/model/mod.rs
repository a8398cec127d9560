//! Pure data structures received from the listing API and passed across navigation.

pub mod detail;
pub mod listing;

pub use detail::*;
pub use listing::*;
