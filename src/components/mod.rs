//! Rendering of listing cards and of the listing area, as maud markup.

pub mod card;
pub mod screen;

pub use card::*;
pub use screen::*;
