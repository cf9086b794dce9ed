//! Reusable rendering helpers shared by the screens.

pub mod card;
pub mod loading;
