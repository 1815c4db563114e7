pub mod quote;
pub mod theme;
