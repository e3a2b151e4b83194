pub mod book_search;
pub mod covers;
pub mod providers;
pub mod recommendations;

pub use covers::CoverResolver;
