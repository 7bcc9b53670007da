pub mod import;
pub mod kinds;
