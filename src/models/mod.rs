pub mod address;
pub mod available;
pub mod delivery;
pub mod driver;
