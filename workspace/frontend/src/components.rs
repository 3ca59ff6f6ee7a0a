pub mod analysis;
pub mod layout;
pub mod location_search;
pub mod priorities;
pub mod status;
