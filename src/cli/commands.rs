pub mod analyze;
pub mod compare;
pub mod health;
pub mod lookup;
pub mod search;

pub use analyze::analyze;
pub use compare::compare;
pub use health::health;
pub use lookup::lookup;
pub use search::search;
