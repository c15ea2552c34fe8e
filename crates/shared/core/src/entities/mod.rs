mod category;
mod key;
mod lot;
mod side;
mod trade;

pub use category::ClientCategory;
pub use key::EntityKey;
pub use lot::{Direction, OpenLot};
pub use side::Side;
pub use trade::Trade;
