pub mod model;
pub mod ticket;

pub use model::{OrderRecord, OrderSide, OrderStatus};
pub use ticket::OrderTicket;
