//! Typed wrappers over the booking API endpoints.
//!
//! Action-style POSTs (remove, cancel, delete, payment sync) pass their
//! parameters in the query string; create and update send a JSON body.

pub mod orders;
pub mod passengers;

pub use orders::Orders;
pub use passengers::Passengers;

use crate::transport::Transport;
use crate::RequestClient;

impl<T: Transport> RequestClient<T> {
    /// Passenger endpoints.
    #[must_use]
    pub fn passengers(&self) -> Passengers<'_, T> {
        Passengers::new(self)
    }

    /// Order endpoints.
    #[must_use]
    pub fn orders(&self) -> Orders<'_, T> {
        Orders::new(self)
    }
}
