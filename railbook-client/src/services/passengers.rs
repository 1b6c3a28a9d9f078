//! `/passengers/*` endpoints.

use railbook_core::{Passenger, PassengerId, RequestDescriptor, UserId};
use serde_json::Value;

use crate::transport::Transport;
use crate::{ClientError, RequestClient};

/// Passenger management for one user account.
#[derive(Debug)]
pub struct Passengers<'a, T> {
    client: &'a RequestClient<T>,
}

impl<'a, T: Transport> Passengers<'a, T> {
    pub(crate) fn new(client: &'a RequestClient<T>) -> Self {
        Self { client }
    }

    /// `GET /passengers/list?userId=`
    ///
    /// # Errors
    /// Any [`ClientError`] from the request client.
    pub async fn list(&self, user_id: UserId) -> Result<Vec<Passenger>, ClientError> {
        let descriptor = RequestDescriptor::get("/passengers/list").query("userId", user_id);
        self.client.fetch(&descriptor).await
    }

    /// `POST /passengers/add` with the passenger as JSON.
    ///
    /// Returns whatever payload the server answers with.
    ///
    /// # Errors
    /// Any [`ClientError`] from the request client.
    pub async fn create(&self, passenger: &Passenger) -> Result<Value, ClientError> {
        let descriptor = RequestDescriptor::post("/passengers/add").json(passenger)?;
        self.client.fetch(&descriptor).await
    }

    /// `POST /passengers/update` with the passenger as JSON.
    ///
    /// # Errors
    /// Any [`ClientError`] from the request client.
    pub async fn update(&self, passenger: &Passenger) -> Result<Value, ClientError> {
        let descriptor = RequestDescriptor::post("/passengers/update").json(passenger)?;
        self.client.fetch(&descriptor).await
    }

    /// `POST /passengers/remove?id=`
    ///
    /// # Errors
    /// Any [`ClientError`] from the request client.
    pub async fn remove(&self, id: PassengerId) -> Result<Value, ClientError> {
        let descriptor = RequestDescriptor::post("/passengers/remove").query("id", id);
        self.client.fetch(&descriptor).await
    }
}
