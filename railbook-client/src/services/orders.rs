//! `/order*` endpoints.

use railbook_core::{Order, OrderId, PnrNumber, RequestDescriptor, UserId};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::transport::{HttpResponse, Transport};
use crate::{ClientError, RequestClient};

/// Payment link as returned by `/order/pay-url`: a bare string or an object.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum PayLink {
    Url(String),
    #[serde(rename_all = "camelCase")]
    Object {
        #[serde(alias = "url")]
        pay_url: String,
    },
}

impl PayLink {
    fn into_url(self) -> String {
        match self {
            PayLink::Url(url) | PayLink::Object { pay_url: url } => url,
        }
    }
}

/// Order lifecycle: create, look up, pay, cancel, delete, download.
#[derive(Debug)]
pub struct Orders<'a, T> {
    client: &'a RequestClient<T>,
}

impl<'a, T: Transport> Orders<'a, T> {
    pub(crate) fn new(client: &'a RequestClient<T>) -> Self {
        Self { client }
    }

    /// `POST /order` with `order` as JSON.
    ///
    /// The body shape belongs to the booking flow and is passed through as is.
    ///
    /// # Errors
    /// Any [`ClientError`] from the request client.
    pub async fn create<B: Serialize + ?Sized>(&self, order: &B) -> Result<Value, ClientError> {
        let descriptor = RequestDescriptor::post("/order").json(order)?;
        self.client.fetch(&descriptor).await
    }

    /// `GET /order/list?userId=`
    ///
    /// # Errors
    /// Any [`ClientError`] from the request client.
    pub async fn list(&self, user_id: UserId) -> Result<Vec<Order>, ClientError> {
        let descriptor = RequestDescriptor::get("/order/list").query("userId", user_id);
        self.client.fetch(&descriptor).await
    }

    /// `GET /order/detail?orderId=`
    ///
    /// # Errors
    /// Any [`ClientError`] from the request client.
    pub async fn detail(&self, order_id: OrderId) -> Result<Order, ClientError> {
        let descriptor = RequestDescriptor::get("/order/detail").query("orderId", order_id);
        self.client.fetch(&descriptor).await
    }

    /// `GET /order/pnr/{pnr}`
    ///
    /// # Errors
    /// Any [`ClientError`] from the request client.
    pub async fn by_pnr(&self, pnr: &PnrNumber) -> Result<Order, ClientError> {
        let descriptor = RequestDescriptor::get("/order/pnr").segment(pnr);
        self.client.fetch(&descriptor).await
    }

    /// `GET /order/pay-url?pnrNumber=`, returning the payment page URL.
    ///
    /// # Errors
    /// Any [`ClientError`] from the request client; [`ClientError::Decode`]
    /// if the payload holds no URL.
    pub async fn pay_url(&self, pnr: &PnrNumber) -> Result<String, ClientError> {
        let descriptor = RequestDescriptor::get("/order/pay-url").query("pnrNumber", pnr);
        let link: PayLink = self.client.fetch(&descriptor).await?;
        Ok(link.into_url())
    }

    /// `POST /order/sync-status?pnrNumber=`: ask the server to re-check payment.
    ///
    /// # Errors
    /// Any [`ClientError`] from the request client.
    pub async fn sync_payment_status(&self, pnr: &PnrNumber) -> Result<Value, ClientError> {
        let descriptor = RequestDescriptor::post("/order/sync-status").query("pnrNumber", pnr);
        self.client.fetch(&descriptor).await
    }

    /// `POST /order/cancel?orderId=`
    ///
    /// # Errors
    /// Any [`ClientError`] from the request client.
    pub async fn cancel(&self, order_id: OrderId) -> Result<Value, ClientError> {
        let descriptor = RequestDescriptor::post("/order/cancel").query("orderId", order_id);
        self.client.fetch(&descriptor).await
    }

    /// `POST /order/delete?orderId=`
    ///
    /// # Errors
    /// Any [`ClientError`] from the request client.
    pub async fn delete(&self, order_id: OrderId) -> Result<Value, ClientError> {
        let descriptor = RequestDescriptor::post("/order/delete").query("orderId", order_id);
        self.client.fetch(&descriptor).await
    }

    /// `GET /order/ticket?orderId=`: the ticket file, untouched.
    ///
    /// # Errors
    /// Transport and status errors from the request client.
    pub async fn download_ticket(&self, order_id: OrderId) -> Result<HttpResponse, ClientError> {
        let descriptor = RequestDescriptor::get("/order/ticket").query("orderId", order_id).blob();
        self.client.download(&descriptor).await
    }
}
