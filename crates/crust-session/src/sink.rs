//! # Order Sink
//!
//! Where finished orders go. The sink owns persistence, fulfilment and any
//! retry policy; the session makes exactly one `submit` call per submission.

use std::future::Future;

use crust_core::Order;
use tokio::sync::Mutex;

use crate::error::SinkError;

/// Accepts assembled, validated, priced orders.
pub trait OrderSink: Send + Sync {
    fn submit(&self, order: &Order) -> impl Future<Output = Result<(), SinkError>> + Send;
}

/// Sink that keeps every accepted order in memory.
///
/// Can be told to refuse everything, to exercise the failure path.
#[derive(Debug, Default)]
pub struct RecordingSink {
    orders: Mutex<Vec<Order>>,
    reject_reason: Option<String>,
}

impl RecordingSink {
    pub fn new() -> Self {
        RecordingSink::default()
    }

    /// A sink that refuses every order with `reason`.
    pub fn rejecting(reason: impl Into<String>) -> Self {
        RecordingSink {
            orders: Mutex::new(Vec::new()),
            reject_reason: Some(reason.into()),
        }
    }

    /// Orders accepted so far, oldest first.
    pub async fn orders(&self) -> Vec<Order> {
        self.orders.lock().await.clone()
    }
}

impl OrderSink for RecordingSink {
    async fn submit(&self, order: &Order) -> Result<(), SinkError> {
        if let Some(reason) = &self.reject_reason {
            return Err(SinkError::Rejected(reason.clone()));
        }

        self.orders.lock().await.push(order.clone());
        Ok(())
    }
}
