//! User-facing transient messages ("toasts") raised by failed cart operations.

use std::fmt;
use tokio::sync::broadcast;
use crate::error::CartError;

pub const STOCK_EXCEEDED: &str = "requested quantity exceeds stock";
pub const ADD_FAILED: &str = "failed to add product";
pub const REMOVE_FAILED: &str = "failed to remove product";
pub const UPDATE_FAILED: &str = "failed to change product quantity";

/// The cart operation a notification originates from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CartOperation {
    AddProduct,
    RemoveProduct,
    UpdateProductAmount,
}

impl fmt::Display for CartOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CartOperation::AddProduct => write!(f, "add_product"),
            CartOperation::RemoveProduct => write!(f, "remove_product"),
            CartOperation::UpdateProductAmount => write!(f, "update_product_amount"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub operation: CartOperation,
    pub message: String,
}

impl Notification {
    /// Maps a failed operation to the message shown to the user, or `None`
    /// when the failure is meant to pass silently.
    pub fn for_error(operation: CartOperation, error: &CartError) -> Option<Self> {
        let message = match (operation, error) {
            (_, CartError::InvalidInput(_)) => return None,
            (_, CartError::StockExceeded { .. }) => STOCK_EXCEEDED,
            (CartOperation::AddProduct, _) => ADD_FAILED,
            (CartOperation::RemoveProduct, _) => REMOVE_FAILED,
            (CartOperation::UpdateProductAmount, _) => UPDATE_FAILED,
        };
        Some(Self {
            operation,
            message: message.to_string(),
        })
    }
}

/// Fan-out of notifications to any number of UI subscribers.
///
/// Publishing never fails: with no subscriber attached the message is dropped.
#[derive(Debug, Clone)]
pub struct Notifier {
    sender: broadcast::Sender<Notification>,
}

impl Notifier {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<Notification> {
        self.sender.subscribe()
    }

    pub fn publish(&self, notification: Notification) {
        let _ = self.sender.send(notification);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_per_operation() {
        let service = CartError::ServiceFailure("timeout".into());
        let missing = CartError::NotInCart(4);
        let stock = CartError::StockExceeded { requested: 3, available: 2 };

        let msg = |op, e: &CartError| Notification::for_error(op, e).map(|n| n.message);

        assert_eq!(msg(CartOperation::AddProduct, &service).as_deref(), Some(ADD_FAILED));
        assert_eq!(msg(CartOperation::AddProduct, &stock).as_deref(), Some(STOCK_EXCEEDED));
        assert_eq!(msg(CartOperation::RemoveProduct, &missing).as_deref(), Some(REMOVE_FAILED));
        assert_eq!(msg(CartOperation::UpdateProductAmount, &missing).as_deref(), Some(UPDATE_FAILED));
        assert_eq!(msg(CartOperation::UpdateProductAmount, &service).as_deref(), Some(UPDATE_FAILED));
        assert_eq!(msg(CartOperation::UpdateProductAmount, &stock).as_deref(), Some(STOCK_EXCEEDED));
    }

    #[test]
    fn test_invalid_input_is_silent() {
        assert!(Notification::for_error(CartOperation::UpdateProductAmount, &CartError::InvalidInput(0)).is_none());
    }

    #[tokio::test]
    async fn test_publish_reaches_subscribers() {
        let notifier = Notifier::new(4);
        let mut rx = notifier.subscribe();

        notifier.publish(Notification {
            operation: CartOperation::RemoveProduct,
            message: REMOVE_FAILED.to_string(),
        });

        let received = rx.recv().await.unwrap();
        assert_eq!(received.message, REMOVE_FAILED);
    }

    #[test]
    fn test_publish_without_subscribers_is_ignored() {
        let notifier = Notifier::new(1);
        notifier.publish(Notification {
            operation: CartOperation::AddProduct,
            message: ADD_FAILED.to_string(),
        });
    }
}
