//! Order repository.

use tracing::{info, instrument};

use boostmart_core::{OrderId, OrderStatus, UserId};

use super::RepositoryError;
use crate::models::{NewOrder, Order};
use crate::store::{Collection, KeyValueStore, ORDERS_KEY};

/// Repository for customer orders.
pub struct OrderRepository<'a, S> {
    orders: Collection<'a, S, Order>,
}

impl<'a, S: KeyValueStore> OrderRepository<'a, S> {
    /// Create a new order repository.
    #[must_use]
    pub const fn new(store: &'a S) -> Self {
        Self {
            orders: Collection::new(store, ORDERS_KEY),
        }
    }

    /// Append a new order and return it with its assigned ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Store` if the collection cannot be written.
    #[instrument(skip_all, fields(service_id = %order.service_id))]
    pub async fn create(&self, order: NewOrder) -> Result<Order, RepositoryError> {
        let order = self.orders.append(order.into_order()).await?;
        info!(order_id = %order.id, "Order created");
        Ok(order)
    }

    /// Get every order, for the admin view.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Store` if the collection cannot be read.
    pub async fn list_all(&self) -> Result<Vec<Order>, RepositoryError> {
        Ok(self.orders.load().await?)
    }

    /// Get the orders owned by one customer.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Store` if the collection cannot be read.
    pub async fn list_for_user(&self, user_id: &UserId) -> Result<Vec<Order>, RepositoryError> {
        let mut orders = self.orders.load().await?;
        orders.retain(|o| o.user_id.as_ref() == Some(user_id));
        Ok(orders)
    }

    /// Get an order by ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Store` if the collection cannot be read.
    pub async fn get(&self, id: &OrderId) -> Result<Option<Order>, RepositoryError> {
        Ok(self.orders.find(id).await?)
    }

    /// Replace a stored order with `order`.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no order has the same ID.
    #[instrument(skip_all, fields(order_id = %order.id))]
    pub async fn update(&self, order: Order) -> Result<(), RepositoryError> {
        let id = order.id.clone();
        if self.orders.replace(order).await? {
            Ok(())
        } else {
            Err(RepositoryError::not_found("order", id))
        }
    }

    /// Set the status of an order and return the updated record.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no order has the ID.
    #[instrument(skip(self))]
    pub async fn set_status(
        &self,
        id: &OrderId,
        status: OrderStatus,
    ) -> Result<Order, RepositoryError> {
        self.orders
            .update(id, |order| order.status = status)
            .await?
            .ok_or_else(|| RepositoryError::not_found("order", id))
    }
}
