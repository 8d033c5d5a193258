//! Placing and cancelling orders.
//!
//! Placing an order validates everything up front, appends the order, and
//! then debits the customer's cached balance. The two writes are not
//! atomic: a failure between them leaves an order that was not charged.

use chrono::Utc;
use tracing::{info, instrument};

use boostmart_core::{DeviceType, OrderId, OrderStatus, ServiceId};

use super::pricing;
use super::session::SessionService;
use crate::db::{OrderRepository, ServiceRepository, UserRepository};
use crate::error::StorefrontError;
use crate::models::{NewOrder, Order};
use crate::store::KeyValueStore;

/// What the customer asked for.
#[derive(Debug, Clone)]
pub struct OrderRequest {
    pub service_id: ServiceId,
    pub quantity: u64,
    pub device_type: DeviceType,
    /// `None` picks the service's first listed target.
    pub target_option: Option<String>,
    /// Destination profile, post or URL.
    pub link: String,
}

/// Customer order workflows.
pub struct CheckoutService<'a, S> {
    services: ServiceRepository<'a, S>,
    orders: OrderRepository<'a, S>,
    users: UserRepository<'a, S>,
    sessions: SessionService<'a, S>,
}

impl<'a, S: KeyValueStore> CheckoutService<'a, S> {
    /// Create a new checkout service.
    #[must_use]
    pub const fn new(store: &'a S) -> Self {
        Self {
            services: ServiceRepository::new(store),
            orders: OrderRepository::new(store),
            users: UserRepository::new(store),
            sessions: SessionService::new(store),
        }
    }

    /// Price a request without placing it.
    ///
    /// # Errors
    ///
    /// Returns `StorefrontError::NotFound` for an unknown service and
    /// `StorefrontError::Validation` for an invalid configuration.
    pub async fn quote(&self, request: &OrderRequest) -> Result<pricing::Quote, StorefrontError> {
        let service = self
            .services
            .get(&request.service_id)
            .await?
            .ok_or_else(|| StorefrontError::NotFound(format!("service {}", request.service_id)))?;

        pricing::quote(
            &service,
            request.quantity,
            request.device_type,
            request.target_option.as_deref(),
        )
    }

    /// Place an order for the signed-in customer and charge their balance.
    ///
    /// # Errors
    ///
    /// Returns `StorefrontError::Unauthenticated` without a session,
    /// `StorefrontError::Validation` for a missing link, an inactive service
    /// or an invalid configuration, and
    /// `StorefrontError::InsufficientBalance` if the customer cannot pay.
    #[instrument(skip(self, request), fields(service_id = %request.service_id, quantity = request.quantity))]
    pub async fn place_order(&self, request: OrderRequest) -> Result<Order, StorefrontError> {
        let user = self.sessions.require_user("sign in to place an order").await?;

        let link = request.link.trim();
        if link.is_empty() {
            return Err(StorefrontError::Validation(
                "a link is required for every order".to_owned(),
            ));
        }

        let service = self
            .services
            .get(&request.service_id)
            .await?
            .ok_or_else(|| StorefrontError::NotFound(format!("service {}", request.service_id)))?;

        if !service.is_active() {
            return Err(StorefrontError::Validation(format!(
                "{} is not currently available",
                service.name
            )));
        }

        let quote = pricing::quote(
            &service,
            request.quantity,
            request.device_type,
            request.target_option.as_deref(),
        )?;

        if user.balance < quote.total {
            return Err(StorefrontError::InsufficientBalance {
                balance: user.balance,
                required: quote.total,
            });
        }

        let order = self
            .orders
            .create(NewOrder {
                user_id: Some(user.id.clone()),
                service_id: service.id,
                service_name: service.name,
                quantity: quote.quantity,
                device_type: Some(quote.device_type),
                target_option: Some(quote.target_option),
                link: link.to_owned(),
                price: quote.total,
                status: OrderStatus::Pending,
                created_at: Utc::now(),
            })
            .await?;

        let user = self.users.update_balance(user.balance - order.price).await?;
        info!(order_id = %order.id, price = %order.price, balance = %user.balance, "Order placed");

        Ok(order)
    }

    /// The signed-in customer's orders.
    ///
    /// # Errors
    ///
    /// Returns `StorefrontError::Unauthenticated` without a session.
    pub async fn my_orders(&self) -> Result<Vec<Order>, StorefrontError> {
        let user = self.sessions.require_user("sign in to view orders").await?;
        Ok(self.orders.list_for_user(&user.id).await?)
    }

    /// Cancel a pending order. The price is not refunded.
    ///
    /// # Errors
    ///
    /// Returns `StorefrontError::NotFound` for an unknown order and
    /// `StorefrontError::InvalidTransition` unless the order is pending.
    #[instrument(skip(self))]
    pub async fn cancel_order(&self, id: &OrderId) -> Result<Order, StorefrontError> {
        let mut order = self
            .orders
            .get(id)
            .await?
            .ok_or_else(|| StorefrontError::NotFound(format!("order {id}")))?;

        if !order.status.is_cancellable() {
            return Err(StorefrontError::InvalidTransition {
                current: order.status,
                action: "only pending orders can be cancelled",
            });
        }

        order.status = OrderStatus::Cancelled;
        self.orders.update(order.clone()).await?;
        info!(order_id = %order.id, "Order cancelled");
        Ok(order)
    }
}
