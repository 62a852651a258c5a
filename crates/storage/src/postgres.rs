use std::collections::HashMap;

use async_trait::async_trait;
use common::{ItemId, OrderId};
use domain::{Money, Order, OrderItem, OrderStatus};
use sqlx::{PgPool, QueryBuilder, Row, postgres::PgRow};
use uuid::Uuid;

use crate::{OrderFilter, OrderRepository, Result, StorageError};

/// PostgreSQL-backed order repository.
///
/// Orders and their items live in two tables linked by `order_id`.
/// Every write runs inside a transaction so an aggregate is persisted
/// atomically or not at all.
#[derive(Clone)]
pub struct PostgresOrderRepository {
    pool: PgPool,
}

impl PostgresOrderRepository {
    /// Creates a new PostgreSQL order repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Gets a reference to the underlying connection pool.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Runs the database migrations.
    pub async fn run_migrations(&self) -> std::result::Result<(), sqlx::migrate::MigrateError> {
        sqlx::migrate!("../../migrations").run(&self.pool).await
    }

    fn row_to_order(row: &PgRow, items: Vec<OrderItem>) -> Result<Order> {
        let id = OrderId::from_uuid(row.try_get::<Uuid, _>("id")?);
        let status_str: String = row.try_get("status")?;
        let status = OrderStatus::parse(&status_str).ok_or_else(|| StorageError::Corrupt {
            order_id: id,
            detail: format!("unknown status {status_str:?}"),
        })?;

        Ok(Order::hydrate(
            id,
            row.try_get("customer_name")?,
            row.try_get("order_date")?,
            row.try_get("created_at")?,
            row.try_get("last_modified_at")?,
            items,
            status,
        ))
    }

    fn row_to_item(order_id: OrderId, row: &PgRow) -> Result<OrderItem> {
        let quantity: i32 = row.try_get("quantity")?;
        let quantity = u32::try_from(quantity).map_err(|_| StorageError::Corrupt {
            order_id,
            detail: format!("negative quantity {quantity}"),
        })?;

        Ok(OrderItem::hydrate(
            ItemId::from_uuid(row.try_get::<Uuid, _>("id")?),
            row.try_get("name")?,
            quantity,
            Money::from_cents(row.try_get("unit_price_cents")?),
            Some(order_id),
            row.try_get("created_at")?,
            row.try_get("last_modified_at")?,
        ))
    }

    async fn load_items(&self, order_id: OrderId) -> Result<Vec<OrderItem>> {
        let rows = sqlx::query(
            "SELECT id, name, quantity, unit_price_cents, created_at, last_modified_at \
             FROM order_items WHERE order_id = $1 ORDER BY position",
        )
        .bind(order_id.as_uuid())
        .fetch_all(&self.pool)
        .await?;

        rows.iter()
            .map(|row| Self::row_to_item(order_id, row))
            .collect()
    }

    async fn insert_items(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        order: &Order,
    ) -> Result<()> {
        for (position, item) in order.items().iter().enumerate() {
            sqlx::query(
                "INSERT INTO order_items \
                 (id, order_id, name, quantity, unit_price_cents, position, created_at, last_modified_at) \
                 VALUES ($1, $2, $3, $4, $5, $6, $7, $8)",
            )
            .bind(item.id().as_uuid())
            .bind(order.id().as_uuid())
            .bind(item.name())
            .bind(i32::try_from(item.quantity()).unwrap_or(i32::MAX))
            .bind(item.unit_price().cents())
            .bind(position as i32)
            .bind(item.created_at())
            .bind(item.last_modified_at())
            .execute(&mut **tx)
            .await?;
        }
        Ok(())
    }
}

#[async_trait]
impl OrderRepository for PostgresOrderRepository {
    #[tracing::instrument(skip(self))]
    async fn get_by_id(&self, id: OrderId) -> Result<Option<Order>> {
        let row = sqlx::query(
            "SELECT id, customer_name, order_date, created_at, last_modified_at, status \
             FROM orders WHERE id = $1",
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(row) => {
                let items = self.load_items(id).await?;
                Ok(Some(Self::row_to_order(&row, items)?))
            }
            None => Ok(None),
        }
    }

    #[tracing::instrument(skip(self))]
    async fn get_all(&self, filter: &OrderFilter) -> Result<Vec<Order>> {
        let mut query = QueryBuilder::new(
            "SELECT id, customer_name, order_date, created_at, last_modified_at, status \
             FROM orders WHERE TRUE",
        );
        if let Some(ref name) = filter.customer_name {
            query.push(" AND strpos(customer_name, ");
            query.push_bind(name.clone());
            query.push(") > 0");
        }
        if let Some(start) = filter.start_date {
            query.push(" AND order_date >= ");
            query.push_bind(start);
        }
        if let Some(end) = filter.end_date {
            query.push(" AND order_date <= ");
            query.push_bind(end);
        }
        query.push(" ORDER BY order_date, id");

        let order_rows = query.build().fetch_all(&self.pool).await?;
        if order_rows.is_empty() {
            return Ok(Vec::new());
        }

        // One query for all item rows, grouped back per order
        let order_ids: Vec<Uuid> = order_rows
            .iter()
            .map(|row| row.try_get::<Uuid, _>("id"))
            .collect::<std::result::Result<_, _>>()?;

        let item_rows = sqlx::query(
            "SELECT id, order_id, name, quantity, unit_price_cents, created_at, last_modified_at \
             FROM order_items WHERE order_id = ANY($1) ORDER BY position",
        )
        .bind(&order_ids)
        .fetch_all(&self.pool)
        .await?;

        let mut items_by_order: HashMap<Uuid, Vec<OrderItem>> = HashMap::new();
        for row in &item_rows {
            let owner: Uuid = row.try_get("order_id")?;
            let item = Self::row_to_item(OrderId::from_uuid(owner), row)?;
            items_by_order.entry(owner).or_default().push(item);
        }

        order_rows
            .iter()
            .map(|row| {
                let id: Uuid = row.try_get("id")?;
                let items = items_by_order.remove(&id).unwrap_or_default();
                Self::row_to_order(row, items)
            })
            .collect()
    }

    #[tracing::instrument(skip(self, order), fields(order_id = %order.id()))]
    async fn add(&self, order: &Order) -> Result<()> {
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            "INSERT INTO orders (id, customer_name, order_date, created_at, last_modified_at, status) \
             VALUES ($1, $2, $3, $4, $5, $6)",
        )
        .bind(order.id().as_uuid())
        .bind(order.customer_name())
        .bind(order.order_date())
        .bind(order.created_at())
        .bind(order.last_modified_at())
        .bind(order.status().as_str())
        .execute(&mut *tx)
        .await?;

        Self::insert_items(&mut tx, order).await?;

        tx.commit().await?;
        Ok(())
    }

    #[tracing::instrument(skip(self, order), fields(order_id = %order.id()))]
    async fn update(&self, order: &Order) -> Result<()> {
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            "UPDATE orders SET customer_name = $2, order_date = $3, last_modified_at = $4, status = $5 \
             WHERE id = $1",
        )
        .bind(order.id().as_uuid())
        .bind(order.customer_name())
        .bind(order.order_date())
        .bind(order.last_modified_at())
        .bind(order.status().as_str())
        .execute(&mut *tx)
        .await?;

        // Full replace of item membership
        sqlx::query("DELETE FROM order_items WHERE order_id = $1")
            .bind(order.id().as_uuid())
            .execute(&mut *tx)
            .await?;
        Self::insert_items(&mut tx, order).await?;

        tx.commit().await?;
        Ok(())
    }

    #[tracing::instrument(skip(self))]
    async fn delete(&self, id: OrderId) -> Result<()> {
        // Items go with the order via ON DELETE CASCADE
        sqlx::query("DELETE FROM orders WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}
