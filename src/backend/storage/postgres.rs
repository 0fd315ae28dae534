/**
 * Postgres Document Store
 *
 * sqlx implementation of the store traits. Each collection is a table (see
 * `migrations/`); list fields are Postgres arrays. Rows are read into private
 * `FromRow` structs and converted to the shared models so the models stay free
 * of database derives.
 */
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use super::{
    CredentialStore, ObserverStore, ProductStore, StoreError, StoreResult, UserStore,
};
use crate::shared::models::{Category, Credentials, Product, ProductObserver, User};

/// Store backed by a PostgreSQL connection pool
#[derive(Debug, Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct UserRow {
    id: Uuid,
    first_name: String,
    last_name: String,
    age: i32,
    contact_email: String,
    phone_number: Option<String>,
    bio: Option<String>,
    profile_picture: Option<String>,
    credits: f64,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        Self {
            id: row.id,
            first_name: row.first_name,
            last_name: row.last_name,
            age: row.age,
            contact_email: row.contact_email,
            phone_number: row.phone_number,
            bio: row.bio,
            profile_picture: row.profile_picture,
            credits: row.credits,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct CredentialsRow {
    id: Uuid,
    user_id: Uuid,
    email: String,
    password_hash: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<CredentialsRow> for Credentials {
    fn from(row: CredentialsRow) -> Self {
        Self {
            id: row.id,
            user_id: row.user_id,
            email: row.email,
            password_hash: row.password_hash,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct ProductRow {
    id: Uuid,
    seller_id: Uuid,
    name: String,
    price: f64,
    images: Vec<String>,
    details: String,
    quantity: i32,
    category: i16,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<ProductRow> for Product {
    type Error = StoreError;

    fn try_from(row: ProductRow) -> Result<Self, Self::Error> {
        let category = Category::try_from(i64::from(row.category))
            .map_err(|e| StoreError::Database(sqlx::Error::Decode(Box::new(e))))?;
        Ok(Self {
            id: row.id,
            seller_id: row.seller_id,
            name: row.name,
            price: row.price,
            images: row.images,
            details: row.details,
            quantity: row.quantity,
            category,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[derive(sqlx::FromRow)]
struct ObserverRow {
    id: Uuid,
    user_id: Uuid,
    product_list: Vec<Uuid>,
}

impl From<ObserverRow> for ProductObserver {
    fn from(row: ObserverRow) -> Self {
        Self {
            id: row.id,
            user_id: row.user_id,
            product_list: row.product_list,
        }
    }
}

const USER_COLUMNS: &str = "id, first_name, last_name, age, contact_email, phone_number, bio, \
                            profile_picture, credits, created_at, updated_at";
const CREDENTIALS_COLUMNS: &str = "id, user_id, email, password_hash, created_at, updated_at";
const PRODUCT_COLUMNS: &str =
    "id, seller_id, name, price, images, details, quantity, category, created_at, updated_at";

/// Map a unique-constraint violation to `Duplicate`, anything else to `Database`
fn unique_violation(err: sqlx::Error, field: &'static str, value: &str) -> StoreError {
    match &err {
        sqlx::Error::Database(db) if db.is_unique_violation() => {
            StoreError::duplicate(field, value)
        }
        _ => StoreError::Database(err),
    }
}

fn category_code(category: Category) -> i16 {
    // Codes are 0..=3
    category.code() as i16
}

#[async_trait]
impl UserStore for PgStore {
    async fn insert_user(&self, user: User) -> StoreResult<User> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            r#"
            INSERT INTO users (id, first_name, last_name, age, contact_email, phone_number,
                               bio, profile_picture, credits, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(user.id)
        .bind(&user.first_name)
        .bind(&user.last_name)
        .bind(user.age)
        .bind(&user.contact_email)
        .bind(&user.phone_number)
        .bind(&user.bio)
        .bind(&user.profile_picture)
        .bind(user.credits)
        .bind(user.created_at)
        .bind(user.updated_at)
        .fetch_optional(&self.pool)
        .await?;

        row.map(User::from)
            .ok_or(StoreError::InsertFailure { collection: "user" })
    }

    async fn get_user(&self, id: Uuid) -> StoreResult<User> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(User::from)
            .ok_or_else(|| StoreError::not_found("user", id))
    }

    async fn update_user(&self, user: User) -> StoreResult<User> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            r#"
            UPDATE users
            SET first_name = $2, last_name = $3, age = $4, contact_email = $5,
                phone_number = $6, bio = $7, profile_picture = $8, credits = $9,
                updated_at = $10
            WHERE id = $1
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(user.id)
        .bind(&user.first_name)
        .bind(&user.last_name)
        .bind(user.age)
        .bind(&user.contact_email)
        .bind(&user.phone_number)
        .bind(&user.bio)
        .bind(&user.profile_picture)
        .bind(user.credits)
        .bind(user.updated_at)
        .fetch_optional(&self.pool)
        .await?;

        row.map(User::from)
            .ok_or_else(|| StoreError::not_found("user", user.id))
    }

    async fn delete_user(&self, id: Uuid) -> StoreResult<()> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NoMatch { collection: "user" });
        }
        Ok(())
    }
}

#[async_trait]
impl CredentialStore for PgStore {
    async fn insert_credentials(&self, credentials: Credentials) -> StoreResult<Credentials> {
        let row = sqlx::query_as::<_, CredentialsRow>(&format!(
            r#"
            INSERT INTO credentials (id, user_id, email, password_hash, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {CREDENTIALS_COLUMNS}
            "#
        ))
        .bind(credentials.id)
        .bind(credentials.user_id)
        .bind(&credentials.email)
        .bind(&credentials.password_hash)
        .bind(credentials.created_at)
        .bind(credentials.updated_at)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| unique_violation(e, "email", &credentials.email))?;

        row.map(Credentials::from).ok_or(StoreError::InsertFailure {
            collection: "credentials",
        })
    }

    async fn find_by_email(&self, email: &str) -> StoreResult<Option<Credentials>> {
        let row = sqlx::query_as::<_, CredentialsRow>(&format!(
            "SELECT {CREDENTIALS_COLUMNS} FROM credentials WHERE email = $1"
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Credentials::from))
    }

    async fn find_by_user(&self, user_id: Uuid) -> StoreResult<Option<Credentials>> {
        let row = sqlx::query_as::<_, CredentialsRow>(&format!(
            "SELECT {CREDENTIALS_COLUMNS} FROM credentials WHERE user_id = $1"
        ))
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Credentials::from))
    }

    async fn update_credentials(&self, credentials: Credentials) -> StoreResult<Credentials> {
        let row = sqlx::query_as::<_, CredentialsRow>(&format!(
            r#"
            UPDATE credentials
            SET email = $2, password_hash = $3, updated_at = $4
            WHERE id = $1
            RETURNING {CREDENTIALS_COLUMNS}
            "#
        ))
        .bind(credentials.id)
        .bind(&credentials.email)
        .bind(&credentials.password_hash)
        .bind(credentials.updated_at)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| unique_violation(e, "email", &credentials.email))?;

        row.map(Credentials::from)
            .ok_or_else(|| StoreError::not_found("credentials", credentials.id))
    }

    async fn delete_credentials_of(&self, user_id: Uuid) -> StoreResult<u64> {
        let result = sqlx::query("DELETE FROM credentials WHERE user_id = $1")
            .bind(user_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}

#[async_trait]
impl ProductStore for PgStore {
    async fn insert_product(&self, product: Product) -> StoreResult<Product> {
        let row = sqlx::query_as::<_, ProductRow>(&format!(
            r#"
            INSERT INTO products (id, seller_id, name, price, images, details, quantity,
                                  category, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING {PRODUCT_COLUMNS}
            "#
        ))
        .bind(product.id)
        .bind(product.seller_id)
        .bind(&product.name)
        .bind(product.price)
        .bind(&product.images)
        .bind(&product.details)
        .bind(product.quantity)
        .bind(category_code(product.category))
        .bind(product.created_at)
        .bind(product.updated_at)
        .fetch_optional(&self.pool)
        .await?;

        row.ok_or(StoreError::InsertFailure {
            collection: "product",
        })?
        .try_into()
    }

    async fn get_product(&self, id: Uuid) -> StoreResult<Product> {
        let row = sqlx::query_as::<_, ProductRow>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.ok_or_else(|| StoreError::not_found("product", id))?
            .try_into()
    }

    async fn list_products(&self) -> StoreResult<Vec<Product>> {
        let rows = sqlx::query_as::<_, ProductRow>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products ORDER BY created_at"
        ))
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Product::try_from).collect()
    }

    async fn list_products_of(&self, seller_id: Uuid) -> StoreResult<Vec<Product>> {
        let rows = sqlx::query_as::<_, ProductRow>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products WHERE seller_id = $1 ORDER BY created_at"
        ))
        .bind(seller_id)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Product::try_from).collect()
    }

    async fn update_product(&self, product: Product) -> StoreResult<Product> {
        let row = sqlx::query_as::<_, ProductRow>(&format!(
            r#"
            UPDATE products
            SET name = $2, price = $3, images = $4, details = $5, quantity = $6,
                category = $7, updated_at = $8
            WHERE id = $1
            RETURNING {PRODUCT_COLUMNS}
            "#
        ))
        .bind(product.id)
        .bind(&product.name)
        .bind(product.price)
        .bind(&product.images)
        .bind(&product.details)
        .bind(product.quantity)
        .bind(category_code(product.category))
        .bind(product.updated_at)
        .fetch_optional(&self.pool)
        .await?;

        row.ok_or_else(|| StoreError::not_found("product", product.id))?
            .try_into()
    }

    async fn delete_product(&self, id: Uuid) -> StoreResult<()> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NoMatch {
                collection: "product",
            });
        }
        Ok(())
    }

    async fn append_images(&self, id: Uuid, urls: Vec<String>) -> StoreResult<Product> {
        let row = sqlx::query_as::<_, ProductRow>(&format!(
            r#"
            UPDATE products
            SET images = images || $2, updated_at = $3
            WHERE id = $1
            RETURNING {PRODUCT_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(&urls)
        .bind(Utc::now())
        .fetch_optional(&self.pool)
        .await?;

        row.ok_or_else(|| StoreError::not_found("product", id))?
            .try_into()
    }

    async fn reserve_stock(&self, id: Uuid, units: i32) -> StoreResult<bool> {
        // Single conditional UPDATE; the row lock serializes concurrent buyers.
        let result = sqlx::query(
            r#"
            UPDATE products
            SET quantity = quantity - $2, updated_at = NOW()
            WHERE id = $1 AND quantity >= $2
            "#,
        )
        .bind(id)
        .bind(units)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() == 1)
    }

    async fn release_stock(&self, id: Uuid, units: i32) -> StoreResult<()> {
        let result = sqlx::query(
            "UPDATE products SET quantity = quantity + $2, updated_at = NOW() WHERE id = $1",
        )
        .bind(id)
        .bind(units)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::not_found("product", id));
        }
        Ok(())
    }
}

#[async_trait]
impl ObserverStore for PgStore {
    async fn get_observer(&self, id: Uuid) -> StoreResult<ProductObserver> {
        let row = sqlx::query_as::<_, ObserverRow>(
            "SELECT id, user_id, product_list FROM product_observers WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(ProductObserver::from)
            .ok_or_else(|| StoreError::not_found("product observer", id))
    }

    async fn find_observer_of(&self, user_id: Uuid) -> StoreResult<Option<ProductObserver>> {
        let row = sqlx::query_as::<_, ObserverRow>(
            "SELECT id, user_id, product_list FROM product_observers WHERE user_id = $1",
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(ProductObserver::from))
    }

    async fn insert_observer(&self, observer: ProductObserver) -> StoreResult<ProductObserver> {
        let row = sqlx::query_as::<_, ObserverRow>(
            r#"
            INSERT INTO product_observers (id, user_id, product_list)
            VALUES ($1, $2, $3)
            RETURNING id, user_id, product_list
            "#,
        )
        .bind(observer.id)
        .bind(observer.user_id)
        .bind(&observer.product_list)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| unique_violation(e, "user_id", &observer.user_id.to_string()))?;

        row.map(ProductObserver::from)
            .ok_or(StoreError::InsertFailure {
                collection: "product observer",
            })
    }

    async fn update_observer(&self, observer: ProductObserver) -> StoreResult<ProductObserver> {
        let row = sqlx::query_as::<_, ObserverRow>(
            r#"
            UPDATE product_observers
            SET product_list = $2
            WHERE id = $1
            RETURNING id, user_id, product_list
            "#,
        )
        .bind(observer.id)
        .bind(&observer.product_list)
        .fetch_optional(&self.pool)
        .await?;

        row.map(ProductObserver::from)
            .ok_or_else(|| StoreError::not_found("product observer", observer.id))
    }
}
