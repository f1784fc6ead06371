use async_trait::async_trait;
use database::BaseRepository;
use sea_orm::{
    ColumnTrait, Condition, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, QuerySelect,
};
use uuid::Uuid;

use crate::{
    entity,
    error::{PricingError, PricingResult},
    models::{
        CreateMarkupRule, CreateProduct, MarkupRule, Product, ProductFilter, RuleFilter,
        RuleScope, UpdateMarkupRule, UpdateProduct,
    },
    repository::{MarkupRuleRepository, ProductRepository},
};

pub struct PgMarkupRuleRepository {
    base: BaseRepository<entity::rule::Entity>,
}

impl PgMarkupRuleRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }
}

#[async_trait]
impl MarkupRuleRepository for PgMarkupRuleRepository {
    async fn create(&self, input: CreateMarkupRule) -> PricingResult<MarkupRule> {
        let active_model: entity::rule::ActiveModel = input.into();

        let model = self
            .base
            .insert(active_model)
            .await
            .map_err(|e| PricingError::Internal(format!("Database error: {}", e)))?;

        tracing::info!(rule_id = %model.id, "Created markup rule");
        Ok(model.into())
    }

    async fn get_by_id(&self, id: Uuid) -> PricingResult<Option<MarkupRule>> {
        let model = self
            .base
            .find_by_id(id)
            .await
            .map_err(|e| PricingError::Internal(format!("Database error: {}", e)))?;

        Ok(model.map(|m| m.into()))
    }

    async fn list(&self, filter: RuleFilter) -> PricingResult<Vec<MarkupRule>> {
        let mut query = entity::rule::Entity::find();

        if let Some(scope) = filter.scope {
            query = query.filter(entity::rule::Column::Scope.eq(scope));
        }

        if let Some(is_active) = filter.is_active {
            query = query.filter(entity::rule::Column::IsActive.eq(is_active));
        }

        query = query
            .order_by_desc(entity::rule::Column::Priority)
            .order_by_asc(entity::rule::Column::CreatedAt)
            .limit(filter.limit as u64)
            .offset(filter.offset as u64);

        let models = query
            .all(self.base.db())
            .await
            .map_err(|e| PricingError::Internal(format!("Database error: {}", e)))?;

        Ok(models.into_iter().map(|m| m.into()).collect())
    }

    async fn update(&self, id: Uuid, input: UpdateMarkupRule) -> PricingResult<MarkupRule> {
        let model = self
            .base
            .find_by_id(id)
            .await
            .map_err(|e| PricingError::Internal(format!("Database error: {}", e)))?
            .ok_or(PricingError::RuleNotFound(id))?;

        let mut rule: MarkupRule = model.into();
        rule.apply_update(input);

        let active_model: entity::rule::ActiveModel = rule.into();

        let updated = self
            .base
            .update(active_model)
            .await
            .map_err(|e| PricingError::Internal(format!("Database error: {}", e)))?;

        tracing::info!(rule_id = %id, "Updated markup rule");
        Ok(updated.into())
    }

    async fn delete(&self, id: Uuid) -> PricingResult<bool> {
        let rows_affected = self
            .base
            .delete_by_id(id)
            .await
            .map_err(|e| PricingError::Internal(format!("Database error: {}", e)))?;

        if rows_affected > 0 {
            tracing::info!(rule_id = %id, "Deleted markup rule");
            Ok(true)
        } else {
            Ok(false)
        }
    }

    async fn find_applicable(&self, product: &Product) -> PricingResult<Vec<MarkupRule>> {
        let mut scopes = Condition::any().add(entity::rule::Column::Scope.eq(RuleScope::Global));

        if let Some(brand_id) = product.brand_id {
            scopes = scopes.add(
                Condition::all()
                    .add(entity::rule::Column::Scope.eq(RuleScope::Brand))
                    .add(entity::rule::Column::TargetId.eq(brand_id)),
            );
        }

        if let Some(manufacturer_id) = product.manufacturer_id {
            scopes = scopes.add(
                Condition::all()
                    .add(entity::rule::Column::Scope.eq(RuleScope::Manufacturer))
                    .add(entity::rule::Column::TargetId.eq(manufacturer_id)),
            );
        }

        if let Some(category_id) = product.category_id {
            scopes = scopes.add(
                Condition::all()
                    .add(entity::rule::Column::Scope.eq(RuleScope::Category))
                    .add(entity::rule::Column::TargetId.eq(category_id)),
            );
        }

        let models = entity::rule::Entity::find()
            .filter(entity::rule::Column::IsActive.eq(true))
            .filter(scopes)
            .order_by_desc(entity::rule::Column::Priority)
            .order_by_asc(entity::rule::Column::CreatedAt)
            .all(self.base.db())
            .await
            .map_err(|e| PricingError::Internal(format!("Database error: {}", e)))?;

        Ok(models.into_iter().map(|m| m.into()).collect())
    }
}

pub struct PgProductRepository {
    base: BaseRepository<entity::product::Entity>,
}

impl PgProductRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }
}

#[async_trait]
impl ProductRepository for PgProductRepository {
    async fn create(&self, input: CreateProduct) -> PricingResult<Product> {
        let exists = self.exists_by_sku(&input.sku, None).await?;
        if exists {
            return Err(PricingError::DuplicateSku(input.sku));
        }

        let active_model: entity::product::ActiveModel = input.into();

        let model = self
            .base
            .insert(active_model)
            .await
            .map_err(|e| PricingError::Internal(format!("Database error: {}", e)))?;

        tracing::info!(product_id = %model.id, sku = %model.sku, "Created product");
        Ok(model.into())
    }

    async fn get_by_id(&self, id: Uuid) -> PricingResult<Option<Product>> {
        let model = self
            .base
            .find_by_id(id)
            .await
            .map_err(|e| PricingError::Internal(format!("Database error: {}", e)))?;

        Ok(model.map(|m| m.into()))
    }

    async fn list(&self, filter: ProductFilter) -> PricingResult<Vec<Product>> {
        let mut query = entity::product::Entity::find();

        if let Some(ref sku) = filter.sku {
            query = query.filter(entity::product::Column::Sku.eq(sku.clone()));
        }

        if let Some(category_id) = filter.category_id {
            query = query.filter(entity::product::Column::CategoryId.eq(category_id));
        }

        if let Some(is_active) = filter.is_active {
            query = query.filter(entity::product::Column::IsActive.eq(is_active));
        }

        query = query
            .order_by_asc(entity::product::Column::Sku)
            .limit(filter.limit as u64)
            .offset(filter.offset as u64);

        let models = query
            .all(self.base.db())
            .await
            .map_err(|e| PricingError::Internal(format!("Database error: {}", e)))?;

        Ok(models.into_iter().map(|m| m.into()).collect())
    }

    async fn update(&self, id: Uuid, input: UpdateProduct) -> PricingResult<Product> {
        let model = self
            .base
            .find_by_id(id)
            .await
            .map_err(|e| PricingError::Internal(format!("Database error: {}", e)))?
            .ok_or(PricingError::ProductNotFound(id))?;

        if let Some(ref new_sku) = input.sku {
            let taken = self.exists_by_sku(new_sku, Some(id)).await?;
            if taken {
                return Err(PricingError::DuplicateSku(new_sku.clone()));
            }
        }

        let mut product: Product = model.into();
        product.apply_update(input);

        let active_model: entity::product::ActiveModel = product.into();

        let updated = self
            .base
            .update(active_model)
            .await
            .map_err(|e| PricingError::Internal(format!("Database error: {}", e)))?;

        tracing::info!(product_id = %id, "Updated product");
        Ok(updated.into())
    }

    async fn delete(&self, id: Uuid) -> PricingResult<bool> {
        let rows_affected = self
            .base
            .delete_by_id(id)
            .await
            .map_err(|e| PricingError::Internal(format!("Database error: {}", e)))?;

        if rows_affected > 0 {
            tracing::info!(product_id = %id, "Deleted product");
            Ok(true)
        } else {
            Ok(false)
        }
    }

    async fn exists_by_sku(&self, sku: &str, exclude: Option<Uuid>) -> PricingResult<bool> {
        let mut query =
            entity::product::Entity::find().filter(entity::product::Column::Sku.eq(sku));

        if let Some(id) = exclude {
            query = query.filter(entity::product::Column::Id.ne(id));
        }

        let exists = query
            .one(self.base.db())
            .await
            .map_err(|e| PricingError::Internal(format!("Database error: {}", e)))?
            .is_some();

        Ok(exists)
    }
}
