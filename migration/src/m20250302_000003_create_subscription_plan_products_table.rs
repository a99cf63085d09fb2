use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // =====================================================
        // subscription_plan_products (plan <-> catalog product)
        // =====================================================
        manager
            .create_table(
                Table::create()
                    .table(SubscriptionPlanProducts::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(SubscriptionPlanProducts::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(SubscriptionPlanProducts::SubscriptionPlanId)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(SubscriptionPlanProducts::ProductId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(SubscriptionPlanProducts::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(SubscriptionPlanProducts::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_subscription_plan_products_plan_id")
                            .from(
                                SubscriptionPlanProducts::Table,
                                SubscriptionPlanProducts::SubscriptionPlanId,
                            )
                            .to(SubscriptionPlans::Table, SubscriptionPlans::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // =====================================================
        // subscription_plan_product_variants
        // =====================================================
        manager
            .create_table(
                Table::create()
                    .table(SubscriptionPlanProductVariants::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(SubscriptionPlanProductVariants::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(SubscriptionPlanProductVariants::SubscriptionPlanProductId)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(SubscriptionPlanProductVariants::VariantId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(SubscriptionPlanProductVariants::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(SubscriptionPlanProductVariants::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_subscription_plan_product_variants_product_id")
                            .from(
                                SubscriptionPlanProductVariants::Table,
                                SubscriptionPlanProductVariants::SubscriptionPlanProductId,
                            )
                            .to(SubscriptionPlanProducts::Table, SubscriptionPlanProducts::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // =====================================================
        // Uniqueness: one product per plan, one variant per product association
        // =====================================================
        manager
            .get_connection()
            .execute_unprepared(
                r#"
                CREATE UNIQUE INDEX idx_subscription_plan_products_plan_product
                ON subscription_plan_products (subscription_plan_id, product_id);
                "#,
            )
            .await?;

        manager
            .get_connection()
            .execute_unprepared(
                r#"
                CREATE UNIQUE INDEX idx_subscription_plan_product_variants_product_variant
                ON subscription_plan_product_variants (subscription_plan_product_id, variant_id);
                "#,
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .get_connection()
            .execute_unprepared(
                r#"
                DROP INDEX IF EXISTS idx_subscription_plan_product_variants_product_variant;
                DROP INDEX IF EXISTS idx_subscription_plan_products_plan_product;
                "#,
            )
            .await?;

        manager
            .drop_table(
                Table::drop()
                    .table(SubscriptionPlanProductVariants::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(
                Table::drop()
                    .table(SubscriptionPlanProducts::Table)
                    .to_owned(),
            )
            .await
    }
}

#[derive(DeriveIden)]
enum SubscriptionPlanProducts {
    Table,
    Id,
    SubscriptionPlanId,
    ProductId,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum SubscriptionPlanProductVariants {
    Table,
    Id,
    SubscriptionPlanProductId,
    VariantId,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum SubscriptionPlans {
    Table,
    Id,
}
