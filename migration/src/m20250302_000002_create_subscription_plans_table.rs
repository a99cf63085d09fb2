use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // =====================================================
        // subscription_plans
        // =====================================================
        manager
            .create_table(
                Table::create()
                    .table(SubscriptionPlans::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(SubscriptionPlans::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(SubscriptionPlans::ShopId).integer().not_null())
                    .col(
                        ColumnDef::new(SubscriptionPlans::Name)
                            .string_len(255)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(SubscriptionPlans::Status)
                            .string_len(16)
                            .not_null()
                            .default("ACTIVE"),
                    )
                    .col(
                        ColumnDef::new(SubscriptionPlans::IsDeleted)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(SubscriptionPlans::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(SubscriptionPlans::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_subscription_plans_shop_id")
                            .from(SubscriptionPlans::Table, SubscriptionPlans::ShopId)
                            .to(Shops::Table, Shops::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // =====================================================
        // subscription_frequencies
        // =====================================================
        manager
            .create_table(
                Table::create()
                    .table(SubscriptionFrequencies::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(SubscriptionFrequencies::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(SubscriptionFrequencies::SubscriptionPlanId)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(SubscriptionFrequencies::PlanType)
                            .string_len(32)
                            .null(),
                    )
                    .col(
                        ColumnDef::new(SubscriptionFrequencies::Name)
                            .string_len(255)
                            .null(),
                    )
                    .col(ColumnDef::new(SubscriptionFrequencies::Description).text().null())
                    .col(
                        ColumnDef::new(SubscriptionFrequencies::FrequencyInterval)
                            .string_len(16)
                            .null(),
                    )
                    .col(
                        ColumnDef::new(SubscriptionFrequencies::FrequencyOrder)
                            .integer()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(SubscriptionFrequencies::BillingFrequencyCount)
                            .integer()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(SubscriptionFrequencies::BillingFrequencyInterval)
                            .string_len(16)
                            .null(),
                    )
                    .col(
                        ColumnDef::new(SubscriptionFrequencies::SpecificDayEnabled)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(SubscriptionFrequencies::FrequencyType)
                            .string_len(32)
                            .null(),
                    )
                    .col(
                        ColumnDef::new(SubscriptionFrequencies::SpecificDayValue)
                            .integer()
                            .null(),
                    )
                    .col(ColumnDef::new(SubscriptionFrequencies::MaxCycles).integer().null())
                    .col(ColumnDef::new(SubscriptionFrequencies::MinCycles).integer().null())
                    .col(ColumnDef::new(SubscriptionFrequencies::CutOff).integer().null())
                    .col(
                        ColumnDef::new(SubscriptionFrequencies::DiscountEnabled)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(SubscriptionFrequencies::DiscountOffer)
                            .double()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(SubscriptionFrequencies::DiscountType)
                            .string_len(16)
                            .null(),
                    )
                    .col(
                        ColumnDef::new(SubscriptionFrequencies::AfterCycle1)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(SubscriptionFrequencies::DiscountEnabled2)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(SubscriptionFrequencies::DiscountType2)
                            .string_len(16)
                            .null(),
                    )
                    .col(
                        ColumnDef::new(SubscriptionFrequencies::DiscountOffer2)
                            .double()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(SubscriptionFrequencies::AfterCycle2)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(SubscriptionFrequencies::InventoryPolicyReserve)
                            .string_len(32)
                            .null(),
                    )
                    .col(
                        ColumnDef::new(SubscriptionFrequencies::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(SubscriptionFrequencies::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_subscription_frequencies_plan_id")
                            .from(
                                SubscriptionFrequencies::Table,
                                SubscriptionFrequencies::SubscriptionPlanId,
                            )
                            .to(SubscriptionPlans::Table, SubscriptionPlans::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // =====================================================
        // Indexes
        // =====================================================
        manager
            .get_connection()
            .execute_unprepared(
                r#"
                CREATE INDEX idx_subscription_plans_shop_id
                ON subscription_plans (shop_id)
                WHERE is_deleted = false;
                "#,
            )
            .await?;

        manager
            .get_connection()
            .execute_unprepared(
                r#"
                CREATE INDEX idx_subscription_frequencies_plan_id
                ON subscription_frequencies (subscription_plan_id);
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
                DROP INDEX IF EXISTS idx_subscription_frequencies_plan_id;
                DROP INDEX IF EXISTS idx_subscription_plans_shop_id;
                "#,
            )
            .await?;

        manager
            .drop_table(
                Table::drop()
                    .table(SubscriptionFrequencies::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(SubscriptionPlans::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum SubscriptionPlans {
    Table,
    Id,
    ShopId,
    Name,
    Status,
    IsDeleted,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum SubscriptionFrequencies {
    Table,
    Id,
    SubscriptionPlanId,
    PlanType,
    Name,
    Description,
    FrequencyInterval,
    FrequencyOrder,
    BillingFrequencyCount,
    BillingFrequencyInterval,
    SpecificDayEnabled,
    FrequencyType,
    SpecificDayValue,
    MaxCycles,
    MinCycles,
    CutOff,
    DiscountEnabled,
    DiscountOffer,
    DiscountType,
    #[sea_orm(iden = "after_cycle1")]
    AfterCycle1,
    #[sea_orm(iden = "discount_enabled2")]
    DiscountEnabled2,
    #[sea_orm(iden = "discount_type2")]
    DiscountType2,
    #[sea_orm(iden = "discount_offer2")]
    DiscountOffer2,
    #[sea_orm(iden = "after_cycle2")]
    AfterCycle2,
    InventoryPolicyReserve,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Shops {
    Table,
    Id,
}
