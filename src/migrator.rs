use sea_orm_migration::prelude::*;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240101_000001_create_coupons_table::Migration),
            Box::new(m20240101_000002_create_cashout_requests_table::Migration),
        ]
    }
}

// Migration implementations

mod m20240101_000001_create_coupons_table {

    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240101_000001_create_coupons_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Coupons::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Coupons::Id)
                                .integer()
                                .not_null()
                                .auto_increment()
                                .primary_key(),
                        )
                        .col(
                            ColumnDef::new(Coupons::Code)
                                .string_len(50)
                                .not_null()
                                .unique_key(),
                        )
                        .col(
                            ColumnDef::new(Coupons::Amount)
                                .decimal_len(10, 2)
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(Coupons::Active)
                                .boolean()
                                .not_null()
                                .default(true),
                        )
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Coupons::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    pub(super) enum Coupons {
        Table,
        Id,
        Code,
        Amount,
        Active,
    }
}

mod m20240101_000002_create_cashout_requests_table {

    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240101_000002_create_cashout_requests_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(CashoutRequests::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(CashoutRequests::Id)
                                .big_integer()
                                .not_null()
                                .auto_increment()
                                .primary_key(),
                        )
                        .col(
                            ColumnDef::new(CashoutRequests::CouponCode)
                                .string_len(50)
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(CashoutRequests::Amount)
                                .decimal_len(10, 2)
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(CashoutRequests::CashoutNumber)
                                .string_len(20)
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(CashoutRequests::PaymentMethod)
                                .string_len(20)
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(CashoutRequests::Status)
                                .string_len(20)
                                .not_null()
                                .default("pending"),
                        )
                        .col(ColumnDef::new(CashoutRequests::TrxId).string_len(50).null())
                        .col(
                            ColumnDef::new(CashoutRequests::AdminMobile)
                                .string_len(20)
                                .null(),
                        )
                        .col(
                            ColumnDef::new(CashoutRequests::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(CashoutRequests::UpdatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .to_owned(),
                )
                .await?;

            // Useful indexes: history lookups and admin status filtering
            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_cashout_requests_cashout_number")
                        .table(CashoutRequests::Table)
                        .col(CashoutRequests::CashoutNumber)
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_cashout_requests_status")
                        .table(CashoutRequests::Table)
                        .col(CashoutRequests::Status)
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_cashout_requests_created_at")
                        .table(CashoutRequests::Table)
                        .col(CashoutRequests::CreatedAt)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(CashoutRequests::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    pub(super) enum CashoutRequests {
        Table,
        Id,
        CouponCode,
        Amount,
        CashoutNumber,
        PaymentMethod,
        Status,
        TrxId,
        AdminMobile,
        CreatedAt,
        UpdatedAt,
    }
}
