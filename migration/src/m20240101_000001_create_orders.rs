use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Orders::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Orders::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Orders::OrderNumber)
                            .string_len(50)
                            .not_null(),
                    )
                    .col(ColumnDef::new(Orders::Date).date().not_null())
                    .col(ColumnDef::new(Orders::RimQuantity).integer().not_null())
                    .col(ColumnDef::new(Orders::City).string_len(100).not_null())
                    .col(
                        ColumnDef::new(Orders::DocumentType)
                            .string_len(100)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Orders::UnitPrice)
                            .decimal_len(16, 4)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Orders::TotalPrice)
                            .decimal_len(16, 4)
                            .not_null(),
                    )
                    .col(ColumnDef::new(Orders::EntryDate).date().null())
                    .col(ColumnDef::new(Orders::PrintDeadline).date().null())
                    .col(ColumnDef::new(Orders::CekDate).date().null())
                    .col(ColumnDef::new(Orders::FinishDate).date().null())
                    .col(
                        ColumnDef::new(Orders::Status)
                            .string_len(50)
                            .not_null()
                            .default("masuk"), // masuk, proses, cek, finish
                    )
                    .col(ColumnDef::new(Orders::Notes).text().null())
                    .to_owned(),
            )
            .await?;

        // order_number is unique per shop
        manager
            .create_index(
                Index::create()
                    .name("idx_orders_order_number")
                    .table(Orders::Table)
                    .col(Orders::OrderNumber)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Orders::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Orders {
    Table,
    Id,
    OrderNumber,
    Date,
    RimQuantity,
    City,
    DocumentType,
    UnitPrice,
    TotalPrice,
    EntryDate,
    PrintDeadline,
    CekDate,
    FinishDate,
    Status,
    Notes,
}
