use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // ========== SENSOR RECORDS ==========
        manager
            .create_table(
                Table::create()
                    .table(SensorRecords::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(SensorRecords::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(SensorRecords::Ultrasonic).double().not_null())
                    .col(ColumnDef::new(SensorRecords::LedUltrasonic).double().not_null())
                    .col(ColumnDef::new(SensorRecords::Ldr).double().not_null())
                    .col(ColumnDef::new(SensorRecords::LedLdrPin).double().not_null())
                    .col(
                        ColumnDef::new(SensorRecords::LedStatus)
                            .small_integer()
                            .not_null()
                            .default(0)
                            .check(Expr::col(SensorRecords::LedStatus).is_in([0, 1])),
                    )
                    .col(
                        ColumnDef::new(SensorRecords::RecordedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // Latest-record lookups order by (recorded_at DESC, id DESC)
        manager
            .create_index(
                Index::create()
                    .name("idx_sensor_records_recorded_at_id")
                    .table(SensorRecords::Table)
                    .col(SensorRecords::RecordedAt)
                    .col(SensorRecords::Id)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(SensorRecords::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum SensorRecords {
    Table,
    Id,
    Ultrasonic,
    LedUltrasonic,
    Ldr,
    LedLdrPin,
    LedStatus,
    RecordedAt,
}
