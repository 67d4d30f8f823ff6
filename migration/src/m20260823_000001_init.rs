use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // ========== POLES ==========
        manager
            .create_table(
                Table::create()
                    .table(Poles::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Poles::PoleId)
                            .string_len(64)
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Poles::Latitude).double().not_null())
                    .col(ColumnDef::new(Poles::Longitude).double().not_null())
                    .col(ColumnDef::new(Poles::Status).string_len(8).not_null())
                    .col(
                        ColumnDef::new(Poles::CommunicationStatus)
                            .string_len(16)
                            .not_null(),
                    )
                    .col(ColumnDef::new(Poles::Region).string_len(64))
                    .col(ColumnDef::new(Poles::District).string_len(64))
                    .col(ColumnDef::new(Poles::City).string_len(64))
                    .col(ColumnDef::new(Poles::FirmwareVersion).string_len(32))
                    .col(ColumnDef::new(Poles::UpdateTime).timestamp_with_time_zone())
                    .to_owned(),
            )
            .await?;

        // ========== TELEMETRY ==========
        manager
            .create_table(
                Table::create()
                    .table(Telemetry::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Telemetry::Id)
                            .uuid()
                            .not_null()
                            .primary_key()
                            .extra("DEFAULT gen_random_uuid()"),
                    )
                    .col(ColumnDef::new(Telemetry::PoleId).string_len(64).not_null())
                    .col(
                        ColumnDef::new(Telemetry::Timestamp)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Telemetry::Status).string_len(8).not_null())
                    .col(ColumnDef::new(Telemetry::SignalStrength).integer())
                    .col(ColumnDef::new(Telemetry::FirmwareVersion).string_len(32))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_telemetry_pole")
                            .from(Telemetry::Table, Telemetry::PoleId)
                            .to(Poles::Table, Poles::PoleId),
                    )
                    .to_owned(),
            )
            .await?;

        // Read path is newest-first per pole
        manager
            .get_connection()
            .execute_unprepared(
                "CREATE INDEX telemetry_pole_time_idx ON telemetry (pole_id, \"timestamp\" DESC)",
            )
            .await?;

        // Sunrise/sunset window filter scans by time-of-day across all poles
        manager
            .get_connection()
            .execute_unprepared(
                "CREATE INDEX telemetry_time_idx ON telemetry (\"timestamp\" DESC)",
            )
            .await?;

        // ========== ALERTS ==========
        manager
            .create_table(
                Table::create()
                    .table(Alerts::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Alerts::Id)
                            .uuid()
                            .not_null()
                            .primary_key()
                            .extra("DEFAULT gen_random_uuid()"),
                    )
                    .col(ColumnDef::new(Alerts::PoleId).string_len(64).not_null())
                    .col(ColumnDef::new(Alerts::Message).text().not_null())
                    .col(ColumnDef::new(Alerts::Severity).string_len(16).not_null())
                    .col(ColumnDef::new(Alerts::AlertType).string_len(64).not_null())
                    .col(ColumnDef::new(Alerts::AlertStatus).string_len(16).not_null())
                    .col(
                        ColumnDef::new(Alerts::Timestamp)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_alerts_pole")
                            .from(Alerts::Table, Alerts::PoleId)
                            .to(Poles::Table, Poles::PoleId),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .get_connection()
            .execute_unprepared("CREATE INDEX alerts_time_idx ON alerts (\"timestamp\" DESC)")
            .await?;

        manager
            .get_connection()
            .execute_unprepared("CREATE INDEX alerts_pole_idx ON alerts (pole_id)")
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Alerts::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Telemetry::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Poles::Table).to_owned())
            .await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum Poles {
    Table,
    PoleId,
    Latitude,
    Longitude,
    Status,
    CommunicationStatus,
    Region,
    District,
    City,
    FirmwareVersion,
    UpdateTime,
}

#[derive(DeriveIden)]
enum Telemetry {
    Table,
    Id,
    PoleId,
    Timestamp,
    Status,
    SignalStrength,
    FirmwareVersion,
}

#[derive(DeriveIden)]
enum Alerts {
    Table,
    Id,
    PoleId,
    Message,
    Severity,
    AlertType,
    AlertStatus,
    Timestamp,
}
