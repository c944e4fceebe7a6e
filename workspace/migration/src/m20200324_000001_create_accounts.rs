use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Accounts::Table)
                    .if_not_exists()
                    .col(pk_auto(Accounts::Id))
                    .col(string_len(Accounts::Email, 255).unique_key())
                    .col(string_len(Accounts::Password, 255))
                    .col(string_len(Accounts::FirstName, 255).default(""))
                    .col(string_len(Accounts::LastName, 255).default(""))
                    .col(string_len_null(Accounts::Cellphone, 128))
                    .col(string_len_null(Accounts::Photo, 100))
                    .col(boolean(Accounts::IsActive).default(true))
                    .col(boolean(Accounts::IsStaff).default(false))
                    .col(boolean(Accounts::IsSuperuser).default(false))
                    .col(timestamp_with_time_zone_null(Accounts::LastLogin))
                    .col(timestamp_with_time_zone(Accounts::DateJoined))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Accounts::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub(crate) enum Accounts {
    Table,
    Id,
    Email,
    Password,
    FirstName,
    LastName,
    Cellphone,
    Photo,
    IsActive,
    IsStaff,
    IsSuperuser,
    LastLogin,
    DateJoined,
}
