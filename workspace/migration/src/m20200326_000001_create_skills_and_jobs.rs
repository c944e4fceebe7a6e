use sea_orm_migration::{prelude::*, schema::*};

use crate::m20200324_000001_create_accounts::Accounts;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Create skills table
        manager
            .create_table(
                Table::create()
                    .table(Skills::Table)
                    .if_not_exists()
                    .col(pk_auto(Skills::Id))
                    .col(string_len(Skills::Name, 255).unique_key())
                    .to_owned(),
            )
            .await?;

        // Create account_skills table
        manager
            .create_table(
                Table::create()
                    .table(AccountSkills::Table)
                    .if_not_exists()
                    .col(pk_auto(AccountSkills::Id))
                    .col(integer(AccountSkills::AccountId))
                    .col(integer(AccountSkills::SkillId))
                    .col(small_integer(AccountSkills::Proficiency))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_account_skills_account")
                            .from(AccountSkills::Table, AccountSkills::AccountId)
                            .to(Accounts::Table, Accounts::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_account_skills_skill")
                            .from(AccountSkills::Table, AccountSkills::SkillId)
                            .to(Skills::Table, Skills::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // One link per (account, skill) pair
        manager
            .create_index(
                Index::create()
                    .name("idx_account_skills_account_skill")
                    .table(AccountSkills::Table)
                    .col(AccountSkills::AccountId)
                    .col(AccountSkills::SkillId)
                    .unique()
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        // Create jobs table
        manager
            .create_table(
                Table::create()
                    .table(Jobs::Table)
                    .if_not_exists()
                    .col(pk_auto(Jobs::Id))
                    .col(integer(Jobs::AccountId))
                    .col(string_len(Jobs::Title, 255).default(""))
                    .col(string_len(Jobs::Company, 255))
                    .col(date(Jobs::StartDate))
                    .col(date_null(Jobs::EndDate))
                    .col(boolean(Jobs::PresentDay).default(false))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_jobs_account")
                            .from(Jobs::Table, Jobs::AccountId)
                            .to(Accounts::Table, Accounts::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Jobs::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(AccountSkills::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Skills::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Skills {
    Table,
    Id,
    Name,
}

#[derive(DeriveIden)]
enum AccountSkills {
    Table,
    Id,
    AccountId,
    SkillId,
    Proficiency,
}

#[derive(DeriveIden)]
enum Jobs {
    Table,
    Id,
    AccountId,
    Title,
    Company,
    StartDate,
    EndDate,
    PresentDay,
}
