pub use sea_orm_migration::prelude::*;

mod m20200324_000001_create_accounts;
mod m20200326_000001_create_skills_and_jobs;
mod m20200401_000001_create_auth_tokens;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20200324_000001_create_accounts::Migration),
            Box::new(m20200326_000001_create_skills_and_jobs::Migration),
            Box::new(m20200401_000001_create_auth_tokens::Migration),
        ]
    }
}
