//! SeaORM entities for accounts, skills, account-skill links, jobs and
//! authentication tokens, together with the validated factories that create
//! them. Factories take the connection explicitly so they run equally on a
//! pooled connection or inside a transaction.

pub mod account;
pub mod account_skill;
pub mod auth_token;
pub mod job;
pub mod skill;

pub mod prelude {
    //! A prelude module for easy importing of all entities.
    pub use super::account::Entity as Account;
    pub use super::account_skill::Entity as AccountSkill;
    pub use super::auth_token::Entity as AuthToken;
    pub use super::job::Entity as Job;
    pub use super::skill::Entity as Skill;
}
