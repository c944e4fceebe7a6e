use super::account;
use sea_orm::entity::prelude::*;
use sea_orm::{ConnectionTrait, Set};
use tracing::{debug, info, instrument};

use crate::credentials::generate_token_key;
use crate::error::ModelError;

/// Opaque bearer token; one per account.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "auth_tokens")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub key: String,
    #[sea_orm(unique)]
    pub account_id: i32,
    pub created: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "account::Entity",
        from = "Column::AccountId",
        to = "account::Column::Id",
        on_delete = "Cascade"
    )]
    Account,
}

impl Related<account::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Account.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Return the account's token, creating it on first use.
#[instrument(skip(db, account), fields(account_id = account.id))]
pub async fn issue<C>(db: &C, account: &account::Model) -> Result<Model, ModelError>
where
    C: ConnectionTrait,
{
    if let Some(token) = Entity::find()
        .filter(Column::AccountId.eq(account.id))
        .one(db)
        .await?
    {
        debug!("Reusing existing token");
        return Ok(token);
    }

    let token = ActiveModel {
        key: Set(generate_token_key()),
        account_id: Set(account.id),
        created: Set(chrono::Utc::now()),
    }
    .insert(db)
    .await
    .map_err(|err| ModelError::from_insert(err, || "A token was issued concurrently".to_string()))?;

    info!("Token issued");
    Ok(token)
}

/// Resolve the account owning `key`.
pub async fn account_for_key<C>(db: &C, key: &str) -> Result<Option<account::Model>, DbErr>
where
    C: ConnectionTrait,
{
    let found = Entity::find_by_id(key.to_string())
        .find_also_related(account::Entity)
        .one(db)
        .await?;

    Ok(found.and_then(|(_, account)| account))
}
