use sea_orm::entity::prelude::*;
use sea_orm::{ConnectionTrait, QueryOrder, Set};
use tracing::{debug, info, instrument};

use crate::error::{ModelError, required};

/// A named, reusable capability tag (e.g. "Rust", "C++").
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "skills")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub name: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::account_skill::Entity")]
    AccountSkill,
}

impl Related<super::account_skill::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::AccountSkill.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Create and persist a skill.
///
/// Name uniqueness is left to the storage constraint and surfaces as
/// [`ModelError::Conflict`].
#[instrument(skip(db))]
pub async fn create_skill<C>(db: &C, name: Option<&str>) -> Result<Model, ModelError>
where
    C: ConnectionTrait,
{
    let name = required(name, "name")?;

    let skill = ActiveModel {
        name: Set(name.to_string()),
        ..Default::default()
    }
    .insert(db)
    .await
    .map_err(|err| ModelError::from_insert(err, || format!("Skill with name '{}' already exists", name)))?;

    info!("Successfully created skill with ID: {}", skill.id);
    Ok(skill)
}

/// All skills in ascending name order, read at call time.
pub async fn list_skills<C>(db: &C) -> Result<Vec<Model>, DbErr>
where
    C: ConnectionTrait,
{
    let skills = Entity::find().order_by_asc(Column::Name).all(db).await?;
    debug!("Fetched {} skills", skills.len());
    Ok(skills)
}
