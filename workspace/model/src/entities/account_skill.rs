use super::{account, skill};
use sea_orm::entity::prelude::*;
use sea_orm::{ConnectionTrait, Set};
use tracing::{info, instrument};

use crate::error::ModelError;

/// Links an account to a skill with a proficiency score.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "account_skills")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub account_id: i32,
    pub skill_id: i32,
    /// Free-form score; no range is enforced.
    pub proficiency: i16,
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
    #[sea_orm(
        belongs_to = "skill::Entity",
        from = "Column::SkillId",
        to = "skill::Column::Id",
        on_delete = "Cascade"
    )]
    Skill,
}

impl Related<account::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Account.def()
    }
}

impl Related<skill::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Skill.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

#[instrument(skip(db, skill))]
pub(crate) async fn create_for<C>(
    db: &C,
    account_id: i32,
    skill: Option<&skill::Model>,
    proficiency: Option<i16>,
) -> Result<Model, ModelError>
where
    C: ConnectionTrait,
{
    let skill = skill.ok_or(ModelError::MissingField("skill"))?;
    let proficiency = proficiency.ok_or(ModelError::MissingField("proficiency"))?;

    let link = ActiveModel {
        account_id: Set(account_id),
        skill_id: Set(skill.id),
        proficiency: Set(proficiency),
        ..Default::default()
    }
    .insert(db)
    .await
    .map_err(|err| ModelError::from_insert(err, || format!("Skill '{}' is already linked to this account", skill.name)))?;

    info!(link_id = link.id, skill_id = skill.id, proficiency, "Skill linked to account");
    Ok(link)
}
