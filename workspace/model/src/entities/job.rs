use chrono::NaiveDate;
use sea_orm::entity::prelude::*;
use sea_orm::{ConnectionTrait, Set};
use tracing::{debug, info, instrument};

use super::account;
use crate::error::{ModelError, required};

/// A job experience owned by an account.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "jobs")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub account_id: i32,
    pub title: String,
    pub company: String,
    pub start_date: Date,
    /// Absent while `present_day` is set.
    pub end_date: Option<Date>,
    /// The job is ongoing.
    pub present_day: bool,
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

/// Input for [`account::Model::add_job`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NewJob {
    pub title: String,
    pub company: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub present_day: bool,
}

impl NewJob {
    /// Check required fields and date ordering.
    ///
    /// With `present_day` set, a supplied end date is kept as-is and not
    /// compared against the start date.
    pub fn validate(&self) -> Result<(), ModelError> {
        required(self.company.as_deref(), "company")?;
        let start = self.start_date.ok_or(ModelError::MissingField("start_date"))?;

        if !self.present_day {
            let end = self.end_date.ok_or(ModelError::MissingField("end_date"))?;
            if end < start {
                return Err(ModelError::InvalidRange { start, end });
            }
        }

        Ok(())
    }
}

#[instrument(skip(db))]
pub(crate) async fn create_for<C>(db: &C, account_id: i32, job: NewJob) -> Result<Model, ModelError>
where
    C: ConnectionTrait,
{
    job.validate()?;
    debug!("Job input validated");

    let company = required(job.company.as_deref(), "company")?.to_string();
    let start_date = job.start_date.ok_or(ModelError::MissingField("start_date"))?;

    let job = ActiveModel {
        account_id: Set(account_id),
        title: Set(job.title),
        company: Set(company),
        start_date: Set(start_date),
        end_date: Set(job.end_date),
        present_day: Set(job.present_day),
        ..Default::default()
    }
    .insert(db)
    .await?;

    info!(job_id = job.id, "Job recorded");
    Ok(job)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::account::{AccountProfile, create_account};
    use crate::testing::setup_db;

    fn date(value: &str) -> Option<NaiveDate> {
        Some(NaiveDate::parse_from_str(value, "%Y-%m-%d").unwrap())
    }

    fn adp() -> NewJob {
        NewJob {
            title: "Developer".to_string(),
            company: Some("ADP".to_string()),
            start_date: date("2019-09-02"),
            end_date: date("2019-12-24"),
            present_day: false,
        }
    }

    async fn owner(db: &DatabaseConnection) -> account::Model {
        create_account(db, Some("test@mail.com"), Some("123456"), AccountProfile::default())
            .await
            .unwrap()
    }

    #[test]
    fn test_validate_rules() {
        assert!(adp().validate().is_ok());

        let no_company = NewJob { company: None, ..adp() };
        assert!(matches!(no_company.validate(), Err(ModelError::MissingField("company"))));

        let blank_company = NewJob { company: Some(" ".to_string()), ..adp() };
        assert!(matches!(blank_company.validate(), Err(ModelError::MissingField("company"))));

        let no_start = NewJob { start_date: None, ..adp() };
        assert!(matches!(no_start.validate(), Err(ModelError::MissingField("start_date"))));

        let no_end = NewJob { end_date: None, ..adp() };
        assert!(matches!(no_end.validate(), Err(ModelError::MissingField("end_date"))));

        let reversed = NewJob { start_date: date("2020-09-02"), ..adp() };
        assert!(matches!(reversed.validate(), Err(ModelError::InvalidRange { .. })));

        let same_day = NewJob { end_date: date("2019-09-02"), ..adp() };
        assert!(same_day.validate().is_ok());

        let ongoing = NewJob { end_date: None, present_day: true, ..adp() };
        assert!(ongoing.validate().is_ok());

        let ongoing_reversed = NewJob { start_date: date("2020-09-02"), present_day: true, ..adp() };
        assert!(ongoing_reversed.validate().is_ok());
    }

    #[tokio::test]
    async fn test_add_job_successful() {
        let db = setup_db().await;
        let account = owner(&db).await;

        let job = account.add_job(&db, adp()).await.unwrap();

        assert_eq!(job.account_id, account.id);
        assert_eq!(job.company, "ADP");
        assert_eq!(job.start_date, date("2019-09-02").unwrap());
        assert_eq!(job.end_date, date("2019-12-24"));
        assert!(!job.present_day);
    }

    #[tokio::test]
    async fn test_add_job_title_defaults_to_empty() {
        let db = setup_db().await;
        let account = owner(&db).await;

        let job = account
            .add_job(&db, NewJob { title: String::new(), ..adp() })
            .await
            .unwrap();

        assert_eq!(job.title, "");
    }

    #[tokio::test]
    async fn test_add_job_failures_persist_nothing() {
        let db = setup_db().await;
        let account = owner(&db).await;

        let no_company = account.add_job(&db, NewJob { company: None, ..adp() }).await;
        let no_end = account.add_job(&db, NewJob { end_date: None, ..adp() }).await;
        let reversed = account
            .add_job(&db, NewJob { start_date: date("2020-09-02"), ..adp() })
            .await;

        assert!(matches!(no_company, Err(ModelError::MissingField("company"))));
        assert!(matches!(no_end, Err(ModelError::MissingField("end_date"))));
        assert!(matches!(reversed, Err(ModelError::InvalidRange { .. })));
        assert_eq!(Entity::find().count(&db).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_add_present_day_job_without_end_date() {
        let db = setup_db().await;
        let account = owner(&db).await;

        let job = account
            .add_job(&db, NewJob { end_date: None, present_day: true, ..adp() })
            .await
            .unwrap();

        assert!(job.present_day);
        assert_eq!(job.end_date, None);
    }

    #[tokio::test]
    async fn test_jobs_most_recent_first() {
        let db = setup_db().await;
        let account = owner(&db).await;

        account.add_job(&db, adp()).await.unwrap();
        account
            .add_job(
                &db,
                NewJob {
                    company: Some("Globant".to_string()),
                    start_date: date("2020-01-06"),
                    end_date: None,
                    present_day: true,
                    ..adp()
                },
            )
            .await
            .unwrap();

        let companies: Vec<String> = account.jobs(&db).await.unwrap().into_iter().map(|j| j.company).collect();
        assert_eq!(companies, vec!["Globant", "ADP"]);
    }
}
