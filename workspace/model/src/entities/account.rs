use sea_orm::entity::prelude::*;
use sea_orm::{ConnectionTrait, QueryOrder, Set};
use tracing::{debug, info, instrument, trace};

use super::{account_skill, auth_token, job, skill};
use crate::credentials::{hash_password, verify_password};
use crate::error::{ModelError, required};

/// A user identity. The email is the sole login identifier.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "accounts")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    /// Lowercased login email.
    #[sea_orm(unique)]
    pub email: String,
    /// Argon2id PHC string, never the plaintext.
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    /// Phone number in international format (e.g. `+51999999999`).
    pub cellphone: Option<String>,
    /// Storage path of the profile photo, relative to the media root.
    pub photo: Option<String>,
    pub is_active: bool,
    pub is_staff: bool,
    pub is_superuser: bool,
    pub last_login: Option<DateTimeUtc>,
    pub date_joined: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::account_skill::Entity")]
    AccountSkill,
    #[sea_orm(has_many = "super::job::Entity")]
    Job,
    #[sea_orm(has_one = "super::auth_token::Entity")]
    AuthToken,
}

impl Related<account_skill::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::AccountSkill.def()
    }
}

impl Related<job::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Job.def()
    }
}

impl Related<auth_token::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::AuthToken.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Optional profile fields accepted when registering an account.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AccountProfile {
    pub first_name: String,
    pub last_name: String,
    pub cellphone: Option<String>,
    pub photo: Option<String>,
}

/// Normalize an email address for storage and lookup.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Create and persist a regular account.
///
/// Fails with [`ModelError::MissingField`] when the email or password is
/// absent, and with [`ModelError::Conflict`] when the email is taken.
#[instrument(skip(db, password, profile))]
pub async fn create_account<C>(
    db: &C,
    email: Option<&str>,
    password: Option<&str>,
    profile: AccountProfile,
) -> Result<Model, ModelError>
where
    C: ConnectionTrait,
{
    insert_account(db, email, password, profile, false).await
}

/// Create and persist a staff superuser. Profile fields stay empty.
#[instrument(skip(db, password))]
pub async fn create_super_account<C>(
    db: &C,
    email: Option<&str>,
    password: Option<&str>,
) -> Result<Model, ModelError>
where
    C: ConnectionTrait,
{
    insert_account(db, email, password, AccountProfile::default(), true).await
}

async fn insert_account<C>(
    db: &C,
    email: Option<&str>,
    password: Option<&str>,
    profile: AccountProfile,
    superuser: bool,
) -> Result<Model, ModelError>
where
    C: ConnectionTrait,
{
    let email = normalize_email(required(email, "email")?);
    let password = match password {
        Some(password) if !password.is_empty() => password,
        _ => return Err(ModelError::MissingField("password")),
    };

    trace!("Hashing password for new account");
    let password = hash_password(password)?;

    let account = ActiveModel {
        email: Set(email.clone()),
        password: Set(password),
        first_name: Set(profile.first_name),
        last_name: Set(profile.last_name),
        cellphone: Set(profile.cellphone),
        photo: Set(profile.photo),
        is_active: Set(true),
        is_staff: Set(superuser),
        is_superuser: Set(superuser),
        last_login: Set(None),
        date_joined: Set(chrono::Utc::now()),
        ..Default::default()
    };

    let account = account
        .insert(db)
        .await
        .map_err(|err| ModelError::from_insert(err, || format!("Account with email '{}' already exists", email)))?;

    info!(account_id = account.id, superuser, "Account created");
    Ok(account)
}

/// Look up an account by email and check its password.
///
/// Returns `None` for unknown emails, wrong passwords and inactive accounts.
#[instrument(skip(db, password))]
pub async fn authenticate<C>(db: &C, email: &str, password: &str) -> Result<Option<Model>, ModelError>
where
    C: ConnectionTrait,
{
    let account = Entity::find()
        .filter(Column::Email.eq(normalize_email(email)))
        .one(db)
        .await?;

    Ok(account.filter(|account| account.is_active && verify_password(password, &account.password)))
}

impl Model {
    /// First and last name joined by a single space.
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Link this account to a skill with a proficiency score.
    #[instrument(skip(self, db, skill), fields(account_id = self.id))]
    pub async fn add_skill<C>(
        &self,
        db: &C,
        skill: Option<&skill::Model>,
        proficiency: Option<i16>,
    ) -> Result<account_skill::Model, ModelError>
    where
        C: ConnectionTrait,
    {
        account_skill::create_for(db, self.id, skill, proficiency).await
    }

    /// Record a job experience for this account.
    #[instrument(skip(self, db, job), fields(account_id = self.id))]
    pub async fn add_job<C>(&self, db: &C, job: job::NewJob) -> Result<job::Model, ModelError>
    where
        C: ConnectionTrait,
    {
        job::create_for(db, self.id, job).await
    }

    /// Skills of this account together with their proficiency links.
    pub async fn skills<C>(&self, db: &C) -> Result<Vec<(account_skill::Model, skill::Model)>, DbErr>
    where
        C: ConnectionTrait,
    {
        let rows = account_skill::Entity::find()
            .filter(account_skill::Column::AccountId.eq(self.id))
            .find_also_related(skill::Entity)
            .order_by_asc(skill::Column::Name)
            .all(db)
            .await?;

        debug!("Retrieved {} skill links for account {}", rows.len(), self.id);
        Ok(rows
            .into_iter()
            .filter_map(|(link, skill)| skill.map(|skill| (link, skill)))
            .collect())
    }

    /// Job experiences of this account, most recent first.
    pub async fn jobs<C>(&self, db: &C) -> Result<Vec<job::Model>, DbErr>
    where
        C: ConnectionTrait,
    {
        job::Entity::find()
            .filter(job::Column::AccountId.eq(self.id))
            .order_by_desc(job::Column::StartDate)
            .order_by_desc(job::Column::Id)
            .all(db)
            .await
    }

    /// Stamp `last_login` with the current time.
    pub async fn record_login<C>(self, db: &C) -> Result<Model, DbErr>
    where
        C: ConnectionTrait,
    {
        let mut account: ActiveModel = self.into();
        account.last_login = Set(Some(chrono::Utc::now()));
        account.update(db).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::credentials::verify_password;
    use crate::testing::setup_db;

    fn profile() -> AccountProfile {
        AccountProfile {
            cellphone: Some("+51999999999".to_string()),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_create_account_with_email_successful() {
        let db = setup_db().await;

        let account = create_account(&db, Some("test@mail.com"), Some("123456"), profile())
            .await
            .unwrap();

        assert_eq!(account.email, "test@mail.com");
        assert_ne!(account.password, "123456");
        assert!(verify_password("123456", &account.password));
        assert_eq!(account.cellphone.as_deref(), Some("+51999999999"));
        assert!(account.is_active);
        assert!(!account.is_staff);
        assert!(!account.is_superuser);

        let stored = Entity::find_by_id(account.id).one(&db).await.unwrap().unwrap();
        assert_eq!(stored, account);
    }

    #[tokio::test]
    async fn test_create_account_email_normalized() {
        let db = setup_db().await;

        let account = create_account(&db, Some("test@MAIL.COM"), Some("123456"), profile())
            .await
            .unwrap();

        assert_eq!(account.email, "test@mail.com");
    }

    #[tokio::test]
    async fn test_create_account_without_email_fails() {
        let db = setup_db().await;

        let missing = create_account(&db, None, Some("test123456"), AccountProfile::default()).await;
        let blank = create_account(&db, Some(""), Some("test123456"), AccountProfile::default()).await;

        assert!(matches!(missing, Err(ModelError::MissingField("email"))));
        assert!(matches!(blank, Err(ModelError::MissingField("email"))));
        assert_eq!(Entity::find().count(&db).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_create_account_without_password_fails() {
        let db = setup_db().await;

        let missing = create_account(&db, Some("test@mail.com"), None, AccountProfile::default()).await;
        let empty = create_account(&db, Some("test@mail.com"), Some(""), AccountProfile::default()).await;

        assert!(matches!(missing, Err(ModelError::MissingField("password"))));
        assert!(matches!(empty, Err(ModelError::MissingField("password"))));
        assert_eq!(Entity::find().count(&db).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_duplicate_email_is_conflict() {
        let db = setup_db().await;

        create_account(&db, Some("test@mail.com"), Some("123456"), AccountProfile::default())
            .await
            .unwrap();
        let duplicate = create_account(&db, Some("TEST@mail.com"), Some("654321"), AccountProfile::default()).await;

        assert!(matches!(duplicate, Err(ModelError::Conflict(_))));
    }

    #[tokio::test]
    async fn test_create_super_account() {
        let db = setup_db().await;

        let account = create_super_account(&db, Some("admin@test.com"), Some("123456"))
            .await
            .unwrap();

        assert!(account.is_staff);
        assert!(account.is_superuser);
        assert!(account.first_name.is_empty());
        assert!(account.last_name.is_empty());

        let missing = create_super_account(&db, Some("other@test.com"), None).await;
        assert!(matches!(missing, Err(ModelError::MissingField("password"))));
    }

    #[tokio::test]
    async fn test_display_name_joins_names_literally() {
        let db = setup_db().await;

        let named = create_account(
            &db,
            Some("bob@mail.com"),
            Some("123456"),
            AccountProfile {
                first_name: "Bob".to_string(),
                last_name: "Marley".to_string(),
                ..Default::default()
            },
        )
        .await
        .unwrap();
        let anonymous = create_account(&db, Some("anon@mail.com"), Some("123456"), AccountProfile::default())
            .await
            .unwrap();

        assert_eq!(named.display_name(), "Bob Marley");
        assert_eq!(anonymous.display_name(), " ");
    }

    #[tokio::test]
    async fn test_authenticate() {
        let db = setup_db().await;
        let account = create_account(&db, Some("test@mail.com"), Some("123456"), AccountProfile::default())
            .await
            .unwrap();

        let found = authenticate(&db, "Test@Mail.com", "123456").await.unwrap();
        assert_eq!(found.map(|a| a.id), Some(account.id));

        assert!(authenticate(&db, "test@mail.com", "wrong").await.unwrap().is_none());
        assert!(authenticate(&db, "nobody@mail.com", "123456").await.unwrap().is_none());

        let mut inactive: ActiveModel = account.into();
        inactive.is_active = Set(false);
        inactive.update(&db).await.unwrap();
        assert!(authenticate(&db, "test@mail.com", "123456").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_record_login_sets_timestamp() {
        let db = setup_db().await;
        let account = create_account(&db, Some("test@mail.com"), Some("123456"), AccountProfile::default())
            .await
            .unwrap();
        assert!(account.last_login.is_none());

        let account = account.record_login(&db).await.unwrap();

        assert!(account.last_login.is_some());
    }
}
