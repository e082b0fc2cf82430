//! Repository tests against a real PostgreSQL. Set `TEST_DATABASE_URL` to run them;
//! without it every test returns early.

use chrono::{Datelike, NaiveDate, Utc};
use hr_platform::models::{
    CreateCompany, CreateInterview, CreateRecruiter, CreateResume, CreateUser, CreateVacancy,
    InterviewFilter, RecruiterFilter, ResumeFilter, UpdateCompany, UpdateRecruiter, UpdateUser,
    UserFilter,
};
use hr_platform::repository::{
    CompanyRepository, InterviewRepository, RecruiterRepository, ResumeRepository,
    UserRepository, VacancyRepository,
};
use hr_platform::service::age_on;
use hr_platform::{ensure_database_exists, ensure_tables, AppError, RuleViolation};
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use uuid::Uuid;

async fn pool() -> Option<PgPool> {
    let url = std::env::var("TEST_DATABASE_URL").ok()?;
    ensure_database_exists(&url).await.expect("create test database");
    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&url)
        .await
        .expect("connect test database");
    ensure_tables(&pool).await.expect("bootstrap tables");
    Some(pool)
}

fn unique_email(prefix: &str) -> String {
    format!("{}-{}@example.com", prefix, Uuid::new_v4().simple())
}

fn new_user(birthday: &str) -> CreateUser {
    CreateUser {
        name: "Ann".into(),
        email: unique_email("ann"),
        phone_number: "+100000".into(),
        birthday: birthday.into(),
        gender: "f".into(),
    }
}

fn new_company() -> CreateCompany {
    CreateCompany {
        name: "Acme".into(),
        location: "Berlin".into(),
        workers: 40,
    }
}

#[tokio::test]
async fn created_user_round_trips() {
    let Some(pool) = pool().await else { return };
    let users = UserRepository::new(&pool);
    let req = new_user("1990-04-12");
    let created = users.create(&req).await.unwrap();
    assert_eq!(created.created_at, created.updated_at);
    assert_eq!(created.deleted_at, 0);

    let fetched = users.get(created.id).await.unwrap();
    assert_eq!(fetched, created);
    assert_eq!(fetched.email, req.email);
    assert_eq!(fetched.birthday, NaiveDate::from_ymd_opt(1990, 4, 12).unwrap());
}

#[tokio::test]
async fn duplicate_email_conflicts() {
    let Some(pool) = pool().await else { return };
    let users = UserRepository::new(&pool);
    let req = new_user("1990-04-12");
    users.create(&req).await.unwrap();
    let err = users.create(&req).await.unwrap_err();
    match err {
        AppError::Db(sqlx::Error::Database(db)) => assert!(db.is_unique_violation()),
        other => panic!("expected unique violation, got {:?}", other),
    }
}

#[tokio::test]
async fn empty_update_leaves_row_untouched() {
    let Some(pool) = pool().await else { return };
    let companies = CompanyRepository::new(&pool);
    let created = companies.create(&new_company()).await.unwrap();
    companies
        .update(created.id, &UpdateCompany::default())
        .await
        .unwrap();
    assert_eq!(companies.get(created.id).await.unwrap(), created);
}

#[tokio::test]
async fn one_field_update_changes_only_that_field() {
    let Some(pool) = pool().await else { return };
    let users = UserRepository::new(&pool);
    let created = users.create(&new_user("1985-09-30")).await.unwrap();
    let patch = UpdateUser {
        gender: Some("x".into()),
        ..Default::default()
    };
    users.update(created.id, &patch).await.unwrap();
    let after = users.get(created.id).await.unwrap();
    assert_eq!(after.gender, "x");
    assert_eq!(after.name, created.name);
    assert_eq!(after.birthday, created.birthday);
    assert_eq!(after.created_at, created.created_at);
    assert!(after.updated_at >= created.updated_at);
}

#[tokio::test]
async fn update_and_delete_of_missing_row_are_not_found() {
    let Some(pool) = pool().await else { return };
    let companies = CompanyRepository::new(&pool);
    let patch = UpdateCompany {
        name: Some("Ghost".into()),
        ..Default::default()
    };
    assert!(matches!(
        companies.update(Uuid::new_v4(), &patch).await,
        Err(AppError::NotFound(_))
    ));
    assert!(matches!(
        companies.delete(Uuid::new_v4()).await,
        Err(AppError::NotFound(_))
    ));
}

#[tokio::test]
async fn soft_deleted_rows_disappear() {
    let Some(pool) = pool().await else { return };
    let companies = CompanyRepository::new(&pool);
    let created = companies.create(&new_company()).await.unwrap();
    assert!(companies.exists(created.id).await.unwrap());

    companies.delete(created.id).await.unwrap();
    assert!(matches!(
        companies.get(created.id).await,
        Err(AppError::NotFound(_))
    ));
    assert!(!companies.exists(created.id).await.unwrap());
    assert!(matches!(
        companies.delete(created.id).await,
        Err(AppError::NotFound(_))
    ));

    let users = UserRepository::new(&pool);
    let user = users.create(&new_user("1991-01-01")).await.unwrap();
    users.delete(user.id).await.unwrap();
    let listed = users.list(&UserFilter::default()).await.unwrap();
    assert!(listed.iter().all(|u| u.id != user.id));
}

#[tokio::test]
async fn recruiter_needs_a_live_company() {
    let Some(pool) = pool().await else { return };
    let recruiters = RecruiterRepository::new(&pool);
    let missing = Uuid::new_v4();
    let req = CreateRecruiter {
        name: "Bob".into(),
        email: unique_email("bob"),
        phone_number: "+200000".into(),
        birthday: "1980-02-02".into(),
        gender: "m".into(),
        company_id: missing,
    };
    match recruiters.create(&req).await {
        Err(AppError::Referential { kind, id }) => {
            assert_eq!(kind, "company");
            assert_eq!(id, missing);
        }
        other => panic!("expected referential error, got {:?}", other),
    }

    let companies = CompanyRepository::new(&pool);
    let company = companies.create(&new_company()).await.unwrap();
    let req = CreateRecruiter {
        company_id: company.id,
        ..req
    };
    let created = recruiters.create(&req).await.unwrap();
    assert_eq!(created.company_id, company.id);
}

#[tokio::test]
async fn vacancy_rejects_deleted_company() {
    let Some(pool) = pool().await else { return };
    let companies = CompanyRepository::new(&pool);
    let company = companies.create(&new_company()).await.unwrap();
    companies.delete(company.id).await.unwrap();
    let req = CreateVacancy {
        name: "Backend developer".into(),
        position: "Backend Engineer".into(),
        min_exp: 1,
        description: "Services".into(),
        company_id: company.id,
    };
    let err = VacancyRepository::new(&pool).create(&req).await.unwrap_err();
    assert!(matches!(err, AppError::Referential { kind: "company", .. }));
}

#[tokio::test]
async fn resume_listing_filters_by_experience() {
    let Some(pool) = pool().await else { return };
    let user = UserRepository::new(&pool)
        .create(&new_user("1992-06-06"))
        .await
        .unwrap();
    let resumes = ResumeRepository::new(&pool);
    for years in [1, 3, 5] {
        resumes
            .create(&CreateResume {
                position: "Backend Engineer".into(),
                experience: years,
                description: String::new(),
                user_id: user.id,
            })
            .await
            .unwrap();
    }

    let filter = ResumeFilter {
        min_exp: Some(3),
        user_id: Some(user.id),
        ..Default::default()
    };
    let mut found: Vec<i32> = resumes
        .list(&filter)
        .await
        .unwrap()
        .iter()
        .map(|r| r.resume.experience)
        .collect();
    found.sort_unstable();
    assert_eq!(found, vec![3, 5]);

    let all = UserRepository::new(&pool).resumes(user.id).await.unwrap();
    assert_eq!(all.len(), 3);
    assert!(all.iter().all(|r| r.user_email == user.email));
}

struct Scene {
    company_id: Uuid,
    vacancy_id: Uuid,
    recruiter_id: Uuid,
}

async fn scene(pool: &PgPool, position: &str) -> Scene {
    let company = CompanyRepository::new(pool)
        .create(&new_company())
        .await
        .unwrap();
    let vacancy = VacancyRepository::new(pool)
        .create(&CreateVacancy {
            name: "Opening".into(),
            position: position.into(),
            min_exp: 0,
            description: "Team work".into(),
            company_id: company.id,
        })
        .await
        .unwrap();
    let recruiter = RecruiterRepository::new(pool)
        .create(&CreateRecruiter {
            name: "Rita".into(),
            email: unique_email("rita"),
            phone_number: "+300000".into(),
            birthday: "1979-03-03".into(),
            gender: "f".into(),
            company_id: company.id,
        })
        .await
        .unwrap();
    Scene {
        company_id: company.id,
        vacancy_id: vacancy.id,
        recruiter_id: recruiter.id,
    }
}

async fn add_resume(pool: &PgPool, user_id: Uuid, position: &str) {
    add_resume_with_experience(pool, user_id, position, 2).await;
}

async fn add_resume_with_experience(pool: &PgPool, user_id: Uuid, position: &str, years: i32) {
    ResumeRepository::new(pool)
        .create(&CreateResume {
            position: position.into(),
            experience: years,
            description: String::new(),
            user_id,
        })
        .await
        .unwrap();
}

#[tokio::test]
async fn interview_rules_are_enforced_in_order() {
    let Some(pool) = pool().await else { return };
    let s = scene(&pool, "Backend Engineer").await;
    let users = UserRepository::new(&pool);
    let interviews = InterviewRepository::new(&pool);

    let young_birthday = format!("{}-01-01", Utc::now().year() - 10);
    let minor = users.create(&new_user(&young_birthday)).await.unwrap();
    add_resume(&pool, minor.id, "Backend Engineer").await;
    let err = interviews
        .create(&CreateInterview {
            user_id: minor.id,
            vacancy_id: s.vacancy_id,
            recruiter_id: s.recruiter_id,
            interview_date: "2030-01-15 09:30:00".into(),
        })
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Rule(RuleViolation::Underage { .. })));

    let adult = users.create(&new_user("1990-01-01")).await.unwrap();
    add_resume(&pool, adult.id, "backend engineer").await;
    let req = CreateInterview {
        user_id: adult.id,
        vacancy_id: s.vacancy_id,
        recruiter_id: s.recruiter_id,
        interview_date: "2030-01-15 09:30:00".into(),
    };
    let err = interviews.create(&req).await.unwrap_err();
    assert!(matches!(
        err,
        AppError::Rule(RuleViolation::PositionMismatch { .. })
    ));

    add_resume(&pool, adult.id, "Backend Engineer").await;
    let created = interviews.create(&req).await.unwrap();
    assert_eq!(created.user_id, adult.id);
    assert_eq!(created.interview_date.to_rfc3339(), "2030-01-15T09:30:00+00:00");

    let listed = users.interviews(adult.id).await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].id, created.id);
}

#[tokio::test]
async fn interview_needs_live_references() {
    let Some(pool) = pool().await else { return };
    let s = scene(&pool, "QA").await;
    let err = InterviewRepository::new(&pool)
        .create(&CreateInterview {
            user_id: Uuid::new_v4(),
            vacancy_id: s.vacancy_id,
            recruiter_id: s.recruiter_id,
            interview_date: "2030-01-15 09:30:00".into(),
        })
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Referential { kind: "user", .. }));
}

async fn schedule(pool: &PgPool, user_id: Uuid, s: &Scene) -> Uuid {
    InterviewRepository::new(pool)
        .create(&CreateInterview {
            user_id,
            vacancy_id: s.vacancy_id,
            recruiter_id: s.recruiter_id,
            interview_date: "2031-06-01 10:00:00".into(),
        })
        .await
        .unwrap()
        .id
}

#[tokio::test]
async fn interview_filters_resolve_through_related_tables() {
    let Some(pool) = pool().await else { return };
    let tag = Uuid::new_v4().simple().to_string();
    let literal = format!("QA_100%{}", tag);
    let lookalike = format!("QAx100y{}", tag);
    let a = scene(&pool, &literal).await;
    let b = scene(&pool, &lookalike).await;

    let users = UserRepository::new(&pool);
    let junior = users.create(&new_user("1990-01-01")).await.unwrap();
    add_resume(&pool, junior.id, &literal).await;
    add_resume(&pool, junior.id, &lookalike).await;
    let senior = users.create(&new_user("1988-03-03")).await.unwrap();
    add_resume_with_experience(&pool, senior.id, &literal, 7).await;

    let junior_a = schedule(&pool, junior.id, &a).await;
    let junior_b = schedule(&pool, junior.id, &b).await;
    let senior_a = schedule(&pool, senior.id, &a).await;

    let interviews = InterviewRepository::new(&pool);
    let ids = |rows: Vec<hr_platform::models::Interview>| {
        let mut v: Vec<Uuid> = rows.into_iter().map(|i| i.id).collect();
        v.sort();
        v
    };
    let sorted = |mut v: Vec<Uuid>| {
        v.sort();
        v
    };

    let by_company = InterviewFilter {
        company_id: Some(b.company_id),
        ..Default::default()
    };
    assert_eq!(ids(interviews.list(&by_company).await.unwrap()), vec![junior_b]);

    // `_` and `%` in the needle match only themselves; case is ignored.
    let by_position = InterviewFilter {
        position: Some(literal.to_uppercase()),
        ..Default::default()
    };
    assert_eq!(
        ids(interviews.list(&by_position).await.unwrap()),
        sorted(vec![junior_a, senior_a])
    );

    let by_experience = InterviewFilter {
        company_id: Some(a.company_id),
        experience: Some(5),
        ..Default::default()
    };
    assert_eq!(ids(interviews.list(&by_experience).await.unwrap()), vec![senior_a]);

    let nobody = InterviewFilter {
        experience: Some(5),
        user_id: Some(junior.id),
        ..Default::default()
    };
    assert!(interviews.list(&nobody).await.unwrap().is_empty());
}

#[tokio::test]
async fn age_filter_matches_whole_years() {
    let Some(pool) = pool().await else { return };
    let tag = Uuid::new_v4().simple().to_string();
    let users = UserRepository::new(&pool);
    let mut older = new_user("1980-01-01");
    older.gender = tag.clone();
    let older = users.create(&older).await.unwrap();
    let mut younger = new_user("2000-01-01");
    younger.gender = tag.clone();
    users.create(&younger).await.unwrap();

    let today = Utc::now().date_naive();
    let filter = UserFilter {
        age: Some(age_on(today, older.birthday)),
        gender: Some(tag.clone()),
    };
    let found = users.list(&filter).await.unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].id, older.id);

    let s = scene(&pool, "Recruiting").await;
    let recruiters = RecruiterRepository::new(&pool);
    let rita = recruiters.get(s.recruiter_id).await.unwrap();
    let filter = RecruiterFilter {
        age: Some(age_on(today, rita.birthday)),
        company_id: Some(s.company_id),
        ..Default::default()
    };
    assert_eq!(recruiters.list(&filter).await.unwrap().len(), 1);
    let filter = RecruiterFilter {
        age: Some(age_on(today, rita.birthday) + 1),
        company_id: Some(s.company_id),
        ..Default::default()
    };
    assert!(recruiters.list(&filter).await.unwrap().is_empty());
}

#[tokio::test]
async fn recruiter_cannot_move_to_deleted_company() {
    let Some(pool) = pool().await else { return };
    let s = scene(&pool, "Support").await;
    let companies = CompanyRepository::new(&pool);
    let closed = companies.create(&new_company()).await.unwrap();
    companies.delete(closed.id).await.unwrap();

    let recruiters = RecruiterRepository::new(&pool);
    let patch = UpdateRecruiter {
        company_id: Some(closed.id),
        ..Default::default()
    };
    let err = recruiters.update(s.recruiter_id, &patch).await.unwrap_err();
    assert!(matches!(err, AppError::Referential { kind: "company", id } if id == closed.id));
    assert_eq!(
        recruiters.get(s.recruiter_id).await.unwrap().company_id,
        s.company_id
    );
}
