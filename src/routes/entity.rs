//! CRUD routes for the six entities, plus the per-user listings.

use crate::handlers::{companies, interviews, recruiters, resumes, users, vacancies};
use crate::state::AppState;
use axum::{routing::get, Router};

pub fn entity_routes(state: AppState) -> Router {
    Router::new()
        .route("/users", get(users::list_users).post(users::create_user))
        .route(
            "/users/:id",
            get(users::get_user)
                .put(users::update_user)
                .patch(users::update_user)
                .delete(users::delete_user),
        )
        .route("/users/:id/interviews", get(users::list_user_interviews))
        .route("/users/:id/resumes", get(users::list_user_resumes))
        .route("/users/:id/myInterview", get(users::list_user_interviews))
        .route("/users/:id/myresume", get(users::list_user_resumes))
        .route(
            "/companies",
            get(companies::list_companies).post(companies::create_company),
        )
        .route(
            "/companies/:id",
            get(companies::get_company)
                .put(companies::update_company)
                .patch(companies::update_company)
                .delete(companies::delete_company),
        )
        .route(
            "/recruiters",
            get(recruiters::list_recruiters).post(recruiters::create_recruiter),
        )
        .route(
            "/recruiters/:id",
            get(recruiters::get_recruiter)
                .put(recruiters::update_recruiter)
                .patch(recruiters::update_recruiter)
                .delete(recruiters::delete_recruiter),
        )
        .route(
            "/vacancies",
            get(vacancies::list_vacancies).post(vacancies::create_vacancy),
        )
        .route(
            "/vacancies/:id",
            get(vacancies::get_vacancy)
                .put(vacancies::update_vacancy)
                .patch(vacancies::update_vacancy)
                .delete(vacancies::delete_vacancy),
        )
        .route("/resumes", get(resumes::list_resumes).post(resumes::create_resume))
        .route(
            "/resumes/:id",
            get(resumes::get_resume)
                .put(resumes::update_resume)
                .patch(resumes::update_resume)
                .delete(resumes::delete_resume),
        )
        .route(
            "/interviews",
            get(interviews::list_interviews).post(interviews::create_interview),
        )
        .route(
            "/interviews/:id",
            get(interviews::get_interview)
                .put(interviews::update_interview)
                .patch(interviews::update_interview)
                .delete(interviews::delete_interview),
        )
        .with_state(state)
}
