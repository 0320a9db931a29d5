// src/routes.rs

use axum::{
    middleware as axum_middleware,
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

use crate::{
    config::AppState,
    handlers::{self, records},
    middleware::auth::session_guard,
    models::records::{BicSetup, BranchEntity, McRegister, PesoNet, Record},
};

// create / update / delete sob um prefixo; a listagem é registrada à parte
// porque o Record lista em /dashboard e não em /records.
fn write_routes<T: BranchEntity>(base: &str) -> Router<AppState> {
    Router::new()
        .route(
            &format!("{base}/create"),
            get(records::create_form::<T>).post(records::create::<T>),
        )
        .route(
            &format!("{base}/{{id}}/update"),
            get(records::update_form::<T>).post(records::update::<T>),
        )
        .route(&format!("{base}/{{id}}/delete"), post(records::delete::<T>))
}

pub fn app_router(app_state: AppState) -> Router {
    // Rotas públicas
    let public_routes = Router::new()
        .route("/", get(handlers::auth::home))
        .route(
            "/register",
            get(handlers::auth::register_form).post(handlers::auth::register),
        )
        .route(
            "/my-login",
            get(handlers::auth::login_form).post(handlers::auth::login),
        )
        .route(
            "/user-logout",
            get(handlers::auth::logout).post(handlers::auth::logout),
        );

    // Rotas por agência (protegidas pelo middleware de sessão)
    let branch_routes = Router::new()
        .route(Record::LIST_PATH, get(records::list::<Record>))
        .merge(write_routes::<Record>("/records"))
        .route(BicSetup::LIST_PATH, get(records::list::<BicSetup>))
        .route("/bic-cashier", get(records::list::<BicSetup>))
        .merge(write_routes::<BicSetup>(BicSetup::LIST_PATH))
        .route(McRegister::LIST_PATH, get(records::list::<McRegister>))
        .merge(write_routes::<McRegister>(McRegister::LIST_PATH))
        .route(PesoNet::LIST_PATH, get(records::list::<PesoNet>))
        .merge(write_routes::<PesoNet>(PesoNet::LIST_PATH))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            session_guard,
        ));

    // Combina tudo no router principal
    Router::new()
        .route("/health", get(|| async { "OK" }))
        .merge(public_routes)
        .merge(branch_routes)
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}
