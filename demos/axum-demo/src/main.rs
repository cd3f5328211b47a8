use axum::{routing::get, Extension, Router};
use log::info;
use tokio::signal;
use tower::ServiceBuilder;
use tower_oidc_principal::{
    authenticator::BearerAuthenticator, converter::PrincipalConverter, principal::Principal,
};

// Expects requests whose bearer token was already verified upstream
// (e.g. by a gateway). Roles are read Keycloak-style from
// `realm_access.roles`.
#[tokio::main]
async fn main() {
    env_logger::init();

    let authenticator = BearerAuthenticator::new(PrincipalConverter::builder().build());

    let app = Router::new()
        .route("/greet", get(greet))
        .layer(ServiceBuilder::new().layer(authenticator.into_layer()));

    let listener = tokio::net::TcpListener::bind("0.0.0.0:3000").await.unwrap();
    info!("Running axum on port: 3000");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .unwrap();
}

async fn greet(principal: Extension<Principal>) -> String {
    let mut authorities = principal
        .authorities()
        .iter()
        .map(|a| a.as_str().to_owned())
        .collect::<Vec<_>>();
    authorities.sort();
    format!(
        "Hi {}! You are granted with: [{}]",
        principal.name(),
        authorities.join(", ")
    )
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
