//! Integration tests for the panel HTTP router.

use axum::body::to_bytes;
use axum::http::StatusCode;
use farmalink_core::AlertKind;
use farmalink_integration_tests::{form_post, get, location, session_cookie, test_app};
use tower::ServiceExt;

const ADMIN_LOGIN: &str = "email=Administrador%40gmail.com&password=adm123";
const EMPLOYEE_LOGIN: &str = "email=Empleado%40gmail.com&password=empleado123";

async fn body_text(response: axum::http::Response<axum::body::Body>) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    String::from_utf8(bytes.to_vec()).expect("utf-8")
}

async fn login(app: &axum::Router, form: &str) -> String {
    let response = app
        .clone()
        .oneshot(form_post("/login", form, None))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), Some("/"));
    session_cookie(&response).expect("session cookie")
}

#[tokio::test]
async fn test_health() {
    let dir = tempfile::tempdir().expect("tempdir");
    let (app, _) = test_app(dir.path());

    let response = app.oneshot(get("/health", None)).await.expect("response");
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_text(response).await, "ok");
}

#[tokio::test]
async fn test_anonymous_is_sent_to_login() {
    let dir = tempfile::tempdir().expect("tempdir");
    let (app, _) = test_app(dir.path());

    for uri in ["/", "/sections/productos", "/sections/alertas"] {
        let response = app.clone().oneshot(get(uri, None)).await.expect("response");
        assert!(response.status().is_redirection(), "{uri}");
        assert_eq!(location(&response), Some("/login"), "{uri}");
    }

    let response = app.oneshot(get("/login", None)).await.expect("response");
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_text(response).await.contains("Ingresar"));
}

#[tokio::test]
async fn test_bad_credentials_show_generic_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    let (app, _) = test_app(dir.path());

    let response = app
        .clone()
        .oneshot(form_post(
            "/login",
            "email=Empleado%40gmail.com&password=nope",
            None,
        ))
        .await
        .expect("response");
    assert_eq!(location(&response), Some("/login?error=credentials"));

    let response = app
        .oneshot(get("/login?error=credentials", None))
        .await
        .expect("response");
    assert!(
        body_text(response)
            .await
            .contains("Correo o contraseña inválidos.")
    );
}

#[tokio::test]
async fn test_employee_lands_on_products_and_cannot_open_payments() {
    let dir = tempfile::tempdir().expect("tempdir");
    let (app, state) = test_app(dir.path());
    let cookie = login(&app, EMPLOYEE_LOGIN).await;

    let response = app
        .clone()
        .oneshot(get("/", Some(&cookie)))
        .await
        .expect("response");
    assert_eq!(location(&response), Some("/sections/productos"));

    let response = app
        .clone()
        .oneshot(get("/sections/pagos", Some(&cookie)))
        .await
        .expect("response");
    assert_eq!(location(&response), Some("/"));

    let response = app
        .clone()
        .oneshot(get("/sections/desconocida", Some(&cookie)))
        .await
        .expect("response");
    assert_eq!(location(&response), Some("/"));

    let response = app
        .oneshot(form_post("/pagos", "name=Ana&rut=1-9&amount=1000", Some(&cookie)))
        .await
        .expect("response");
    assert_eq!(location(&response), Some("/"));

    // The login itself is the only thing logged so far.
    let log = state.alerts().list().await;
    assert_eq!(log.len(), 1);
    assert_eq!(log[0].kind, AlertKind::Info);
}

#[tokio::test]
async fn test_section_page_reports_api_failure_inline_and_in_log() {
    let dir = tempfile::tempdir().expect("tempdir");
    let (app, state) = test_app(dir.path());
    let cookie = login(&app, EMPLOYEE_LOGIN).await;

    let response = app
        .oneshot(get("/sections/productos", Some(&cookie)))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::OK);

    let html = body_text(response).await;
    assert!(html.contains("No se pudieron cargar los productos"));
    assert!(html.contains("Empleado@gmail.com (employee)"));
    assert!(!html.contains("/sections/pagos"), "payments hidden from menu");

    let log = state.alerts().list().await;
    assert_eq!(log[0].kind, AlertKind::Error);
    assert!(log[0].message.starts_with("No se pudieron cargar los productos"));
}

#[tokio::test]
async fn test_admin_menu_and_selection_persist() {
    let dir = tempfile::tempdir().expect("tempdir");
    let (app, _) = test_app(dir.path());
    let cookie = login(&app, ADMIN_LOGIN).await;

    let response = app
        .clone()
        .oneshot(get("/sections/alertas", Some(&cookie)))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    for key in ["productos", "compras", "pagos", "empleados", "alertas"] {
        assert!(html.contains(&format!("/sections/{key}")), "{key} in menu");
    }
    assert!(html.contains("Historial del sistema"));

    let response = app
        .clone()
        .oneshot(get("/", Some(&cookie)))
        .await
        .expect("response");
    assert_eq!(location(&response), Some("/sections/alertas"));

    // Home button drops the selection.
    let response = app
        .clone()
        .oneshot(form_post("/inicio", "", Some(&cookie)))
        .await
        .expect("response");
    assert_eq!(location(&response), Some("/"));
    let response = app
        .oneshot(get("/", Some(&cookie)))
        .await
        .expect("response");
    assert_eq!(location(&response), Some("/sections/productos"));
}

#[tokio::test]
async fn test_logout_ends_session() {
    let dir = tempfile::tempdir().expect("tempdir");
    let (app, _) = test_app(dir.path());
    let cookie = login(&app, ADMIN_LOGIN).await;

    let response = app
        .clone()
        .oneshot(form_post("/logout", "", Some(&cookie)))
        .await
        .expect("response");
    assert_eq!(location(&response), Some("/login"));

    let response = app
        .oneshot(get("/", Some(&cookie)))
        .await
        .expect("response");
    assert_eq!(location(&response), Some("/login"));
}

#[tokio::test]
async fn test_clearing_alerts_empties_log() {
    let dir = tempfile::tempdir().expect("tempdir");
    let (app, state) = test_app(dir.path());
    let cookie = login(&app, ADMIN_LOGIN).await;
    assert!(!state.alerts().list().await.is_empty());

    let response = app
        .oneshot(form_post("/alertas/limpiar", "", Some(&cookie)))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::OK);

    // Rendering the section reloads the API summary, which fails and is
    // logged again; nothing from before the clear remains.
    let log = state.alerts().list().await;
    assert!(log.iter().all(|entry| entry.kind == AlertKind::Error));
}

#[tokio::test]
async fn test_unknown_path_is_not_found() {
    let dir = tempfile::tempdir().expect("tempdir");
    let (app, _) = test_app(dir.path());

    let response = app
        .oneshot(get("/inventario", None))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
