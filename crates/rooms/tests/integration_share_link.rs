//! Ende-zu-Ende: Teilen ueber einen HTTP-Signierdienst, Beitreten auf
//! einem zweiten Profil mit SQLite-Speicher

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::{http::StatusCode, routing::post, Json, Router};
use serde_json::{json, Value};

use roomlock_core::RoomCode;
use roomlock_db::{InMemoryRoomKeys, SqliteDb};
use roomlock_rooms::{
    ControllerConfig, HttpSigningClient, RoomError, RoomSessionController, SigningClient,
};

async fn signieren(Json(body): Json<Value>) -> Json<Value> {
    let token = body["token"].as_str().unwrap_or_default();
    Json(json!({ "signature": format!("signiert:{}", token.len()) }))
}

async fn ablehnen() -> StatusCode {
    StatusCode::SERVICE_UNAVAILABLE
}

async fn signierdienst_starten(router: Router) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Port binden");
    let addr = listener.local_addr().expect("Adresse");
    tokio::spawn(async move {
        axum::serve(listener, router).await.expect("Signierdienst");
    });
    addr
}

fn http_signer(addr: SocketAddr) -> Arc<dyn SigningClient> {
    Arc::new(
        HttpSigningClient::neu(format!("http://{addr}/sign"), Duration::from_secs(5))
            .expect("HTTP-Client"),
    )
}

#[tokio::test]
async fn teilen_und_beitreten_ueber_http() {
    let addr = signierdienst_starten(Router::new().route("/sign", post(signieren))).await;
    let demo2 = RoomCode::parse("DEMO2").expect("Raumcode");

    let a = RoomSessionController::neu(
        SqliteDb::in_memory().await.expect("DB A"),
        http_signer(addr),
        ControllerConfig::default(),
    );
    let b = RoomSessionController::neu(
        SqliteDb::in_memory().await.expect("DB B"),
        http_signer(addr),
        ControllerConfig::default(),
    );

    let url = a
        .share_url(&demo2, "http://localhost:5173")
        .await
        .expect("Link erstellen");
    assert!(url.starts_with("http://localhost:5173/#t="));
    assert!(url.contains("&s=signiert%3A"));

    let chiffrat = a.encrypt_text(&demo2, "Guten Morgen").await.expect("verschluesseln");

    let raum = b.consume_share_link(&url).await.expect("einloesen");
    assert_eq!(raum.as_ref().map(RoomCode::as_str), Some("demo2"));
    assert!(b.is_encrypted(&demo2).await.expect("is_encrypted"));
    assert_eq!(
        b.decrypt_text(&demo2, &chiffrat).await.expect("entschluesseln"),
        "Guten Morgen"
    );
    assert!(b
        .link_signature(&demo2)
        .expect("Signatur")
        .starts_with("signiert:"));
}

#[tokio::test]
async fn signierdienst_fehlerstatus() {
    let addr = signierdienst_starten(Router::new().route("/sign", post(ablehnen))).await;
    let r = RoomCode::parse("r1").expect("Raumcode");

    let c = RoomSessionController::neu(
        InMemoryRoomKeys::neu(),
        http_signer(addr),
        ControllerConfig::default(),
    );

    let result = c.build_share_link(&r).await;
    assert!(matches!(result, Err(RoomError::SigningUnavailable(_))));
    assert!(c.is_encrypted(&r).await.expect("is_encrypted"));
}

#[tokio::test]
async fn signierdienst_nicht_erreichbar() {
    // Port binden und sofort freigeben: dort lauscht niemand mehr
    let addr = {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Port binden");
        listener.local_addr().expect("Adresse")
    };

    let signer = HttpSigningClient::neu(format!("http://{addr}/sign"), Duration::from_secs(2))
        .expect("HTTP-Client");
    assert!(matches!(
        signer.sign("token").await,
        Err(RoomError::SigningUnavailable(_))
    ));
}

#[tokio::test]
async fn falsches_antwortformat() {
    let router = Router::new().route(
        "/sign",
        post(|| async { Json(json!({ "sig": "falsches-feld" })) }),
    );
    let addr = signierdienst_starten(router).await;

    assert!(matches!(
        http_signer(addr).sign("token").await,
        Err(RoomError::SigningUnavailable(_))
    ));
}
