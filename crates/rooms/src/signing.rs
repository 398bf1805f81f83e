//! Anbindung an den externen Signierdienst
//!
//! Vertrag: `POST <url>` mit `{"token": "..."}`, Antwort `{"signature": "..."}`
//! bei 2xx. Die Signatur ist fuer den Client undurchsichtig und wird nie
//! lokal geprueft.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::{RoomError, RoomResult};

/// Signiert Share-Tokens
#[async_trait]
pub trait SigningClient: Send + Sync {
    /// Liefert die Signatur fuer `token`
    ///
    /// Jeder Fehler (Transport, Status, Antwortformat) ist
    /// [`RoomError::SigningUnavailable`].
    async fn sign(&self, token: &str) -> RoomResult<String>;
}

#[derive(Serialize)]
struct SignRequest<'a> {
    token: &'a str,
}

#[derive(Deserialize)]
struct SignResponse {
    signature: String,
}

/// [`SigningClient`] ueber HTTP (JSON)
#[derive(Debug, Clone)]
pub struct HttpSigningClient {
    client: reqwest::Client,
    url: String,
}

impl HttpSigningClient {
    /// Erstellt einen Client fuer den Endpunkt `url`
    pub fn neu(url: impl Into<String>, timeout: Duration) -> RoomResult<Self> {
        let client = reqwest::Client::builder()
            .use_rustls_tls()
            .timeout(timeout)
            .build()
            .map_err(|e| RoomError::SigningUnavailable(format!("HTTP-Client: {e}")))?;
        Ok(Self {
            client,
            url: url.into(),
        })
    }
}

#[async_trait]
impl SigningClient for HttpSigningClient {
    async fn sign(&self, token: &str) -> RoomResult<String> {
        let resp = self
            .client
            .post(&self.url)
            .json(&SignRequest { token })
            .send()
            .await
            .map_err(|e| {
                tracing::warn!(url = %self.url, fehler = %e, "Signierdienst nicht erreichbar");
                RoomError::SigningUnavailable(e.to_string())
            })?;

        let status = resp.status();
        if !status.is_success() {
            tracing::warn!(url = %self.url, status = %status, "Signierdienst lehnt ab");
            return Err(RoomError::SigningUnavailable(format!("HTTP {status}")));
        }

        let body: SignResponse = resp
            .json()
            .await
            .map_err(|e| RoomError::SigningUnavailable(format!("Antwort: {e}")))?;

        if body.signature.is_empty() {
            return Err(RoomError::SigningUnavailable("leere Signatur".into()));
        }
        Ok(body.signature)
    }
}
