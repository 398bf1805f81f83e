//! Unterbefehle der `roomlock`-Binary

use std::io::Write;

use anyhow::{bail, Context, Result};
use clap::Subcommand;

use roomlock_core::{RoomCode, RoomPhase};
use roomlock_db::RoomKeyRepository;
use roomlock_rooms::{RoomError, RoomSessionController};

#[derive(Debug, Subcommand)]
pub enum Befehl {
    /// Share-Link fuer einen Raum erstellen (legt den Schluessel bei Bedarf an)
    Share {
        /// Raumcode, z.B. SWIFT-TIGER-1234
        room: String,
    },

    /// Share-Link einloesen und den Raum-Schluessel uebernehmen
    Join {
        /// Vollstaendiger Link oder Fragment (#t=...&s=...)
        link: String,
    },

    /// Zustand eines Raums oder aller Raeume mit Schluessel anzeigen
    Status {
        /// Raumcode (leer = alle)
        room: Option<String>,
    },

    /// Nachrichtentext verschluesseln
    Encrypt {
        room: String,
        text: String,
    },

    /// Nachrichtentext entschluesseln
    Decrypt {
        room: String,
        ciphertext: String,
        /// Fehler melden statt Platzhalter auszugeben
        #[arg(long)]
        strikt: bool,
    },

    /// Raum-Schluessel lokal loeschen
    Delete {
        room: String,
    },
}

/// Fuehrt einen Befehl aus und schreibt das Ergebnis nach `out`
pub async fn ausfuehren<B, W>(
    controller: &RoomSessionController<B>,
    befehl: Befehl,
    origin: &str,
    out: &mut W,
) -> Result<()>
where
    B: RoomKeyRepository,
    W: Write,
{
    match befehl {
        Befehl::Share { room } => {
            let room = raumcode(&room)?;
            let url = controller
                .share_url(&room, origin)
                .await
                .with_context(|| format!("Share-Link fuer '{room}' fehlgeschlagen"))?;
            writeln!(out, "{url}")?;
        }
        Befehl::Join { link } => {
            let Some(room) = controller
                .consume_share_link(&link)
                .await
                .context("Share-Link konnte nicht eingeloest werden")?
            else {
                bail!("Kein Share-Link gefunden (erwartet #t=...&s=...)");
            };
            writeln!(out, "{room}")?;
        }
        Befehl::Status { room: Some(room) } => {
            let room = raumcode(&room)?;
            let phase = controller.room_phase(&room).await?;
            writeln!(out, "{room}\t{}", phase_text(phase))?;
        }
        Befehl::Status { room: None } => {
            for room in controller.key_store().rooms().await? {
                let phase = controller.room_phase(&room).await?;
                writeln!(out, "{room}\t{}", phase_text(phase))?;
            }
        }
        Befehl::Encrypt { room, text } => {
            let room = raumcode(&room)?;
            writeln!(out, "{}", controller.encrypt_text(&room, &text).await?)?;
        }
        Befehl::Decrypt {
            room,
            ciphertext,
            strikt,
        } => {
            let room = raumcode(&room)?;
            let text = if strikt {
                controller.decrypt_text(&room, &ciphertext).await?
            } else {
                controller.decrypt_for_display(&room, &ciphertext).await?
            };
            writeln!(out, "{text}")?;
        }
        Befehl::Delete { room } => {
            let room = raumcode(&room)?;
            if controller.delete_room(&room).await? {
                writeln!(out, "Schluessel fuer '{room}' geloescht")?;
            } else {
                writeln!(out, "Kein Schluessel fuer '{room}' vorhanden")?;
            }
        }
    }
    Ok(())
}

/// Hinweis fuer Fehler nach denen der lokale Zustand unveraendert ist
pub fn hinweis(fehler: &anyhow::Error) -> Option<&'static str> {
    let fehler = fehler.downcast_ref::<RoomError>()?;
    if !fehler.ist_behebbar() {
        return None;
    }
    Some(match fehler {
        RoomError::SigningUnavailable(_) => {
            "Der Raum-Schluessel bleibt gespeichert, ein erneuter Versuch verwendet ihn wieder."
        }
        _ => "Lokaler Zustand unveraendert, der Befehl kann wiederholt werden.",
    })
}

fn raumcode(raw: &str) -> Result<RoomCode> {
    RoomCode::parse(raw).with_context(|| format!("Ungueltiger Raumcode '{raw}'"))
}

fn phase_text(phase: RoomPhase) -> &'static str {
    match phase {
        RoomPhase::Unkeyed => "unverschluesselt",
        RoomPhase::Keyed => "verschluesselt",
        RoomPhase::Shared => "verschluesselt, geteilt",
    }
}
