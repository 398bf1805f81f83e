//! Share-Link: `<origin>/#t=<token>&s=<signature>`
//!
//! Das Fragment wird wie ein Query-String gelesen (`&`-getrennt,
//! Prozent-kodiert). Ein `+` bleibt ein `+`: aeltere Clients haengen
//! Base64-Signaturen unkodiert an. Token und Signatur werden unveraendert
//! durchgereicht.

use serde::{Deserialize, Serialize};

/// Token und Signatur eines Share-Links
///
/// Die Signatur ist fuer dieses Crate undurchsichtig: sie wird vom externen
/// Signierer erzeugt und nur vom Backend geprueft.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignedLink {
    pub token: String,
    pub signature: String,
}

impl SignedLink {
    pub fn neu(token: impl Into<String>, signature: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            signature: signature.into(),
        }
    }

    /// Rendert das Fragment `#t=<token>&s=<signature>`
    pub fn to_fragment(&self) -> String {
        format!(
            "#t={}&s={}",
            prozent_kodieren(&self.token),
            prozent_kodieren(&self.signature)
        )
    }

    /// Rendert den vollstaendigen Link `<origin>/#t=...&s=...`
    pub fn to_url(&self, origin: &str) -> String {
        format!("{}/{}", origin.trim_end_matches('/'), self.to_fragment())
    }

    /// Liest Token und Signatur aus einem Fragment oder vollstaendigen Link
    ///
    /// Gibt `None` zurueck wenn `t` oder `s` fehlt oder leer ist; das ist der
    /// Normalfall eines Aufrufs ohne Share-Link und kein Fehler.
    pub fn parse(input: &str) -> Option<Self> {
        let fragment = match input.split_once('#') {
            Some((_, frag)) => frag,
            None => input,
        };
        let fragment = fragment.trim().trim_start_matches('?');

        let token = parameter(fragment, "t")?;
        let signature = parameter(fragment, "s")?;
        if token.is_empty() || signature.is_empty() {
            return None;
        }
        Some(Self { token, signature })
    }
}

/// Erster Wert eines Parameters (wie `URLSearchParams.get`)
fn parameter(query: &str, name: &str) -> Option<String> {
    query
        .split('&')
        .filter(|teil| !teil.is_empty())
        .map(|teil| teil.split_once('=').unwrap_or((teil, "")))
        .find(|(schluessel, _)| prozent_dekodieren(schluessel) == name)
        .map(|(_, wert)| prozent_dekodieren(wert))
}

fn prozent_kodieren(wert: &str) -> String {
    let mut out = String::with_capacity(wert.len());
    for byte in wert.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'.' | b'_' | b'~' => {
                out.push(byte as char)
            }
            _ => out.push_str(&format!("%{byte:02X}")),
        }
    }
    out
}

/// Ungueltige Escapes bleiben wie im Browser woertlich stehen
fn prozent_dekodieren(wert: &str) -> String {
    let bytes = wert.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'%' if i + 2 < bytes.len() => {
                match (hex_wert(bytes[i + 1]), hex_wert(bytes[i + 2])) {
                    (Some(hi), Some(lo)) => {
                        out.push((hi << 4) | lo);
                        i += 3;
                    }
                    _ => {
                        out.push(b'%');
                        i += 1;
                    }
                }
            }
            b => {
                out.push(b);
                i += 1;
            }
        }
    }
    String::from_utf8_lossy(&out).into_owned()
}

fn hex_wert(c: u8) -> Option<u8> {
    match c {
        b'0'..=b'9' => Some(c - b'0'),
        b'a'..=b'f' => Some(c - b'a' + 10),
        b'A'..=b'F' => Some(c - b'A' + 10),
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fragment_rendern() {
        let link = SignedLink::neu("abc_-", "sig");
        assert_eq!(link.to_fragment(), "#t=abc_-&s=sig");
    }

    #[test]
    fn url_rendern() {
        let link = SignedLink::neu("tok", "sig");
        assert_eq!(
            link.to_url("https://chat.example.org/"),
            "https://chat.example.org/#t=tok&s=sig"
        );
        assert_eq!(
            link.to_url("http://localhost:5173"),
            "http://localhost:5173/#t=tok&s=sig"
        );
    }

    #[test]
    fn signatur_mit_sonderzeichen_ueberlebt_roundtrip() {
        let link = SignedLink::neu("tok", "a+b/c==");
        let fragment = link.to_fragment();
        assert_eq!(fragment, "#t=tok&s=a%2Bb%2Fc%3D%3D");
        assert_eq!(SignedLink::parse(&fragment), Some(link));
    }

    #[test]
    fn parse_fragment_und_url() {
        let erwartet = Some(SignedLink::neu("tok", "sig"));
        assert_eq!(SignedLink::parse("#t=tok&s=sig"), erwartet);
        assert_eq!(SignedLink::parse("t=tok&s=sig"), erwartet);
        assert_eq!(SignedLink::parse("https://x.org/#t=tok&s=sig"), erwartet);
        assert_eq!(SignedLink::parse("#s=sig&t=tok"), erwartet);
        assert_eq!(SignedLink::parse("#t=tok&x=1&s=sig&t=zweiter"), erwartet);
    }

    #[test]
    fn fehlende_parameter_ergeben_none() {
        assert_eq!(SignedLink::parse(""), None);
        assert_eq!(SignedLink::parse("#"), None);
        assert_eq!(SignedLink::parse("#t=tok"), None);
        assert_eq!(SignedLink::parse("#s=sig"), None);
        assert_eq!(SignedLink::parse("#t=&s=sig"), None);
        assert_eq!(SignedLink::parse("https://x.org/"), None);
    }

    #[test]
    fn unkodierte_base64_signatur_bleibt_erhalten() {
        let link = SignedLink::parse("#t=tok&s=a+b/c==").unwrap();
        assert_eq!(link.signature, "a+b/c==");
    }

    #[test]
    fn plus_und_escapes_werden_dekodiert() {
        assert_eq!(prozent_dekodieren("a+b"), "a+b");
        assert_eq!(prozent_dekodieren("a%20b"), "a b");
        assert_eq!(prozent_dekodieren("%41%62"), "Ab");
        assert_eq!(prozent_dekodieren("100%"), "100%");
        assert_eq!(prozent_dekodieren("%zz"), "%zz");
        assert_eq!(prozent_dekodieren("%4"), "%4");
    }
}
