//! Fehlertypen fuer roomlock-core

use thiserror::Error;

/// Result-Alias fuer roomlock-core
pub type CoreResult<T> = std::result::Result<T, CoreError>;

/// Fehler beim Umgang mit den gemeinsamen Typen
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    #[error("Raumcode ist leer")]
    LeererRaumcode,

    #[error("Raumcode zu lang: maximal {max} Zeichen, erhalten {erhalten}")]
    RaumcodeZuLang { max: usize, erhalten: usize },

    #[error("Ungueltiges Zeichen {zeichen:?} im Raumcode")]
    UngueltigesZeichen { zeichen: char },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fehler_anzeige() {
        let e = CoreError::RaumcodeZuLang { max: 64, erhalten: 70 };
        assert_eq!(
            e.to_string(),
            "Raumcode zu lang: maximal 64 Zeichen, erhalten 70"
        );
    }

    #[test]
    fn ungueltiges_zeichen_anzeige() {
        let e = CoreError::UngueltigesZeichen { zeichen: '/' };
        assert!(e.to_string().contains("'/'"));
    }
}
