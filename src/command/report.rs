//! Error-message rendering for the command shell.
//!
//! The core reports error kinds; turning a kind into user-facing text in
//! the session language happens here and only here.

use std::fmt;

use clap::ValueEnum;

use crate::core::RegistryError;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Default, ValueEnum)]
pub enum Language {
    #[default]
    En,
    Pt,
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Language::En => "en",
            Language::Pt => "pt",
        })
    }
}

/// Renders an error in the given language. English is the error's own
/// `Display` form.
pub fn message(err: &RegistryError, lang: Language) -> String {
    match lang {
        Language::En => err.to_string(),
        Language::Pt => portuguese(err),
    }
}

fn portuguese(err: &RegistryError) -> String {
    use RegistryError::*;
    match err {
        TooManyBatches => "demasiadas vacinas".to_string(),
        DuplicateBatch => "n\u{fa}mero de lote duplicado".to_string(),
        InvalidName => "nome inv\u{e1}lido".to_string(),
        // No Portuguese form exists for this one; rendered as in English.
        LowercaseName => err.to_string(),
        InvalidBatch => "lote inv\u{e1}lido".to_string(),
        InvalidDate => "data inv\u{e1}lida".to_string(),
        InvalidQuantity => "quantidade inv\u{e1}lida".to_string(),
        NoStock => "esgotado".to_string(),
        AlreadyVaccinated => "j\u{e1} vacinado".to_string(),
        NoSuchVaccine(name) => format!("{name}: vacina inexistente"),
        NoSuchBatch(code) => format!("{code}: lote inexistente"),
        NoSuchUser(user) => format!("{user}: utente inexistente"),
        OutOfMemory => "sem mem\u{f3}ria".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn english_uses_display() {
        assert_eq!(message(&RegistryError::NoStock, Language::En), "no stock");
        assert_eq!(
            message(&RegistryError::NoSuchBatch("1A".into()), Language::En),
            "1A: no such batch"
        );
    }

    #[test]
    fn portuguese_translations() {
        assert_eq!(message(&RegistryError::NoStock, Language::Pt), "esgotado");
        assert_eq!(
            message(&RegistryError::NoSuchUser("Ana".into()), Language::Pt),
            "Ana: utente inexistente"
        );
        assert_eq!(
            message(&RegistryError::OutOfMemory, Language::Pt),
            "sem mem\u{f3}ria"
        );
    }

    #[test]
    fn lowercase_name_has_no_translation() {
        let en = message(&RegistryError::LowercaseName, Language::En);
        let pt = message(&RegistryError::LowercaseName, Language::Pt);
        assert_eq!(en, pt);
    }
}
