use deunicode::deunicode;
use lazy_static::lazy_static;
use regex::Regex;

/// Canonicalize free text for matching: fold accents to ASCII, lowercase,
/// turn everything that is not a letter, digit or space into a space, and
/// collapse whitespace runs. Idempotent.
pub fn normalize(text: &str) -> String {
    lazy_static! {
        static ref NON_ALNUM: Regex = Regex::new(r"[^a-z0-9\s]").unwrap();
        static ref SPACES: Regex = Regex::new(r"\s+").unwrap();
    }

    let folded = deunicode(text).to_lowercase();
    let cleaned = NON_ALNUM.replace_all(&folded, " ");
    SPACES.replace_all(&cleaned, " ").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_folds_accents() {
        assert_eq!(normalize("São Paulo"), "sao paulo");
        assert_eq!(normalize("Açaí"), "acai");
        assert_eq!(normalize("Pão de queijo"), "pao de queijo");
    }

    #[test]
    fn test_strips_punctuation_and_collapses_spaces() {
        assert_eq!(normalize("  a,b  "), "a b");
        assert_eq!(normalize("Arroz, integral (cozido)"), "arroz integral cozido");
        assert_eq!(normalize("\tfeijão --- carioca\n"), "feijao carioca");
    }

    #[test]
    fn test_total_on_odd_input() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("!!!"), "");
        assert_eq!(normalize("123"), "123");
    }

    #[test]
    fn test_idempotent() {
        for raw in ["São Paulo", "  a,b  ", "Açaí com GRANOLA!", "x"] {
            let once = normalize(raw);
            assert_eq!(normalize(&once), once);
        }
    }
}
