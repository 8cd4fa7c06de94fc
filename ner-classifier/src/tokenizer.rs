//! # Tokenizador
//!
//! Divide o texto bruto em tokens (palavras, números, pontuações) preservando
//! a posição original de cada um. Os offsets são o que permite aos formatos de
//! saída reconstruir o texto original entre os tokens (ex: `inlineXML`).
//!
//! ## Esquema de Tokenização
//!
//! A segmentação base segue as fronteiras de palavra do Unicode (UAX #29), via
//! `unicode-segmentation`, o que já mantém juntos números como `3.14` e
//! contrações como `don't`. Sobre ela aplicamos dois ajustes:
//!
//! - **Abreviações**: o ponto colado a uma abreviação conhecida ou a uma sigla
//!   (`Dr.`, `U.S.`) fica no token.
//! - **Hífen interno**: `well-known` é um único token.
//!
//! Espaços em branco nunca viram tokens.
//!
//! ## Exemplo de Uso
//!
//! ```rust
//! use ner_classifier::tokenizer::tokenize;
//!
//! let tokens = tokenize("Dr. Silva visitou Paris.");
//! let texts: Vec<&str> = tokens.iter().map(|t| t.text.as_str()).collect();
//! assert_eq!(texts, ["Dr.", "Silva", "visitou", "Paris", "."]);
//! ```

use serde::{Deserialize, Serialize};
use unicode_segmentation::UnicodeSegmentation;

/// Um token extraído do texto original.
///
/// `start` e `end` são offsets de byte no texto original, então
/// `&text[token.start..token.end] == token.text` sempre vale.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Token {
    /// O texto do token (ex: "Obama", ",", "3.14").
    pub text: String,
    /// Índice de byte inicial no texto original (inclusive).
    pub start: usize,
    /// Índice de byte final no texto original (exclusivo).
    pub end: usize,
    /// Índice sequencial do token na lista (0, 1, 2...).
    pub index: usize,
}

/// Abreviações cujo ponto final não encerra a sentença
const ABBREVIATIONS: &[&str] = &[
    "Dr", "Dra", "Mr", "Mrs", "Ms", "Prof", "Sr", "Sra", "Jr", "St", "Gen", "Gov",
    "Sen", "Rep", "Capt", "Col", "Lt", "Inc", "Ltd", "Corp", "Co", "vs", "etc",
];

/// Tokeniza um texto.
pub fn tokenize(text: &str) -> Vec<Token> {
    let mut tokens: Vec<Token> = Vec::new();
    let mut segments = text
        .split_word_bound_indices()
        .filter(|(_, segment)| !segment.chars().all(char::is_whitespace))
        .peekable();

    while let Some((start, segment)) = segments.next() {
        let end = start + segment.len();

        if let Some(prev) = tokens.last_mut() {
            if prev.end == start {
                // Ponto colado: "Dr." ou "U.S."
                if segment == "." && keeps_trailing_dot(&prev.text) {
                    prev.text.push('.');
                    prev.end = end;
                    continue;
                }

                // Hífen interno: "well-known"
                if segment == "-" && ends_alphanumeric(&prev.text) {
                    if let Some(&(next_start, next)) = segments.peek() {
                        if next_start == end && starts_alphanumeric(next) {
                            prev.text.push('-');
                            prev.text.push_str(next);
                            prev.end = next_start + next.len();
                            segments.next();
                            continue;
                        }
                    }
                }
            }
        }

        push_token(&mut tokens, segment.to_string(), start, end);
    }

    // Re-indexa os tokens
    for (i, token) in tokens.iter_mut().enumerate() {
        token.index = i;
    }
    tokens
}

/// Abreviação conhecida, sigla com pontos ("U.S") ou inicial ("J")
fn keeps_trailing_dot(word: &str) -> bool {
    if ABBREVIATIONS.contains(&word) {
        return true;
    }
    let mut chars = word.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => c.is_uppercase(),
        _ => word.contains('.') && word.chars().all(|c| c.is_alphabetic() || c == '.'),
    }
}

fn ends_alphanumeric(s: &str) -> bool {
    s.chars().last().map(char::is_alphanumeric).unwrap_or(false)
}

fn starts_alphanumeric(s: &str) -> bool {
    s.chars().next().map(char::is_alphanumeric).unwrap_or(false)
}

/// Adiciona um token ao final da lista (o índice é atribuído depois)
fn push_token(tokens: &mut Vec<Token>, text: String, start: usize, end: usize) {
    tokens.push(Token {
        text,
        start,
        end,
        index: 0,
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(tokens: &[Token]) -> Vec<&str> {
        tokens.iter().map(|t| t.text.as_str()).collect()
    }

    #[test]
    fn test_tokenize_basic_sentence() {
        let tokens = tokenize("Barack Obama visited Paris.");
        assert_eq!(texts(&tokens), ["Barack", "Obama", "visited", "Paris", "."]);
        assert_eq!(tokens[3].start, 21);
        assert_eq!(tokens[3].end, 26);
        assert_eq!(tokens[4].index, 4);
    }

    #[test]
    fn test_offsets_match_original_text() {
        let text = "  São Paulo,\tBrasil  \n";
        for token in tokenize(text) {
            assert_eq!(&text[token.start..token.end], token.text);
        }
    }

    #[test]
    fn test_abbreviations_keep_dot() {
        let tokens = tokenize("Dr. Smith met U.S. officials and J. Doe.");
        assert_eq!(
            texts(&tokens),
            ["Dr.", "Smith", "met", "U.S.", "officials", "and", "J.", "Doe", "."]
        );
    }

    #[test]
    fn test_hyphen_and_numbers() {
        let tokens = tokenize("a well-known 3.14 - ok");
        assert_eq!(texts(&tokens), ["a", "well-known", "3.14", "-", "ok"]);
    }

    #[test]
    fn test_empty_and_whitespace() {
        assert!(tokenize("").is_empty());
        assert!(tokenize(" \n\t ").is_empty());
    }
}
