//! # Rótulos de Entidade e Spans
//!
//! O classificador atribui a cada token um **rótulo** definido pelo modelo
//! (ex: `PERSON`, `LOCATION`, `ORGANIZATION`). Tokens fora de qualquer entidade
//! recebem o rótulo de fundo, por padrão `O`.
//!
//! Diferente do esquema BIO, não há prefixos `B-`/`I-`: uma entidade é uma
//! sequência **maximal** de tokens consecutivos com o mesmo rótulo (esquema IO).
//!
//! | Tokens                          | Rótulos                  | Spans                    |
//! |---------------------------------|--------------------------|--------------------------|
//! | `Barack Obama visited Paris`    | `PERSON PERSON O LOCATION` | `Barack Obama`, `Paris` |

use serde::{Deserialize, Serialize};

use crate::tokenizer::Token;

/// Rótulo de fundo padrão (token fora de entidade)
pub const BACKGROUND_LABEL: &str = "O";

/// Um token com o rótulo atribuído pelo classificador
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaggedToken {
    pub token: Token,
    pub label: String,
}

impl TaggedToken {
    pub fn new(token: Token, label: impl Into<String>) -> Self {
        Self {
            token,
            label: label.into(),
        }
    }

    pub fn is_background(&self, background: &str) -> bool {
        self.label == background
    }
}

/// Uma entidade identificada no texto (span de um ou mais tokens)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntitySpan {
    /// Texto original da entidade, incluindo o espaçamento interno (ex: "São Paulo")
    pub text: String,
    /// Rótulo da entidade
    pub label: String,
    /// Índice do primeiro token
    pub start_token: usize,
    /// Índice do último token (inclusivo)
    pub end_token: usize,
    /// Posição de byte inicial no texto original
    pub start: usize,
    /// Posição de byte final no texto original
    pub end: usize,
}

/// Converte uma sequência de tokens rotulados em spans de entidades.
///
/// Cada span agrupa a maior sequência consecutiva de tokens com o mesmo rótulo
/// diferente de `background`. Duas entidades adjacentes com o mesmo rótulo são
/// portanto fundidas num único span, como em qualquer esquema IO.
///
/// # Exemplo
/// `[PERSON, PERSON, O, LOCATION]` -> `[EntitySpan(PERSON), EntitySpan(LOCATION)]`
pub fn tokens_to_spans(tagged: &[TaggedToken], original_text: &str, background: &str) -> Vec<EntitySpan> {
    let mut spans = Vec::new();
    let mut i = 0;

    while i < tagged.len() {
        if tagged[i].is_background(background) {
            i += 1;
            continue;
        }

        let label = &tagged[i].label;
        let mut j = i + 1;
        while j < tagged.len() && tagged[j].label == *label {
            j += 1;
        }

        let first = &tagged[i].token;
        let last = &tagged[j - 1].token;
        spans.push(EntitySpan {
            text: original_text[first.start..last.end].to_string(),
            label: label.clone(),
            start_token: first.index,
            end_token: last.index,
            start: first.start,
            end: last.end,
        });

        i = j;
    }

    spans
}
