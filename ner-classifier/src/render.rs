//! # Renderizadores
//!
//! Funções puras que transformam `(texto, tokens rotulados)` numa das cinco
//! representações de saída. Nenhuma delas chama o modelo; o texto original é
//! usado apenas para recuperar o espaçamento entre tokens.

use crate::format::OutputFormat;
use crate::tagger::{tokens_to_spans, TaggedToken};

/// Despacha para o renderizador do formato.
pub fn render(
    format: OutputFormat,
    text: &str,
    tagged: &[TaggedToken],
    background: &str,
    preserve_spacing: bool,
) -> String {
    match format {
        OutputFormat::SlashTags => slash_tags(text, tagged, preserve_spacing),
        OutputFormat::Xml => xml(text, tagged, preserve_spacing),
        OutputFormat::Tsv => tsv(tagged),
        OutputFormat::TabbedEntities => tabbed_entities(tagged, background),
        OutputFormat::InlineXml => inline_xml(text, tagged, background),
    }
}

/// `<PERSON>Barack Obama</PERSON> visited <LOCATION>Paris</LOCATION>.`
///
/// Todo o texto fora das entidades é copiado do original, apenas com os
/// caracteres especiais de XML escapados.
pub fn inline_xml(text: &str, tagged: &[TaggedToken], background: &str) -> String {
    let mut out = String::with_capacity(text.len() * 2);
    let mut cursor = 0;

    for span in tokens_to_spans(tagged, text, background) {
        escape_xml(&text[cursor..span.start], &mut out);
        out.push('<');
        out.push_str(&span.label);
        out.push('>');
        escape_xml(&span.text, &mut out);
        out.push_str("</");
        out.push_str(&span.label);
        out.push('>');
        cursor = span.end;
    }
    escape_xml(&text[cursor..], &mut out);

    out
}

/// `Barack/PERSON Obama/PERSON visited/O`
pub fn slash_tags(text: &str, tagged: &[TaggedToken], preserve_spacing: bool) -> String {
    join_tokens(text, tagged, preserve_spacing, |_, tagged_token, out| {
        out.push_str(&tagged_token.token.text);
        out.push('/');
        out.push_str(&tagged_token.label);
    })
}

/// `<wi num="0" entity="PERSON">Barack</wi> <wi num="1" entity="PERSON">Obama</wi>`
pub fn xml(text: &str, tagged: &[TaggedToken], preserve_spacing: bool) -> String {
    join_tokens(text, tagged, preserve_spacing, |i, tagged_token, out| {
        out.push_str(&format!("<wi num=\"{i}\" entity=\""));
        escape_xml(&tagged_token.label, out);
        out.push_str("\">");
        escape_xml(&tagged_token.token.text, out);
        out.push_str("</wi>");
    })
}

/// Uma linha `token\tRÓTULO` por token, terminada por uma linha em branco.
pub fn tsv(tagged: &[TaggedToken]) -> String {
    if tagged.is_empty() {
        return String::new();
    }

    let mut out = String::new();
    for tagged_token in tagged {
        out.push_str(&tagged_token.token.text);
        out.push('\t');
        out.push_str(&tagged_token.label);
        out.push('\n');
    }
    out.push('\n');
    out
}

/// Uma linha `entidade\tRÓTULO\ttexto seguinte` por entidade.
///
/// O texto de fundo antes da primeira entidade ocupa uma linha com as duas
/// primeiras colunas vazias. Tokens são unidos por um espaço simples, para que
/// quebras de linha do texto original não quebrem o formato.
pub fn tabbed_entities(tagged: &[TaggedToken], background: &str) -> String {
    let mut out = String::new();
    let mut entity: Option<(String, &str)> = None;
    let mut following = String::new();

    for run in tagged.chunk_by(|a, b| a.label == b.label) {
        let words = run
            .iter()
            .map(|t| t.token.text.as_str())
            .collect::<Vec<_>>()
            .join(" ");

        if run[0].is_background(background) {
            following = words;
        } else {
            push_entity_line(&mut out, entity.take(), &following);
            following.clear();
            entity = Some((words, run[0].label.as_str()));
        }
    }
    push_entity_line(&mut out, entity, &following);

    out
}

fn push_entity_line(out: &mut String, entity: Option<(String, &str)>, following: &str) {
    if entity.is_none() && following.is_empty() {
        return;
    }
    if let Some((words, label)) = entity {
        out.push_str(&words);
        out.push('\t');
        out.push_str(label);
    } else {
        out.push('\t');
    }
    out.push('\t');
    out.push_str(following);
    out.push('\n');
}

/// Junta os tokens renderizados.
///
/// Com `preserve_spacing`, o texto entre tokens (sempre espaço em branco) é
/// copiado do original, incluindo o que vem antes do primeiro e depois do
/// último token; sem ele, os tokens são separados por um espaço simples.
fn join_tokens<F>(text: &str, tagged: &[TaggedToken], preserve_spacing: bool, mut render_token: F) -> String
where
    F: FnMut(usize, &TaggedToken, &mut String),
{
    let mut out = String::with_capacity(text.len() * 2);
    let mut cursor = 0;

    for (i, tagged_token) in tagged.iter().enumerate() {
        if preserve_spacing {
            out.push_str(&text[cursor..tagged_token.token.start]);
        } else if i > 0 {
            out.push(' ');
        }
        render_token(i, tagged_token, &mut out);
        cursor = tagged_token.token.end;
    }
    if preserve_spacing {
        out.push_str(&text[cursor..]);
    }

    out
}

fn escape_xml(s: &str, out: &mut String) {
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            c => out.push(c),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tagger::BACKGROUND_LABEL;
    use crate::tokenizer::tokenize;

    const TEXT: &str = "Barack Obama  visited Paris.";

    fn tagged() -> Vec<TaggedToken> {
        let labels = ["PERSON", "PERSON", "O", "LOCATION", "O"];
        tokenize(TEXT)
            .into_iter()
            .zip(labels)
            .map(|(token, label)| TaggedToken::new(token, label))
            .collect()
    }

    #[test]
    fn test_inline_xml() {
        assert_eq!(
            inline_xml(TEXT, &tagged(), BACKGROUND_LABEL),
            "<PERSON>Barack Obama</PERSON>  visited <LOCATION>Paris</LOCATION>."
        );
    }

    #[test]
    fn test_inline_xml_without_entities_keeps_text() {
        let text = "  nada aqui,\n nada ali ";
        let tagged: Vec<TaggedToken> = tokenize(text)
            .into_iter()
            .map(|token| TaggedToken::new(token, BACKGROUND_LABEL))
            .collect();
        assert_eq!(inline_xml(text, &tagged, BACKGROUND_LABEL), text);
    }

    #[test]
    fn test_inline_xml_escapes_special_characters() {
        let text = "AT&T <3";
        let tagged: Vec<TaggedToken> = tokenize(text)
            .into_iter()
            .map(|token| TaggedToken::new(token, BACKGROUND_LABEL))
            .collect();
        assert_eq!(inline_xml(text, &tagged, BACKGROUND_LABEL), "AT&amp;T &lt;3");
    }

    #[test]
    fn test_slash_tags() {
        assert_eq!(
            slash_tags(TEXT, &tagged(), false),
            "Barack/PERSON Obama/PERSON visited/O Paris/LOCATION ./O"
        );
        assert_eq!(
            slash_tags(TEXT, &tagged(), true),
            "Barack/PERSON Obama/PERSON  visited/O Paris/LOCATION./O"
        );
    }

    #[test]
    fn test_xml_wraps_every_token() {
        let out = xml(TEXT, &tagged(), true);
        assert!(out.starts_with("<wi num=\"0\" entity=\"PERSON\">Barack</wi> <wi num=\"1\""));
        assert!(out.ends_with("<wi num=\"3\" entity=\"LOCATION\">Paris</wi><wi num=\"4\" entity=\"O\">.</wi>"));
        assert_eq!(out.matches("<wi ").count(), 5);
    }

    #[test]
    fn test_tsv_has_one_line_per_token() {
        let out = tsv(&tagged());
        assert_eq!(
            out,
            "Barack\tPERSON\nObama\tPERSON\nvisited\tO\nParis\tLOCATION\n.\tO\n\n"
        );
        assert_eq!(tsv(&[]), "");
    }

    #[test]
    fn test_tabbed_entities() {
        assert_eq!(
            tabbed_entities(&tagged(), BACKGROUND_LABEL),
            "Barack Obama\tPERSON\tvisited\nParis\tLOCATION\t.\n"
        );
    }

    #[test]
    fn test_tabbed_entities_leading_background() {
        let text = "Ontem Lula falou";
        let labels = ["O", "PERSON", "O"];
        let tagged: Vec<TaggedToken> = tokenize(text)
            .into_iter()
            .zip(labels)
            .map(|(token, label)| TaggedToken::new(token, label))
            .collect();
        assert_eq!(
            tabbed_entities(&tagged, BACKGROUND_LABEL),
            "\t\tOntem\nLula\tPERSON\tfalou\n"
        );
        assert_eq!(tabbed_entities(&[], BACKGROUND_LABEL), "");
    }

    #[test]
    fn test_render_dispatches_by_format() {
        let tagged = tagged();
        assert_eq!(
            render(OutputFormat::Tsv, TEXT, &tagged, BACKGROUND_LABEL, false),
            tsv(&tagged)
        );
        assert_eq!(
            render(OutputFormat::InlineXml, TEXT, &tagged, BACKGROUND_LABEL, false),
            inline_xml(TEXT, &tagged, BACKGROUND_LABEL)
        );
    }
}
