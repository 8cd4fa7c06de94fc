//! # Contrato do Classificador
//!
//! O servidor HTTP não conhece o modelo: ele fala apenas com um
//! [`SequenceClassifier`]. Qualquer motor de NER (ou um stub determinístico nos
//! testes) pode ficar atrás deste trait sem mudar a fachada.
//!
//! Implementações só precisam fornecer [`SequenceClassifier::classify`]; as
//! operações de renderização têm implementação padrão sobre ela.

use crate::error::{ClassifierError, Result};
use crate::format::OutputFormat;
use crate::render;
use crate::tagger::{TaggedToken, BACKGROUND_LABEL};

/// Um classificador de sequência já carregado.
///
/// As operações usam apenas `&self`: uma instância é compartilhada, somente
/// leitura, entre todas as requisições concorrentes.
pub trait SequenceClassifier: Send + Sync {
    /// Rótulo atribuído a tokens fora de entidades
    fn background_label(&self) -> &str {
        BACKGROUND_LABEL
    }

    /// Tokeniza e rotula `text`
    fn classify(&self, text: &str) -> Result<Vec<TaggedToken>>;

    /// Renderiza `text` num dos formatos nomeados (`slashTags`, `xml`, `tsv`,
    /// `tabbedEntities`, `inlineXML`). Nomes desconhecidos são erro aqui; o
    /// fallback permissivo fica em [`crate::format::classify`].
    fn classify_to_string(&self, text: &str, format_name: &str, preserve_spacing: bool) -> Result<String> {
        let format = OutputFormat::parse(format_name)
            .ok_or_else(|| ClassifierError::UnknownFormat(format_name.to_string()))?;
        let tagged = self.classify(text)?;
        Ok(render::render(format, text, &tagged, self.background_label(), preserve_spacing))
    }

    /// Renderiza `text` com as entidades marcadas em XML dentro do texto original
    fn classify_with_inline_xml(&self, text: &str) -> Result<String> {
        let tagged = self.classify(text)?;
        Ok(render::inline_xml(text, &tagged, self.background_label()))
    }
}
