//! # Formatos de Saída e Despacho
//!
//! O cliente escolhe como o texto anotado é renderizado pelo nome do formato:
//!
//! | Nome              | Saída                                                     |
//! |-------------------|-----------------------------------------------------------|
//! | `slashTags`       | `Barack/PERSON Obama/PERSON visited/O`                    |
//! | `xml`             | `<wi num="0" entity="PERSON">Barack</wi> ...`             |
//! | `tsv`             | uma linha `token\tRÓTULO` por token                       |
//! | `tabbedEntities`  | uma linha `entidade\tRÓTULO\ttexto seguinte` por entidade |
//! | `inlineXML`       | `<PERSON>Barack Obama</PERSON> visited ...` (padrão)      |
//!
//! Qualquer outro nome cai no formato padrão `inlineXML` em vez de ser
//! rejeitado.

use std::fmt;

use crate::classifier::SequenceClassifier;
use crate::error::Result;

/// Nome do formato usado quando a requisição não especifica um
pub const DEFAULT_FORMAT: &str = "inlineXML";

/// Formatos de renderização suportados pelo adaptador.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum OutputFormat {
    /// `token/RÓTULO` para cada token
    SlashTags,
    /// Cada token envolto em um elemento `<wi>`
    Xml,
    /// Linhas `token\tRÓTULO`
    Tsv,
    /// Linhas `entidade\tRÓTULO\ttexto seguinte`
    TabbedEntities,
    /// Tags XML embutidas no texto original
    #[default]
    InlineXml,
}

impl OutputFormat {
    /// Todos os formatos em ordem (para iteração)
    pub const ALL: [OutputFormat; 5] = [
        OutputFormat::SlashTags,
        OutputFormat::Xml,
        OutputFormat::Tsv,
        OutputFormat::TabbedEntities,
        OutputFormat::InlineXml,
    ];

    /// Nome do formato no protocolo (ex: "slashTags")
    pub fn name(&self) -> &'static str {
        match self {
            OutputFormat::SlashTags => "slashTags",
            OutputFormat::Xml => "xml",
            OutputFormat::Tsv => "tsv",
            OutputFormat::TabbedEntities => "tabbedEntities",
            OutputFormat::InlineXml => "inlineXML",
        }
    }

    /// Parse estrito: `None` para nomes desconhecidos
    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|format| format.name() == name)
    }

    /// Parse permissivo: nomes desconhecidos viram `InlineXml`
    pub fn from_name(name: &str) -> Self {
        Self::parse(name).unwrap_or_default()
    }

    /// Se o espaçamento original entre tokens deve ser preservado.
    ///
    /// Apenas `xml` preserva; os demais formatos separam tokens com um espaço.
    pub fn preserve_spacing(&self) -> bool {
        matches!(self, OutputFormat::Xml)
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Classifica `text` e renderiza no formato pedido por `format_name`.
///
/// `inlineXML` (e qualquer nome desconhecido) usa a operação dedicada
/// [`SequenceClassifier::classify_with_inline_xml`]; os outros quatro formatos
/// passam por [`SequenceClassifier::classify_to_string`] com o nome canônico e
/// o flag de espaçamento do formato.
pub fn classify(classifier: &dyn SequenceClassifier, text: &str, format_name: &str) -> Result<String> {
    match OutputFormat::from_name(format_name) {
        OutputFormat::InlineXml => classifier.classify_with_inline_xml(text),
        format => classifier.classify_to_string(text, format.name(), format.preserve_spacing()),
    }
}
