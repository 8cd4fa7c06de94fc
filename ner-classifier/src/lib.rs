//! # ner-classifier — Adaptador de Classificação NER
//!
//! Este crate é o "colaborador externo" do servidor NER: recebe texto bruto e
//! devolve o texto anotado já renderizado num formato de saída. O servidor HTTP
//! depende apenas do trait [`SequenceClassifier`], então o motor concreto pode
//! ser trocado (ou substituído por um stub nos testes) sem tocar na fachada.
//!
//! ## Arquitetura
//!
//! 1.  **Entrada**: Texto bruto (String).
//! 2.  **Tokenização** ([`tokenizer`]): O texto é dividido em tokens, preservando offsets originais.
//! 3.  **Rotulação** ([`gazetteer`]): Cada token recebe um rótulo do modelo (ex: `PERSON`) ou o rótulo de fundo `O`.
//! 4.  **Renderização** ([`render`]): Os tokens rotulados viram uma das cinco saídas (`inlineXML`, `slashTags`, `xml`, `tsv`, `tabbedEntities`).
//!
//! A escolha do formato a partir do nome enviado pelo cliente fica em [`format::classify`].
//!
//! ## Exemplo de Uso
//!
//! ```rust
//! use ner_classifier::{format, GazetteerModel};
//!
//! let model = GazetteerModel::from_json(
//!     r#"{"entities": {"PERSON": ["Barack Obama"], "LOCATION": ["Paris"]}}"#,
//! ).unwrap();
//!
//! let out = format::classify(&model, "Barack Obama visited Paris.", "inlineXML").unwrap();
//! assert_eq!(out, "<PERSON>Barack Obama</PERSON> visited <LOCATION>Paris</LOCATION>.");
//! ```

pub mod classifier;
pub mod error;
pub mod format;
pub mod gazetteer;
pub mod render;
pub mod tagger;
pub mod tokenizer;

pub use classifier::SequenceClassifier;
pub use error::ClassifierError;
pub use format::{OutputFormat, DEFAULT_FORMAT};
pub use gazetteer::GazetteerModel;
pub use tagger::{EntitySpan, TaggedToken};
pub use tokenizer::Token;
