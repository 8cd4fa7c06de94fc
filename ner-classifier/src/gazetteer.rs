//! # Modelo de Gazetteers
//!
//! Implementação de [`SequenceClassifier`] carregada de um arquivo de modelo
//! serializado. O modelo é um dicionário: listas de entidades conhecidas
//! (gazetteers) por rótulo, mais palavras-gatilho (títulos) que marcam o nome
//! que as segue.
//!
//! ## Formato do arquivo
//!
//! JSON, opcionalmente comprimido com gzip quando o caminho termina em `.gz`:
//!
//! ```json
//! {
//!   "name": "english-demo",
//!   "background": "O",
//!   "entities": { "PERSON": ["Barack Obama"], "LOCATION": ["Paris"] },
//!   "titles":   { "PERSON": ["president", "dr."] }
//! }
//! ```
//!
//! ## Regras de rotulação
//!
//! 1. **Gazetteers** (n-gramas): a frase mais longa que casa a partir de cada
//!    posição vence. A comparação é token a token, sem diferenciar maiúsculas.
//! 2. **Títulos**: tokens capitalizados logo após uma palavra-gatilho ("President
//!    Joe Biden") recebem o rótulo do título, se ainda não tiverem rótulo.
//! 3. Todo o resto recebe o rótulo de fundo.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use flate2::read::GzDecoder;
use serde::Deserialize;
use tracing::debug;

use crate::classifier::SequenceClassifier;
use crate::error::{ClassifierError, Result};
use crate::tagger::{TaggedToken, BACKGROUND_LABEL};
use crate::tokenizer::tokenize;

/// Conteúdo serializado do arquivo de modelo
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ModelFile {
    #[serde(default)]
    name: Option<String>,
    #[serde(default = "default_background")]
    background: String,
    entities: BTreeMap<String, Vec<String>>,
    #[serde(default)]
    titles: BTreeMap<String, Vec<String>>,
}

fn default_background() -> String {
    BACKGROUND_LABEL.to_string()
}

/// Uma entrada de gazetteer já tokenizada (lowercase)
#[derive(Debug, Clone)]
struct Phrase {
    parts: Vec<String>,
    label: String,
}

/// Modelo NER baseado em dicionário, somente leitura depois de carregado.
#[derive(Debug, Clone)]
pub struct GazetteerModel {
    name: String,
    background: String,
    labels: Vec<String>,
    /// Ordenadas da mais longa para a mais curta
    phrases: Vec<Phrase>,
    /// palavra-gatilho (lowercase) → rótulo
    titles: HashMap<String, String>,
}

impl GazetteerModel {
    /// Carrega o modelo de um arquivo (`.gz` é descomprimido).
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| ClassifierError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let reader: Box<dyn Read> = if path.extension().is_some_and(|ext| ext == "gz") {
            Box::new(GzDecoder::new(file))
        } else {
            Box::new(file)
        };

        let fallback_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        let model_file = read_model_file(reader).map_err(|source| {
            // Falhas de leitura do gzip chegam aqui embrulhadas como io::Error
            if source.is_io() {
                ClassifierError::Io {
                    path: path.to_path_buf(),
                    source: source.into(),
                }
            } else {
                ClassifierError::Json {
                    path: path.to_path_buf(),
                    source,
                }
            }
        })?;
        Self::build(model_file, fallback_name)
    }

    /// Constrói o modelo lendo o JSON (já descomprimido) de `reader`.
    pub fn from_reader(reader: impl Read) -> Result<Self> {
        let model_file = read_model_file(reader)?;
        Self::build(model_file, "inline".to_string())
    }

    /// Constrói o modelo a partir do JSON em memória.
    pub fn from_json(json: &str) -> Result<Self> {
        let model_file: ModelFile = serde_json::from_str(json)?;
        Self::build(model_file, "inline".to_string())
    }

    fn build(model_file: ModelFile, fallback_name: String) -> Result<Self> {
        let ModelFile {
            name,
            background,
            entities,
            titles,
        } = model_file;

        if background.trim().is_empty() {
            return Err(ClassifierError::InvalidModel("background label is empty".into()));
        }
        if entities.is_empty() && titles.is_empty() {
            return Err(ClassifierError::InvalidModel("model defines no labels".into()));
        }

        let mut labels = BTreeSet::new();
        let mut phrases = Vec::new();
        for (label, entries) in entities {
            check_label(&label, &background)?;
            for entry in entries {
                let parts: Vec<String> = tokenize(&entry)
                    .into_iter()
                    .map(|t| t.text.to_lowercase())
                    .collect();
                if parts.is_empty() {
                    return Err(ClassifierError::InvalidModel(format!(
                        "empty phrase under label {label}"
                    )));
                }
                phrases.push(Phrase {
                    parts,
                    label: label.clone(),
                });
            }
            labels.insert(label);
        }
        // Ordenação estável: entre frases de mesmo tamanho vale a ordem do arquivo
        phrases.sort_by(|a, b| b.parts.len().cmp(&a.parts.len()));

        let mut title_map = HashMap::new();
        for (label, words) in titles {
            check_label(&label, &background)?;
            for word in words {
                let word = word.trim().to_lowercase();
                if word.is_empty() {
                    return Err(ClassifierError::InvalidModel(format!(
                        "empty title under label {label}"
                    )));
                }
                title_map.insert(word, label.clone());
            }
            labels.insert(label);
        }

        Ok(Self {
            name: name.unwrap_or(fallback_name),
            background,
            labels: labels.into_iter().collect(),
            phrases,
            titles: title_map,
        })
    }

    /// Nome do modelo (campo `name` ou nome do arquivo)
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Rótulos de entidade conhecidos, em ordem alfabética
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Número de entradas de gazetteer
    pub fn phrase_count(&self) -> usize {
        self.phrases.len()
    }

    /// Rótulo de cada token, `None` para fundo
    fn label_tokens(&self, lowered: &[String], raw: &[&str]) -> Vec<Option<String>> {
        let mut result: Vec<Option<String>> = vec![None; lowered.len()];

        // 1. Gazetteers (n-gramas, maior primeiro)
        let mut i = 0;
        while i < lowered.len() {
            let matched = self.phrases.iter().find(|phrase| {
                lowered
                    .get(i..i + phrase.parts.len())
                    .is_some_and(|window| window == phrase.parts.as_slice())
            });
            match matched {
                Some(phrase) => {
                    for slot in &mut result[i..i + phrase.parts.len()] {
                        *slot = Some(phrase.label.clone());
                    }
                    i += phrase.parts.len();
                }
                None => i += 1,
            }
        }

        // 2. Títulos: "President Joe Biden" → Joe, Biden
        let mut i = 0;
        while i + 1 < lowered.len() {
            let Some(label) = self.titles.get(&lowered[i]) else {
                i += 1;
                continue;
            };
            let mut j = i + 1;
            while j < lowered.len() && result[j].is_none() && starts_uppercase(raw[j]) {
                result[j] = Some(label.clone());
                j += 1;
            }
            i = j.max(i + 1);
        }

        result
    }
}

impl SequenceClassifier for GazetteerModel {
    fn background_label(&self) -> &str {
        &self.background
    }

    fn classify(&self, text: &str) -> Result<Vec<TaggedToken>> {
        let tokens = tokenize(text);
        let lowered: Vec<String> = tokens.iter().map(|t| t.text.to_lowercase()).collect();
        let raw: Vec<&str> = tokens.iter().map(|t| t.text.as_str()).collect();
        let labels = self.label_tokens(&lowered, &raw);

        debug!(
            tokens = tokens.len(),
            entities = labels.iter().filter(|l| l.is_some()).count(),
            "texto classificado"
        );

        Ok(tokens
            .into_iter()
            .zip(labels)
            .map(|(token, label)| {
                let label = label.unwrap_or_else(|| self.background.clone());
                TaggedToken::new(token, label)
            })
            .collect())
    }
}

fn read_model_file(reader: impl Read) -> serde_json::Result<ModelFile> {
    serde_json::from_reader(BufReader::new(reader))
}

/// Rótulos viram nomes de elemento no `inlineXML`, então precisam ser nomes XML
fn check_label(label: &str, background: &str) -> Result<()> {
    if label.trim().is_empty() {
        return Err(ClassifierError::InvalidModel("empty label".into()));
    }
    if !is_xml_name(label) {
        return Err(ClassifierError::InvalidModel(format!(
            "label {label:?} is not a valid XML name"
        )));
    }
    if label == background {
        return Err(ClassifierError::InvalidModel(format!(
            "label {label} is the background label"
        )));
    }
    Ok(())
}

fn is_xml_name(name: &str) -> bool {
    let mut chars = name.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    (first.is_alphabetic() || first == '_')
        && chars.all(|c| c.is_alphanumeric() || matches!(c, '_' | '-' | '.'))
}

fn starts_uppercase(word: &str) -> bool {
    word.chars().next().map(char::is_uppercase).unwrap_or(false)
}
