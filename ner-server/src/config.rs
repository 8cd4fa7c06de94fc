//! Configuração de inicialização a partir dos argumentos do processo.
//!
//! As opções seguem o estilo de traço simples do contrato externo do servidor:
//!
//! | Opção                 | Padrão                         |
//! |-----------------------|--------------------------------|
//! | `-port <int>`         | `8000`                         |
//! | `-classifier <path>`  | `classifiers/ner-model.json`   |
//! | `-host <ip>`          | `0.0.0.0`                      |
//!
//! Tokens desconhecidos são ignorados, assim como uma opção sem valor no fim da
//! linha. Um valor inválido para `-port` ou `-host` é erro fatal.

use std::net::{AddrParseError, IpAddr, Ipv4Addr, SocketAddr};
use std::num::ParseIntError;
use std::path::PathBuf;

use thiserror::Error;

pub const DEFAULT_PORT: u16 = 8000;
pub const DEFAULT_CLASSIFIER: &str = "classifiers/ner-model.json";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid -port value {value:?}: {source}")]
    InvalidPort {
        value: String,
        #[source]
        source: ParseIntError,
    },

    #[error("invalid -host value {value:?}: {source}")]
    InvalidHost {
        value: String,
        #[source]
        source: AddrParseError,
    },
}

/// Configuração imutável do servidor, construída uma vez antes do bind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub port: u16,
    pub classifier_path: PathBuf,
    pub host: IpAddr,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            classifier_path: PathBuf::from(DEFAULT_CLASSIFIER),
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
        }
    }
}

impl ServerConfig {
    /// Interpreta os argumentos (sem o nome do programa).
    pub fn from_args<I, S>(args: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let args: Vec<String> = args.into_iter().map(Into::into).collect();
        let mut config = Self::default();

        let mut i = 0;
        while i < args.len() {
            let value = args.get(i + 1);
            match (args[i].as_str(), value) {
                ("-port", Some(value)) => {
                    config.port = value.parse().map_err(|source| ConfigError::InvalidPort {
                        value: value.clone(),
                        source,
                    })?;
                    i += 1;
                }
                ("-classifier", Some(value)) => {
                    config.classifier_path = PathBuf::from(value);
                    i += 1;
                }
                ("-host", Some(value)) => {
                    config.host = value.parse().map_err(|source| ConfigError::InvalidHost {
                        value: value.clone(),
                        source,
                    })?;
                    i += 1;
                }
                _ => {}
            }
            i += 1;
        }

        Ok(config)
    }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ServerConfig::from_args(Vec::<String>::new()).unwrap();
        assert_eq!(config, ServerConfig::default());
        assert_eq!(config.port, 8000);
        assert_eq!(config.socket_addr().to_string(), "0.0.0.0:8000");
    }

    #[test]
    fn test_overrides() {
        let config =
            ServerConfig::from_args(["-port", "9001", "-classifier", "models/si.json.gz", "-host", "127.0.0.1"])
                .unwrap();
        assert_eq!(config.port, 9001);
        assert_eq!(config.classifier_path, PathBuf::from("models/si.json.gz"));
        assert_eq!(config.socket_addr().to_string(), "127.0.0.1:9001");
    }

    #[test]
    fn test_unknown_tokens_are_ignored() {
        let config = ServerConfig::from_args(["--verbose", "x", "-port", "8080", "-other"]).unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.classifier_path, PathBuf::from(DEFAULT_CLASSIFIER));
    }

    #[test]
    fn test_option_without_value_is_ignored() {
        let config = ServerConfig::from_args(["-classifier", "a.json", "-port"]).unwrap();
        assert_eq!(config.port, DEFAULT_PORT);
        assert_eq!(config.classifier_path, PathBuf::from("a.json"));
    }

    #[test]
    fn test_last_occurrence_wins() {
        let config = ServerConfig::from_args(["-port", "1", "-port", "2"]).unwrap();
        assert_eq!(config.port, 2);
    }

    #[test]
    fn test_invalid_port_is_an_error() {
        for bad in ["abc", "-1", "70000", ""] {
            let err = ServerConfig::from_args(["-port", bad]).unwrap_err();
            assert!(matches!(err, ConfigError::InvalidPort { .. }), "{bad}");
        }
    }

    #[test]
    fn test_invalid_host_is_an_error() {
        let err = ServerConfig::from_args(["-host", "localhost"]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidHost { .. }));
    }
}
