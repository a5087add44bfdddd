//! Configuration for the relay server.
//!
//! Every option can be given as a CLI flag or through the environment
//! (flag wins), and falls back to a compiled default.

use std::path::PathBuf;

use crate::domain::SenderPolicy;

/// Errors that can occur when resolving the server configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("--max-upload-bytes must be greater than zero")]
    ZeroUploadLimit,

    #[error("--upload-dir must not be empty")]
    EmptyUploadDir,
}

/// CLI arguments for the relay server.
#[derive(clap::Parser, Debug)]
#[command(name = "irori-server", version)]
#[command(about = "Chat, file sharing and video-call signaling relay", long_about = None)]
pub struct ServerArgs {
    /// Host address to bind the server to
    #[arg(short = 'H', long, env = "HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Port number to bind the server to
    #[arg(short = 'p', long, env = "PORT", default_value_t = 8080)]
    pub port: u16,

    /// Directory uploaded files are written to and served from
    #[arg(long, env = "UPLOAD_DIR", default_value = "uploads")]
    pub upload_dir: PathBuf,

    /// Maximum accepted upload request body in bytes
    #[arg(long, env = "MAX_UPLOAD_BYTES", default_value_t = 25 * 1024 * 1024)]
    pub max_upload_bytes: usize,

    /// Whose name is relayed as a message sender: "bound" uses the name given
    /// at join time, "trusting" relays whatever the client claims
    #[arg(long, env = "SENDER_POLICY", default_value_t = SenderPolicy::Bound)]
    pub sender_policy: SenderPolicy,

    /// Default log level when RUST_LOG is not set
    #[arg(long, env = "LOG_LEVEL", default_value = "info")]
    pub log_level: String,
}

/// Fully resolved server configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub upload_dir: PathBuf,
    pub max_upload_bytes: usize,
    pub sender_policy: SenderPolicy,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            upload_dir: PathBuf::from("uploads"),
            max_upload_bytes: 25 * 1024 * 1024,
            sender_policy: SenderPolicy::Bound,
        }
    }
}

impl ServerConfig {
    pub fn from_args(args: &ServerArgs) -> Result<Self, ConfigError> {
        if args.max_upload_bytes == 0 {
            return Err(ConfigError::ZeroUploadLimit);
        }
        if args.upload_dir.as_os_str().is_empty() {
            return Err(ConfigError::EmptyUploadDir);
        }
        Ok(Self {
            host: args.host.clone(),
            port: args.port,
            upload_dir: args.upload_dir.clone(),
            max_upload_bytes: args.max_upload_bytes,
            sender_policy: args.sender_policy,
        })
    }

    /// `host:port`, as accepted by `TcpListener::bind`.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_defaults() {
        // テスト項目: 引数なしの場合はデフォルト設定になる
        // given (前提条件):
        let args = ServerArgs::try_parse_from(["irori-server"]).unwrap();

        // when (操作):
        let config = ServerConfig::from_args(&args).unwrap();

        // then (期待する結果):
        let defaults = ServerConfig::default();
        assert_eq!(config.upload_dir, defaults.upload_dir);
        assert_eq!(config.max_upload_bytes, 26_214_400);
        assert_eq!(config.sender_policy, SenderPolicy::Bound);
        assert_eq!(defaults.bind_addr(), "0.0.0.0:8080");
    }

    #[test]
    fn test_flags_override_defaults() {
        // テスト項目: CLI フラグで各設定を上書きできる
        // given (前提条件):
        let args = ServerArgs::try_parse_from([
            "irori-server",
            "-H",
            "127.0.0.1",
            "-p",
            "3000",
            "--upload-dir",
            "/tmp/irori",
            "--max-upload-bytes",
            "1024",
            "--sender-policy",
            "trusting",
        ])
        .unwrap();

        // when (操作):
        let config = ServerConfig::from_args(&args).unwrap();

        // then (期待する結果):
        assert_eq!(config.bind_addr(), "127.0.0.1:3000");
        assert_eq!(config.upload_dir, PathBuf::from("/tmp/irori"));
        assert_eq!(config.max_upload_bytes, 1024);
        assert_eq!(config.sender_policy, SenderPolicy::Trusting);
    }

    #[test]
    fn test_unknown_sender_policy_is_rejected() {
        // テスト項目: 未知の送信者ポリシー名はパースエラーになる
        // when (操作):
        let result = ServerArgs::try_parse_from(["irori-server", "--sender-policy", "open"]);

        // then (期待する結果):
        assert!(result.is_err());
    }

    #[test]
    fn test_zero_upload_limit_is_rejected() {
        // テスト項目: アップロード上限 0 は設定エラーになる
        // given (前提条件):
        let args =
            ServerArgs::try_parse_from(["irori-server", "--max-upload-bytes", "0"]).unwrap();

        // when (操作):
        let result = ServerConfig::from_args(&args);

        // then (期待する結果):
        assert!(matches!(result, Err(ConfigError::ZeroUploadLimit)));
    }
}
