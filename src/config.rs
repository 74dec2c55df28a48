use std::env;
use std::path::PathBuf;

const DEFAULT_DATA_DIR: &str = "data";
const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 8000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub data_dir: PathBuf,
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
        }
    }
}

impl ServerConfig {
    /// Reads `DATA_DIR`, `H2H_HOST` and `H2H_PORT`. Call [`load_dotenv`] first
    /// to pick up `.env` files.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        let data_dir = non_empty("DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR));
        let host = non_empty("H2H_HOST").unwrap_or_else(|| DEFAULT_HOST.to_string());
        let port = non_empty("H2H_PORT")
            .and_then(|v| parse_port(&v))
            .unwrap_or(DEFAULT_PORT);
        Self {
            data_dir,
            host,
            port,
        }
    }

    /// Applies `--data-dir`, `--host` and `--port` (either `--flag value` or
    /// `--flag=value`). Unknown arguments are left for the caller.
    pub fn apply_args<I, S>(&mut self, args: I) -> Vec<String>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let args = args.into_iter().map(Into::into).collect::<Vec<_>>();
        let mut rest = Vec::new();
        let mut idx = 0;
        while idx < args.len() {
            let arg = &args[idx];
            let (flag, inline) = match arg.split_once('=') {
                Some((flag, value)) if flag.starts_with("--") => (flag, Some(value.to_string())),
                _ => (arg.as_str(), None),
            };
            if !matches!(flag, "--data-dir" | "--host" | "--port") {
                rest.push(arg.clone());
                idx += 1;
                continue;
            }
            let value = match inline {
                Some(v) => v,
                None => {
                    idx += 1;
                    match args.get(idx) {
                        Some(v) => v.clone(),
                        None => break,
                    }
                }
            };
            let value = value.trim();
            if !value.is_empty() {
                match flag {
                    "--data-dir" => self.data_dir = PathBuf::from(value),
                    "--host" => self.host = value.to_string(),
                    _ => {
                        if let Some(port) = parse_port(value) {
                            self.port = port;
                        }
                    }
                }
            }
            idx += 1;
        }
        rest
    }
}

pub fn load_dotenv() {
    let _ = dotenvy::from_filename(".env.local");
    let _ = dotenvy::from_filename(".env");
}

fn parse_port(raw: &str) -> Option<u16> {
    raw.trim().parse::<u16>().ok().filter(|p| *p != 0)
}
