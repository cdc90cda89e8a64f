// directory/loader.rs
use super::DrinksClient;
use crate::config::{AppConfig, SourceKind};
use crate::error::{ConfigError, LoadError, LOAD_FAILED_MESSAGE};
use crate::types::Directory;
use std::path::PathBuf;

const BUNDLED_DIRECTORY: &str = include_str!("../../assets/drinks.json");

/// Where the drink directory comes from.
#[derive(Clone, Debug)]
pub enum DirectorySource {
    Bundled,
    File(PathBuf),
    Remote(DrinksClient),
}

impl DirectorySource {
    pub fn from_config(config: &AppConfig) -> Result<Self, ConfigError> {
        match config.source {
            SourceKind::Remote => Ok(Self::Remote(DrinksClient::new(&config.backend()?)?)),
            SourceKind::Bundled => Ok(Self::Bundled),
            SourceKind::File => config
                .static_file
                .as_ref()
                .map(|path| Self::File(PathBuf::from(shellexpand::tilde(path).to_string())))
                .ok_or(ConfigError::MissingStaticFile),
        }
    }

    /// One full retrieval of the directory. Never retried.
    pub async fn fetch(&self) -> Result<Directory, LoadError> {
        match self {
            Self::Bundled => Ok(serde_json::from_str(BUNDLED_DIRECTORY)?),
            Self::File(path) => {
                let contents = tokio::fs::read_to_string(path).await?;
                Ok(serde_json::from_str(&contents)?)
            }
            Self::Remote(client) => client.list_drinks().await,
        }
    }

    /// Client for creating drinks; only the remote source has one.
    pub fn client(&self) -> Option<&DrinksClient> {
        match self {
            Self::Remote(client) => Some(client),
            _ => None,
        }
    }

    pub fn describe(&self) -> String {
        match self {
            Self::Bundled => "bundled directory".to_string(),
            Self::File(path) => path.display().to_string(),
            Self::Remote(client) => client.drinks_url().to_string(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LoadStatus {
    Loading,
    Ready,
    Error(String),
}

/// Identifies one refresh; only the newest ticket may complete the loader.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LoadTicket(u64);

#[derive(Debug)]
pub struct DirectoryLoader {
    source: DirectorySource,
    status: LoadStatus,
    directory: Directory,
    generation: u64,
}

impl DirectoryLoader {
    pub fn new(source: DirectorySource) -> Self {
        Self {
            source,
            status: LoadStatus::Loading,
            directory: Directory::new(),
            generation: 0,
        }
    }

    pub fn source(&self) -> &DirectorySource {
        &self.source
    }

    pub fn status(&self) -> &LoadStatus {
        &self.status
    }

    pub fn directory(&self) -> &Directory {
        &self.directory
    }

    pub fn is_loading(&self) -> bool {
        self.status == LoadStatus::Loading
    }

    pub fn begin_refresh(&mut self) -> LoadTicket {
        self.generation += 1;
        self.status = LoadStatus::Loading;
        LoadTicket(self.generation)
    }

    /// Applies a retrieval result. Returns false when the ticket was
    /// superseded by a later refresh and the result was discarded.
    pub fn finish(&mut self, ticket: LoadTicket, result: Result<Directory, LoadError>) -> bool {
        self.apply(ticket, result.ok())
    }

    /// Runs one full load cycle inline.
    #[cfg(test)]
    pub async fn refresh(&mut self) -> Result<(), LoadError> {
        let ticket = self.begin_refresh();
        match self.source.fetch().await {
            Ok(directory) => {
                self.apply(ticket, Some(directory));
                Ok(())
            }
            Err(e) => {
                self.apply(ticket, None);
                Err(e)
            }
        }
    }

    fn apply(&mut self, ticket: LoadTicket, directory: Option<Directory>) -> bool {
        if ticket.0 != self.generation {
            return false;
        }
        match directory {
            Some(directory) => {
                self.directory = directory;
                self.status = LoadStatus::Ready;
            }
            None => {
                self.directory.clear();
                self.status = LoadStatus::Error(LOAD_FAILED_MESSAGE.to_string());
            }
        }
        true
    }
}
