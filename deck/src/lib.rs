pub mod block;
pub mod compiler;
pub mod config;
pub mod diagnostic;
pub mod document;
pub mod parser;

use crate::block::{Block, Content};
use crate::config::DeckConfig;

/// A parsed deck source: configuration plus the flat block stream.
#[derive(Debug, Clone)]
pub struct Source {
    /// Settings from the front matter (empty when the file has none).
    pub config: DeckConfig,
    /// Raw front matter table, kept so it can be layered over a config file.
    pub front_matter: toml::Table,
    /// Structural markers and content, in authoring order.
    pub blocks: Vec<Block<Content>>,
}
