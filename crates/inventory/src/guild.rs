//! Guild (clan) aggregate.

use serde::{Deserialize, Serialize};

use hearth_core::{AggregateRoot, GuildId};

/// Aggregate root: Guild.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Guild {
    #[serde(rename = "_id")]
    pub id: GuildId,
    #[serde(rename = "Name")]
    pub name: String,
}

impl Guild {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: GuildId::new(),
            name: name.into(),
        }
    }
}

impl AggregateRoot for Guild {
    type Id = GuildId;

    const KIND: &'static str = "guild";

    fn id(&self) -> &GuildId {
        &self.id
    }
}
