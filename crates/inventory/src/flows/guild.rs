//! Clan creation.

use serde::{Deserialize, Serialize};

use hearth_core::DomainResult;

use crate::changes::CountedKind;
use crate::collection::TypeCount;
use crate::guild::Guild;
use crate::inventory::Inventory;
use crate::primitives::add_counted;

/// Key granted to the founder so the clan dojo can be entered.
pub const DOJO_KEY: &str = "/Lotus/Types/Keys/DojoKey";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateGuildRequest {
    pub guild_name: String,
}

/// Create a guild and make the inventory's owner its founder.
pub fn create_guild(inventory: &mut Inventory, request: &CreateGuildRequest) -> DomainResult<Guild> {
    let guild = Guild::new(request.guild_name.clone());
    add_counted(inventory, CountedKind::LevelKeys, &[TypeCount::new(DOJO_KEY, 1)])?;
    inventory.guild_id = Some(guild.id);

    tracing::info!(guild_id = %guild.id, name = %guild.name, "guild created");
    Ok(guild)
}

#[cfg(test)]
mod tests {
    use super::*;
    use hearth_core::AccountId;

    #[test]
    fn founder_gets_guild_id_and_dojo_key() {
        let mut inventory = Inventory::new(AccountId::new());
        let guild = create_guild(
            &mut inventory,
            &CreateGuildRequest {
                guild_name: "Hearthguard".into(),
            },
        )
        .unwrap();

        assert_eq!(inventory.guild_id, Some(guild.id));
        assert_eq!(inventory.level_keys.count(DOJO_KEY), 1);
        assert_eq!(
            serde_json::to_value(&guild).unwrap()["Name"],
            serde_json::json!("Hearthguard")
        );
    }

    #[test]
    fn request_uses_camel_case() {
        let request: CreateGuildRequest = serde_json::from_str(r#"{"guildName":"Moonlit"}"#).unwrap();
        assert_eq!(request.guild_name, "Moonlit");
    }
}
