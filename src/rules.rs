//! Rule set: the fixed board layout plus the numeric game knobs.
//!
//! The board itself is static data; the four money/limit knobs can be
//! overridden from a TOML file at startup.

use std::path::Path;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

/// Discriminant for each position on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpaceType {
    Go,
    Property,
    Jail,
    FreeParking,
    Chance,
    CommunityChest,
}

/// One board position. The four economic fields are present exactly when
/// `space_type` is `Property`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Space {
    pub index: usize,
    pub space_type: SpaceType,
    pub name: String,
    pub price: Option<u32>,
    pub base_rent: Option<u32>,
    pub color_set: Option<String>,
    pub house_price: Option<u32>,
}

fn space(
    index: usize,
    space_type: SpaceType,
    name: &str,
    price: Option<u32>,
    base_rent: Option<u32>,
    color_set: Option<&str>,
    house_price: Option<u32>,
) -> Space {
    Space {
        index,
        space_type,
        name: name.to_string(),
        price,
        base_rent,
        color_set: color_set.map(str::to_string),
        house_price,
    }
}

/// The standard 16-space layout: GO at 0, Jail at 8, eight properties in
/// four two-member color sets.
static STANDARD_SPACES: Lazy<Vec<Space>> = Lazy::new(|| {
    use SpaceType::*;
    vec![
        space(0, Go, "GO", None, None, None, None),
        space(1, Property, "Oak Street", Some(60), Some(20), Some("Brown"), Some(50)),
        space(2, CommunityChest, "Community Chest", None, None, None, None),
        space(3, Property, "Maple Avenue", Some(60), Some(20), Some("Brown"), Some(50)),
        space(4, FreeParking, "Free Parking", None, None, None, None),
        space(5, Property, "Cedar Lane", Some(100), Some(30), Some("LightBlue"), Some(50)),
        space(6, Chance, "Chance", None, None, None, None),
        space(7, Property, "Pine Road", Some(120), Some(40), Some("LightBlue"), Some(50)),
        space(8, Jail, "Jail", None, None, None, None),
        space(9, Property, "Elm Street", Some(140), Some(50), Some("Pink"), Some(100)),
        space(10, CommunityChest, "Community Chest", None, None, None, None),
        space(11, Property, "Birch Blvd", Some(160), Some(60), Some("Pink"), Some(100)),
        space(12, FreeParking, "Rest Stop", None, None, None, None),
        space(13, Property, "Spruce Way", Some(180), Some(70), Some("Orange"), Some(100)),
        space(14, Chance, "Chance", None, None, None, None),
        space(15, Property, "Willow Court", Some(200), Some(80), Some("Orange"), Some(100)),
    ]
});

/// Immutable game configuration: board layout + money/limit knobs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Rules {
    pub spaces: Vec<Space>,
    pub start_cash: u32,
    pub go_reward: u32,
    pub jail_fee: u32,
    pub max_consecutive_doubles: u8,
    pub go_index: usize,
    pub jail_index: usize,
}

impl Rules {
    /// The standard rule set.
    pub fn standard() -> Self {
        Rules {
            spaces: STANDARD_SPACES.clone(),
            start_cash: 1_500,
            go_reward: 200,
            jail_fee: 50,
            max_consecutive_doubles: 3,
            go_index: 0,
            jail_index: 8,
        }
    }

    /// Standard rules with the numeric knobs overridden from a config.
    pub fn with_config(config: &RulesConfig) -> Self {
        let mut rules = Rules::standard();
        if let Some(v) = config.start_cash {
            rules.start_cash = v;
        }
        if let Some(v) = config.go_reward {
            rules.go_reward = v;
        }
        if let Some(v) = config.jail_fee {
            rules.jail_fee = v;
        }
        if let Some(v) = config.max_consecutive_doubles {
            rules.max_consecutive_doubles = v;
        }
        rules
    }

    pub fn board_size(&self) -> usize {
        self.spaces.len()
    }

    pub fn space(&self, index: usize) -> Option<&Space> {
        self.spaces.get(index)
    }
}

/// Optional overrides for the numeric rule knobs. The board layout is fixed
/// and cannot be reconfigured.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RulesConfig {
    pub start_cash: Option<u32>,
    pub go_reward: Option<u32>,
    pub jail_fee: Option<u32>,
    pub max_consecutive_doubles: Option<u8>,
}

/// Load rule overrides from a TOML file.
pub fn load_rules_config(path: &Path) -> Result<RulesConfig, String> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| format!("Failed to read {}: {}", path.display(), e))?;
    let config: RulesConfig = toml::from_str(&content)
        .map_err(|e| format!("Failed to parse {}: {}", path.display(), e))?;
    tracing::info!(path = %path.display(), "loaded rules config");
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_board_shape() {
        let rules = Rules::standard();
        assert_eq!(rules.board_size(), 16);
        assert_eq!(rules.go_index, 0);
        assert_eq!(rules.jail_index, 8);

        let gos = rules.spaces.iter().filter(|s| s.space_type == SpaceType::Go).count();
        let jails = rules.spaces.iter().filter(|s| s.space_type == SpaceType::Jail).count();
        assert_eq!(gos, 1);
        assert_eq!(jails, 1);
    }

    #[test]
    fn test_indices_are_dense() {
        let rules = Rules::standard();
        for (i, s) in rules.spaces.iter().enumerate() {
            assert_eq!(s.index, i);
        }
    }

    #[test]
    fn test_properties_carry_all_economics() {
        let rules = Rules::standard();
        for s in &rules.spaces {
            if s.space_type == SpaceType::Property {
                assert!(s.price.is_some(), "{} missing price", s.name);
                assert!(s.base_rent.is_some(), "{} missing rent", s.name);
                assert!(s.color_set.is_some(), "{} missing color set", s.name);
                assert!(s.house_price.is_some(), "{} missing house price", s.name);
            } else {
                assert!(s.price.is_none());
            }
        }
    }

    #[test]
    fn test_config_overlay() {
        let config: RulesConfig =
            toml::from_str("start_cash = 2000\njail_fee = 75").expect("valid toml");
        let rules = Rules::with_config(&config);
        assert_eq!(rules.start_cash, 2000);
        assert_eq!(rules.jail_fee, 75);
        // untouched knobs keep their defaults
        assert_eq!(rules.go_reward, 200);
        assert_eq!(rules.max_consecutive_doubles, 3);
    }

    #[test]
    fn test_empty_config_is_standard() {
        let rules = Rules::with_config(&RulesConfig::default());
        assert_eq!(rules.start_cash, Rules::standard().start_cash);
    }
}
