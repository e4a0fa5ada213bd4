//! Board state: the ownable properties derived from the rule set.
//!
//! Properties are keyed by board index. Owners are stored as indices into
//! the engine's player vec, never as references, so the save codec and the
//! bankruptcy release pass stay simple.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::rules::{Rules, SpaceType};

/// Ownership and build state for one property space, plus its static
/// economics copied from the rule set at construction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Property {
    pub name: String,
    pub price: u32,
    pub base_rent: u32,
    pub color_set: String,
    pub house_price: u32,
    /// Index of the owning player, or `None` while bank-held.
    pub owner: Option<usize>,
    pub houses: u8,
    pub has_hotel: bool,
}

impl Property {
    pub fn is_owned(&self) -> bool {
        self.owner.is_some()
    }

    pub fn set_owner(&mut self, player_index: usize) {
        self.owner = Some(player_index);
    }

    /// Return the property to the bank. Houses and hotel go with it.
    pub fn release_ownership(&mut self) {
        self.owner = None;
        self.houses = 0;
        self.has_hotel = false;
    }

    /// Rent due when another player lands here. The hotel flag wins over
    /// the house counter, which is left at 4 once a hotel goes up.
    pub fn rent(&self) -> u32 {
        if self.has_hotel {
            self.base_rent * 6
        } else {
            self.base_rent * (1 + u32::from(self.houses))
        }
    }

    pub fn can_add_house(&self) -> bool {
        self.owner.is_some() && self.houses < 4 && !self.has_hotel
    }

    pub fn can_add_hotel(&self) -> bool {
        self.owner.is_some() && self.houses == 4 && !self.has_hotel
    }

    pub fn add_house(&mut self) {
        if self.can_add_house() {
            self.houses += 1;
        }
    }

    pub fn add_hotel(&mut self) {
        if self.can_add_hotel() {
            self.has_hotel = true;
        }
    }
}

/// The mutable board: one `Property` per PROPERTY space, in board order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Board {
    size: usize,
    jail_index: usize,
    space_names: Vec<String>,
    properties: BTreeMap<usize, Property>,
}

impl Board {
    /// Build a fresh board (all properties unowned) from the rule set.
    pub fn new(rules: &Rules) -> Self {
        let mut properties = BTreeMap::new();
        for s in &rules.spaces {
            if s.space_type != SpaceType::Property {
                continue;
            }
            // Rules::standard guarantees the economics are present.
            let property = Property {
                name: s.name.clone(),
                price: s.price.unwrap_or(0),
                base_rent: s.base_rent.unwrap_or(0),
                color_set: s.color_set.clone().unwrap_or_default(),
                house_price: s.house_price.unwrap_or(0),
                owner: None,
                houses: 0,
                has_hotel: false,
            };
            properties.insert(s.index, property);
        }
        Board {
            size: rules.board_size(),
            jail_index: rules.jail_index,
            space_names: rules.spaces.iter().map(|s| s.name.clone()).collect(),
            properties,
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn jail_index(&self) -> usize {
        self.jail_index
    }

    pub fn is_property(&self, index: usize) -> bool {
        self.properties.contains_key(&index)
    }

    pub fn property(&self, index: usize) -> Option<&Property> {
        self.properties.get(&index)
    }

    pub fn property_mut(&mut self, index: usize) -> Option<&mut Property> {
        self.properties.get_mut(&index)
    }

    pub fn space_name(&self, index: usize) -> &str {
        self.space_names.get(index).map_or("", String::as_str)
    }

    /// All properties in ascending board-index order.
    pub fn properties(&self) -> impl Iterator<Item = (usize, &Property)> {
        self.properties.iter().map(|(&i, p)| (i, p))
    }

    pub fn properties_mut(&mut self) -> impl Iterator<Item = (usize, &mut Property)> {
        self.properties.iter_mut().map(|(&i, p)| (i, p))
    }

    /// Board indices of every property sharing a color set.
    pub fn color_set_indices(&self, color_set: &str) -> Vec<usize> {
        self.properties
            .iter()
            .filter(|(_, p)| p.color_set == color_set)
            .map(|(&i, _)| i)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board() -> Board {
        Board::new(&Rules::standard())
    }

    #[test]
    fn test_property_placement() {
        let b = board();
        assert_eq!(b.size(), 16);
        assert_eq!(b.properties().count(), 8);
        assert!(b.is_property(1));
        assert!(!b.is_property(0));
        assert!(!b.is_property(8));
        assert!(b.property(4).is_none());
        assert!(b.property(99).is_none());
    }

    #[test]
    fn test_space_names() {
        let b = board();
        assert_eq!(b.space_name(0), "GO");
        assert_eq!(b.space_name(9), "Elm Street");
        assert_eq!(b.space_name(99), "");
    }

    #[test]
    fn test_color_set_indices() {
        let b = board();
        assert_eq!(b.color_set_indices("Brown"), vec![1, 3]);
        assert_eq!(b.color_set_indices("Orange"), vec![13, 15]);
        assert!(b.color_set_indices("Purple").is_empty());
    }

    #[test]
    fn test_rent_scales_with_houses() {
        let mut b = board();
        let p = b.property_mut(1).expect("property");
        p.set_owner(0);
        assert_eq!(p.rent(), 20);
        p.add_house();
        assert_eq!(p.rent(), 40);
        p.add_house();
        p.add_house();
        p.add_house();
        assert_eq!(p.houses, 4);
        assert_eq!(p.rent(), 100);
    }

    #[test]
    fn test_hotel_rent_overrides_houses() {
        let mut b = board();
        let p = b.property_mut(1).expect("property");
        p.set_owner(0);
        for _ in 0..4 {
            p.add_house();
        }
        p.add_hotel();
        assert!(p.has_hotel);
        assert_eq!(p.rent(), 120);
        // counter stays at 4; no further houses
        assert!(!p.can_add_house());
        assert!(!p.can_add_hotel());
    }

    #[test]
    fn test_house_cap() {
        let mut b = board();
        let p = b.property_mut(1).expect("property");
        p.set_owner(0);
        for _ in 0..6 {
            p.add_house();
        }
        assert_eq!(p.houses, 4);
    }

    #[test]
    fn test_unowned_property_cannot_build() {
        let b = board();
        let p = b.property(1).expect("property");
        assert!(!p.can_add_house());
        assert!(!p.can_add_hotel());
    }

    #[test]
    fn test_release_ownership_resets_buildings() {
        let mut b = board();
        let p = b.property_mut(1).expect("property");
        p.set_owner(2);
        for _ in 0..4 {
            p.add_house();
        }
        p.add_hotel();
        p.release_ownership();
        assert!(!p.is_owned());
        assert_eq!(p.houses, 0);
        assert!(!p.has_hotel);
    }
}
