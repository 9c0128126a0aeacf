use std::str::FromStr;

use crate::rules::ParseEnumError;

/// Brain-star price of equipping a new accessory.
pub const ACCESSORY_COST: u32 = 100;

pub const SKIN_COLORS: [&str; 8] = [
    "#ffdbaa", "#f4c2a1", "#e8b896", "#d4a574", "#c9935c", "#b8804a", "#a66d3a", "#8b5a2b",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShopItem {
    Hints5,
    Hints10,
    Hints25,
    Stars100,
    Stars500,
    Premium,
}

/// What a purchase grants once paid for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShopReward {
    Hints(u32),
    BrainStars(u32),
    Premium,
}

impl ShopItem {
    pub const ALL: [ShopItem; 6] = [
        ShopItem::Hints5,
        ShopItem::Hints10,
        ShopItem::Hints25,
        ShopItem::Stars100,
        ShopItem::Stars500,
        ShopItem::Premium,
    ];

    pub fn id(self) -> &'static str {
        match self {
            ShopItem::Hints5 => "hints_5",
            ShopItem::Hints10 => "hints_10",
            ShopItem::Hints25 => "hints_25",
            ShopItem::Stars100 => "stars_100",
            ShopItem::Stars500 => "stars_500",
            ShopItem::Premium => "premium",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ShopItem::Hints5 => "5 Hints",
            ShopItem::Hints10 => "10 Hints",
            ShopItem::Hints25 => "25 Hints",
            ShopItem::Stars100 => "100 Brain Stars",
            ShopItem::Stars500 => "500 Brain Stars",
            ShopItem::Premium => "Premium Pass",
        }
    }

    /// Price in brain stars. `stars_100` is the free daily pack.
    pub fn cost(self) -> u32 {
        match self {
            ShopItem::Hints5 => 50,
            ShopItem::Hints10 => 90,
            ShopItem::Hints25 => 200,
            ShopItem::Stars100 => 0,
            ShopItem::Stars500 => 100,
            ShopItem::Premium => 500,
        }
    }

    pub fn reward(self) -> ShopReward {
        match self {
            ShopItem::Hints5 => ShopReward::Hints(5),
            ShopItem::Hints10 => ShopReward::Hints(10),
            ShopItem::Hints25 => ShopReward::Hints(25),
            ShopItem::Stars100 => ShopReward::BrainStars(100),
            ShopItem::Stars500 => ShopReward::BrainStars(500),
            ShopItem::Premium => ShopReward::Premium,
        }
    }
}

impl FromStr for ShopItem {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ShopItem::ALL
            .into_iter()
            .find(|item| item.id() == s)
            .ok_or_else(|| ParseEnumError {
                value: s.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn items_parse_from_their_ids() {
        for item in ShopItem::ALL {
            assert_eq!(item.id().parse::<ShopItem>(), Ok(item));
        }
        assert!("hints_7".parse::<ShopItem>().is_err());
    }

    #[test]
    fn premium_pass_grants_entitlement() {
        assert_eq!(ShopItem::Premium.cost(), 500);
        assert_eq!(ShopItem::Premium.reward(), ShopReward::Premium);
    }
}
