//! Chance and Community Chest decks.
//!
//! Each card carries its effect as a tagged variant, so applying a draw is
//! an exhaustive match instead of text inspection. Two cards deliberately
//! have no effect beyond their text ("Get out of Jail Free" and "Advance to
//! nearest property"); `Effect::Nothing` keeps that explicit.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Effect {
    /// Move to GO and collect the GO reward.
    AdvanceToGo,
    /// Unconditional credit.
    Collect(u32),
    /// Sent to jail (position, flag, streak reset).
    GoToJail,
    /// Tax debit; bankrupts the player if it cannot be paid.
    Pay(u32),
    /// Narrated but has no game effect.
    Nothing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Card {
    pub text: &'static str,
    pub effect: Effect,
}

pub const CHANCE_DECK: [Card; 6] = [
    Card { text: "Advance to GO! Collect $200", effect: Effect::AdvanceToGo },
    Card { text: "Bank pays you dividend of $50", effect: Effect::Collect(50) },
    Card { text: "Go to Jail!", effect: Effect::GoToJail },
    Card { text: "Pay poor tax of $15", effect: Effect::Pay(15) },
    Card { text: "Get out of Jail Free card", effect: Effect::Nothing },
    Card { text: "Advance to nearest property", effect: Effect::Nothing },
];

pub const COMMUNITY_CHEST_DECK: [Card; 6] = [
    Card { text: "Advance to GO! Collect $200", effect: Effect::AdvanceToGo },
    Card { text: "Bank error in your favor. Collect $200", effect: Effect::Collect(200) },
    Card { text: "Doctor's fee. Pay $50", effect: Effect::Pay(50) },
    Card { text: "From sale of stock you get $50", effect: Effect::Collect(50) },
    Card { text: "Get Out of Jail Free", effect: Effect::Nothing },
    Card { text: "Holiday fund matures. Receive $100", effect: Effect::Collect(100) },
];
