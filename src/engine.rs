//! The turn engine: one logical turn across dice roll, landing resolution,
//! pending property decision, building, and turn advance.
//!
//! The engine is the sole mutator of player/property state during play.
//! Commands issued in the wrong state are silent no-ops; callers gate on the
//! query methods (`is_waiting_for_property_decision`, `is_game_over`) before
//! issuing commands.

use crate::board::Board;
use crate::cards::{Card, Effect, CHANCE_DECK, COMMUNITY_CHEST_DECK};
use crate::player::Player;
use crate::rng::{RandomSource, SeededRandom};
use crate::rules::{Rules, SpaceType};
use crate::save;

pub struct GameEngine {
    rules: Rules,
    board: Board,
    players: Vec<Player>,
    current_player_index: usize,
    rng: Box<dyn RandomSource>,

    last_dice: (u8, u8),
    last_message: String,
    pending_property: Option<usize>,
    waiting_for_decision: bool,
    turn_in_progress: bool,
}

impl GameEngine {
    /// Seat players under the given rules. Blank names are auto-filled as
    /// `PlayerN` by seat order.
    pub fn new(rules: Rules, player_names: &[String], rng: Box<dyn RandomSource>) -> Self {
        let board = Board::new(&rules);
        let mut players = Vec::with_capacity(player_names.len());
        for name in player_names {
            let name = if name.is_empty() {
                format!("Player{}", players.len() + 1)
            } else {
                name.clone()
            };
            players.push(Player::new(name, rules.start_cash, rules.go_index));
        }
        tracing::info!(players = players.len(), "new game");
        GameEngine {
            rules,
            board,
            players,
            current_player_index: 0,
            rng,
            last_dice: (0, 0),
            last_message: String::new(),
            pending_property: None,
            waiting_for_decision: false,
            turn_in_progress: false,
        }
    }

    /// Standard rules, OS-entropy dice.
    pub fn new_game(player_names: &[String]) -> Self {
        GameEngine::new(
            Rules::standard(),
            player_names,
            Box::new(SeededRandom::from_entropy()),
        )
    }

    /// Standard rules, deterministic dice.
    pub fn new_seeded(player_names: &[String], seed: u64) -> Self {
        GameEngine::new(
            Rules::standard(),
            player_names,
            Box::new(SeededRandom::from_seed(seed)),
        )
    }

    // --- queries ---------------------------------------------------------

    pub fn rules(&self) -> &Rules {
        &self.rules
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Direct board access for drivers and tests that stage a scenario.
    pub fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    /// Direct player access for drivers and tests that stage a scenario.
    pub fn players_mut(&mut self) -> &mut [Player] {
        &mut self.players
    }

    pub fn current_player_index(&self) -> usize {
        self.current_player_index
    }

    pub fn current_player(&self) -> &Player {
        &self.players[self.current_player_index]
    }

    pub fn last_dice(&self) -> (u8, u8) {
        self.last_dice
    }

    /// Cumulative narration for the most recent `roll_dice` and any
    /// buy/decline that followed it.
    pub fn last_message(&self) -> &str {
        &self.last_message
    }

    pub fn is_waiting_for_property_decision(&self) -> bool {
        self.waiting_for_decision
    }

    /// Board index of the property awaiting buy/decline, if any.
    pub fn pending_property_index(&self) -> Option<usize> {
        self.pending_property
    }

    pub fn pending_property(&self) -> Option<&crate::board::Property> {
        self.pending_property.and_then(|i| self.board.property(i))
    }

    /// The game ends when at most one player is still solvent.
    pub fn is_game_over(&self) -> bool {
        self.alive_indices().len() <= 1
    }

    pub fn winner(&self) -> Option<&Player> {
        self.winner_index().map(|i| &self.players[i])
    }

    pub fn winner_index(&self) -> Option<usize> {
        match self.alive_indices().as_slice() {
            [sole] => Some(*sole),
            _ => None,
        }
    }

    fn alive_indices(&self) -> Vec<usize> {
        self.players
            .iter()
            .enumerate()
            .filter(|(_, p)| !p.is_bankrupt)
            .map(|(i, _)| i)
            .collect()
    }

    // --- commands --------------------------------------------------------

    /// Take the current player through one roll: jail fee, movement with
    /// GO credit, landing resolution, and (unless doubles keep the turn or
    /// a purchase decision is pending) turn advance.
    pub fn roll_dice(&mut self) {
        if self.turn_in_progress {
            return;
        }
        self.turn_in_progress = true;
        self.last_message.clear();

        let idx = self.current_player_index;

        if self.players[idx].in_jail {
            let fee = self.rules.jail_fee;
            if !self.players[idx].debit(fee) {
                self.log(format!(
                    "{} cannot afford the jail fee and goes bankrupt!",
                    self.players[idx].name
                ));
                self.bankrupt_player(idx);
                self.advance_turn();
                self.turn_in_progress = false;
                return;
            }
            self.players[idx].in_jail = false;
            self.log(format!(
                "{} paid ${} to get out of jail.",
                self.players[idx].name, fee
            ));
        }

        let d1 = self.rng.roll_die();
        let d2 = self.rng.roll_die();
        self.last_dice = (d1, d2);
        let dice_sum = usize::from(d1) + usize::from(d2);
        let is_doubles = d1 == d2;

        let mut roll_line = format!("Rolled: {} + {} = {}", d1, d2, dice_sum);
        if is_doubles {
            roll_line.push_str(" (DOUBLES!)");
        }
        self.log(roll_line);
        tracing::debug!(d1, d2, player = %self.players[idx].name, "dice roll");

        if is_doubles {
            self.players[idx].consecutive_doubles += 1;
            if self.players[idx].consecutive_doubles >= self.rules.max_consecutive_doubles {
                self.log("Three consecutive doubles! Go to Jail!");
                self.jail_player(idx);
                self.advance_turn();
                self.turn_in_progress = false;
                return;
            }
        }

        let size = self.board.size();
        let raw = self.players[idx].position + dice_sum;
        let new_position = raw % size;
        let passed_go = raw >= size;

        self.players[idx].position = new_position;

        if passed_go {
            self.players[idx].credit(self.rules.go_reward);
            self.log(format!(
                "{} passed GO and collects ${}.",
                self.players[idx].name, self.rules.go_reward
            ));
        }

        self.resolve_landing(idx, new_position);

        if !is_doubles && !self.waiting_for_decision {
            self.players[idx].reset_doubles_streak();
            self.advance_turn();
        }
        self.turn_in_progress = false;
    }

    /// Accept the pending purchase offer. No-op unless a decision is
    /// pending.
    pub fn buy_property(&mut self) {
        if !self.waiting_for_decision {
            return;
        }
        let Some(pos) = self.pending_property else {
            return;
        };
        let idx = self.current_player_index;
        let price = self.board.property(pos).map_or(0, |p| p.price);

        // Affordability was checked at landing time; a failed debit here
        // still aborts the purchase rather than granting a free deed.
        if self.players[idx].debit(price) {
            let bought = self.board.property_mut(pos).map(|property| {
                property.set_owner(idx);
                property.name.clone()
            });
            if let Some(name) = bought {
                self.log(format!("{} bought {}.", self.players[idx].name, name));
                tracing::info!(
                    player = %self.players[idx].name,
                    property = %name,
                    price,
                    "property purchased"
                );
            }
        }

        self.waiting_for_decision = false;
        self.pending_property = None;
        self.finish_decision();
    }

    /// Decline the pending purchase offer. No-op unless a decision is
    /// pending.
    pub fn decline_property(&mut self) {
        if !self.waiting_for_decision {
            return;
        }
        self.log(format!(
            "{} declined to buy.",
            self.players[self.current_player_index].name
        ));
        self.waiting_for_decision = false;
        self.pending_property = None;
        self.finish_decision();
    }

    /// After buy/decline, the turn passes unless the triggering roll was
    /// doubles (the same player rolls again).
    fn finish_decision(&mut self) {
        let (d1, d2) = self.last_dice;
        if d1 != d2 {
            self.players[self.current_player_index].reset_doubles_streak();
            self.advance_turn();
        }
    }

    /// True if a house can go up on the property at `pos`: the owner holds
    /// the full color set, the property can take another house, and the
    /// owner can pay for it. Pure; safe to call at any time.
    pub fn can_build_house(&self, pos: usize) -> bool {
        let Some(property) = self.board.property(pos) else {
            return false;
        };
        let Some(owner) = property.owner else {
            return false;
        };
        if !self.owns_full_color_set(owner, &property.color_set) {
            return false;
        }
        property.can_add_house() && self.players[owner].cash >= property.house_price
    }

    /// True if the property at `pos` can be upgraded to a hotel: full color
    /// set at four houses each, the property itself hotel-ready, and the
    /// owner able to pay.
    pub fn can_build_hotel(&self, pos: usize) -> bool {
        let Some(property) = self.board.property(pos) else {
            return false;
        };
        let Some(owner) = property.owner else {
            return false;
        };
        for i in self.board.color_set_indices(&property.color_set) {
            let Some(p) = self.board.property(i) else {
                return false;
            };
            if p.owner != Some(owner) || p.houses != 4 {
                return false;
            }
        }
        property.can_add_hotel() && self.players[owner].cash >= property.house_price
    }

    pub fn build_house(&mut self, pos: usize) {
        if !self.can_build_house(pos) {
            return;
        }
        let (owner, cost) = match self.board.property(pos) {
            Some(p) => match p.owner {
                Some(o) => (o, p.house_price),
                None => return,
            },
            None => return,
        };
        self.players[owner].debit(cost);
        if let Some(property) = self.board.property_mut(pos) {
            property.add_house();
            tracing::debug!(property = %property.name, houses = property.houses, "house built");
        }
    }

    pub fn build_hotel(&mut self, pos: usize) {
        if !self.can_build_hotel(pos) {
            return;
        }
        let (owner, cost) = match self.board.property(pos) {
            Some(p) => match p.owner {
                Some(o) => (o, p.house_price),
                None => return,
            },
            None => return,
        };
        self.players[owner].debit(cost);
        if let Some(property) = self.board.property_mut(pos) {
            property.add_hotel();
            tracing::debug!(property = %property.name, "hotel built");
        }
    }

    // --- persistence -----------------------------------------------------

    /// Write the session to `savedata/<name>.txt`. The live state is not
    /// touched either way.
    pub fn save(&self, name: &str) -> Result<(), String> {
        save::save_game(name, &self.board, &self.players, self.current_player_index)
    }

    /// Replace the session with a saved one. On failure the current session
    /// stays authoritative and unchanged.
    pub fn load(&mut self, name: &str) -> Result<(), String> {
        let loaded = save::load_game(name)?;
        self.rules = loaded.rules;
        self.board = loaded.board;
        self.players = loaded.players;
        self.current_player_index = loaded.current_player_index;
        self.last_dice = (0, 0);
        self.last_message.clear();
        self.pending_property = None;
        self.waiting_for_decision = false;
        self.turn_in_progress = false;
        Ok(())
    }

    // --- internals -------------------------------------------------------

    fn resolve_landing(&mut self, idx: usize, pos: usize) {
        let space_name = self.board.space_name(pos).to_string();
        self.log(format!("{} lands on {}.", self.players[idx].name, space_name));

        let Some(space_type) = self.rules.space(pos).map(|s| s.space_type) else {
            return;
        };
        match space_type {
            SpaceType::Property => self.resolve_property_landing(idx, pos),
            SpaceType::Chance => self.draw_card(idx, "Chance", &CHANCE_DECK),
            SpaceType::CommunityChest => {
                self.draw_card(idx, "Community Chest", &COMMUNITY_CHEST_DECK)
            }
            // Landing on Jail by movement is just visiting.
            SpaceType::Go | SpaceType::Jail | SpaceType::FreeParking => {}
        }
    }

    fn resolve_property_landing(&mut self, idx: usize, pos: usize) {
        let Some(property) = self.board.property(pos) else {
            return;
        };
        let owner = property.owner;
        let price = property.price;
        let rent = property.rent();

        match owner {
            None => {
                if self.players[idx].cash >= price {
                    self.pending_property = Some(pos);
                    self.waiting_for_decision = true;
                } else {
                    self.log(format!(
                        "{} cannot afford this property.",
                        self.players[idx].name
                    ));
                }
            }
            Some(owner) if owner != idx => {
                self.log(format!(
                    "Owned by {}. Rent = ${}.",
                    self.players[owner].name, rent
                ));
                if self.players[idx].debit(rent) {
                    self.players[owner].credit(rent);
                    self.log(format!(
                        "{} paid ${} to {}.",
                        self.players[idx].name, rent, self.players[owner].name
                    ));
                } else {
                    self.log(format!(
                        "{} cannot afford rent and goes bankrupt!",
                        self.players[idx].name
                    ));
                    self.bankrupt_player(idx);
                }
            }
            Some(_) => self.log("You own this property."),
        }
    }

    fn draw_card(&mut self, idx: usize, deck_name: &str, deck: &[Card]) {
        let card = deck[self.rng.pick(deck.len())];
        self.log(format!("{}: {}", deck_name, card.text));

        match card.effect {
            Effect::AdvanceToGo => {
                self.players[idx].position = self.rules.go_index;
                self.players[idx].credit(self.rules.go_reward);
            }
            Effect::Collect(amount) => self.players[idx].credit(amount),
            Effect::GoToJail => self.jail_player(idx),
            Effect::Pay(amount) => {
                if !self.players[idx].debit(amount) {
                    self.log(format!(
                        "{} cannot pay and goes bankrupt!",
                        self.players[idx].name
                    ));
                    self.bankrupt_player(idx);
                }
            }
            Effect::Nothing => {}
        }
    }

    fn owns_full_color_set(&self, owner: usize, color_set: &str) -> bool {
        self.board
            .color_set_indices(color_set)
            .iter()
            .all(|&i| self.board.property(i).map_or(false, |p| p.owner == Some(owner)))
    }

    fn jail_player(&mut self, idx: usize) {
        self.players[idx].position = self.board.jail_index();
        self.players[idx].in_jail = true;
        self.players[idx].reset_doubles_streak();
        tracing::info!(player = %self.players[idx].name, "sent to jail");
    }

    fn bankrupt_player(&mut self, idx: usize) {
        self.players[idx].is_bankrupt = true;
        self.players[idx].cash = 0;
        for (_, property) in self.board.properties_mut() {
            if property.owner == Some(idx) {
                property.release_ownership();
            }
        }
        tracing::info!(player = %self.players[idx].name, "bankrupt");
    }

    /// Round-robin to the next solvent player, bounded by one full lap.
    fn advance_turn(&mut self) {
        if self.players.is_empty() {
            return;
        }
        let n = self.players.len();
        self.current_player_index = (self.current_player_index + 1) % n;
        let mut steps = 0;
        while self.players[self.current_player_index].is_bankrupt && steps < n {
            self.current_player_index = (self.current_player_index + 1) % n;
            steps += 1;
        }
    }

    fn log(&mut self, line: impl AsRef<str>) {
        if !self.last_message.is_empty() {
            self.last_message.push('\n');
        }
        self.last_message.push_str(line.as_ref());
    }
}

impl std::fmt::Debug for GameEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameEngine")
            .field("players", &self.players)
            .field("current_player_index", &self.current_player_index)
            .field("last_dice", &self.last_dice)
            .field("waiting_for_decision", &self.waiting_for_decision)
            .finish_non_exhaustive()
    }
}
