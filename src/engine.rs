use std::fmt;
use std::fmt::{Debug, Formatter};

use log::{debug, info};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::action::ActionType;
use crate::deck::{copies_per_role, Deck};
use crate::decision::{DecisionMaker, PublicPlayer};
use crate::error::GameError;
use crate::player::{Influence, Player, Role};

/// One entry of the in-memory game log, suitable for replay dumps.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    ActionDeclared {
        actor: usize,
        action: ActionType,
        target: Option<usize>,
    },
    ChallengeRaised {
        challenger: usize,
        accused: usize,
        role: Role,
    },
    ClaimProven {
        accused: usize,
        role: Role,
    },
    ClaimDisproven {
        accused: usize,
        role: Role,
    },
    CounterDeclared {
        player: usize,
        action: ActionType,
        role: Role,
    },
    CoinsPaid {
        player: usize,
        amount: u8,
    },
    InfluenceLost {
        player: usize,
        role: Role,
    },
    ActionResolved {
        actor: usize,
        action: ActionType,
        target: Option<usize>,
    },
    ActionCancelled {
        actor: usize,
        action: ActionType,
    },
    PlayerEliminated {
        player: usize,
    },
}

impl fmt::Display for GameEvent {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            GameEvent::ActionDeclared {
                actor,
                action,
                target: Some(target),
            } => {
                write!(f, "Player {actor} declares {action:?} against player {target}")
            }
            GameEvent::ActionDeclared { actor, action, .. } => {
                write!(f, "Player {actor} declares {action:?}")
            }
            GameEvent::ChallengeRaised {
                challenger,
                accused,
                role,
            } => {
                write!(f, "Player {challenger} challenges player {accused}'s claim to {role:?}")
            }
            GameEvent::ClaimProven { accused, role } => {
                write!(f, "Player {accused} proves the {role:?} claim")
            }
            GameEvent::ClaimDisproven { accused, role } => {
                write!(f, "Player {accused} cannot back up the {role:?} claim")
            }
            GameEvent::CounterDeclared { player, action, role } => {
                write!(f, "Player {player} counters {action:?} with {role:?}")
            }
            GameEvent::CoinsPaid { player, amount } => {
                write!(f, "Player {player} pays {amount} coins")
            }
            GameEvent::InfluenceLost { player, role } => {
                write!(f, "Player {player} flips {role:?} face up")
            }
            GameEvent::ActionResolved { actor, action, .. } => {
                write!(f, "Player {actor} resolves {action:?}")
            }
            GameEvent::ActionCancelled { actor, action } => {
                write!(f, "Player {actor}'s {action:?} is cancelled")
            }
            GameEvent::PlayerEliminated { player } => {
                write!(f, "Player {player} is out of influence")
            }
        }
    }
}

pub struct Game {
    pub(crate) players: Vec<Player>,
    pub(crate) deck: Deck,
    current_player_idx: usize,
    turn: usize,
    events: Vec<GameEvent>,
}

impl Debug for Game {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "T {} | P {}", self.turn, self.current_player_idx)?;
        for (player_idx, player) in self.players.iter().enumerate() {
            writeln!(f, "\tP {player_idx}: ${} | {:?}", player.coins(), player.influences())?;
        }
        Ok(())
    }
}

impl Game {
    /// Set up a game: size and shuffle the deck, shuffle the seating order,
    /// reassign ids 0..n-1 in seat order and deal everyone 2 cards.
    pub fn new<R: Rng>(
        seats: Vec<(String, Box<dyn DecisionMaker>)>,
        rng: &mut R,
    ) -> Result<Self, GameError> {
        let num_players = seats.len();
        if !(3..=10).contains(&num_players) {
            return Err(GameError::InvalidPlayerCount(num_players));
        }

        let mut deck = Deck::new(copies_per_role(num_players), rng);

        let mut players: Vec<Player> = seats
            .into_iter()
            .map(|(name, decider)| Player::new(name, decider))
            .collect();

        // seating order is fixed for the whole game, so shuffle it once here
        players.shuffle(rng);
        for (idx, player) in players.iter_mut().enumerate() {
            player.id = idx;
            player.influences = deck.draw(2)?.into_iter().map(Influence::new).collect();
        }

        Ok(Self {
            players,
            deck,
            current_player_idx: 0,
            turn: 0,
            events: Vec::new(),
        })
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    pub fn turn(&self) -> usize {
        self.turn
    }

    pub fn current_player_idx(&self) -> usize {
        self.current_player_idx
    }

    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    pub fn is_over(&self) -> bool {
        self.players.iter().filter(|p| p.is_alive()).count() <= 1
    }

    pub fn winner(&self) -> Option<usize> {
        let mut alive = self.players.iter().enumerate().filter(|(_, p)| p.is_alive());
        match (alive.next(), alive.next()) {
            (Some((idx, _)), None) => Some(idx),
            _ => None,
        }
    }

    /// What a player may declare this turn given their coins. At 10+ coins
    /// the coup is forced and nothing else is offered.
    pub fn legal_actions(&self, player_idx: usize) -> Vec<ActionType> {
        let coins = self.players[player_idx].coins();
        if coins >= 10 {
            return vec![ActionType::Coup];
        }

        let mut actions = vec![
            ActionType::Income,
            ActionType::ForeignAid,
            ActionType::Tax,
            ActionType::Exchange,
            ActionType::Steal,
        ];
        if coins >= 3 {
            actions.push(ActionType::Assassinate);
        }
        if coins >= 7 {
            actions.push(ActionType::Coup);
        }
        actions
    }

    /// Public view of every living player except `exclude_idx`.
    pub fn target_list(&self, exclude_idx: usize) -> Vec<PublicPlayer> {
        self.players
            .iter()
            .enumerate()
            .filter(|(idx, player)| *idx != exclude_idx && player.is_alive())
            .map(|(idx, _)| self.public_info(idx))
            .collect()
    }

    fn public_info(&self, player_idx: usize) -> PublicPlayer {
        let player = &self.players[player_idx];
        PublicPlayer {
            id: player.id(),
            name: player.name().to_string(),
            coins: player.coins(),
            hidden_cards: player.hidden_count(),
        }
    }

    fn other_player_indexes(&self, exclude_idx: usize) -> Vec<usize> {
        (1..self.players.len())
            .map(|n| (exclude_idx + n) % self.players.len())
            .filter(|&player_idx| self.players[player_idx].is_alive())
            .collect()
    }

    // poll living players in seat order starting after `after`, stopping at
    // the first one whose answer is Some; first to answer wins priority
    fn poll_in_seat_order<T>(
        &mut self,
        after: usize,
        mut ask: impl FnMut(&mut Player) -> Option<T>,
    ) -> Option<(usize, T)> {
        for player_idx in self.other_player_indexes(after) {
            if let Some(answer) = ask(&mut self.players[player_idx]) {
                return Some((player_idx, answer));
            }
        }
        None
    }

    fn reveal_influence(&mut self, player_idx: usize) -> Result<(), GameError> {
        let lost = self.players[player_idx].lose_influence()?;
        self.events.push(GameEvent::InfluenceLost {
            player: player_idx,
            role: lost,
        });
        if !self.players[player_idx].is_alive() {
            info!("player {player_idx} is out of the game");
            self.events.push(GameEvent::PlayerEliminated { player: player_idx });
        }
        Ok(())
    }

    /// Adjudicate one dispute over `accused`'s claim to `role`. Returns true
    /// when the claim is disproven (the disputed action or counter is off).
    fn resolve_challenge<R: Rng>(
        &mut self,
        accused: usize,
        accuser: usize,
        role: Role,
        rng: &mut R,
    ) -> Result<bool, GameError> {
        if !self.players[accused].has_hidden_role(role) {
            debug!("player {accused} was bluffing {role:?}");
            self.events.push(GameEvent::ClaimDisproven { accused, role });
            self.reveal_influence(accused)?;
            return Ok(true);
        }

        if self.players[accused].decider.reveal_proof(role) {
            debug!("player {accused} proves {role:?}, player {accuser} pays");
            self.events.push(GameEvent::ClaimProven { accused, role });
            // swap the proving card for a fresh draw so the accuser learns
            // nothing about the rest of the hand
            self.swap_hidden_card(accused, role, rng)?;
            self.reveal_influence(accuser)?;
            Ok(false)
        } else {
            // refusing to show proof counts as getting caught
            debug!("player {accused} declines to prove {role:?}");
            self.events.push(GameEvent::ClaimDisproven { accused, role });
            self.reveal_influence(accused)?;
            Ok(true)
        }
    }

    // single-card exchange: the named hidden card goes back to the deck
    // (reshuffled), a replacement is drawn face down
    fn swap_hidden_card<R: Rng>(
        &mut self,
        player_idx: usize,
        role: Role,
        rng: &mut R,
    ) -> Result<(), GameError> {
        let player = &mut self.players[player_idx];
        let slot = player
            .influences
            .iter()
            .position(|inf| !inf.is_revealed() && inf.role() == role)
            .ok_or(GameError::NoHiddenInfluence(player_idx))?;
        player.influences.remove(slot);

        self.deck.return_cards(vec![role], rng);
        let replacement = self.deck.draw(1)?;
        self.players[player_idx]
            .influences
            .push(Influence::new(replacement[0]));
        Ok(())
    }

    /// Ambassador exchange: draw 2, keep as many as were hidden before from
    /// the combined pool, return the rest.
    fn exchange_cards<R: Rng>(&mut self, actor: usize, rng: &mut R) -> Result<(), GameError> {
        let hidden = self.players[actor].hidden_roles();
        let keep_count = hidden.len();
        if keep_count == 0 {
            return Err(GameError::NoHiddenInfluence(actor));
        }

        let drawn = self.deck.draw(2)?;
        let selected = self.players[actor]
            .decider
            .select_cards_to_keep(&drawn, &hidden, keep_count);
        if selected.len() != keep_count {
            return Err(GameError::InvalidSelection(format!(
                "expected {keep_count} cards kept, got {}",
                selected.len()
            )));
        }

        // whatever is not kept goes back; every kept card must come out of
        // the offered pool, counting multiplicity
        let mut leftovers: Vec<Role> = drawn.iter().chain(hidden.iter()).copied().collect();
        for role in &selected {
            let slot = leftovers.iter().position(|r| r == role).ok_or_else(|| {
                GameError::InvalidSelection(format!("{role:?} was not among the offered cards"))
            })?;
            leftovers.remove(slot);
        }

        let player = &mut self.players[actor];
        player.influences.retain(|inf| inf.is_revealed());
        player
            .influences
            .extend(selected.into_iter().map(Influence::new));

        self.deck.return_cards(leftovers, rng);
        Ok(())
    }

    fn invalid_target(action: ActionType, reason: impl Into<String>) -> GameError {
        GameError::InvalidTarget {
            action,
            reason: reason.into(),
        }
    }

    // effects only, applied once the action has survived every dispute
    fn execute_action<R: Rng>(
        &mut self,
        action: ActionType,
        actor: usize,
        target: Option<usize>,
        rng: &mut R,
    ) -> Result<(), GameError> {
        match action {
            ActionType::Income => self.players[actor].gain_coins(1),
            ActionType::ForeignAid => self.players[actor].gain_coins(2),
            ActionType::Tax => self.players[actor].gain_coins(3),
            ActionType::Steal => {
                let target =
                    target.ok_or_else(|| Self::invalid_target(action, "missing target"))?;
                let stolen = self.players[target].coins().min(2);
                self.players[target].lose_coins(stolen);
                self.players[actor].gain_coins(stolen);
            }
            ActionType::Assassinate | ActionType::Coup => {
                let target =
                    target.ok_or_else(|| Self::invalid_target(action, "missing target"))?;
                // the target can already be dead here if their counter bluff
                // cost them their last influence
                if self.players[target].is_alive() {
                    self.reveal_influence(target)?;
                }
            }
            ActionType::Exchange => self.exchange_cards(actor, rng)?,
        }

        self.events.push(GameEvent::ActionResolved {
            actor,
            action,
            target,
        });
        Ok(())
    }

    fn advance_turn(&mut self) {
        self.turn += 1;
        let mut idx = (self.current_player_idx + 1) % self.players.len();
        while !self.players[idx].is_alive() && idx != self.current_player_idx {
            idx = (idx + 1) % self.players.len();
        }
        self.current_player_idx = idx;
    }

    /// Run one full turn for the player on seat: selection, claim challenge,
    /// cost, counter declaration, counter challenge, execution, advance.
    /// A cancelled action still advances seat and turn counter. No-op once
    /// the game is over.
    pub fn play_turn<R: Rng>(&mut self, rng: &mut R) -> Result<(), GameError> {
        if self.is_over() {
            return Ok(());
        }

        let actor = self.current_player_idx;

        // selection
        let legal = self.legal_actions(actor);
        let targets = self.target_list(actor);
        let (action, chosen_target) = self.players[actor].decider.choose_action(&legal, &targets);
        if !legal.contains(&action) {
            return Err(GameError::UnknownAction { player: actor, action });
        }
        let spec = action.spec();
        let target = if spec.requires_target {
            let target = chosen_target
                .ok_or_else(|| Self::invalid_target(action, "action requires a target"))?;
            if target >= self.players.len()
                || target == actor
                || !self.players[target].is_alive()
            {
                return Err(Self::invalid_target(
                    action,
                    format!("player {target} is not a living opponent"),
                ));
            }
            Some(target)
        } else {
            None
        };

        debug!("turn {}: player {actor} declares {action:?}, target {target:?}", self.turn);
        self.events.push(GameEvent::ActionDeclared {
            actor,
            action,
            target,
        });

        // claim-challenge phase
        if let Some(claimed) = spec.claimed_role {
            let claimant = self.public_info(actor);
            let challenger = self
                .poll_in_seat_order(actor, |p| {
                    p.decider.challenge_claim(&claimant, claimed).then_some(())
                })
                .map(|(idx, ())| idx);

            if let Some(challenger) = challenger {
                self.events.push(GameEvent::ChallengeRaised {
                    challenger,
                    accused: actor,
                    role: claimed,
                });
                if self.resolve_challenge(actor, challenger, claimed, rng)? {
                    self.events.push(GameEvent::ActionCancelled { actor, action });
                    self.advance_turn();
                    return Ok(());
                }
            }
        }

        // cost phase: charged now and never refunded, even if a counter
        // cancels the action later
        if spec.coin_cost > 0 {
            let coins = self.players[actor].coins();
            if coins < spec.coin_cost {
                return Err(GameError::InsufficientFunds {
                    player: actor,
                    coins,
                    cost: spec.coin_cost,
                    action,
                });
            }
            self.players[actor].lose_coins(spec.coin_cost);
            self.events.push(GameEvent::CoinsPaid {
                player: actor,
                amount: spec.coin_cost,
            });
        }

        // counter-declaration phase: the target alone may counter a targeted
        // action, anyone may counter an undirected one
        let mut counter: Option<(usize, Role)> = None;
        if !spec.counterable_by.is_empty() {
            counter = match target {
                Some(target) if self.players[target].is_alive() => self.players[target]
                    .decider
                    .declare_counter(action, spec.counterable_by)
                    .map(|role| (target, role)),
                Some(_) => None,
                None => self.poll_in_seat_order(actor, |p| {
                    p.decider.declare_counter(action, spec.counterable_by)
                }),
            };
        }

        // counter-challenge phase
        if let Some((declarer, counter_role)) = counter {
            if !spec.counterable_by.contains(&counter_role) {
                return Err(GameError::InvalidSelection(format!(
                    "{counter_role:?} cannot counter {action:?}"
                )));
            }
            self.events.push(GameEvent::CounterDeclared {
                player: declarer,
                action,
                role: counter_role,
            });

            let declarer_info = self.public_info(declarer);
            let challenger = self
                .poll_in_seat_order(declarer, |p| {
                    p.decider
                        .challenge_claim(&declarer_info, counter_role)
                        .then_some(())
                })
                .map(|(idx, ())| idx);

            let counter_stands = match challenger {
                // unopposed counter blocks the action
                None => true,
                Some(challenger) => {
                    self.events.push(GameEvent::ChallengeRaised {
                        challenger,
                        accused: declarer,
                        role: counter_role,
                    });
                    !self.resolve_challenge(declarer, challenger, counter_role, rng)?
                }
            };

            if counter_stands {
                self.events.push(GameEvent::ActionCancelled { actor, action });
                self.advance_turn();
                return Ok(());
            }
        }

        self.execute_action(action, actor, target, rng)?;
        self.advance_turn();
        Ok(())
    }
}
