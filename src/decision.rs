use std::collections::VecDeque;

use serde::Serialize;

use crate::action::ActionType;
use crate::player::Role;

/// What everyone at the table can see about a player: identity, coin count
/// and how many cards are still face down. Never the roles themselves.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PublicPlayer {
    pub id: usize,
    pub name: String,
    pub coins: u8,
    pub hidden_cards: usize,
}

/// Per-player decision policy. The engine blocks on every call; implementors
/// decide however they like (scripted, randomized, heuristic) as long as the
/// contracts below hold.
pub trait DecisionMaker {
    /// Pick one action out of `legal`, plus the id of one of `targets` when
    /// the action requires a target.
    fn choose_action(
        &mut self,
        legal: &[ActionType],
        targets: &[PublicPlayer],
    ) -> (ActionType, Option<usize>);

    /// Whether to dispute `claimant`'s claim to hold `role`.
    fn challenge_claim(&mut self, claimant: &PublicPlayer, role: Role) -> bool;

    /// Asked only when a challenged claim is actually true: reveal the card
    /// as proof (it gets swapped for a fresh draw) or fold and lose the
    /// challenge anyway. Folding with proof in hand is legal, just bad.
    fn reveal_proof(&mut self, role: Role) -> bool;

    /// Counter `action` by claiming one of `options`, or let it through.
    fn declare_counter(&mut self, action: ActionType, options: &[Role]) -> Option<Role>;

    /// Index into `hidden` of the influence to flip face up. Only asked when
    /// two or more cards are still hidden.
    fn choose_influence_to_reveal(&mut self, hidden: &[Role]) -> usize;

    /// Keep exactly `keep_count` roles out of `new_cards` and `hidden`
    /// combined; the rest go back to the deck.
    fn select_cards_to_keep(
        &mut self,
        new_cards: &[Role],
        hidden: &[Role],
        keep_count: usize,
    ) -> Vec<Role>;
}

/// Canned answers for tests. Every queue falls back to the most passive legal
/// response once it runs dry: take income, never challenge, always prove,
/// never counter, reveal the first card, keep the current hand.
#[derive(Default)]
pub struct ScriptedDecider {
    pub actions: VecDeque<(ActionType, Option<usize>)>,
    pub challenges: VecDeque<bool>,
    pub proofs: VecDeque<bool>,
    pub counters: VecDeque<Option<Role>>,
    pub reveals: VecDeque<usize>,
    pub keeps: VecDeque<Vec<Role>>,
}

impl DecisionMaker for ScriptedDecider {
    fn choose_action(
        &mut self,
        _legal: &[ActionType],
        _targets: &[PublicPlayer],
    ) -> (ActionType, Option<usize>) {
        self.actions
            .pop_front()
            .unwrap_or((ActionType::Income, None))
    }

    fn challenge_claim(&mut self, _claimant: &PublicPlayer, _role: Role) -> bool {
        self.challenges.pop_front().unwrap_or(false)
    }

    fn reveal_proof(&mut self, _role: Role) -> bool {
        self.proofs.pop_front().unwrap_or(true)
    }

    fn declare_counter(&mut self, _action: ActionType, _options: &[Role]) -> Option<Role> {
        self.counters.pop_front().unwrap_or(None)
    }

    fn choose_influence_to_reveal(&mut self, _hidden: &[Role]) -> usize {
        self.reveals.pop_front().unwrap_or(0)
    }

    fn select_cards_to_keep(
        &mut self,
        _new_cards: &[Role],
        hidden: &[Role],
        keep_count: usize,
    ) -> Vec<Role> {
        self.keeps
            .pop_front()
            .unwrap_or_else(|| hidden[..keep_count].to_vec())
    }
}
