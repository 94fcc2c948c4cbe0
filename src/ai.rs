// baseline automated opponents

use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg64Mcg;

use crate::action::ActionType;
use crate::decision::{DecisionMaker, PublicPlayer};
use crate::player::Role;

// rough value ranking used when a bot has to pick between roles
fn role_weight(role: Role) -> u8 {
    match role {
        Role::Duke => 5,
        Role::Assassin => 4,
        Role::Captain => 3,
        Role::Ambassador => 2,
        Role::Contessa => 1,
    }
}

/// Picks uniformly at random everywhere. Useful as a baseline and for
/// soak-testing the turn loop.
pub struct RandomDecider {
    rng: Pcg64Mcg,
}

impl RandomDecider {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Pcg64Mcg::seed_from_u64(seed),
        }
    }
}

impl DecisionMaker for RandomDecider {
    fn choose_action(
        &mut self,
        legal: &[ActionType],
        targets: &[PublicPlayer],
    ) -> (ActionType, Option<usize>) {
        let action = *legal.choose(&mut self.rng).unwrap();
        let target = targets.choose(&mut self.rng).map(|p| p.id);
        (action, target)
    }

    fn challenge_claim(&mut self, _claimant: &PublicPlayer, _role: Role) -> bool {
        self.rng.gen_bool(0.1)
    }

    fn reveal_proof(&mut self, _role: Role) -> bool {
        self.rng.gen_bool(0.5)
    }

    fn declare_counter(&mut self, _action: ActionType, options: &[Role]) -> Option<Role> {
        if self.rng.gen_bool(0.5) {
            options.choose(&mut self.rng).copied()
        } else {
            None
        }
    }

    fn choose_influence_to_reveal(&mut self, hidden: &[Role]) -> usize {
        self.rng.gen_range(0..hidden.len())
    }

    fn select_cards_to_keep(
        &mut self,
        new_cards: &[Role],
        hidden: &[Role],
        keep_count: usize,
    ) -> Vec<Role> {
        let mut pool: Vec<Role> = new_cards.iter().chain(hidden.iter()).copied().collect();
        pool.shuffle(&mut self.rng);
        pool.truncate(keep_count);
        pool
    }
}

/// Greedy opponent: coups or assassinates whenever it can afford to and
/// taxes up otherwise, picks the opponent closest to elimination, hoards the
/// strongest roles, always proves honest claims and gives up the weakest
/// influence when forced to reveal.
pub struct HeuristicDecider {
    rng: Pcg64Mcg,
}

impl HeuristicDecider {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Pcg64Mcg::seed_from_u64(seed),
        }
    }
}

impl DecisionMaker for HeuristicDecider {
    fn choose_action(
        &mut self,
        legal: &[ActionType],
        targets: &[PublicPlayer],
    ) -> (ActionType, Option<usize>) {
        let action = [ActionType::Coup, ActionType::Assassinate, ActionType::Tax]
            .into_iter()
            .find(|a| legal.contains(a))
            .unwrap_or(ActionType::Income);
        let target = targets.iter().min_by_key(|p| p.hidden_cards).map(|p| p.id);
        (action, target)
    }

    fn challenge_claim(&mut self, _claimant: &PublicPlayer, _role: Role) -> bool {
        self.rng.gen_bool(0.1)
    }

    fn reveal_proof(&mut self, _role: Role) -> bool {
        true
    }

    fn declare_counter(&mut self, _action: ActionType, options: &[Role]) -> Option<Role> {
        // counters most of the time, claiming the strongest available role
        if self.rng.gen_bool(0.6) {
            options.iter().copied().max_by_key(|&role| role_weight(role))
        } else {
            None
        }
    }

    fn choose_influence_to_reveal(&mut self, hidden: &[Role]) -> usize {
        hidden
            .iter()
            .enumerate()
            .min_by_key(|(_, &role)| role_weight(role))
            .map(|(idx, _)| idx)
            .unwrap_or(0)
    }

    fn select_cards_to_keep(
        &mut self,
        new_cards: &[Role],
        hidden: &[Role],
        keep_count: usize,
    ) -> Vec<Role> {
        let mut pool: Vec<Role> = new_cards.iter().chain(hidden.iter()).copied().collect();
        pool.sort_by_key(|&role| std::cmp::Reverse(role_weight(role)));
        pool.truncate(keep_count);
        pool
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand_pcg::Pcg64Mcg;

    use crate::action::ActionType::{
        Assassinate, Coup, Exchange, ForeignAid, Income, Steal, Tax,
    };
    use crate::ai::{HeuristicDecider, RandomDecider};
    use crate::decision::{DecisionMaker, PublicPlayer};
    use crate::engine::Game;
    use crate::player::Role::{Captain, Contessa, Duke};

    fn opponent(id: usize, hidden_cards: usize) -> PublicPlayer {
        PublicPlayer {
            id,
            name: format!("P{id}"),
            coins: 2,
            hidden_cards,
        }
    }

    #[test]
    fn heuristic_takes_the_strongest_legal_action() {
        let mut decider = HeuristicDecider::new(2);
        let targets = [opponent(1, 2), opponent(2, 1)];

        let base = [Income, ForeignAid, Tax, Exchange, Steal];
        assert_eq!(decider.choose_action(&base, &targets), (Tax, Some(2)));

        let flush = [Income, ForeignAid, Tax, Exchange, Steal, Assassinate];
        assert_eq!(decider.choose_action(&flush, &targets).0, Assassinate);

        // forced coup aims at the opponent closest to elimination
        assert_eq!(decider.choose_action(&[Coup], &targets), (Coup, Some(2)));
    }

    #[test]
    fn heuristic_keeps_the_strongest_cards() {
        let mut decider = HeuristicDecider::new(1);
        let kept = decider.select_cards_to_keep(&[Captain, Contessa], &[Duke], 1);
        assert_eq!(kept, vec![Duke]);

        let kept = decider.select_cards_to_keep(&[Captain, Contessa], &[Duke, Contessa], 2);
        assert_eq!(kept, vec![Duke, Captain]);
    }

    #[test]
    fn heuristic_reveals_the_weakest_influence() {
        let mut decider = HeuristicDecider::new(1);
        assert_eq!(decider.choose_influence_to_reveal(&[Duke, Contessa]), 1);
        assert_eq!(decider.choose_influence_to_reveal(&[Contessa, Captain]), 0);
    }

    #[test]
    fn random_keep_selection_comes_from_the_pool() {
        let mut decider = RandomDecider::new(3);
        let kept = decider.select_cards_to_keep(&[Captain, Contessa], &[Duke, Duke], 2);
        assert_eq!(kept.len(), 2);
        for role in kept {
            assert!([Captain, Contessa, Duke].contains(&role));
        }
    }

    #[test]
    fn mixed_bots_play_to_completion() {
        let mut rng = Pcg64Mcg::seed_from_u64(42);
        let seats = (0..5)
            .map(|i| {
                let decider: Box<dyn DecisionMaker> = if i % 2 == 0 {
                    Box::new(HeuristicDecider::new(i))
                } else {
                    Box::new(RandomDecider::new(i))
                };
                (format!("Bot {i}"), decider)
            })
            .collect();
        let mut game = Game::new(seats, &mut rng).unwrap();

        for _ in 0..2000 {
            game.play_turn(&mut rng).unwrap();
            if game.winner().is_some() {
                break;
            }
        }
        assert!(game.winner().is_some());
    }
}
