use std::fmt::{Debug, Formatter};

use serde::{Deserialize, Serialize};

use crate::decision::DecisionMaker;
use crate::error::GameError;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    Duke,
    Assassin,
    Captain,
    Ambassador,
    Contessa,
}

pub static ROLE_VARIANTS: [Role; 5] = [
    Role::Duke,
    Role::Assassin,
    Role::Captain,
    Role::Ambassador,
    Role::Contessa,
];

/// One face-down role card. Revealing it is one-way; a revealed influence no
/// longer counts towards being alive.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Influence {
    role: Role,
    revealed: bool,
}

impl Influence {
    pub fn new(role: Role) -> Self {
        Self {
            role,
            revealed: false,
        }
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn is_revealed(&self) -> bool {
        self.revealed
    }

    pub(crate) fn reveal(&mut self) {
        self.revealed = true;
    }
}

pub struct Player {
    pub(crate) id: usize,
    pub(crate) name: String,
    pub(crate) coins: u8,
    pub(crate) influences: Vec<Influence>,
    pub(crate) decider: Box<dyn DecisionMaker>,
}

impl Player {
    pub(crate) fn new(name: String, decider: Box<dyn DecisionMaker>) -> Self {
        Self {
            id: 0,
            name,
            coins: 2,
            influences: Vec::new(),
            decider,
        }
    }

    pub fn id(&self) -> usize {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn coins(&self) -> u8 {
        self.coins
    }

    pub fn influences(&self) -> &[Influence] {
        &self.influences
    }

    // always recomputed from the influence list, never cached
    pub fn is_alive(&self) -> bool {
        self.influences.iter().any(|inf| !inf.revealed)
    }

    /// Roles of the still-hidden influences. Private information; opponents
    /// only ever see the count.
    pub fn hidden_roles(&self) -> Vec<Role> {
        self.influences
            .iter()
            .filter(|inf| !inf.revealed)
            .map(|inf| inf.role)
            .collect()
    }

    pub fn revealed_roles(&self) -> Vec<Role> {
        self.influences
            .iter()
            .filter(|inf| inf.revealed)
            .map(|inf| inf.role)
            .collect()
    }

    pub fn hidden_count(&self) -> usize {
        self.influences.iter().filter(|inf| !inf.revealed).count()
    }

    pub fn has_hidden_role(&self, role: Role) -> bool {
        self.influences
            .iter()
            .any(|inf| !inf.revealed && inf.role == role)
    }

    pub(crate) fn gain_coins(&mut self, n: u8) {
        self.coins += n;
    }

    // the engine validates affordability before calling this
    pub(crate) fn lose_coins(&mut self, n: u8) {
        self.coins -= n;
    }

    /// Flip one hidden influence face up. With two or more hidden cards the
    /// owning decision maker picks which one; a single hidden card is flipped
    /// without a choice.
    pub(crate) fn lose_influence(&mut self) -> Result<Role, GameError> {
        let hidden: Vec<usize> = self
            .influences
            .iter()
            .enumerate()
            .filter_map(|(idx, inf)| (!inf.revealed).then_some(idx))
            .collect();

        let slot = match hidden.len() {
            0 => return Err(GameError::NoHiddenInfluence(self.id)),
            1 => hidden[0],
            _ => {
                let roles: Vec<Role> = hidden.iter().map(|&idx| self.influences[idx].role).collect();
                let pick = self.decider.choose_influence_to_reveal(&roles);
                *hidden.get(pick).ok_or_else(|| {
                    GameError::InvalidSelection(format!(
                        "reveal index {pick} out of range for {} hidden cards",
                        roles.len()
                    ))
                })?
            }
        };

        self.influences[slot].reveal();
        Ok(self.influences[slot].role)
    }
}

impl Debug for Player {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} ({}): ${} | {:?}",
            self.name, self.id, self.coins, self.influences
        )
    }
}

#[cfg(test)]
mod tests {
    use crate::decision::ScriptedDecider;
    use crate::player::Role::{Ambassador, Captain, Contessa, Duke};
    use crate::player::{Influence, Player, Role};

    fn player_with(roles: &[Role], decider: ScriptedDecider) -> Player {
        let mut player = Player::new("test".to_string(), Box::new(decider));
        player.influences = roles.iter().map(|&role| Influence::new(role)).collect();
        player
    }

    #[test]
    fn aliveness_is_derived_from_influences() {
        let mut player = player_with(&[Duke, Captain], ScriptedDecider::default());
        assert!(player.is_alive());

        player.influences[0].reveal();
        assert!(player.is_alive());

        player.influences[1].reveal();
        assert!(!player.is_alive());
    }

    #[test]
    fn hidden_and_revealed_roles_partition_the_hand() {
        let mut player = player_with(&[Duke, Contessa], ScriptedDecider::default());
        player.influences[1].reveal();

        assert_eq!(player.hidden_roles(), vec![Duke]);
        assert_eq!(player.revealed_roles(), vec![Contessa]);
        assert_eq!(player.hidden_count(), 1);
        assert!(player.has_hidden_role(Duke));
        assert!(!player.has_hidden_role(Contessa));
    }

    #[test]
    fn losing_influence_consults_the_decider() {
        let mut decider = ScriptedDecider::default();
        decider.reveals.push_back(1);
        let mut player = player_with(&[Duke, Ambassador], decider);

        let lost = player.lose_influence().unwrap();
        assert_eq!(lost, Ambassador);
        assert_eq!(player.hidden_roles(), vec![Duke]);
    }

    #[test]
    fn single_hidden_influence_is_revealed_without_a_choice() {
        let mut player = player_with(&[Captain, Duke], ScriptedDecider::default());
        player.influences[0].reveal();

        let lost = player.lose_influence().unwrap();
        assert_eq!(lost, Duke);
        assert!(!player.is_alive());
    }

    #[test]
    fn losing_influence_with_none_hidden_fails() {
        let mut player = player_with(&[Duke], ScriptedDecider::default());
        player.influences[0].reveal();

        assert!(player.lose_influence().is_err());
    }

    #[test]
    fn out_of_range_reveal_choice_is_rejected() {
        let mut decider = ScriptedDecider::default();
        decider.reveals.push_back(5);
        let mut player = player_with(&[Duke, Captain], decider);

        assert!(player.lose_influence().is_err());
    }
}
