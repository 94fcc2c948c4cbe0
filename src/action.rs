use serde::{Deserialize, Serialize};

use crate::player::Role;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActionType {
    Income,
    ForeignAid,
    Coup,
    Tax,
    Assassinate,
    Steal,
    Exchange,
}

/// Static per-action metadata: whether a target is needed, which role the
/// actor implicitly claims, which roles can counter it, and its coin cost.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ActionSpec {
    pub requires_target: bool,
    pub claimed_role: Option<Role>,
    pub counterable_by: &'static [Role],
    pub coin_cost: u8,
}

static INCOME: ActionSpec = ActionSpec {
    requires_target: false,
    claimed_role: None,
    counterable_by: &[],
    coin_cost: 0,
};

static FOREIGN_AID: ActionSpec = ActionSpec {
    requires_target: false,
    claimed_role: None,
    counterable_by: &[Role::Duke],
    coin_cost: 0,
};

static COUP: ActionSpec = ActionSpec {
    requires_target: true,
    claimed_role: None,
    counterable_by: &[],
    coin_cost: 7,
};

static TAX: ActionSpec = ActionSpec {
    requires_target: false,
    claimed_role: Some(Role::Duke),
    counterable_by: &[],
    coin_cost: 0,
};

static ASSASSINATE: ActionSpec = ActionSpec {
    requires_target: true,
    claimed_role: Some(Role::Assassin),
    counterable_by: &[Role::Contessa],
    coin_cost: 3,
};

static STEAL: ActionSpec = ActionSpec {
    requires_target: true,
    claimed_role: Some(Role::Captain),
    counterable_by: &[Role::Captain, Role::Ambassador],
    coin_cost: 0,
};

static EXCHANGE: ActionSpec = ActionSpec {
    requires_target: false,
    claimed_role: Some(Role::Ambassador),
    counterable_by: &[],
    coin_cost: 0,
};

impl ActionType {
    pub fn spec(self) -> &'static ActionSpec {
        match self {
            ActionType::Income => &INCOME,
            ActionType::ForeignAid => &FOREIGN_AID,
            ActionType::Coup => &COUP,
            ActionType::Tax => &TAX,
            ActionType::Assassinate => &ASSASSINATE,
            ActionType::Steal => &STEAL,
            ActionType::Exchange => &EXCHANGE,
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::action::ActionType;
    use crate::player::Role::{Ambassador, Assassin, Captain, Contessa, Duke};

    #[test]
    fn claimed_roles_match_the_catalog() {
        assert_eq!(ActionType::Income.spec().claimed_role, None);
        assert_eq!(ActionType::ForeignAid.spec().claimed_role, None);
        assert_eq!(ActionType::Coup.spec().claimed_role, None);
        assert_eq!(ActionType::Tax.spec().claimed_role, Some(Duke));
        assert_eq!(ActionType::Assassinate.spec().claimed_role, Some(Assassin));
        assert_eq!(ActionType::Steal.spec().claimed_role, Some(Captain));
        assert_eq!(ActionType::Exchange.spec().claimed_role, Some(Ambassador));
    }

    #[test]
    fn counters_match_the_catalog() {
        assert_eq!(ActionType::ForeignAid.spec().counterable_by, &[Duke]);
        assert_eq!(ActionType::Assassinate.spec().counterable_by, &[Contessa]);
        assert_eq!(ActionType::Steal.spec().counterable_by, &[Captain, Ambassador]);
        assert!(ActionType::Income.spec().counterable_by.is_empty());
        assert!(ActionType::Tax.spec().counterable_by.is_empty());
        assert!(ActionType::Coup.spec().counterable_by.is_empty());
        assert!(ActionType::Exchange.spec().counterable_by.is_empty());
    }

    #[test]
    fn only_assassinate_and_coup_cost_coins() {
        assert_eq!(ActionType::Assassinate.spec().coin_cost, 3);
        assert_eq!(ActionType::Coup.spec().coin_cost, 7);
        for action in [
            ActionType::Income,
            ActionType::ForeignAid,
            ActionType::Tax,
            ActionType::Steal,
            ActionType::Exchange,
        ] {
            assert_eq!(action.spec().coin_cost, 0);
        }
    }

    #[test]
    fn targeted_actions_match_the_catalog() {
        for action in [ActionType::Coup, ActionType::Assassinate, ActionType::Steal] {
            assert!(action.spec().requires_target);
        }
        for action in [
            ActionType::Income,
            ActionType::ForeignAid,
            ActionType::Tax,
            ActionType::Exchange,
        ] {
            assert!(!action.spec().requires_target);
        }
    }
}
