//! Tests for the player action state machine.

#[cfg(test)]
mod tests {
    use super::super::state::{ActionEvent, ActionGuards, ActionState};
    use proptest::prelude::*;

    const ARMED: ActionGuards = ActionGuards {
        weapon_drawn: true,
        owns_weapon: true,
        can_dodge: true,
    };

    const SHEATHED: ActionGuards = ActionGuards {
        weapon_drawn: false,
        owns_weapon: true,
        can_dodge: true,
    };

    const UNARMED_TIRED: ActionGuards = ActionGuards {
        weapon_drawn: false,
        owns_weapon: false,
        can_dodge: false,
    };

    const ALL_EVENTS: [ActionEvent; 9] = [
        ActionEvent::AttackRequested,
        ActionEvent::AttackFinished,
        ActionEvent::DodgeRequested,
        ActionEvent::DodgeFinished,
        ActionEvent::EquipToggleRequested,
        ActionEvent::EquipFinished,
        ActionEvent::Damaged,
        ActionEvent::HitReactionFinished,
        ActionEvent::Killed,
    ];

    #[test]
    fn test_attack_requires_drawn_weapon() {
        let idle = ActionState::Unoccupied;
        assert_eq!(idle.on_event(ActionEvent::AttackRequested, ARMED), Some(ActionState::Attacking));
        assert_eq!(idle.on_event(ActionEvent::AttackRequested, SHEATHED), None);
        assert_eq!(idle.on_event(ActionEvent::AttackRequested, UNARMED_TIRED), None);
    }

    #[test]
    fn test_no_attack_while_busy() {
        for busy in [
            ActionState::Attacking,
            ActionState::HitReaction,
            ActionState::EquippingWeapon,
            ActionState::Dodging,
        ] {
            assert_eq!(busy.on_event(ActionEvent::AttackRequested, ARMED), None);
        }
    }

    #[test]
    fn test_hit_reaction_interrupts_attack() {
        let state = ActionState::Attacking
            .on_event(ActionEvent::Damaged, ARMED)
            .unwrap();
        assert_eq!(state, ActionState::HitReaction);

        // Запоздавший AttackFinished от прерванного удара не освобождает игрока
        assert_eq!(state.on_event(ActionEvent::AttackFinished, ARMED), None);
        assert_eq!(
            state.on_event(ActionEvent::HitReactionFinished, ARMED),
            Some(ActionState::Unoccupied)
        );
    }

    #[test]
    fn test_dodge_and_equip_cycles() {
        let dodging = ActionState::Unoccupied
            .on_event(ActionEvent::DodgeRequested, ARMED)
            .unwrap();
        assert_eq!(dodging, ActionState::Dodging);
        assert_eq!(
            dodging.on_event(ActionEvent::DodgeFinished, ARMED),
            Some(ActionState::Unoccupied)
        );
        assert_eq!(
            ActionState::Unoccupied.on_event(ActionEvent::DodgeRequested, UNARMED_TIRED),
            None
        );

        let equipping = ActionState::Unoccupied
            .on_event(ActionEvent::EquipToggleRequested, SHEATHED)
            .unwrap();
        assert_eq!(equipping, ActionState::EquippingWeapon);
        assert_eq!(
            equipping.on_event(ActionEvent::EquipFinished, SHEATHED),
            Some(ActionState::Unoccupied)
        );
        assert_eq!(
            ActionState::Unoccupied.on_event(ActionEvent::EquipToggleRequested, UNARMED_TIRED),
            None
        );
    }

    #[test]
    fn test_only_unoccupied_can_move() {
        assert!(ActionState::Unoccupied.can_move());
        assert!(!ActionState::Attacking.can_move());
        assert!(!ActionState::Dead.can_move());
    }

    proptest! {
        #[test]
        fn prop_dead_is_absorbing(events in proptest::collection::vec(0usize..9, 1..40)) {
            let mut state = ActionState::Unoccupied;
            let mut died = false;

            for index in events {
                let event = ALL_EVENTS[index];
                if let Some(next) = state.on_event(event, ARMED) {
                    state = next;
                }
                died |= event == ActionEvent::Killed;
                if died {
                    prop_assert_eq!(state, ActionState::Dead);
                } else {
                    prop_assert!(!state.is_dead());
                }
            }
        }
    }
}
