//! Fleet movement lifecycle and presence-based victory evaluation.

use crate::{
    FleetComposition, FleetMovement, GameRules, MissionPhase, MovementList, MovementTarget,
};

impl FleetMovement {
    /// In transit from the departure turn (arrival − 1) through the turn
    /// before return, inclusive.
    pub fn is_in_transit(&self, turn: u64) -> bool {
        turn + 1 >= self.arrival_turn && turn < self.return_turn
    }

    /// Recall is possible only strictly before departure.
    pub fn can_recall(&self, turn: u64) -> bool {
        turn + 1 < self.arrival_turn
    }
}

/// Create the outbound movement for an attack launched this turn.
pub fn launch_attack(fleet: FleetComposition, turn: u64, rules: &GameRules) -> FleetMovement {
    let arrival_turn = turn + rules.attack_travel_turns;
    FleetMovement {
        fleet,
        target: MovementTarget::EnemyHome,
        arrival_turn,
        return_turn: arrival_turn + rules.return_leg_turns,
        phase: MissionPhase::Outbound,
    }
}

/// Movement list split for one turn of processing.
#[derive(Debug, Clone, Default)]
pub struct MovementPartition {
    pub in_transit: MovementList,
    pub combat_due: Vec<FleetMovement>,
    pub return_due: Vec<FleetMovement>,
}

/// Partition a player's movements into those still underway, those whose
/// arrival turn has come (tagged for their one-time combat resolution), and
/// returning fleets that reached home.
pub fn partition_movements(movements: MovementList, turn: u64) -> MovementPartition {
    let mut partition = MovementPartition::default();
    for mut movement in movements {
        match movement.phase {
            MissionPhase::Returning if turn >= movement.return_turn => {
                partition.return_due.push(movement);
            }
            MissionPhase::Outbound if turn >= movement.arrival_turn => {
                movement.phase = MissionPhase::Combat;
                partition.combat_due.push(movement);
            }
            _ => partition.in_transit.push(movement),
        }
    }
    partition
}

/// Movement carrying battle survivors home, arriving next turn. None if
/// nothing survived — the movement is discarded instead.
pub fn returning_fleet(survivors: FleetComposition, turn: u64) -> Option<FleetMovement> {
    if survivors.is_empty() {
        return None;
    }
    Some(FleetMovement {
        fleet: survivors,
        target: MovementTarget::Home,
        arrival_turn: turn + 1,
        return_turn: turn + 1,
        phase: MissionPhase::Returning,
    })
}

/// True only when the home fleet is empty and every in-transit movement is
/// empty too.
pub fn fleet_eliminated(home: &FleetComposition, movements: &[FleetMovement]) -> bool {
    home.is_empty() && movements.iter().all(|m| m.fleet.is_empty())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PresenceOutcome {
    Ongoing,
    PlayerVictory,
    AiVictory,
}

/// A side is present while it has any ships at home or in transit. Mutual
/// elimination falls to the AI by convention.
pub fn fleet_presence(
    player_home: &FleetComposition,
    player_movements: &[FleetMovement],
    ai_home: &FleetComposition,
    ai_movements: &[FleetMovement],
) -> PresenceOutcome {
    let player_present = !fleet_eliminated(player_home, player_movements);
    let ai_present = !fleet_eliminated(ai_home, ai_movements);
    match (player_present, ai_present) {
        (true, true) => PresenceOutcome::Ongoing,
        (true, false) => PresenceOutcome::PlayerVictory,
        (false, _) => PresenceOutcome::AiVictory,
    }
}
