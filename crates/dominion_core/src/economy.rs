//! Income, construction queues, and build-order validation.

use crate::{
    Buildable, BuildOrder, FleetComposition, GameRules, PlayerState, StructureKind, UnitClass,
    ValidationError, UNIT_CLASSES,
};

/// Per-turn upkeep of every completed unit in the fleet.
pub fn fleet_upkeep(fleet: &FleetComposition, rules: &GameRules) -> (i64, i64) {
    UNIT_CLASSES.iter().fold((0, 0), |(metal, energy), &class| {
        let unit = rules.unit(class);
        let count = i64::from(fleet.count(class));
        (
            metal + unit.metal_upkeep * count,
            energy + unit.energy_upkeep * count,
        )
    })
}

fn queue_drain(queue: &[BuildOrder]) -> (i64, i64) {
    queue.iter().fold((0, 0), |(metal, energy), order| {
        (metal + order.metal_drain, energy + order.energy_drain)
    })
}

/// Net per-turn income: base grant + structure bonuses − construction drain
/// − home fleet upkeep.
pub fn projected_income(player: &PlayerState, rules: &GameRules) -> (i64, i64) {
    let (upkeep_metal, upkeep_energy) = fleet_upkeep(&player.home_fleet, rules);
    let (drain_metal, drain_energy) = queue_drain(&player.economy.build_queue);
    let metal = rules.base_metal_income
        + rules.mine.metal_income_bonus * i64::from(player.economy.mines)
        + rules.solar_plant.metal_income_bonus * i64::from(player.economy.solar_plants)
        - drain_metal
        - upkeep_metal;
    let energy = rules.base_energy_income
        + rules.mine.energy_income_bonus * i64::from(player.economy.mines)
        + rules.solar_plant.energy_income_bonus * i64::from(player.economy.solar_plants)
        - drain_energy
        - upkeep_energy;
    (metal, energy)
}

/// Apply this turn's net income to the stock (clamped at the floor) and
/// record it for display and validation.
pub fn calculate_income(player: &mut PlayerState, rules: &GameRules) {
    let (metal, energy) = projected_income(player, rules);
    player.resources.metal = (player.resources.metal + metal).max(rules.resource_floor);
    player.resources.energy = (player.resources.energy + energy).max(rules.resource_floor);
    player.resources.metal_income = metal;
    player.resources.energy_income = energy;
}

/// Stalled when neither resource has positive net income.
pub fn is_economy_stalled(player: &PlayerState) -> bool {
    player.resources.metal_income <= 0 && player.resources.energy_income <= 0
}

/// Advance every active order by one turn and apply completed ones. Runs
/// unconditionally: a stall blocks new orders, not orders already in flight.
pub fn process_construction(player: &mut PlayerState) {
    let mut completed = Vec::new();
    player.economy.build_queue.retain_mut(|order| {
        order.turns_remaining = order.turns_remaining.saturating_sub(1);
        if order.turns_remaining == 0 {
            completed.push((order.item, order.quantity));
            false
        } else {
            true
        }
    });
    for (item, quantity) in completed {
        match item {
            Buildable::Unit(class) => {
                *player.home_fleet.count_mut(class) += quantity;
            }
            Buildable::Structure(kind) => {
                player.economy.add_structures(kind, quantity);
            }
        }
    }
}

/// Cost of the next structure of `kind` given how many are already owned.
/// Each additional structure costs `cost_growth` times the previous one.
#[allow(clippy::cast_possible_truncation)]
pub fn structure_cost(kind: StructureKind, owned: u32, rules: &GameRules) -> (i64, i64) {
    let structure = rules.structure(kind);
    let scale = structure.cost_growth.powi(owned.min(i32::MAX as u32) as i32);
    (
        (structure.base_metal_cost as f64 * scale).round() as i64,
        (structure.base_energy_cost as f64 * scale).round() as i64,
    )
}

/// Full upfront cost of a build order. Structure batches price each copy at
/// its own scaled tier, so repeated purchases are never linear.
pub fn build_cost(
    item: Buildable,
    quantity: u32,
    player: &PlayerState,
    rules: &GameRules,
) -> (i64, i64) {
    match item {
        Buildable::Unit(class) => {
            let unit = rules.unit(class);
            let quantity = i64::from(quantity);
            (unit.metal_cost * quantity, unit.energy_cost * quantity)
        }
        Buildable::Structure(kind) => {
            let owned = player.economy.structure_count(kind);
            (0..quantity).fold((0, 0), |(metal, energy), offset| {
                let (m, e) = structure_cost(kind, owned + offset, rules);
                (metal + m, energy + e)
            })
        }
    }
}

fn order_drain(item: Buildable, quantity: u32, rules: &GameRules) -> (i64, i64) {
    let quantity = i64::from(quantity);
    match item {
        Buildable::Unit(class) => {
            let unit = rules.unit(class);
            (unit.metal_drain * quantity, unit.energy_drain * quantity)
        }
        Buildable::Structure(kind) => {
            let structure = rules.structure(kind);
            (
                structure.metal_drain * quantity,
                structure.energy_drain * quantity,
            )
        }
    }
}

fn build_turns(item: Buildable, rules: &GameRules) -> u32 {
    match item {
        Buildable::Unit(class) => rules.unit(class).build_turns,
        Buildable::Structure(kind) => rules.structure(kind).build_turns,
    }
}

/// Validate and queue a build order. The upfront cost must be covered by
/// current stock and the projected income must stay non-negative once the
/// order's ongoing drain is added; otherwise the full itemized error list is
/// returned and nothing changes. On success the cost is deducted up front.
pub fn add_build_order(
    player: &mut PlayerState,
    item: Buildable,
    quantity: u32,
    rules: &GameRules,
) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();
    if quantity == 0 {
        return Err(vec![ValidationError::ZeroQuantity]);
    }

    let (metal_cost, energy_cost) = build_cost(item, quantity, player, rules);
    if player.resources.metal < metal_cost {
        errors.push(ValidationError::InsufficientMetal {
            required: metal_cost,
            available: player.resources.metal,
        });
    }
    if player.resources.energy < energy_cost {
        errors.push(ValidationError::InsufficientEnergy {
            required: energy_cost,
            available: player.resources.energy,
        });
    }

    let (metal_drain, energy_drain) = order_drain(item, quantity, rules);
    let (metal_income, energy_income) = projected_income(player, rules);
    if metal_income - metal_drain < 0 {
        errors.push(ValidationError::NegativeProjectedIncome { resource: "metal" });
    }
    if energy_income - energy_drain < 0 {
        errors.push(ValidationError::NegativeProjectedIncome { resource: "energy" });
    }

    if !errors.is_empty() {
        return Err(errors);
    }

    player.resources.metal -= metal_cost;
    player.resources.energy -= energy_cost;
    player.economy.build_queue.push(BuildOrder {
        item,
        quantity,
        turns_remaining: build_turns(item, rules),
        metal_cost,
        energy_cost,
        metal_drain,
        energy_drain,
    });
    Ok(())
}

/// Remove an active order and refund its upfront cost. Drain already paid in
/// previous turns is not refunded.
pub fn cancel_build_order(
    player: &mut PlayerState,
    index: usize,
) -> Result<BuildOrder, ValidationError> {
    if index >= player.economy.build_queue.len() {
        return Err(ValidationError::UnknownBuildOrder { index });
    }
    let order = player.economy.build_queue.remove(index);
    player.resources.metal += order.metal_cost;
    player.resources.energy += order.energy_cost;
    Ok(order)
}

/// Upkeep value of lost units, credited back to the owner after combat.
pub fn casualty_refund(casualties: &FleetComposition, rules: &GameRules) -> (i64, i64) {
    fleet_upkeep(casualties, rules)
}

/// Convenience lookup used by policies and validation alike.
pub fn unit_cost(class: UnitClass, rules: &GameRules) -> (i64, i64) {
    let unit = rules.unit(class);
    (unit.metal_cost, unit.energy_cost)
}
