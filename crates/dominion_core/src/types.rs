//! Type definitions for `dominion_core`.
//!
//! All public state types, report types, and the `GameRules` balance table.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

// ---------------------------------------------------------------------------
// Unit classes and fleets
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UnitClass {
    Frigate,
    Cruiser,
    Battleship,
}

pub const UNIT_CLASSES: [UnitClass; 3] =
    [UnitClass::Frigate, UnitClass::Cruiser, UnitClass::Battleship];

impl std::fmt::Display for UnitClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UnitClass::Frigate => f.write_str("frigate"),
            UnitClass::Cruiser => f.write_str("cruiser"),
            UnitClass::Battleship => f.write_str("battleship"),
        }
    }
}

/// Counts per unit class. Arithmetic clamps at zero — a fleet can never hold
/// a negative count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FleetComposition {
    pub frigates: u32,
    pub cruisers: u32,
    pub battleships: u32,
}

impl FleetComposition {
    pub fn new(frigates: u32, cruisers: u32, battleships: u32) -> Self {
        Self {
            frigates,
            cruisers,
            battleships,
        }
    }

    pub fn count(&self, class: UnitClass) -> u32 {
        match class {
            UnitClass::Frigate => self.frigates,
            UnitClass::Cruiser => self.cruisers,
            UnitClass::Battleship => self.battleships,
        }
    }

    pub fn count_mut(&mut self, class: UnitClass) -> &mut u32 {
        match class {
            UnitClass::Frigate => &mut self.frigates,
            UnitClass::Cruiser => &mut self.cruisers,
            UnitClass::Battleship => &mut self.battleships,
        }
    }

    pub fn total(&self) -> u32 {
        self.frigates + self.cruisers + self.battleships
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }

    pub fn add(&mut self, other: &Self) {
        self.frigates += other.frigates;
        self.cruisers += other.cruisers;
        self.battleships += other.battleships;
    }

    /// Per-class subtraction, clamped at zero.
    pub fn saturating_sub(&self, other: &Self) -> Self {
        Self {
            frigates: self.frigates.saturating_sub(other.frigates),
            cruisers: self.cruisers.saturating_sub(other.cruisers),
            battleships: self.battleships.saturating_sub(other.battleships),
        }
    }

    /// True if every per-class count in `other` is available here.
    pub fn contains(&self, other: &Self) -> bool {
        self.frigates >= other.frigates
            && self.cruisers >= other.cruisers
            && self.battleships >= other.battleships
    }
}

// ---------------------------------------------------------------------------
// Fleet movements
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MissionPhase {
    Outbound,
    Combat,
    Returning,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MovementTarget {
    EnemyHome,
    Home,
}

/// A fleet in transit. Created by an attack action; resolved once on the
/// arrival turn; merged back into the home fleet on the return turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FleetMovement {
    pub fleet: FleetComposition,
    pub target: MovementTarget,
    pub arrival_turn: u64,
    pub return_turn: u64,
    pub phase: MissionPhase,
}

/// Per-player in-transit list. Rarely holds more than a handful of entries.
pub type MovementList = SmallVec<[FleetMovement; 4]>;

// ---------------------------------------------------------------------------
// Economy
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StructureKind {
    Mine,
    SolarPlant,
}

impl std::fmt::Display for StructureKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StructureKind::Mine => f.write_str("mine"),
            StructureKind::SolarPlant => f.write_str("solar plant"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Buildable {
    Unit(UnitClass),
    Structure(StructureKind),
}

impl std::fmt::Display for Buildable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Buildable::Unit(class) => class.fmt(f),
            Buildable::Structure(kind) => kind.fmt(f),
        }
    }
}

/// An accepted construction order. The upfront cost is deducted when the
/// order is created and kept here so a cancellation can refund it; the
/// per-turn drain is charged by income calculation while the order is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildOrder {
    pub item: Buildable,
    pub quantity: u32,
    pub turns_remaining: u32,
    pub metal_cost: i64,
    pub energy_cost: i64,
    pub metal_drain: i64,
    pub energy_drain: i64,
}

/// Resource stock plus the last-computed net per-turn deltas. Stock may go
/// negative down to `GameRules::resource_floor`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Resources {
    pub metal: i64,
    pub energy: i64,
    pub metal_income: i64,
    pub energy_income: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct EconomyState {
    pub mines: u32,
    pub solar_plants: u32,
    pub build_queue: Vec<BuildOrder>,
}

impl EconomyState {
    pub fn structure_count(&self, kind: StructureKind) -> u32 {
        match kind {
            StructureKind::Mine => self.mines,
            StructureKind::SolarPlant => self.solar_plants,
        }
    }

    pub fn add_structures(&mut self, kind: StructureKind, quantity: u32) {
        match kind {
            StructureKind::Mine => self.mines += quantity,
            StructureKind::SolarPlant => self.solar_plants += quantity,
        }
    }

    pub fn total_structures(&self) -> u32 {
        self.mines + self.solar_plants
    }
}

// ---------------------------------------------------------------------------
// Intelligence
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScanKind {
    Basic,
    Deep,
    Advanced,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StrategicIntent {
    MilitaryBuildup,
    EconomicExpansion,
    Balanced,
    Vulnerable,
}

/// Noisy view of the enemy fleet produced by a scan. Basic scans only report
/// a total; deep and advanced scans also carry a per-class breakdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FleetEstimate {
    pub total: u32,
    pub per_class: Option<FleetComposition>,
}

/// Stored scan results. The estimate ages as turns pass (the delta is exposed
/// via `scan_age`) but is never auto-invalidated.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Intelligence {
    pub last_scan_turn: Option<u64>,
    pub known_enemy_fleet: Option<FleetEstimate>,
    pub scan_accuracy: f64,
}

/// What a scan returned to its caller.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ScanReport {
    Basic {
        estimated_total: u32,
    },
    Deep {
        fleet: FleetComposition,
        mines: u32,
        solar_plants: u32,
    },
    Advanced {
        intent: StrategicIntent,
        estimated_fleet: FleetComposition,
    },
}

// ---------------------------------------------------------------------------
// Players and game state
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Player,
    Ai,
}

impl Side {
    pub fn opponent(self) -> Self {
        match self {
            Side::Player => Side::Ai,
            Side::Ai => Side::Player,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerState {
    pub resources: Resources,
    pub home_fleet: FleetComposition,
    pub movements: MovementList,
    pub economy: EconomyState,
    pub intel: Intelligence,
    pub has_been_attacked: bool,
}

impl PlayerState {
    pub fn new(rules: &GameRules) -> Self {
        Self {
            resources: Resources {
                metal: rules.starting_metal,
                energy: rules.starting_energy,
                metal_income: 0,
                energy_income: 0,
            },
            home_fleet: rules.starting_fleet,
            movements: MovementList::new(),
            economy: EconomyState {
                mines: rules.starting_mines,
                solar_plants: rules.starting_solar_plants,
                build_queue: Vec::new(),
            },
            intel: Intelligence::default(),
            has_been_attacked: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    Early,
    Mid,
    Late,
    Endgame,
}

impl GamePhase {
    /// Derived purely from the turn number.
    pub fn from_turn(turn: u64, rules: &GameRules) -> Self {
        if turn < rules.mid_phase_turn {
            GamePhase::Early
        } else if turn < rules.late_phase_turn {
            GamePhase::Mid
        } else if turn < rules.endgame_phase_turn {
            GamePhase::Late
        } else {
            GamePhase::Endgame
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VictoryKind {
    Military,
    Economic,
}

/// Winner and victory type, set together when the game ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameOutcome {
    pub winner: Side,
    pub victory: VictoryKind,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    /// Starts at 1, +1 per completed turn.
    pub turn: u64,
    pub phase: GamePhase,
    pub player: PlayerState,
    pub ai: PlayerState,
    /// Append-only record of every resolved engagement.
    pub combat_log: Vec<CombatEvent>,
    pub outcome: Option<GameOutcome>,
}

impl GameState {
    pub fn new(rules: &GameRules) -> Self {
        Self {
            turn: 1,
            phase: GamePhase::from_turn(1, rules),
            player: PlayerState::new(rules),
            ai: PlayerState::new(rules),
            combat_log: Vec::new(),
            outcome: None,
        }
    }

    pub fn side(&self, side: Side) -> &PlayerState {
        match side {
            Side::Player => &self.player,
            Side::Ai => &self.ai,
        }
    }

    pub fn side_mut(&mut self, side: Side) -> &mut PlayerState {
        match side {
            Side::Player => &mut self.player,
            Side::Ai => &mut self.ai,
        }
    }

    pub fn is_game_over(&self) -> bool {
        self.outcome.is_some()
    }
}

// ---------------------------------------------------------------------------
// Combat records
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BattleOutcome {
    DecisiveAttacker,
    DecisiveDefender,
    CloseBattle,
}

/// One side's casualty breakdown. Per class,
/// `casualties + survivors == original` exactly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SideReport {
    pub casualties: FleetComposition,
    pub survivors: FleetComposition,
}

/// Immutable record of one resolved engagement, with both fleets as they
/// stood pre-battle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CombatEvent {
    pub turn: u64,
    pub attacker: Side,
    pub attacker_fleet: FleetComposition,
    pub defender_fleet: FleetComposition,
    pub outcome: BattleOutcome,
    pub attacker_report: SideReport,
    pub defender_report: SideReport,
    pub strength_ratio: f64,
}

// ---------------------------------------------------------------------------
// Actions, decisions, results
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Action {
    Build { item: Buildable, quantity: u32 },
    Attack { fleet: FleetComposition },
    Scan { kind: ScanKind },
}

/// What an AI policy chose to do this turn.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Decision {
    Act(Action),
    Wait,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionResult {
    pub success: bool,
    pub message: String,
    pub state_changed: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TurnResult {
    pub success: bool,
    pub combat_events: Vec<CombatEvent>,
    pub game_ended: bool,
    pub winner: Option<Side>,
    pub victory: Option<VictoryKind>,
    pub errors: Vec<String>,
}

// ---------------------------------------------------------------------------
// Rules (balance table)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitRules {
    pub metal_cost: i64,
    pub energy_cost: i64,
    pub build_turns: u32,
    pub metal_drain: i64,
    pub energy_drain: i64,
    pub metal_upkeep: i64,
    pub energy_upkeep: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StructureRules {
    pub base_metal_cost: i64,
    pub base_energy_cost: i64,
    pub build_turns: u32,
    pub metal_drain: i64,
    pub energy_drain: i64,
    pub metal_income_bonus: i64,
    pub energy_income_bonus: i64,
    /// Cost multiplier per structure already owned.
    pub cost_growth: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScanRules {
    pub energy_cost: i64,
    pub accuracy: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LossRange {
    pub min: f64,
    pub max: f64,
}

/// Every balance constant of the simulation, passed by reference wherever
/// needed. `Default` is the canonical balance; tests override fields freely.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameRules {
    // Starting state
    pub starting_metal: i64,
    pub starting_energy: i64,
    pub starting_fleet: FleetComposition,
    pub starting_mines: u32,
    pub starting_solar_plants: u32,

    // Economy
    pub base_metal_income: i64,
    pub base_energy_income: i64,
    pub resource_floor: i64,
    pub frigate: UnitRules,
    pub cruiser: UnitRules,
    pub battleship: UnitRules,
    pub mine: StructureRules,
    pub solar_plant: StructureRules,

    // Combat
    pub decisive_ratio: f64,
    pub strength_factor_min: f64,
    pub strength_factor_max: f64,
    pub decisive_winner_loss: LossRange,
    pub decisive_loser_loss: LossRange,
    pub close_battle_loss: LossRange,

    // Movement
    pub attack_travel_turns: u64,
    pub return_leg_turns: u64,

    // Scanning
    pub basic_scan: ScanRules,
    pub deep_scan: ScanRules,
    pub advanced_scan: ScanRules,
    pub basic_scan_factor_min: f64,
    pub basic_scan_factor_max: f64,
    pub deep_scan_noise: f64,
    /// Frigate/cruiser/battleship shares assumed by advanced-scan estimates.
    pub advanced_scan_split: [f64; 3],
    pub intent_fleet_threshold: u32,
    pub intent_income_threshold: i64,
    pub intent_structure_threshold: u32,
    pub vulnerable_fleet_threshold: u32,

    // Phases
    pub mid_phase_turn: u64,
    pub late_phase_turn: u64,
    pub endgame_phase_turn: u64,

    // Diagnostics
    pub error_log_capacity: usize,
}

impl GameRules {
    pub fn unit(&self, class: UnitClass) -> &UnitRules {
        match class {
            UnitClass::Frigate => &self.frigate,
            UnitClass::Cruiser => &self.cruiser,
            UnitClass::Battleship => &self.battleship,
        }
    }

    pub fn structure(&self, kind: StructureKind) -> &StructureRules {
        match kind {
            StructureKind::Mine => &self.mine,
            StructureKind::SolarPlant => &self.solar_plant,
        }
    }

    pub fn scan(&self, kind: ScanKind) -> &ScanRules {
        match kind {
            ScanKind::Basic => &self.basic_scan,
            ScanKind::Deep => &self.deep_scan,
            ScanKind::Advanced => &self.advanced_scan,
        }
    }
}

impl Default for GameRules {
    fn default() -> Self {
        Self {
            starting_metal: 10_000,
            starting_energy: 10_000,
            starting_fleet: FleetComposition::new(10, 5, 2),
            starting_mines: 2,
            starting_solar_plants: 2,

            base_metal_income: 50,
            base_energy_income: 50,
            resource_floor: -1000,
            frigate: UnitRules {
                metal_cost: 4,
                energy_cost: 2,
                build_turns: 1,
                metal_drain: 1,
                energy_drain: 1,
                metal_upkeep: 0,
                energy_upkeep: 1,
            },
            cruiser: UnitRules {
                metal_cost: 12,
                energy_cost: 6,
                build_turns: 2,
                metal_drain: 2,
                energy_drain: 1,
                metal_upkeep: 1,
                energy_upkeep: 2,
            },
            battleship: UnitRules {
                metal_cost: 30,
                energy_cost: 15,
                build_turns: 3,
                metal_drain: 3,
                energy_drain: 2,
                metal_upkeep: 2,
                energy_upkeep: 4,
            },
            mine: StructureRules {
                base_metal_cost: 100,
                base_energy_cost: 50,
                build_turns: 3,
                metal_drain: 5,
                energy_drain: 5,
                metal_income_bonus: 25,
                energy_income_bonus: 0,
                cost_growth: 1.5,
            },
            solar_plant: StructureRules {
                base_metal_cost: 80,
                base_energy_cost: 60,
                build_turns: 3,
                metal_drain: 5,
                energy_drain: 5,
                metal_income_bonus: 0,
                energy_income_bonus: 25,
                cost_growth: 1.5,
            },

            decisive_ratio: 1.5,
            strength_factor_min: 0.8,
            strength_factor_max: 1.2,
            decisive_winner_loss: LossRange {
                min: 0.10,
                max: 0.30,
            },
            decisive_loser_loss: LossRange {
                min: 0.70,
                max: 0.90,
            },
            close_battle_loss: LossRange {
                min: 0.40,
                max: 0.60,
            },

            attack_travel_turns: 1,
            return_leg_turns: 2,

            basic_scan: ScanRules {
                energy_cost: 25,
                accuracy: 0.4,
            },
            deep_scan: ScanRules {
                energy_cost: 75,
                accuracy: 0.9,
            },
            advanced_scan: ScanRules {
                energy_cost: 150,
                accuracy: 0.7,
            },
            basic_scan_factor_min: 0.4,
            basic_scan_factor_max: 1.0,
            deep_scan_noise: 0.1,
            advanced_scan_split: [0.5, 0.3, 0.2],
            intent_fleet_threshold: 30,
            intent_income_threshold: 120,
            intent_structure_threshold: 8,
            vulnerable_fleet_threshold: 8,

            mid_phase_turn: 10,
            late_phase_turn: 25,
            endgame_phase_turn: 40,

            error_log_capacity: 64,
        }
    }
}
