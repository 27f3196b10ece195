//! Administrator console commands

mod parse;

pub use parse::{parse_bool, parse_number, parse_whole_number};

use crate::config::{
    launch_interval_in_range, ConfigError, Settings, COMMAND_PREFIX, INTERVAL_CAUTION_THRESHOLD,
};
use thiserror::Error;

/// Who issued a console command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Caller {
    /// The server console itself
    Server,
    /// A player with admin rights
    Admin,
    Player,
}

impl Caller {
    pub fn is_privileged(&self) -> bool {
        matches!(self, Caller::Server | Caller::Admin)
    }
}

/// Rejected command. The message is shown to the operator as-is.
#[derive(Error, Debug)]
pub enum CommandError {
    #[error("You do not have permission to use this command")]
    PermissionDenied,
    #[error("Unknown command: {0}")]
    UnknownCommand(String),
    #[error("Error: Missing value! Usage: {0}")]
    MissingArgument(&'static str),
    #[error("Error: Must enter a number!")]
    NotANumber,
    #[error("Error: Must enter a whole number!")]
    NotAWholeNumber,
    #[error("Error: Enter either true or false!")]
    NotABool,
    #[error("Error: Launch interval cannot be negative!")]
    NegativeInterval,
    #[error("Error: Launch interval is too large!")]
    IntervalTooLarge,
    #[error("Error: Could not save settings: {0}")]
    Persist(#[from] ConfigError),
}

/// How an accepted command should be reported
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    /// Accepted, but the operator should double-check the value
    Caution,
}

/// Confirmation for an accepted command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutcome {
    pub message: String,
    pub severity: Severity,
}

impl CommandOutcome {
    pub fn info(message: impl Into<String>) -> Self {
        CommandOutcome {
            message: message.into(),
            severity: Severity::Info,
        }
    }

    pub fn caution(message: impl Into<String>) -> Self {
        CommandOutcome {
            message: message.into(),
            severity: Severity::Caution,
        }
    }
}

/// A parsed, validated settings change
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AdminCommand {
    SetDamageModifier(f64),
    SetCooldown(f64),
    SetPlayerDamage(bool),
    SetOwnedStructureDamage(bool),
    SetUnownedStructureDamage(bool),
    SetNpcDamage(bool),
    SetRocketCapacity(u32),
    SetRequireModule(bool),
    SetLaunchInterval(f64),
}

/// Console name and usage line of every command
pub const COMMANDS: &[(&str, &str)] = &[
    ("damage", "mlrsdamage.damage <multiplier>"),
    ("cooldown", "mlrsdamage.cooldown <minutes>"),
    ("pvp", "mlrsdamage.pvp <true|false>"),
    ("pvpbase", "mlrsdamage.pvpbase <true|false>"),
    ("raidable", "mlrsdamage.raidable <true|false>"),
    ("npc", "mlrsdamage.npc <true|false>"),
    ("rockets", "mlrsdamage.rockets <count>"),
    ("module", "mlrsdamage.module <true|false>"),
    ("interval", "mlrsdamage.interval <seconds>"),
];

impl AdminCommand {
    /// Parse a console line such as `mlrsdamage.rockets 24`.
    /// The `mlrsdamage.` prefix is optional.
    pub fn parse(line: &str) -> Result<Self, CommandError> {
        let mut parts = line.split_whitespace();
        let Some(full_name) = parts.next() else {
            return Err(CommandError::UnknownCommand(String::new()));
        };

        let lowered = full_name.to_ascii_lowercase();
        let name = lowered
            .strip_prefix(COMMAND_PREFIX)
            .and_then(|rest| rest.strip_prefix('.'))
            .unwrap_or(&lowered);

        let usage = COMMANDS
            .iter()
            .find(|(command, _)| *command == name)
            .map(|(_, usage)| *usage)
            .ok_or_else(|| CommandError::UnknownCommand(full_name.to_string()))?;

        let arg = parts.next().ok_or(CommandError::MissingArgument(usage))?;

        let command = match name {
            "damage" => AdminCommand::SetDamageModifier(parse_number(arg)?),
            "cooldown" => AdminCommand::SetCooldown(parse_number(arg)?),
            "pvp" => AdminCommand::SetPlayerDamage(parse_bool(arg)?),
            "pvpbase" => AdminCommand::SetOwnedStructureDamage(parse_bool(arg)?),
            "raidable" => AdminCommand::SetUnownedStructureDamage(parse_bool(arg)?),
            "npc" => AdminCommand::SetNpcDamage(parse_bool(arg)?),
            "rockets" => AdminCommand::SetRocketCapacity(parse_whole_number(arg)?),
            "module" => AdminCommand::SetRequireModule(parse_bool(arg)?),
            "interval" => {
                let seconds = parse_number(arg)?;
                if seconds < 0.0 {
                    return Err(CommandError::NegativeInterval);
                }
                if !launch_interval_in_range(seconds) {
                    return Err(CommandError::IntervalTooLarge);
                }
                AdminCommand::SetLaunchInterval(seconds)
            }
            _ => return Err(CommandError::UnknownCommand(full_name.to_string())),
        };
        Ok(command)
    }

    /// Write the change into a settings value
    pub fn apply(&self, settings: &mut Settings) {
        match *self {
            AdminCommand::SetDamageModifier(v) => settings.damage_modifier = v,
            AdminCommand::SetCooldown(v) => settings.cooldown_minutes = v,
            AdminCommand::SetPlayerDamage(v) => settings.allow_player_damage = v,
            AdminCommand::SetOwnedStructureDamage(v) => settings.allow_owned_structure_damage = v,
            AdminCommand::SetUnownedStructureDamage(v) => settings.allow_unowned_structure_damage = v,
            AdminCommand::SetNpcDamage(v) => settings.allow_npc_damage = v,
            AdminCommand::SetRocketCapacity(v) => settings.rocket_capacity = v,
            AdminCommand::SetRequireModule(v) => settings.require_aiming_module = v,
            AdminCommand::SetLaunchInterval(v) => settings.launch_interval_seconds = v,
        }
    }

    /// Confirmation text once the change is saved
    pub fn outcome(&self) -> CommandOutcome {
        match *self {
            AdminCommand::SetDamageModifier(v) => {
                CommandOutcome::info(format!("MLRS damage was successfully changed to: {}", v))
            }
            AdminCommand::SetCooldown(v) => {
                CommandOutcome::info(format!("MLRS cooldown was successfully changed to: {} minutes", v))
            }
            AdminCommand::SetPlayerDamage(v) => toggled("MLRS Player Damage", v),
            AdminCommand::SetOwnedStructureDamage(v) => toggled("MLRS Player Base Damage", v),
            AdminCommand::SetUnownedStructureDamage(v) => toggled("MLRS Raidable/Abandoned Base Damage", v),
            AdminCommand::SetNpcDamage(v) => toggled("MLRS NPC Damage", v),
            AdminCommand::SetRocketCapacity(v) => {
                CommandOutcome::info(format!("Total MLRS Rocket Capacity set to: {} rockets", v))
            }
            AdminCommand::SetRequireModule(true) => {
                CommandOutcome::info("MLRS Aiming Module is now required to fire!")
            }
            AdminCommand::SetRequireModule(false) => {
                CommandOutcome::info("MLRS Aiming Module is no longer required to fire!")
            }
            AdminCommand::SetLaunchInterval(v) if v < INTERVAL_CAUTION_THRESHOLD => {
                CommandOutcome::caution(format!(
                    "Caution: MLRS launch interval set to: {} seconds. Intervals below {} seconds may launch rockets faster than the server can track them.",
                    v, INTERVAL_CAUTION_THRESHOLD
                ))
            }
            AdminCommand::SetLaunchInterval(v) => {
                CommandOutcome::info(format!("MLRS launch interval set to: {} seconds", v))
            }
        }
    }
}

fn toggled(what: &str, enabled: bool) -> CommandOutcome {
    let state = if enabled { "Enabled" } else { "Disabled" };
    CommandOutcome::info(format!("{} is {}!", what, state))
}
