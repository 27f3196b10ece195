//! Integration test: Load settings -> Spawn -> Command -> Fire -> Hit -> Unload
//!
//! Drives the rules through the simulated server the way a live host would.

use mlrs_core::config::{NATIVE_CONTAINER_CAPACITY, NATIVE_COOLDOWN_MINUTES};
use mlrs_core::{
    Authorization, Caller, DamageEvent, DamageTypes, EntityId, EntityKind, HostEvent,
    LauncherHost, MlrsPlugin, OwnerId, SimulatedHost, Victim,
};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

const TICK: Duration = Duration::from_millis(100);

fn settings_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("mlrs_it_{}_{}.json", std::process::id(), name))
}

/// Helper to print a separator
fn separator(title: &str) {
    println!("\n{}", "=".repeat(60));
    println!("  {}", title);
    println!("{}\n", "=".repeat(60));
}

/// Deliver host events and run due tasks for one frame
fn pump(plugin: &mut MlrsPlugin, host: &mut SimulatedHost) -> Vec<HostEvent> {
    let events = host.advance(TICK);
    for event in &events {
        plugin.dispatch(host, *event);
    }
    plugin.run_due_tasks(host, TICK);
    events
}

#[test]
fn test_full_engagement_flow() {
    let path = settings_path("flow");
    let _ = fs::remove_file(&path);

    // =========================================================================
    // STEP 1: First load writes defaults
    // =========================================================================
    separator("STEP 1: Loading settings");

    let mut plugin = MlrsPlugin::load(&path);
    assert!(plugin.damage_hook_enabled());
    assert!(path.exists(), "defaults should be written on first load");
    let written = fs::read_to_string(&path).unwrap();
    assert!(written.contains("MLRS Settings"));
    assert!(written.contains("Total Rockets for MLRS to fire"));
    println!("  Wrote defaults to {:?}", path);

    let mut host = SimulatedHost::new();
    plugin.on_server_initialized(&mut host);

    // =========================================================================
    // STEP 2: Admin raises capacity, speeds up launches, drops module requirement
    // =========================================================================
    separator("STEP 2: Admin commands");

    let existing = host.spawn_launcher();
    pump(&mut plugin, &mut host);
    assert_eq!(host.container_capacity(existing).unwrap(), 6);

    for line in ["mlrsdamage.rockets 24", "mlrsdamage.interval 0.2", "mlrsdamage.module false"] {
        let outcome = plugin.run_command(&mut host, Caller::Admin, line).unwrap();
        println!("  {} -> {}", line, outcome.message);
    }

    // Live launchers pick up floor(24 / 2) immediately
    assert_eq!(host.container_capacity(existing).unwrap(), 12);
    assert!(host.module_slot(existing).unwrap().is_occupied());

    // Persisted before the confirmation came back
    let written = fs::read_to_string(&path).unwrap();
    assert!(written.contains("24"));

    // =========================================================================
    // STEP 3: New launcher is configured one tick after it spawns
    // =========================================================================
    separator("STEP 3: Spawning a launcher");

    let launcher = host.spawn_launcher();
    for event in host.take_events() {
        plugin.dispatch(&mut host, event);
    }
    assert_eq!(host.container_capacity(launcher).unwrap(), NATIVE_CONTAINER_CAPACITY);

    // Still native after the drain of the tick that delivered the spawn
    plugin.run_due_tasks(&mut host, TICK);
    assert_eq!(host.container_capacity(launcher).unwrap(), NATIVE_CONTAINER_CAPACITY);

    plugin.run_due_tasks(&mut host, TICK);
    assert_eq!(host.container_capacity(launcher).unwrap(), 12);

    // Module arrives after the re-arm delay
    for _ in 0..10 {
        pump(&mut plugin, &mut host);
    }
    let slot = host.module_slot(launcher).unwrap();
    assert!(slot.is_occupied() && slot.locked);
    assert!(host.take_aiming_module(launcher).is_err());

    // =========================================================================
    // STEP 4: Fire a full barrage
    // =========================================================================
    separator("STEP 4: Firing");

    assert_eq!(host.load_rockets(launcher, 100).unwrap(), 24);
    host.start_firing(launcher).unwrap();

    let mut fired = 0;
    for _ in 0..200 {
        fired += pump(&mut plugin, &mut host)
            .iter()
            .filter(|e| matches!(e, HostEvent::RocketFired(_)))
            .count();
        if !host.launcher(launcher).unwrap().firing {
            break;
        }
    }
    println!("  Launched {} rockets", fired);
    assert_eq!(fired, 24, "a barrage fires exactly the configured rocket count");
    assert_eq!(host.launcher(launcher).unwrap().launch_interval, Duration::from_millis(200));
    assert!(!plugin.fire_controller().is_engaging(launcher));

    // =========================================================================
    // STEP 5: Rockets land
    // =========================================================================
    separator("STEP 5: Damage");

    plugin.run_command(&mut host, Caller::Server, "mlrsdamage.damage 2").unwrap();
    plugin.run_command(&mut host, Caller::Server, "mlrsdamage.pvpbase false").unwrap();

    let mut raid = DamageEvent::rocket(
        Victim::new(EntityId(500), EntityKind::Structure, OwnerId::NONE),
        DamageTypes::rocket(80.0, 10.0),
    );
    assert_eq!(plugin.on_entity_take_damage(&mut raid), Authorization::ScaleAndAllow(2.0));
    assert!((raid.damage.total() - 180.0).abs() < 0.01);

    let mut base = DamageEvent::rocket(
        Victim::new(EntityId(501), EntityKind::Structure, OwnerId(42)),
        DamageTypes::rocket(80.0, 10.0),
    );
    assert_eq!(plugin.on_entity_take_damage(&mut base), Authorization::Deny);
    assert!((base.damage.total() - 90.0).abs() < 0.01, "deny leaves the payload alone");

    // =========================================================================
    // STEP 6: Unload hands launchers back in their native state
    // =========================================================================
    separator("STEP 6: Unloading");

    plugin.on_unload(&mut host);
    for id in [existing, launcher] {
        assert_eq!(host.container_capacity(id).unwrap(), NATIVE_CONTAINER_CAPACITY);
        assert!(!host.module_slot(id).unwrap().locked);
    }
    assert!((host.cooldown_minutes() - NATIVE_COOLDOWN_MINUTES).abs() < f64::EPSILON);

    // Settings survive a restart
    let reloaded = MlrsPlugin::load(&path);
    assert_eq!(reloaded.settings().rocket_capacity, 24);
    assert!(!reloaded.settings().require_aiming_module);
    assert!(!reloaded.settings().allow_owned_structure_damage);

    let _ = fs::remove_file(&path);
}

#[test]
fn test_broken_settings_file_disables_damage_only() {
    let path = settings_path("broken");
    fs::write(&path, "{ this is not json").unwrap();

    let mut plugin = MlrsPlugin::load(&path);
    assert!(!plugin.damage_hook_enabled());

    let mut event = DamageEvent::rocket(
        Victim::new(EntityId(1), EntityKind::Player, OwnerId::NONE),
        DamageTypes::rocket(100.0, 0.0),
    );
    assert_eq!(plugin.on_entity_take_damage(&mut event), Authorization::NoOpinion);

    // Fire control still runs on defaults
    let mut host = SimulatedHost::new();
    plugin.on_server_initialized(&mut host);
    let id = host.spawn_launcher();
    pump(&mut plugin, &mut host);
    assert_eq!(host.container_capacity(id).unwrap(), 6);

    // The broken file is left for the operator to fix
    assert_eq!(fs::read_to_string(&path).unwrap(), "{ this is not json");

    // Fixing it and reloading brings the hook back
    fs::remove_file(&path).unwrap();
    assert!(plugin.reload(&mut host).is_ok());
    assert!(plugin.damage_hook_enabled());

    let _ = fs::remove_file(&path);
}

#[test]
fn test_native_batch_limit_without_rules() {
    // The host alone stops after 12 rockets however many are loaded
    let mut host = SimulatedHost::new();
    let id = host.spawn_launcher();
    host.set_container_capacity(id, 15).unwrap();
    host.load_rockets(id, 30).unwrap();
    host.insert_aiming_module(id).unwrap();
    host.start_firing(id).unwrap();

    let mut fired = 0;
    for _ in 0..200 {
        fired += host
            .advance(TICK)
            .iter()
            .filter(|e| matches!(e, HostEvent::RocketFired(_)))
            .count();
    }
    assert_eq!(fired, 12);
}
