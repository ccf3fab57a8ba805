use crate::cli::{Cli, Commands};
use deckprofile::engine::{
    ActivationOutcome, SimulatedDevice, activate_profile, log, simulated_devices,
};
use deckprofile::{config, listing};
use std::path::Path;
use std::process;
use std::time::Duration;

pub fn run(cli: Cli) {
    if let Some(command) = cli.command {
        match command {
            Commands::List { json } => handle_list(json),
            Commands::InitConfig => handle_init_config(),
        }
        return;
    }

    let config = load_config();
    let devices = simulated_devices(&config.simulation);

    if cli.shows_usage() {
        eprint!("\n{}\n", listing::render_usage(&devices, cli.device));
    }

    let Some((device_index, profile_index)) = cli.selection() else {
        process::exit(if cli.help { 0 } else { 1 });
    };

    let timeout = cli
        .timeout
        .map(Duration::from_secs)
        .unwrap_or_else(|| config.activation.timeout());

    handle_activate(
        &devices,
        device_index,
        profile_index,
        timeout,
        config.logging.activation_log.as_deref(),
    );
}

fn load_config() -> config::Config {
    config::Config::load().unwrap_or_else(|e| {
        eprintln!("Warning: {:#}", e);
        config::Config::default()
    })
}

fn handle_activate(
    devices: &[SimulatedDevice],
    device_index: usize,
    profile_index: usize,
    timeout: Duration,
    activation_log: Option<&Path>,
) {
    let Some(device) = devices.get(device_index) else {
        eprintln!("Invalid device selected, run with -h for list of devices.");
        process::exit(1);
    };

    let Some(manager) = device.profile_manager() else {
        eprintln!(
            "Unable to query the profile manager, it is likely that the selected device has only 1 profile."
        );
        process::exit(1);
    };

    let Some(profile) = manager.profiles().get(profile_index).copied() else {
        eprintln!("Invalid profile selected, run with -h for list of profiles.");
        process::exit(1);
    };

    println!("Changing profile on device {}...", device.name);

    let result = activate_profile(manager, profile.id, timeout);

    let summary = match &result {
        Ok(ActivationOutcome::AlreadyActive) => format!("Profile {} is active.", profile.id),
        Ok(ActivationOutcome::ActivatedWithinTimeout) => {
            format!("Profile {} has been activated.", profile.id)
        }
        Ok(ActivationOutcome::TimedOut) => "Timed out waiting for the new profile to be activated.  \
             Another application may be delaying the profile change."
            .to_string(),
        Err(e) => format!("Error: {}", e),
    };

    if let Some(path) = activation_log {
        let line = format!("{} [{}] {}", device.name, profile.id, summary);
        if let Err(e) = log::append_log_line(path, &line) {
            eprintln!("Warning: {:#}", e);
        }
    }

    match result {
        Ok(ActivationOutcome::TimedOut) | Err(_) => eprintln!("{}", summary),
        Ok(_) => println!("{}", summary),
    }

    if result.is_err() {
        process::exit(1);
    }
}

fn handle_list(json: bool) {
    let config = load_config();
    let devices = simulated_devices(&config.simulation);

    if json {
        match serde_json::to_string_pretty(&listing::device_listings(&devices)) {
            Ok(out) => println!("{}", out),
            Err(e) => {
                eprintln!("Error: Failed to serialize device list: {}", e);
                process::exit(1);
            }
        }
    } else {
        print!("{}", listing::render_list(&devices));
    }
}

fn handle_init_config() {
    let config_path = match config::Config::config_path() {
        Ok(path) => path,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            process::exit(1);
        }
    };

    if config::Config::exists() {
        println!("Config file already exists at: {}", config_path.display());
        process::exit(0);
    }

    match config::Config::ensure_default() {
        Ok(()) => {
            println!("Created default config at: {}", config_path.display());
            process::exit(0);
        }
        Err(e) => {
            eprintln!("Error: {:#}", e);
            process::exit(1);
        }
    }
}
