//! Hearth palette shell - main entry point.
//!
//! Loads configuration, wires the search aggregator to a directory fixture,
//! and drives the palette from stdin.

use std::path::PathBuf;
use std::sync::Arc;

use hearth_core::{config_path, PaletteConfig};
use hearth_palette::{
    CapabilitySet, FileStore, InMemoryDirectory, KeyValueStore, MemoryStore, PaletteRegistry,
    RecentItems, SearchAggregator, ORG_ADMIN,
};
use hearth_ui::backend::RuntimeBackend;
use hearth_ui::navigation::LogNavigator;
use hearth_ui::window::run_palette;
use hearth_ui::PaletteController;

// =============================================================================
// Configuration
// =============================================================================

/// Load config.toml, falling back to defaults on any error.
fn load_config() -> PaletteConfig {
    match PaletteConfig::load() {
        Ok(config) => {
            if let Some(path) = config_path() {
                tracing::info!("Config: {}", path.display());
            }
            config
        }
        Err(e) => {
            tracing::error!("Config error: {} - using defaults", e);
            PaletteConfig::default()
        }
    }
}

/// Directory fixture from the first argument or `HEARTH_DIRECTORY`.
fn load_directory() -> InMemoryDirectory {
    let path = std::env::args()
        .nth(1)
        .or_else(|| std::env::var("HEARTH_DIRECTORY").ok())
        .map(PathBuf::from);

    let Some(path) = path else {
        tracing::warn!("No directory fixture given - searches will only find quick actions");
        return InMemoryDirectory::default();
    };

    match InMemoryDirectory::load(&path) {
        Ok(directory) => {
            tracing::info!("Loaded {} records from {}", directory.len(), path.display());
            directory
        }
        Err(e) => {
            tracing::error!("Failed to load {}: {} - using an empty directory", path.display(), e);
            InMemoryDirectory::default()
        }
    }
}

/// Capabilities from `HEARTH_CAPABILITIES` (comma separated), else full admin.
fn load_capabilities() -> CapabilitySet {
    match std::env::var("HEARTH_CAPABILITIES") {
        Ok(list) => CapabilitySet::parse_list(&list),
        Err(_) => CapabilitySet::from_strs([ORG_ADMIN]),
    }
}

fn open_store() -> Arc<dyn KeyValueStore> {
    match FileStore::in_data_dir() {
        Some(store) => {
            tracing::info!("Recent items stored in {}", store.dir().display());
            Arc::new(store)
        }
        None => {
            tracing::warn!("No data directory - recent items will not persist");
            Arc::new(MemoryStore::new())
        }
    }
}

// =============================================================================
// Initialization
// =============================================================================

/// Build the controller and its collaborators.
fn create_controller(
    config: PaletteConfig,
    directory: InMemoryDirectory,
    capabilities: CapabilitySet,
    store: Arc<dyn KeyValueStore>,
) -> PaletteController {
    let capabilities = Arc::new(capabilities);
    tracing::info!("Capabilities: {} granted", capabilities.len());

    let registry = Arc::new(PaletteRegistry::crm_defaults(&config.hotkey.toggle));
    let handlers = registry.handlers();
    let quick_actions = registry.quick_actions();
    for entry in quick_actions.permitted(capabilities.as_ref()) {
        let title = entry.title.clone();
        handlers.register(entry.id.clone(), move || {
            tracing::info!("Quick action: {}", title);
            println!("-> {}", title);
        });
    }
    tracing::info!(
        "Registry: {} quick actions, {} handlers, {} bindings",
        quick_actions.len(),
        handlers.len(),
        registry.keymap().binding_count()
    );

    let aggregator = SearchAggregator::new(
        Arc::new(directory),
        quick_actions,
        capabilities.clone(),
    )
    .with_config(&config);
    let backend =
        RuntimeBackend::new(Arc::new(aggregator)).with_timeout(config.search_timeout());

    let recent = RecentItems::with_config(store, &config.recent);

    PaletteController::new(
        Arc::new(backend),
        Arc::new(recent),
        registry,
        capabilities,
        Arc::new(LogNavigator),
        config,
    )
}

// =============================================================================
// Entry Point
// =============================================================================

fn main() {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    tracing::info!("Hearth palette starting...");

    let rt = match tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()
    {
        Ok(rt) => rt,
        Err(e) => {
            tracing::error!("Failed to create tokio runtime: {}", e);
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    let config = load_config();
    tracing::info!("Toggle hotkey: {}", config.hotkey.toggle);
    let controller = create_controller(config, load_directory(), load_capabilities(), open_store());

    let stdin = tokio::io::BufReader::new(tokio::io::stdin());
    if let Err(e) = rt.block_on(run_palette(controller, stdin)) {
        tracing::error!("Shell failed: {}", e);
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hearth_core::Activation;
    use std::time::Duration;

    const DEMO_DIRECTORY: &str = include_str!("../../../demos/directory.json");

    fn demo_controller(capabilities: CapabilitySet) -> PaletteController {
        create_controller(
            PaletteConfig::default(),
            InMemoryDirectory::from_json(DEMO_DIRECTORY).unwrap(),
            capabilities,
            Arc::new(MemoryStore::new()),
        )
    }

    #[tokio::test(start_paused = true)]
    async fn test_demo_search_is_ranked() {
        let controller = demo_controller(CapabilitySet::from_strs([ORG_ADMIN]));
        controller.open();
        controller.set_query("acme");
        tokio::time::sleep(Duration::from_secs(1)).await;

        assert_eq!(
            controller.snapshot().titles(),
            vec![
                "Acme Foods",
                "Acme Foods annual contract",
                "Daniel Okafor",
                "The Acme Grand",
                "Late delivery to Acme Grand",
            ]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_demo_quick_actions_have_handlers() {
        let controller = demo_controller(CapabilitySet::from_strs(["deals:write"]));
        controller.open();
        controller.set_query("new deal");
        tokio::time::sleep(Duration::from_secs(1)).await;

        assert_eq!(controller.snapshot().titles(), vec!["Create New Deal"]);
        assert_eq!(
            controller.activate(),
            Some(Activation::ActionInvoked {
                action_id: "create_deal".to_string()
            })
        );
        assert!(!controller.is_open());
    }
}
