// Entrypoint for the archive tool.
// - Keeps `main` small: set up logging and configuration, then hand over to
//   the menu loop.
// - `RUST_LOG=debug` shows every lookup and rename as it happens.

use archive_master::{config::Config, ui::main_menu};

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let config = Config::default();
    log::debug!(
        "catalog at {}, images in {}",
        config.catalog_path.display(),
        config.image_dir.display()
    );

    // Blocks until the user picks "Exit".
    main_menu(&config)?;
    Ok(())
}
