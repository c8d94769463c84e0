//! Binary entry point: load settings, open the custom hymn store, and drive
//! the Ratatui presenter until the operator exits.
use anyhow::Context;
use hymn_projector::{
    data_dir, ensure_schema, init_tracing, load_config, run_app, App, Hymnal, JsonVerseSource,
    Liturgy, SqliteHymnRepository,
};
use tracing::info;

fn main() -> anyhow::Result<()> {
    let dir = data_dir()?;
    let config = load_config(&dir)?;
    init_tracing(&dir, &config.log_level)?;

    let conn = ensure_schema(&config.database_path(&dir))?;
    let repo = SqliteHymnRepository::new(conn);

    let hymnal = match &config.hymnal_path {
        Some(path) => Hymnal::from_path(path)
            .with_context(|| format!("failed to load hymnal from {}", path.display()))?,
        None => Hymnal::builtin().context("failed to load the built-in hymnal")?,
    };
    let liturgy = match &config.liturgy_path {
        Some(path) => Liturgy::from_path(path)
            .with_context(|| format!("failed to load liturgy from {}", path.display()))?,
        None => Liturgy::builtin().context("failed to load the built-in liturgy")?,
    };
    let verses = match &config.bible_path {
        Some(path) => JsonVerseSource::from_path(path)
            .with_context(|| format!("failed to load scripture from {}", path.display()))?,
        None => JsonVerseSource::builtin().context("failed to load the built-in scripture")?,
    };
    info!(
        hymns = hymnal.len(),
        liturgy = liturgy.len(),
        verses = verses.len(),
        "starting presenter"
    );

    let mut app = App::new(
        Box::new(repo),
        hymnal,
        liturgy,
        Box::new(verses),
        config.search_limit,
    )?;
    run_app(&mut app)
}
